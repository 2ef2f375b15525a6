//! In-memory scene and CSV scene discovery.
//!
//! # CSV format
//!
//! One row per waypoint, in scene encounter order.  Zones are numbered
//! sequentially from 1 in the order their key first appears.  A row with an
//! empty `waypoint` column declares a zone with no waypoints.
//!
//! ```csv
//! zone,waypoint,x,y,z,qx,qy,qz,qw
//! dock,1,0,0,0,,,,
//! dock,2,1,0,0,,,,
//! yard,,,,,,,,
//! shelf,3,10,0,4,0,0.7071068,0,0.7071068
//! ```
//!
//! Position columns default to 0 and rotation columns to the identity
//! quaternion when empty.

use std::io::Read;
use std::path::Path;
use std::sync::atomic::{AtomicU32, Ordering};

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use serde::Deserialize;
use tracing::debug;

use zr_core::{CoreError, EntityId, MoverId, Quat, Transform, Vec3, WaypointId, ZoneId};
use zr_motion::{EntityFactory, MotionError, MotionResult, SceneTransforms};
use zr_routing::{WaypointRegistry, WaypointRegistryBuilder};

use crate::{SimError, SimResult};

// ── InMemoryScene ─────────────────────────────────────────────────────────────

/// What an instantiated entity looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Prefab {
    /// Instantiates and carries the mover marker.
    #[default]
    Tagged,
    /// Instantiates but has no marker component to tag.
    Untagged,
    /// Not loaded; instantiation is impossible.
    Missing,
}

#[derive(Debug, Clone, Copy)]
struct EntityRecord {
    transform: Transform,
    marker:    MoverId,
}

/// Scene collaborator backed by plain maps.
///
/// Waypoint transforms are fixed at construction.  Entity transforms live
/// behind a single `parking_lot::Mutex`; every call holds it only for one
/// lookup or insert.
#[derive(Default)]
pub struct InMemoryScene {
    waypoints:   FxHashMap<WaypointId, Transform>,
    entities:    Mutex<FxHashMap<EntityId, EntityRecord>>,
    next_entity: AtomicU32,
    prefab:      Prefab,
    spawn:       Transform,
}

impl InMemoryScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prefab(mut self, prefab: Prefab) -> Self {
        self.prefab = prefab;
        self
    }

    /// Transform given to freshly instantiated entities.
    pub fn spawn_at(mut self, transform: Transform) -> Self {
        self.spawn = transform;
        self
    }

    pub fn insert_waypoint(&mut self, waypoint: WaypointId, transform: Transform) {
        self.waypoints.insert(waypoint, transform);
    }

    pub fn waypoint_count(&self) -> usize {
        self.waypoints.len()
    }

    pub fn entity_count(&self) -> usize {
        self.entities.lock().len()
    }

    /// The mover an entity was tagged with.
    pub fn marker(&self, entity: EntityId) -> Option<MoverId> {
        self.entities.lock().get(&entity).map(|e| e.marker)
    }
}

impl SceneTransforms for InMemoryScene {
    /// Unknown waypoints resolve to the identity transform.
    fn waypoint_transform(&self, waypoint: WaypointId) -> Transform {
        self.waypoints.get(&waypoint).copied().unwrap_or_default()
    }

    fn entity_transform(&self, entity: EntityId) -> Transform {
        self.entities
            .lock()
            .get(&entity)
            .map(|e| e.transform)
            .unwrap_or_default()
    }

    fn set_entity_transform(&self, entity: EntityId, transform: Transform) {
        if let Some(e) = self.entities.lock().get_mut(&entity) {
            e.transform = transform;
        }
    }
}

impl EntityFactory for InMemoryScene {
    fn create_entity(&self, mover: MoverId) -> MotionResult<EntityId> {
        if self.prefab == Prefab::Missing {
            return Err(CoreError::MissingDependency("mover prefab is not loaded".into()).into());
        }
        let entity = EntityId(self.next_entity.fetch_add(1, Ordering::Relaxed));
        if self.prefab == Prefab::Untagged {
            return Err(MotionError::MissingMarker { mover, entity });
        }
        self.entities
            .lock()
            .insert(entity, EntityRecord { transform: self.spawn, marker: mover });
        Ok(entity)
    }
}

// ── CSV discovery ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct SceneRecord {
    zone:     String,
    waypoint: Option<u32>,
    x:        Option<f32>,
    y:        Option<f32>,
    z:        Option<f32>,
    qx:       Option<f32>,
    qy:       Option<f32>,
    qz:       Option<f32>,
    qw:       Option<f32>,
}

impl SceneRecord {
    fn transform(&self) -> Transform {
        let position = Vec3::new(
            self.x.unwrap_or(0.0),
            self.y.unwrap_or(0.0),
            self.z.unwrap_or(0.0),
        );
        let rotation = match (self.qx, self.qy, self.qz, self.qw) {
            (None, None, None, None) => Quat::IDENTITY,
            (x, y, z, w) => Quat::new(
                x.unwrap_or(0.0),
                y.unwrap_or(0.0),
                z.unwrap_or(0.0),
                w.unwrap_or(1.0),
            )
            .normalize(),
        };
        Transform::new(position, rotation)
    }
}

/// Discover zones and waypoints from a scene table on disk.
pub fn load_scene_csv(path: &Path) -> SimResult<(WaypointRegistry, InMemoryScene)> {
    let file = std::fs::File::open(path)?;
    load_scene_reader(file)
}

/// Like [`load_scene_csv`] but accepts any `Read` source.
///
/// Returns the frozen registry and a scene holding every waypoint transform.
pub fn load_scene_reader<R: Read>(reader: R) -> SimResult<(WaypointRegistry, InMemoryScene)> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut builder = WaypointRegistryBuilder::new();
    let mut scene = InMemoryScene::new();
    let mut zones: FxHashMap<String, ZoneId> = FxHashMap::default();

    for (i, result) in csv_reader.deserialize::<SceneRecord>().enumerate() {
        let row = result?;
        let key = row.zone.trim();
        if key.is_empty() {
            return Err(SimError::Scene { row: i + 1, reason: "empty zone key".into() });
        }

        let zone = match zones.get(key) {
            Some(&zone) => zone,
            None => {
                let zone = builder.add_zone()?;
                debug!(zone = zone.0, key, "discovered zone");
                zones.insert(key.to_owned(), zone);
                zone
            }
        };

        if let Some(raw) = row.waypoint {
            let waypoint = WaypointId(raw);
            builder.register(zone, waypoint).map_err(|e| SimError::Scene {
                row:    i + 1,
                reason: e.to_string(),
            })?;
            scene.insert_waypoint(waypoint, row.transform());
        }
    }

    let registry = builder.build();
    debug!(
        zones = registry.zone_count(),
        waypoints = registry.waypoint_count(),
        "scene loaded"
    );
    Ok((registry, scene))
}
