//! Per-zone waypoint lists and standby designation.
//!
//! # Two phases
//!
//! ```text
//! WaypointRegistryBuilder   (mutable, single-threaded, scene discovery)
//!         │ build()
//!         ▼
//! WaypointRegistry          (immutable, shared by reference / Arc)
//! ```
//!
//! The standby waypoint of a zone is the first waypoint registered for it.
//! Later registrations never displace it.  Unregistering the standby clears
//! the designation; it is not handed to the next waypoint in the list.

use rustc_hash::FxHashMap;

use zr_core::{SimRng, WaypointId, ZoneId};

use crate::{RoutingError, RoutingResult};

// ── Builder ───────────────────────────────────────────────────────────────────

/// Mutable registration phase.  Consumed by [`build`](Self::build).
#[derive(Debug)]
pub struct WaypointRegistryBuilder {
    waypoints: FxHashMap<ZoneId, Vec<WaypointId>>,
    standby:   FxHashMap<ZoneId, WaypointId>,
    /// Zones in first-seen order, so iteration and random draws are
    /// reproducible for a fixed seed.
    order:     Vec<ZoneId>,
    next_zone: ZoneId,
}

impl Default for WaypointRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl WaypointRegistryBuilder {
    pub fn new() -> Self {
        Self {
            waypoints: FxHashMap::default(),
            standby:   FxHashMap::default(),
            order:     Vec::new(),
            next_zone: ZoneId::FIRST,
        }
    }

    /// Declare a new zone and return its id.
    ///
    /// Ids are sequential from [`ZoneId::FIRST`], skipping any id already
    /// used by an explicit [`register`](Self::register) call.
    ///
    /// # Errors
    ///
    /// [`RoutingError::ZonesExhausted`] once the next id would be
    /// `ZoneId::INVALID`.
    pub fn add_zone(&mut self) -> RoutingResult<ZoneId> {
        let zone = self.next_zone;
        if !zone.is_valid() {
            return Err(RoutingError::ZonesExhausted);
        }
        self.touch(zone);
        Ok(zone)
    }

    /// Append `waypoint` to `zone`'s list.  The first waypoint registered for
    /// a zone becomes its standby waypoint.
    ///
    /// # Errors
    ///
    /// [`RoutingError::InvalidWaypoint`] for `WaypointId::INVALID` (the
    /// absent waypoint) and [`RoutingError::InvalidZone`] for zone 0 or
    /// `ZoneId::INVALID`.  The builder is unchanged on error.
    pub fn register(&mut self, zone: ZoneId, waypoint: WaypointId) -> RoutingResult<()> {
        if !waypoint.is_valid() {
            return Err(RoutingError::InvalidWaypoint { zone });
        }
        if !zone.is_valid() || zone.0 == 0 {
            return Err(RoutingError::InvalidZone(zone));
        }

        self.touch(zone);
        self.waypoints.entry(zone).or_default().push(waypoint);
        self.standby.entry(zone).or_insert(waypoint);
        Ok(())
    }

    /// Remove one registration of `waypoint` from `zone`.
    ///
    /// Returns `false` if it was not registered there.
    pub fn unregister(&mut self, zone: ZoneId, waypoint: WaypointId) -> bool {
        let Some(list) = self.waypoints.get_mut(&zone) else {
            return false;
        };
        let Some(pos) = list.iter().position(|&w| w == waypoint) else {
            return false;
        };
        list.remove(pos);

        if self.standby.get(&zone) == Some(&waypoint) {
            self.standby.remove(&zone);
        }
        true
    }

    /// Standby waypoint as currently registered (builder view).
    pub fn standby_waypoint(&self, zone: ZoneId) -> Option<WaypointId> {
        self.standby.get(&zone).copied()
    }

    /// Freeze the registry.
    pub fn build(self) -> WaypointRegistry {
        let routable: Vec<ZoneId> = self
            .order
            .iter()
            .copied()
            .filter(|z| self.waypoints.get(z).is_some_and(|l| !l.is_empty()))
            .collect();
        let waypoint_count = self.waypoints.values().map(Vec::len).sum();

        WaypointRegistry {
            waypoints: self.waypoints,
            standby:   self.standby,
            zones:     self.order,
            routable,
            waypoint_count,
        }
    }

    fn touch(&mut self, zone: ZoneId) {
        if !self.order.contains(&zone) {
            self.order.push(zone);
        }
        if zone >= self.next_zone {
            self.next_zone = zone.next();
        }
    }
}

// ── Frozen registry ───────────────────────────────────────────────────────────

/// Read-only zone/waypoint index.  Construct with [`WaypointRegistryBuilder`].
///
/// `WaypointRegistry` is `Send + Sync` and has no interior mutability, so it
/// can be read from any number of threads without locking.
#[derive(Debug, Default)]
pub struct WaypointRegistry {
    waypoints:      FxHashMap<ZoneId, Vec<WaypointId>>,
    standby:        FxHashMap<ZoneId, WaypointId>,
    zones:          Vec<ZoneId>,
    /// Zones owning at least one waypoint, in first-seen order.
    routable:       Vec<ZoneId>,
    waypoint_count: usize,
}

impl WaypointRegistry {
    /// An empty registry.  Every route resolves to the empty path.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The designated resting waypoint for `zone`, if any.
    #[inline]
    pub fn standby_waypoint(&self, zone: ZoneId) -> Option<WaypointId> {
        self.standby.get(&zone).copied()
    }

    /// All waypoints of `zone` in registration order.
    pub fn waypoints(&self, zone: ZoneId) -> &[WaypointId] {
        self.waypoints.get(&zone).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every declared zone, in first-seen order.
    pub fn zone_ids(&self) -> &[ZoneId] {
        &self.zones
    }

    /// Zones with at least one waypoint, in first-seen order.
    pub fn routable_zones(&self) -> &[ZoneId] {
        &self.routable
    }

    pub fn contains_zone(&self, zone: ZoneId) -> bool {
        self.zones.contains(&zone)
    }

    pub fn zone_count(&self) -> usize {
        self.zones.len()
    }

    pub fn waypoint_count(&self) -> usize {
        self.waypoint_count
    }

    /// Uniform draw over zones that own at least one waypoint.
    ///
    /// Returns `None` when no zone has a waypoint.
    pub fn random_zone(&self, rng: &mut SimRng) -> Option<ZoneId> {
        rng.choose(&self.routable).copied()
    }
}
