//! `MotionScheduler` — owns every mover and advances the active ones.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use zr_core::{FrameTime, MoverId, ZoneId, time::DEFAULT_TRANSITION};
use zr_routing::{Router, RoutingTable, StandbyRouter};

use crate::{
    EntityFactory, MotionError, MotionResult, Mover, MoverCell, MoverSnapshot, MoverStore,
    SceneTransforms, Step,
};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

// ── Reports ───────────────────────────────────────────────────────────────────

/// What `request_move` did with a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Unknown mover: entity created, placed at the zone, left idle.
    Created,
    /// Idle mover: now `Planning` and in the active set.
    Retargeted,
    /// Mover already in the zone, or mid-transit.  Nothing changed.
    Ignored,
}

/// Per-tick counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    /// Movers taken from the active set this tick.
    pub advanced: usize,
    /// `Planning` → `Moving`.
    pub planned: usize,
    /// Intermediate waypoints reached.
    pub segments: usize,
    /// Final waypoints reached; one estimator sample each.
    pub arrived: usize,
    /// Went idle without moving (empty path).
    pub settled: usize,
}

impl TickReport {
    fn count(&mut self, step: Step) {
        self.advanced += 1;
        match step {
            Step::Planned          => self.planned += 1,
            Step::Moving           => {}
            Step::SegmentReached   => self.segments += 1,
            Step::Arrived { .. }   => self.arrived += 1,
            Step::Settled          => self.settled += 1,
        }
    }

    /// Sum of two partial reports.
    pub fn merge(mut self, other: TickReport) -> TickReport {
        self.advanced += other.advanced;
        self.planned += other.planned;
        self.segments += other.segments;
        self.arrived += other.arrived;
        self.settled += other.settled;
        self
    }
}

// ── MotionScheduler ───────────────────────────────────────────────────────────

/// Drives every mover's state machine once per tick.
///
/// `request_move` and `tick` both take `&self`; share the scheduler with
/// `Arc` and call `request_move` from any thread.
///
/// # Type parameters
///
/// - `S` — scene transform collaborator.
/// - `F` — entity factory collaborator.
/// - `R` — path policy of the routing table (default [`StandbyRouter`]).
pub struct MotionScheduler<S, F, R: Router = StandbyRouter> {
    routing:            Arc<RoutingTable<R>>,
    scene:              S,
    factory:            F,
    store:              MoverStore,
    default_transition: Duration,
}

impl<S, F, R> MotionScheduler<S, F, R>
where
    S: SceneTransforms,
    F: EntityFactory,
    R: Router,
{
    pub fn new(routing: Arc<RoutingTable<R>>, scene: S, factory: F) -> Self {
        Self {
            routing,
            scene,
            factory,
            store: MoverStore::new(),
            default_transition: DEFAULT_TRANSITION,
        }
    }

    /// Total traversal time used for zone pairs with no samples yet.
    pub fn default_transition(mut self, duration: Duration) -> Self {
        self.default_transition = duration;
        self
    }

    // ── Commands ──────────────────────────────────────────────────────────

    /// Ask mover `id` to go to `zone`.
    ///
    /// An unknown id is created through the entity factory, snapped to the
    /// zone's standby waypoint (if any) and left idle there.  A known mover
    /// is retargeted only if it is idle and `zone` differs from where it is;
    /// requests to a mover in transit are ignored until it arrives.
    ///
    /// # Errors
    ///
    /// - [`MotionError::InvalidZone`] for zone 0 or `ZoneId::INVALID`.
    /// - Whatever the factory returns.  The mover is not registered.
    pub fn request_move(&self, id: MoverId, zone: ZoneId) -> MotionResult<MoveOutcome> {
        if zone.0 == 0 || !zone.is_valid() {
            return Err(MotionError::InvalidZone(zone));
        }

        let (cell, created) = match self.store.get(id) {
            Some(cell) => (cell, false),
            None => self.store.get_or_try_insert_with(id, || self.create(id, zone))?,
        };

        if created {
            debug!(mover = id.0, zone = zone.0, "created");
            return Ok(MoveOutcome::Created);
        }
        Ok(self.retarget(id, &cell, zone))
    }

    fn create(&self, id: MoverId, zone: ZoneId) -> MotionResult<Mover> {
        let entity = self.factory.create_entity(id)?;
        if let Some(standby) = self.routing.standby_waypoint(zone) {
            self.scene
                .set_entity_transform(entity, self.scene.waypoint_transform(standby));
        }
        Ok(Mover::idle(id, entity, zone))
    }

    fn retarget(&self, id: MoverId, cell: &MoverCell, zone: ZoneId) -> MoveOutcome {
        let mut mover = cell.lock();
        if !mover.retarget(zone) {
            return MoveOutcome::Ignored;
        }
        debug!(mover = id.0, from = mover.current_zone.0, to = zone.0, "retargeted");
        self.store.activate(id, cell);
        MoveOutcome::Retargeted
    }

    /// Advance every active mover by one frame.
    ///
    /// Movers are visited in id order.  Movers activated concurrently with
    /// this call may be picked up now or on the next tick.
    pub fn tick(&self, frame: FrameTime) -> TickReport {
        let active = self.store.active_snapshot();

        #[cfg(not(feature = "parallel"))]
        let report = active
            .iter()
            .fold(TickReport::default(), |mut report, (id, cell)| {
                report.count(self.step(frame, *id, cell));
                report
            });

        #[cfg(feature = "parallel")]
        let report = active
            .par_iter()
            .fold(TickReport::default, |mut report, (id, cell)| {
                report.count(self.step(frame, *id, cell));
                report
            })
            .reduce(TickReport::default, TickReport::merge);

        report
    }

    fn step(&self, frame: FrameTime, id: MoverId, cell: &MoverCell) -> Step {
        let mut mover = cell.lock();
        let step = mover.advance(frame, &*self.routing, &self.scene, self.default_transition);
        if step.is_done() {
            self.store.deactivate(id);
        }
        step
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// `true` if mover `id` exists and rests idle in `zone`.
    pub fn is_idle_at(&self, id: MoverId, zone: ZoneId) -> bool {
        self.store
            .get(id)
            .is_some_and(|cell| cell.lock().is_idle_at(zone))
    }

    pub fn snapshot(&self, id: MoverId) -> Option<MoverSnapshot> {
        self.store.get(id).map(|cell| self.snapshot_of(&cell.lock()))
    }

    /// Every mover, sorted by id.
    pub fn snapshots(&self) -> Vec<MoverSnapshot> {
        self.store
            .all_cells()
            .iter()
            .map(|(_, cell)| self.snapshot_of(&cell.lock()))
            .collect()
    }

    fn snapshot_of(&self, mover: &Mover) -> MoverSnapshot {
        MoverSnapshot {
            id:           mover.id,
            entity:       mover.entity,
            current_zone: mover.current_zone,
            target_zone:  mover.target_zone,
            phase:        mover.phase(),
            transform:    self.scene.entity_transform(mover.entity),
        }
    }

    pub fn mover_count(&self) -> usize {
        self.store.len()
    }

    /// Movers currently planning or in transit.
    pub fn active_count(&self) -> usize {
        self.store.active_len()
    }

    pub fn routing(&self) -> &Arc<RoutingTable<R>> {
        &self.routing
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    pub fn store(&self) -> &MoverStore {
        &self.store
    }
}
