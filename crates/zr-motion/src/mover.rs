//! The mover record and its per-tick step.

use std::time::Duration;

use tracing::debug;

use zr_core::{EntityId, FrameTime, MoverId, Transform, ZoneId};
use zr_routing::{Router, RoutingTable};

use crate::{MotionState, Phase, SceneTransforms, Segment};

/// One tracked mobile entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Mover {
    pub id:           MoverId,
    /// The rendered entity this mover drives.
    pub entity:       EntityId,
    /// Zone the mover is at, or departed from while in transit.
    pub current_zone: ZoneId,
    /// Zone the mover is heading to.  Equals `current_zone` when idle.
    pub target_zone:  ZoneId,
    pub state:        MotionState,
}

/// Outcome of one [`Mover::advance`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Path resolved; movement starts next tick.
    Planned,
    /// Still interpolating the current leg.
    Moving,
    /// Reached an intermediate waypoint and started the next leg.
    SegmentReached,
    /// Reached the final waypoint.  `elapsed` was recorded as a sample.
    Arrived { elapsed: Duration },
    /// Nothing to traverse (empty path or already idle); now idle.
    Settled,
}

impl Step {
    /// `true` if the mover is idle after this step and leaves the active set.
    #[inline]
    pub fn is_done(self) -> bool {
        matches!(self, Step::Arrived { .. } | Step::Settled)
    }
}

impl Mover {
    /// An idle mover resting in `zone`.
    pub fn idle(id: MoverId, entity: EntityId, zone: ZoneId) -> Self {
        Self {
            id,
            entity,
            current_zone: zone,
            target_zone:  zone,
            state:        MotionState::Idle,
        }
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// `true` if at rest in `zone`.
    #[inline]
    pub fn is_idle_at(&self, zone: ZoneId) -> bool {
        self.state.is_idle() && self.current_zone == zone
    }

    /// Accepts a new target only between hops: the mover must be idle and
    /// settled (`current == target`), and `zone` must differ from where it is.
    ///
    /// Returns `true` if the mover switched to `Planning`.
    pub fn retarget(&mut self, zone: ZoneId) -> bool {
        if !self.state.is_idle() || self.current_zone != self.target_zone || zone == self.current_zone {
            return false;
        }
        self.target_zone = zone;
        self.state = MotionState::Planning;
        true
    }

    /// Advance the state machine by one tick.
    ///
    /// Side effects go to `scene` (entity transform writes) and `routing`
    /// (path lookups, one estimator sample on arrival).
    pub fn advance<R, S>(
        &mut self,
        frame:              FrameTime,
        routing:            &RoutingTable<R>,
        scene:              &S,
        default_transition: Duration,
    ) -> Step
    where
        R: Router,
        S: SceneTransforms + ?Sized,
    {
        match &mut self.state {
            MotionState::Idle => Step::Settled,

            MotionState::Planning => {
                let path = routing.resolve_path(self.current_zone, self.target_zone);
                let Some(&first) = path.first() else {
                    debug!(mover = self.id.0, zone = self.target_zone.0, "no path; settled in place");
                    self.current_zone = self.target_zone;
                    self.state = MotionState::Idle;
                    return Step::Settled;
                };

                let total = routing
                    .estimated_duration(self.current_zone, self.target_zone)
                    .filter(|d| !d.is_zero())
                    .unwrap_or(default_transition);
                let legs = u32::try_from(path.len()).unwrap_or(u32::MAX);

                debug!(
                    mover = self.id.0,
                    from = self.current_zone.0,
                    to = self.target_zone.0,
                    hops = path.len(),
                    total_ms = total.as_millis() as u64,
                    "planned"
                );

                self.state = MotionState::Moving(Segment {
                    start:        scene.entity_transform(self.entity),
                    end:          scene.waypoint_transform(first),
                    path,
                    index:        0,
                    leg_duration: total / legs,
                    leg_elapsed:  Duration::ZERO,
                    started_at:   frame.total,
                });
                Step::Planned
            }

            MotionState::Moving(seg) => {
                seg.leg_elapsed += frame.elapsed;
                let fraction = seg.fraction();

                if fraction < 1.0 {
                    scene.set_entity_transform(self.entity, seg.start.interpolate(seg.end, fraction));
                    return Step::Moving;
                }

                // Leg complete: snap exactly onto the waypoint.
                scene.set_entity_transform(self.entity, seg.end);
                seg.start = seg.end;
                seg.leg_elapsed = Duration::ZERO;

                if !seg.is_last() {
                    seg.index += 1;
                    seg.end = scene.waypoint_transform(seg.waypoint());
                    return Step::SegmentReached;
                }

                let elapsed = frame.total.saturating_sub(seg.started_at);
                routing.record_sample(self.current_zone, self.target_zone, elapsed);
                debug!(
                    mover = self.id.0,
                    from = self.current_zone.0,
                    to = self.target_zone.0,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "arrived"
                );

                self.current_zone = self.target_zone;
                self.state = MotionState::Idle;
                Step::Arrived { elapsed }
            }
        }
    }
}

/// Read-only copy of a mover's externally visible state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoverSnapshot {
    pub id:           MoverId,
    pub entity:       EntityId,
    pub current_zone: ZoneId,
    pub target_zone:  ZoneId,
    pub phase:        Phase,
    pub transform:    Transform,
}
