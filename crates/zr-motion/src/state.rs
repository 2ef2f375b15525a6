//! Per-mover motion state.

use std::fmt;
use std::time::Duration;

use zr_core::{Transform, WaypointId};
use zr_routing::Path;

/// The motion state of a single mover, stored by value in its record.
///
/// ```text
///            request_move (target ≠ current)
///   Idle ───────────────────────────────────► Planning
///    ▲                                          │ tick: resolve path
///    │ empty path                               │
///    ├──────────────────────────────────────────┤
///    │                                          ▼ non-empty path
///    └───────────── last segment reached ──── Moving ◄─┐
///                                               │      │ next segment
///                                               └──────┘
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum MotionState {
    /// At rest in `current_zone`; not in the active set.
    #[default]
    Idle,
    /// Target changed; path not yet resolved.  Resolved on the next tick.
    Planning,
    /// Interpolating along the resolved path.
    Moving(Segment),
}

impl MotionState {
    #[inline]
    pub fn phase(&self) -> Phase {
        match self {
            MotionState::Idle       => Phase::Idle,
            MotionState::Planning   => Phase::Planning,
            MotionState::Moving(_)  => Phase::Moving,
        }
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        matches!(self, MotionState::Idle)
    }
}

/// Fieldless view of [`MotionState`] for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Idle,
    Planning,
    Moving,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Idle     => "idle",
            Phase::Planning => "planning",
            Phase::Moving   => "moving",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Interpolation data for the leg currently being traversed.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// The whole route, shared with the route cache.
    pub path: Path,

    /// Index into `path` of the waypoint this leg ends at.
    pub index: usize,

    /// Transform at the start of this leg (entity transform for leg 0,
    /// previous waypoint afterwards).
    pub start: Transform,

    /// Transform of `path[index]`.
    pub end: Transform,

    /// Time allotted to each leg: total estimate / path length.
    pub leg_duration: Duration,

    /// Time spent on this leg so far.  Reset to zero at every waypoint.
    pub leg_elapsed: Duration,

    /// `FrameTime::total` of the tick that planned the move.
    pub started_at: Duration,
}

impl Segment {
    /// Fraction of the current leg completed, in `[0.0, 1.0]`.
    ///
    /// A zero-length leg counts as complete.
    pub fn fraction(&self) -> f32 {
        if self.leg_duration.is_zero() {
            return 1.0;
        }
        (self.leg_elapsed.as_secs_f32() / self.leg_duration.as_secs_f32()).min(1.0)
    }

    /// The waypoint this leg ends at.
    #[inline]
    pub fn waypoint(&self) -> WaypointId {
        self.path[self.index]
    }

    /// `true` if this is the final leg of the route.
    #[inline]
    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.path.len()
    }
}
