//! Simulation time model.
//!
//! # Design
//!
//! The motion layer is driven by a frame loop: every tick it receives a
//! [`FrameTime`] holding the total simulated time and the time elapsed since
//! the previous tick.  `SimClock` produces these at a fixed step:
//!
//!   total(frame n) = n * frame_duration
//!
//! A host engine with a variable frame rate builds `FrameTime` values itself
//! and never touches `SimClock`; the scheduler only sees `FrameTime`.
//!
//! `std::time::Duration` is the time unit everywhere.  It is integer
//! nanoseconds, so accumulated frame time never drifts.

use std::fmt;
use std::time::Duration;

use crate::{CoreError, CoreResult};

// ── FrameTime ─────────────────────────────────────────────────────────────────

/// What one tick of the motion scheduler sees.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct FrameTime {
    /// Zero-based tick counter.
    pub frame: u64,
    /// Total simulated time at this tick.
    pub total: Duration,
    /// Time since the previous tick.  Zero on the first tick.
    pub elapsed: Duration,
}

impl FrameTime {
    #[inline]
    pub fn new(frame: u64, total: Duration, elapsed: Duration) -> Self {
        Self { frame, total, elapsed }
    }

    /// The frame that follows `self` after `elapsed` more time.
    #[inline]
    pub fn next(self, elapsed: Duration) -> Self {
        Self {
            frame:   self.frame + 1,
            total:   self.total + elapsed,
            elapsed,
        }
    }
}

impl fmt::Display for FrameTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F{} ({} ms)", self.frame, self.total.as_millis())
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Fixed-step frame clock.
///
/// `SimClock` is cheap to copy and intentionally holds no heap data.
#[derive(Clone, Debug)]
pub struct SimClock {
    /// Simulated time per frame.
    pub frame_duration: Duration,
    /// The current frame — advanced by `SimClock::advance()` each iteration.
    pub current: FrameTime,
}

impl SimClock {
    /// Create a clock at frame 0 with the given step.
    pub fn new(frame_duration: Duration) -> Self {
        Self {
            frame_duration,
            current: FrameTime::default(),
        }
    }

    /// Advance the clock by one frame.
    #[inline]
    pub fn advance(&mut self) {
        self.current = self.current.next(self.frame_duration);
    }

    #[inline]
    pub fn frame(&self) -> FrameTime {
        self.current
    }

    /// Frames needed to cover `span` (rounds up).
    #[inline]
    pub fn frames_for(&self, span: Duration) -> u64 {
        let step = self.frame_duration.as_nanos().max(1);
        span.as_nanos().div_ceil(step) as u64
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.current)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Number of samples the transition-time estimator averages over before it
/// switches to the fixed-denominator decay rule.
pub const DEFAULT_SAMPLE_WINDOW: u32 = 100;

/// Total traversal time assumed for a zone pair with no recorded samples.
pub const DEFAULT_TRANSITION: Duration = Duration::from_millis(500);

/// Top-level simulation configuration.
///
/// Typically loaded from a JSON file by the application crate and passed to
/// the simulation builder.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Simulated time per frame.  Default: 16 ms (~60 fps).
    pub frame_duration: Duration,

    /// Total frames to simulate with `Sim::run`.
    pub total_frames: u64,

    /// Master RNG seed.  The same seed always produces identical traffic.
    pub seed: u64,

    /// Fallback total traversal time when a zone pair has no samples yet.
    pub default_transition: Duration,

    /// Estimator window: samples accumulated before the decay rule applies.
    pub sample_window: u32,

    /// Emit a mover snapshot every N frames.  0 disables snapshots.
    pub snapshot_interval_frames: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            frame_duration:           Duration::from_millis(16),
            total_frames:             3_600,
            seed:                     42,
            default_transition:       DEFAULT_TRANSITION,
            sample_window:            DEFAULT_SAMPLE_WINDOW,
            snapshot_interval_frames: 60,
        }
    }
}

impl SimConfig {
    /// Reject values that would stall the frame loop or divide by zero.
    pub fn validate(&self) -> CoreResult<()> {
        if self.frame_duration.is_zero() {
            return Err(CoreError::Config("frame_duration must be non-zero".into()));
        }
        if self.default_transition.is_zero() {
            return Err(CoreError::Config("default_transition must be non-zero".into()));
        }
        if self.sample_window == 0 {
            return Err(CoreError::Config("sample_window must be at least 1".into()));
        }
        Ok(())
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.frame_duration)
    }
}
