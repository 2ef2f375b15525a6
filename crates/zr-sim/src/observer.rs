//! Simulation observer trait for progress reporting and data collection.

use tracing::info;

use zr_core::FrameTime;
use zr_motion::{MoverSnapshot, TickReport};

/// What happened during one frame, handed to [`SimObserver::on_frame_end`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameSummary {
    pub frame:    FrameTime,
    /// Counters from `MotionScheduler::tick`.
    pub report:   TickReport,
    /// Move requests issued by the traffic model this frame.
    pub requests: usize,
    /// Requests that failed (factory errors, invalid zones).
    pub rejected: usize,
    /// Movers known to the scheduler after the tick.
    pub movers:   usize,
    /// Movers still planning or in transit after the tick.
    pub moving:   usize,
}

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// frame loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
pub trait SimObserver {
    /// Called at the very start of each frame, before traffic is generated.
    fn on_frame_start(&mut self, _frame: FrameTime) {}

    /// Called after the scheduler tick.
    fn on_frame_end(&mut self, _summary: &FrameSummary) {}

    /// Called every `config.snapshot_interval_frames` frames with every
    /// mover, sorted by id.
    fn on_snapshot(&mut self, _frame: FrameTime, _movers: &[MoverSnapshot]) {}

    /// Called once after the final frame completes.
    fn on_sim_end(&mut self, _final_frame: FrameTime) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// Logs a one-line summary every `interval` frames at `info` level.
pub struct TracingObserver {
    interval: u64,
    arrived:  usize,
}

impl TracingObserver {
    pub fn new(interval: u64) -> Self {
        Self { interval: interval.max(1), arrived: 0 }
    }
}

impl SimObserver for TracingObserver {
    fn on_frame_end(&mut self, summary: &FrameSummary) {
        self.arrived += summary.report.arrived;
        if summary.frame.frame.is_multiple_of(self.interval) {
            info!(
                frame = summary.frame.frame,
                total_ms = summary.frame.total.as_millis() as u64,
                movers = summary.movers,
                moving = summary.moving,
                "frame"
            );
        }
    }

    fn on_sim_end(&mut self, final_frame: FrameTime) {
        info!(frames = final_frame.frame, arrivals = self.arrived, "simulation finished");
    }
}
