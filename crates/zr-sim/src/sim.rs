//! The `Sim` struct and its frame loop.

use std::sync::Arc;

use tracing::warn;

use zr_core::{FrameTime, SimClock, SimConfig};
use zr_motion::{EntityFactory, MotionScheduler, SceneTransforms};
use zr_routing::{Router, StandbyRouter};

use crate::{FrameSummary, MoveRequest, SimObserver, SimResult, TrafficModel};

/// The main simulation runner.
///
/// Each frame:
///
/// 1. **Traffic**: poll the [`TrafficModel`] and forward every request to
///    `MotionScheduler::request_move`.  Failed requests are logged and
///    skipped; they never stop the loop.
/// 2. **Tick**: advance every active mover by the frame's elapsed time.
/// 3. **Report**: `on_frame_end`, plus `on_snapshot` every
///    `config.snapshot_interval_frames` frames.
///
/// The scheduler is behind an `Arc`: clone [`Sim::scheduler`] to issue
/// requests from other threads while the loop runs.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<S, F, T, R: Router = StandbyRouter> {
    pub config: SimConfig,

    /// Fixed-step frame clock.
    pub clock: SimClock,

    pub scheduler: Arc<MotionScheduler<S, F, R>>,

    pub traffic: T,

    /// Reused request buffer.
    pub(crate) requests: Vec<MoveRequest>,
}

impl<S, F, T, R> Sim<S, F, T, R>
where
    S: SceneTransforms,
    F: EntityFactory,
    T: TrafficModel,
    R: Router,
{
    // ── Public API ────────────────────────────────────────────────────────

    /// Run from the current frame up to `config.total_frames`.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while self.clock.frame().frame < self.config.total_frames {
            self.step(observer);
        }
        observer.on_sim_end(self.clock.frame());
        Ok(())
    }

    /// Run exactly `n` frames from the current position (ignores
    /// `total_frames`).
    pub fn run_frames<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer);
        }
        Ok(())
    }

    pub fn scheduler(&self) -> &Arc<MotionScheduler<S, F, R>> {
        &self.scheduler
    }

    // ── Core frame processing ─────────────────────────────────────────────

    fn step<O: SimObserver>(&mut self, observer: &mut O) {
        let frame = self.clock.frame();
        observer.on_frame_start(frame);

        let summary = self.process_frame(frame);
        observer.on_frame_end(&summary);

        let interval = self.config.snapshot_interval_frames;
        if interval > 0 && frame.frame.is_multiple_of(interval) {
            observer.on_snapshot(frame, &self.scheduler.snapshots());
        }

        self.clock.advance();
    }

    fn process_frame(&mut self, frame: FrameTime) -> FrameSummary {
        self.requests.clear();
        self.traffic
            .generate(frame, self.scheduler.routing().registry(), &mut self.requests);

        let mut rejected = 0;
        for req in &self.requests {
            if let Err(e) = self.scheduler.request_move(req.mover, req.zone) {
                warn!(mover = req.mover.0, zone = req.zone.0, error = %e, "move request rejected");
                rejected += 1;
            }
        }

        let report = self.scheduler.tick(frame);

        FrameSummary {
            frame,
            report,
            requests: self.requests.len(),
            rejected,
            movers: self.scheduler.mover_count(),
            moving: self.scheduler.active_count(),
        }
    }
}
