//! Traffic models — who gets asked to move where, and when.

use std::time::Duration;

use zr_core::{FrameTime, MoverId, SimRng, ZoneId};
use zr_routing::WaypointRegistry;

/// One "move mover `mover` to `zone`" command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRequest {
    pub mover: MoverId,
    pub zone:  ZoneId,
}

/// Pluggable source of move requests, polled once per frame.
pub trait TrafficModel: Send {
    /// Append this frame's requests to `out`.
    fn generate(&mut self, frame: FrameTime, registry: &WaypointRegistry, out: &mut Vec<MoveRequest>);
}

/// Never requests anything.  Drive the scheduler directly instead.
pub struct NoTraffic;

impl TrafficModel for NoTraffic {
    fn generate(&mut self, _: FrameTime, _: &WaypointRegistry, _: &mut Vec<MoveRequest>) {}
}

/// Synthetic load: bursts of random moves at a fixed simulated interval.
///
/// Once more than `interval` has passed since the last burst, it issues
/// `ceil(u * mover_count / 2)` requests for `u` uniform in `[0, 1)`.  Each
/// names a mover uniformly in `1..=mover_count` (creating it on first use)
/// and a uniformly random zone that has at least one waypoint.
pub struct RandomTraffic {
    mover_count: u32,
    interval:    Duration,
    last_burst:  Duration,
    rng:         SimRng,
}

impl RandomTraffic {
    pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(500);

    pub fn new(mover_count: u32, rng: SimRng) -> Self {
        Self {
            mover_count,
            interval: Self::DEFAULT_INTERVAL,
            last_burst: Duration::ZERO,
            rng,
        }
    }

    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn mover_count(&self) -> u32 {
        self.mover_count
    }
}

impl TrafficModel for RandomTraffic {
    fn generate(&mut self, frame: FrameTime, registry: &WaypointRegistry, out: &mut Vec<MoveRequest>) {
        if self.mover_count == 0 || frame.total.saturating_sub(self.last_burst) <= self.interval {
            return;
        }
        self.last_burst = frame.total;

        let u: f64 = self.rng.random();
        let count = (u * f64::from(self.mover_count) / 2.0).ceil() as u32;
        for _ in 0..count {
            let mover = MoverId(self.rng.gen_range(1..=self.mover_count));
            let Some(zone) = registry.random_zone(&mut self.rng) else { return };
            out.push(MoveRequest { mover, zone });
        }
    }
}
