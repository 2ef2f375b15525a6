//! Per-zone-pair traversal time estimator.
//!
//! # Update rule
//!
//! With window `N` (default 100):
//!
//! ```text
//! count < N :  total += sample; count += 1            avg = total / count
//! count == N:  total  = avg * (N - 1) + sample        avg = total / N
//! ```
//!
//! Once full, this is an exponential decay with weight `1/N` on the newest
//! sample: bounded memory, slow adaptation.  It is not a sliding window.

use std::time::Duration;

use dashmap::DashMap;
use rustc_hash::FxBuildHasher;
use tracing::trace;

use zr_core::ZoneId;
use zr_core::time::DEFAULT_SAMPLE_WINDOW;

use crate::ZonePair;

/// Running average for one zone pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct TransitionTime {
    count: u32,
    total: Duration,
}

impl TransitionTime {
    fn average(&self) -> Option<Duration> {
        (self.count > 0).then(|| self.total / self.count)
    }

    fn add_sample(&mut self, sample: Duration, window: u32) {
        if self.count < window {
            self.total += sample;
            self.count += 1;
        } else {
            let avg = self.total / self.count;
            self.total = avg * (window - 1) + sample;
        }
    }
}

/// Concurrent `ZonePair → moving average` store.
#[derive(Debug)]
pub struct TransitionTimes {
    samples: DashMap<ZonePair, TransitionTime, FxBuildHasher>,
    window:  u32,
}

impl Default for TransitionTimes {
    fn default() -> Self {
        Self::new()
    }
}

impl TransitionTimes {
    /// Estimator with the default 100-sample window.
    pub fn new() -> Self {
        Self::with_window(DEFAULT_SAMPLE_WINDOW)
    }

    /// Estimator with a custom window.  A window of 0 is treated as 1.
    pub fn with_window(window: u32) -> Self {
        Self {
            samples: DashMap::with_hasher(FxBuildHasher),
            window:  window.max(1),
        }
    }

    pub fn window(&self) -> u32 {
        self.window
    }

    /// Feed one observed traversal.
    ///
    /// The read-modify-write happens under the key's shard lock, so movers
    /// completing the same route in the same tick never lose a sample.
    pub fn record(&self, origin: ZoneId, destination: ZoneId, sample: Duration) {
        let key = ZonePair::new(origin, destination);
        let mut entry = self.samples.entry(key).or_default();
        entry.add_sample(sample, self.window);
        trace!(
            route = %key,
            sample_ms = sample.as_millis() as u64,
            samples = entry.count,
            "transition sample recorded"
        );
    }

    /// Current average, or `None` if no sample has been recorded.
    pub fn estimate(&self, origin: ZoneId, destination: ZoneId) -> Option<Duration> {
        self.samples
            .get(&ZonePair::new(origin, destination))
            .and_then(|t| t.average())
    }

    /// Samples retained for the pair (saturates at the window size).
    pub fn sample_count(&self, origin: ZoneId, destination: ZoneId) -> u32 {
        self.samples
            .get(&ZonePair::new(origin, destination))
            .map_or(0, |t| t.count)
    }

    /// Number of zone pairs with at least one sample.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
