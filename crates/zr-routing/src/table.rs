//! `RoutingTable` — the routing façade used by the motion scheduler.

use std::time::Duration;

use zr_core::{SimRng, WaypointId, ZoneId};

use crate::{Path, RouteCache, Router, StandbyRouter, TransitionTimes, WaypointRegistry};

/// Frozen waypoint registry plus the two learned/memoized stores.
///
/// All methods take `&self`; share it across threads with `Arc`.
///
/// # Type parameter
///
/// `R` is the path policy used on cache misses (default [`StandbyRouter`]).
/// Swap it at compile time for a different rule with no runtime overhead.
pub struct RoutingTable<R: Router = StandbyRouter> {
    registry: WaypointRegistry,
    router:   R,
    routes:   RouteCache,
    times:    TransitionTimes,
}

impl RoutingTable<StandbyRouter> {
    /// Table using the single-hop standby rule and a 100-sample window.
    pub fn new(registry: WaypointRegistry) -> Self {
        Self::with_router(registry, StandbyRouter)
    }
}

impl<R: Router> RoutingTable<R> {
    pub fn with_router(registry: WaypointRegistry, router: R) -> Self {
        Self {
            registry,
            router,
            routes: RouteCache::new(),
            times:  TransitionTimes::new(),
        }
    }

    /// Replace the estimator window (see [`TransitionTimes::with_window`]).
    pub fn sample_window(mut self, window: u32) -> Self {
        self.times = TransitionTimes::with_window(window);
        self
    }

    // ── Routing ───────────────────────────────────────────────────────────

    /// Ordered waypoints to traverse from `origin` to `destination`.
    ///
    /// Memoized: repeated calls return the same `Arc`.  An empty path means
    /// no movement is needed.
    pub fn resolve_path(&self, origin: ZoneId, destination: ZoneId) -> Path {
        self.routes.resolve(&self.registry, &self.router, origin, destination)
    }

    #[inline]
    pub fn standby_waypoint(&self, zone: ZoneId) -> Option<WaypointId> {
        self.registry.standby_waypoint(zone)
    }

    /// Uniform draw over zones that own at least one waypoint.
    pub fn random_zone(&self, rng: &mut SimRng) -> Option<ZoneId> {
        self.registry.random_zone(rng)
    }

    // ── Transition times ──────────────────────────────────────────────────

    /// Current moving-average traversal time, or `None` before any sample.
    pub fn estimated_duration(&self, origin: ZoneId, destination: ZoneId) -> Option<Duration> {
        self.times.estimate(origin, destination)
    }

    /// Feed one observed traversal time.  Safe from any thread.
    pub fn record_sample(&self, origin: ZoneId, destination: ZoneId, elapsed: Duration) {
        self.times.record(origin, destination, elapsed);
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn router(&self) -> &R {
        &self.router
    }

    pub fn registry(&self) -> &WaypointRegistry {
        &self.registry
    }

    pub fn routes(&self) -> &RouteCache {
        &self.routes
    }

    pub fn times(&self) -> &TransitionTimes {
        &self.times
    }
}
