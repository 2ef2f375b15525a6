//! Routing trait and the default single-hop rule.
//!
//! # Pluggability
//!
//! [`RouteCache`](crate::RouteCache) computes missing entries through the
//! [`Router`] trait, so a richer policy (e.g. entry/exit waypoints traversed
//! between zones) can be swapped in without touching the cache or the
//! motion scheduler.  The shipped [`StandbyRouter`] goes straight to the
//! destination's standby waypoint.

use zr_core::{WaypointId, ZoneId};

use crate::WaypointRegistry;

/// Pluggable path resolution.
///
/// # Contract
///
/// - Deterministic: the same `(registry, origin, destination)` always yields
///   an element-wise equal path.  The cache may call `route` more than once
///   for a key under contention and keeps only the first result.
/// - Infallible: an empty `Vec` means "no movement needed".
/// - `Send + Sync`: called from whichever thread misses the cache.
pub trait Router: Send + Sync {
    fn route(
        &self,
        registry:    &WaypointRegistry,
        origin:      ZoneId,
        destination: ZoneId,
    ) -> Vec<WaypointId>;
}

/// Single-hop rule: the path is the destination's standby waypoint, or empty
/// when the destination has none.  The origin zone is not consulted.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandbyRouter;

impl Router for StandbyRouter {
    fn route(
        &self,
        registry:     &WaypointRegistry,
        _origin:      ZoneId,
        destination:  ZoneId,
    ) -> Vec<WaypointId> {
        registry.standby_waypoint(destination).into_iter().collect()
    }
}
