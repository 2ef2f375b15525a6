//! Concurrent memoized route cache.
//!
//! Keyed by the ordered pair `(origin, destination)`.  Values are shared
//! `Arc<[WaypointId]>` slices: cheap to hand to every mover that follows the
//! same route, and immutable once inserted.
//!
//! # Insert-if-absent
//!
//! A miss computes the path without holding any lock, then inserts through
//! the `DashMap` entry API.  If another caller got there first, the fresh
//! value is dropped and the resident one is returned, so every caller
//! observes the same path identity.  Duplicate computation under contention
//! is tolerated; duplicate entries are not.

use std::sync::Arc;

use dashmap::DashMap;
use rustc_hash::FxBuildHasher;
use tracing::trace;

use zr_core::{WaypointId, ZoneId};

use crate::{Router, WaypointRegistry};

/// Shared, immutable path handed to movers.
pub type Path = Arc<[WaypointId]>;

/// Ordered `(origin, destination)` key.  `(a, b)` and `(b, a)` are distinct.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct ZonePair {
    pub origin:      ZoneId,
    pub destination: ZoneId,
}

impl ZonePair {
    #[inline]
    pub fn new(origin: ZoneId, destination: ZoneId) -> Self {
        Self { origin, destination }
    }
}

impl std::fmt::Display for ZonePair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}→{}", self.origin.0, self.destination.0)
    }
}

/// Memoized `ZonePair → Path`.  No eviction: the key space is bounded by
/// zone count squared.
#[derive(Debug, Default)]
pub struct RouteCache {
    entries: DashMap<ZonePair, Path, FxBuildHasher>,
}

impl RouteCache {
    pub fn new() -> Self {
        Self { entries: DashMap::with_hasher(FxBuildHasher) }
    }

    /// Cached path for `(origin, destination)`, computing it with `router`
    /// on a miss.
    pub fn resolve<R: Router + ?Sized>(
        &self,
        registry:    &WaypointRegistry,
        router:      &R,
        origin:      ZoneId,
        destination: ZoneId,
    ) -> Path {
        let key = ZonePair::new(origin, destination);
        if let Some(hit) = self.entries.get(&key) {
            return Arc::clone(hit.value());
        }

        // Compute outside any shard lock; the router may be arbitrarily slow.
        let fresh: Path = router.route(registry, origin, destination).into();
        trace!(route = %key, hops = fresh.len(), "route cache miss");

        Arc::clone(self.entries.entry(key).or_insert(fresh).value())
    }

    /// Cached path without computing.
    pub fn get(&self, origin: ZoneId, destination: ZoneId) -> Option<Path> {
        self.entries
            .get(&ZonePair::new(origin, destination))
            .map(|e| Arc::clone(e.value()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
