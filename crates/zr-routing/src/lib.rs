//! `zr-routing` — zone routing index, route cache, and traversal-time learning.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                        |
//! |---------------|-----------------------------------------------------------------|
//! | [`registry`]  | `WaypointRegistryBuilder` → immutable `WaypointRegistry`        |
//! | [`router`]    | `Router` trait, `StandbyRouter` (single-hop rule)               |
//! | [`cache`]     | `RouteCache` — concurrent memoized `ZonePair → path`            |
//! | [`estimator`] | `TransitionTimes` — bounded moving average per `ZonePair`       |
//! | [`table`]     | `RoutingTable<R>` — the façade the motion scheduler talks to    |
//! | [`error`]     | `RoutingError`, `RoutingResult<T>`                              |
//!
//! # Lifecycle
//!
//! Zones and waypoints are registered once, single-threaded, on a
//! [`WaypointRegistryBuilder`].  `build()` consumes the builder and returns a
//! [`WaypointRegistry`] with no mutating methods, so "no mutation after
//! startup" is enforced by the type system rather than by convention.
//!
//! The route cache and estimator are the only state that changes afterwards;
//! both are sharded concurrent maps and are safe to use from any thread.

pub mod cache;
pub mod error;
pub mod estimator;
pub mod registry;
pub mod router;
pub mod table;


pub use cache::{Path, RouteCache, ZonePair};
pub use error::{RoutingError, RoutingResult};
pub use estimator::TransitionTimes;
pub use registry::{WaypointRegistry, WaypointRegistryBuilder};
pub use router::{Router, StandbyRouter};
pub use table::RoutingTable;
