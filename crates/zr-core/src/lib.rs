//! `zr-core` — foundational types for the `zone_router` framework.
//!
//! This crate is a dependency of every other `zr-*` crate.  It intentionally
//! has no `zr-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `ZoneId`, `WaypointId`, `MoverId`, `EntityId`         |
//! | [`math`]        | `Vec3`, `Quat`, `Transform`, shortest-arc slerp       |
//! | [`time`]        | `FrameTime`, `SimClock`, `SimConfig`                  |
//! | [`rng`]         | `SimRng` (seeded, deterministic)                      |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public data types.   |

pub mod error;
pub mod ids;
pub mod math;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use ids::{EntityId, MoverId, WaypointId, ZoneId};
pub use math::{Quat, Transform, Vec3};
pub use rng::SimRng;
pub use time::{FrameTime, SimClock, SimConfig};
