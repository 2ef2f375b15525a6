//! `zr-motion` — mover state machine and per-tick interpolation scheduler.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                           |
//! |---------------|--------------------------------------------------------------------|
//! | [`scene`]     | `SceneTransforms`, `EntityFactory` — the engine-side collaborators |
//! | [`state`]     | `MotionState` (`Idle` / `Planning` / `Moving`), `Segment`, `Phase` |
//! | [`mover`]     | `Mover` record and its `advance` step, `Step`                      |
//! | [`store`]     | `MoverStore` — "all movers" and "active movers" registries         |
//! | [`scheduler`] | `MotionScheduler` — `request_move`, `tick`, read-only queries      |
//! | [`error`]     | `MotionError`, `MotionResult<T>`                                   |
//!
//! # Movement model
//!
//! 1. `MotionScheduler::request_move` creates an unknown mover in place at
//!    the target zone's standby waypoint, or flags an idle one as `Planning`
//!    and adds it to the active set.
//! 2. Each `tick`, a `Planning` mover resolves its path and segment duration
//!    and becomes `Moving`.  It does not move until the next tick, so the
//!    frame in which the request landed never counts toward travel time.
//! 3. A `Moving` mover interpolates toward the current segment's end.  When
//!    the last segment completes, the total traversal time is fed back into
//!    the routing table's estimator and the mover leaves the active set.
//!
//! # Threading
//!
//! `request_move` may be called from any thread while another thread runs
//! `tick`.  Each mover sits behind its own mutex; active-set membership is
//! only changed while holding that mutex, so a retarget can never be lost to
//! a concurrent arrival.

pub mod error;
pub mod mover;
pub mod scene;
pub mod scheduler;
pub mod state;
pub mod store;


pub use error::{MotionError, MotionResult};
pub use mover::{Mover, MoverSnapshot, Step};
pub use scene::{EntityFactory, SceneTransforms};
pub use scheduler::{MotionScheduler, MoveOutcome, TickReport};
pub use state::{MotionState, Phase, Segment};
pub use store::{MoverCell, MoverStore};
