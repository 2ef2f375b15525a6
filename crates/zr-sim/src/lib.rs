//! `zr-sim` — frame loop orchestrator for the zone_router framework.
//!
//! # Frame loop
//!
//! ```text
//! for frame in 0..config.total_frames:
//!   ① Traffic  — TrafficModel::generate → MotionScheduler::request_move
//!                (failures logged at warn, loop continues)
//!   ② Tick     — MotionScheduler::tick(frame)
//!   ③ Observe  — on_frame_end every frame, on_snapshot every N frames
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Advances movers on Rayon's thread pool.                |
//! | `serde`    | Serde derives on `SimConfig` and the id types.         |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use zr_core::{SimConfig, SimRng};
//! use zr_sim::{load_scene_csv, NoopObserver, RandomTraffic, SimBuilder};
//!
//! let config = SimConfig::default();
//! let (registry, scene) = load_scene_csv("scene.csv".as_ref())?;
//! let scene = Arc::new(scene);
//! let mut sim = SimBuilder::new(config.clone(), registry, Arc::clone(&scene), scene)
//!     .traffic(RandomTraffic::new(50, SimRng::new(config.seed)))
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod scene;
pub mod sim;
pub mod traffic;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{FrameSummary, NoopObserver, SimObserver, TracingObserver};
pub use scene::{InMemoryScene, Prefab, load_scene_csv, load_scene_reader};
pub use sim::Sim;
pub use traffic::{MoveRequest, NoTraffic, RandomTraffic, TrafficModel};
