//! Fluent builder for constructing a [`Sim`].

use std::sync::Arc;

use zr_core::SimConfig;
use zr_motion::{EntityFactory, MotionScheduler, SceneTransforms};
use zr_routing::{Router, RoutingTable, StandbyRouter, WaypointRegistry};

use crate::{NoTraffic, Sim, SimError, SimResult, TrafficModel};

/// Fluent builder for [`Sim<S, F, T, R>`].
///
/// # Required inputs
///
/// - [`SimConfig`] — frame duration, total frames, seed, …
/// - [`WaypointRegistry`] — from a builder or [`load_scene_csv`][crate::load_scene_csv]
/// - `S: SceneTransforms`, `F: EntityFactory` — the engine collaborators
///
/// # Optional inputs (have defaults)
///
/// | Method         | Default          |
/// |----------------|------------------|
/// | `.traffic(t)`  | [`NoTraffic`]    |
/// | `.router(r)`   | [`StandbyRouter`] |
///
/// # Example
///
/// ```rust,ignore
/// let (registry, scene) = load_scene_csv(path)?;
/// let scene = Arc::new(scene);
/// let mut sim = SimBuilder::new(config, registry, Arc::clone(&scene), scene)
///     .traffic(RandomTraffic::new(50, SimRng::new(config.seed)))
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<S, F, T = NoTraffic, R = StandbyRouter> {
    config:   SimConfig,
    registry: WaypointRegistry,
    scene:    S,
    factory:  F,
    traffic:  T,
    router:   R,
}

impl<S, F> SimBuilder<S, F, NoTraffic, StandbyRouter>
where
    S: SceneTransforms,
    F: EntityFactory,
{
    pub fn new(config: SimConfig, registry: WaypointRegistry, scene: S, factory: F) -> Self {
        Self {
            config,
            registry,
            scene,
            factory,
            traffic: NoTraffic,
            router: StandbyRouter,
        }
    }
}

impl<S, F, T, R> SimBuilder<S, F, T, R>
where
    S: SceneTransforms,
    F: EntityFactory,
    T: TrafficModel,
    R: Router,
{
    /// Replace the traffic model.
    pub fn traffic<T2: TrafficModel>(self, traffic: T2) -> SimBuilder<S, F, T2, R> {
        SimBuilder {
            config:   self.config,
            registry: self.registry,
            scene:    self.scene,
            factory:  self.factory,
            traffic,
            router:   self.router,
        }
    }

    /// Replace the path policy used on route-cache misses.
    pub fn router<R2: Router>(self, router: R2) -> SimBuilder<S, F, T, R2> {
        SimBuilder {
            config:   self.config,
            registry: self.registry,
            scene:    self.scene,
            factory:  self.factory,
            traffic:  self.traffic,
            router,
        }
    }

    /// Validate the config, build the routing table and scheduler, and
    /// return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<S, F, T, R>> {
        self.config.validate()?;
        if self.config.total_frames == 0 {
            return Err(SimError::Config("total_frames must be at least 1".into()));
        }

        let routing = RoutingTable::with_router(self.registry, self.router)
            .sample_window(self.config.sample_window);
        let scheduler = MotionScheduler::new(Arc::new(routing), self.scene, self.factory)
            .default_transition(self.config.default_transition);

        Ok(Sim {
            clock:     self.config.make_clock(),
            config:    self.config,
            scheduler: Arc::new(scheduler),
            traffic:   self.traffic,
            requests:  Vec::new(),
        })
    }
}
