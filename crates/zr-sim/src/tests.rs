//! Unit tests for zr-sim.

#[cfg(test)]
mod helpers {
    use std::sync::Arc;
    use std::time::Duration;

    use zr_core::{SimConfig, Transform, Vec3, WaypointId};
    use zr_routing::{WaypointRegistry, WaypointRegistryBuilder};

    use crate::InMemoryScene;

    pub fn config(frames: u64) -> SimConfig {
        SimConfig {
            frame_duration:           Duration::from_millis(100),
            total_frames:             frames,
            seed:                     7,
            snapshot_interval_frames: 0,
            ..SimConfig::default()
        }
    }

    /// Zones 1..=n, one waypoint each at x = 10 * i.
    pub fn line(n: u32) -> (WaypointRegistry, Arc<InMemoryScene>) {
        let mut b = WaypointRegistryBuilder::new();
        let mut scene = InMemoryScene::new();
        for i in 1..=n {
            let z = b.add_zone().unwrap();
            b.register(z, WaypointId(i)).unwrap();
            scene.insert_waypoint(WaypointId(i), Transform::at(Vec3::new(10.0 * i as f32, 0.0, 0.0)));
        }
        (b.build(), Arc::new(scene))
    }
}

// ── Scene discovery ───────────────────────────────────────────────────────────

#[cfg(test)]
mod scene {
    use std::io::Cursor;
    use std::sync::Arc;

    use zr_core::{MoverId, Quat, Transform, Vec3, WaypointId, ZoneId};
    use zr_motion::{EntityFactory, MotionError, MotionScheduler, SceneTransforms};
    use zr_routing::RoutingTable;

    use crate::{InMemoryScene, Prefab, SimError, load_scene_reader};

    const SCENE: &str = "\
zone,waypoint,x,y,z,qx,qy,qz,qw
dock,1,0,0,0,,,,
dock,2,1,0,0,,,,
yard,,,,,,,,
shelf,3,10,0,4,0,0.7071068,0,0.7071068
";

    #[test]
    fn zones_numbered_in_first_seen_order() {
        let (reg, _) = load_scene_reader(Cursor::new(SCENE)).unwrap();
        assert_eq!(reg.zone_ids(), &[ZoneId(1), ZoneId(2), ZoneId(3)]);
        assert_eq!(reg.waypoints(ZoneId(1)), &[WaypointId(1), WaypointId(2)]);
        assert!(reg.waypoints(ZoneId(2)).is_empty());
        assert_eq!(reg.standby_waypoint(ZoneId(3)), Some(WaypointId(3)));
        assert_eq!(reg.routable_zones(), &[ZoneId(1), ZoneId(3)]);
    }

    #[test]
    fn waypoint_transforms_recorded() {
        let (_, scene) = load_scene_reader(Cursor::new(SCENE)).unwrap();
        assert_eq!(scene.waypoint_count(), 3);
        assert_eq!(scene.waypoint_transform(WaypointId(2)).position, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(scene.waypoint_transform(WaypointId(1)).rotation, Quat::IDENTITY);

        let shelf = scene.waypoint_transform(WaypointId(3));
        assert_eq!(shelf.position, Vec3::new(10.0, 0.0, 4.0));
        assert!((shelf.rotation.y - 0.707_106_8).abs() < 1e-5);
    }

    #[test]
    fn empty_zone_key_rejected() {
        let csv = "zone,waypoint,x,y,z,qx,qy,qz,qw\n,1,0,0,0,,,,\n";
        let err = load_scene_reader(Cursor::new(csv)).err().unwrap();
        assert!(matches!(err, SimError::Scene { row: 1, .. }));
    }

    #[test]
    fn malformed_row_is_csv_error() {
        let csv = "zone,waypoint,x,y,z,qx,qy,qz,qw\ndock,abc,0,0,0,,,,\n";
        let err = load_scene_reader(Cursor::new(csv)).err().unwrap();
        assert!(matches!(err, SimError::Csv(_)));
    }

    #[test]
    fn factory_tags_entities() {
        let scene = InMemoryScene::new();
        let e = scene.create_entity(MoverId(9)).unwrap();
        assert_eq!(scene.marker(e), Some(MoverId(9)));
        assert_eq!(scene.entity_count(), 1);
    }

    #[test]
    fn zone_without_standby_keeps_spawn_transform() {
        let (reg, scene) = load_scene_reader(Cursor::new(SCENE)).unwrap();
        let spawn = Transform::at(Vec3::new(-3.0, 0.0, 0.0));
        let scene = Arc::new(scene.spawn_at(spawn));
        let sched = MotionScheduler::new(
            Arc::new(RoutingTable::new(reg)),
            Arc::clone(&scene),
            Arc::clone(&scene),
        );

        // yard has no waypoint, shelf does.
        sched.request_move(MoverId(1), ZoneId(2)).unwrap();
        sched.request_move(MoverId(2), ZoneId(3)).unwrap();
        assert_eq!(sched.snapshot(MoverId(1)).unwrap().transform, spawn);
        assert_eq!(
            sched.snapshot(MoverId(2)).unwrap().transform.position,
            Vec3::new(10.0, 0.0, 4.0)
        );
    }

    #[test]
    fn untagged_prefab_is_missing_marker() {
        let scene = InMemoryScene::new().prefab(Prefab::Untagged);
        let err = scene.create_entity(MoverId(9)).unwrap_err();
        assert!(matches!(err, MotionError::MissingMarker { mover: MoverId(9), .. }));
        assert_eq!(scene.entity_count(), 0);
    }

    #[test]
    fn missing_prefab_is_missing_dependency() {
        let scene = InMemoryScene::new().prefab(Prefab::Missing);
        assert!(matches!(scene.create_entity(MoverId(1)), Err(MotionError::Core(_))));
    }
}

// ── Traffic ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod traffic {
    use std::time::Duration;

    use zr_core::{FrameTime, SimRng};

    use crate::{NoTraffic, RandomTraffic, TrafficModel};

    fn at(ms: u64) -> FrameTime {
        FrameTime::new(ms / 100, Duration::from_millis(ms), Duration::from_millis(100))
    }

    #[test]
    fn no_traffic_is_silent() {
        let (reg, _) = super::helpers::line(3);
        let mut out = Vec::new();
        NoTraffic.generate(at(10_000), &reg, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn bursts_only_after_interval() {
        let (reg, _) = super::helpers::line(3);
        let mut t = RandomTraffic::new(40, SimRng::new(1));
        let mut out = Vec::new();

        t.generate(at(0), &reg, &mut out);
        t.generate(at(500), &reg, &mut out);
        assert!(out.is_empty(), "interval is exclusive");

        // Over many bursts at least one is non-empty and all are bounded.
        let mut ms = 600;
        let mut any = false;
        for _ in 0..20 {
            out.clear();
            t.generate(at(ms), &reg, &mut out);
            assert!(out.len() <= 20);
            any |= !out.is_empty();
            // Inside the interval: nothing.
            let before = out.len();
            t.generate(at(ms + 100), &reg, &mut out);
            assert_eq!(out.len(), before);
            ms += 600;
        }
        assert!(any);
    }

    #[test]
    fn requests_stay_in_range() {
        let (reg, _) = super::helpers::line(3);
        let mut t = RandomTraffic::new(10, SimRng::new(3)).interval(Duration::ZERO);
        let mut out = Vec::new();
        for ms in (100..10_000).step_by(100) {
            t.generate(at(ms), &reg, &mut out);
        }
        assert!(!out.is_empty());
        for r in &out {
            assert!((1..=10).contains(&r.mover.0));
            assert!(reg.standby_waypoint(r.zone).is_some());
        }
    }

    #[test]
    fn deterministic_for_seed() {
        let (reg, _) = super::helpers::line(4);
        let run = || {
            let mut t = RandomTraffic::new(20, SimRng::new(11));
            let mut out = Vec::new();
            for ms in (0..5_000).step_by(100) {
                t.generate(at(ms), &reg, &mut out);
            }
            out
        };
        assert_eq!(run(), run());
    }
}

// ── Sim loop ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod sim {
    use std::sync::Arc;

    use zr_core::{FrameTime, MoverId, SimRng, ZoneId};
    use zr_motion::{MoverSnapshot, Phase};

    use crate::{
        FrameSummary, InMemoryScene, NoopObserver, Prefab, RandomTraffic, SimBuilder, SimError,
        SimObserver,
    };

    #[derive(Default)]
    struct Recorder {
        starts:    u64,
        summaries: Vec<FrameSummary>,
        snapshots: Vec<(u64, usize)>,
        ended:     Option<FrameTime>,
    }

    impl SimObserver for Recorder {
        fn on_frame_start(&mut self, _frame: FrameTime) {
            self.starts += 1;
        }
        fn on_frame_end(&mut self, summary: &FrameSummary) {
            self.summaries.push(*summary);
        }
        fn on_snapshot(&mut self, frame: FrameTime, movers: &[MoverSnapshot]) {
            self.snapshots.push((frame.frame, movers.len()));
        }
        fn on_sim_end(&mut self, final_frame: FrameTime) {
            self.ended = Some(final_frame);
        }
    }

    #[test]
    fn zero_frames_rejected() {
        let (reg, scene) = super::helpers::line(2);
        let err = SimBuilder::new(super::helpers::config(0), reg, Arc::clone(&scene), scene)
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, SimError::Config(_)));
    }

    #[test]
    fn invalid_config_rejected() {
        let (reg, scene) = super::helpers::line(2);
        let mut config = super::helpers::config(10);
        config.sample_window = 0;
        let err = SimBuilder::new(config, reg, Arc::clone(&scene), scene).build().err().unwrap();
        assert!(matches!(err, SimError::Core(_)));
    }

    #[test]
    fn run_calls_every_hook() {
        let (reg, scene) = super::helpers::line(2);
        let mut config = super::helpers::config(10);
        config.snapshot_interval_frames = 5;
        let mut sim = SimBuilder::new(config, reg, Arc::clone(&scene), scene).build().unwrap();

        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        assert_eq!(rec.starts, 10);
        assert_eq!(rec.summaries.len(), 10);
        assert_eq!(rec.snapshots.iter().map(|s| s.0).collect::<Vec<_>>(), vec![0, 5]);
        assert_eq!(rec.ended.map(|f| f.frame), Some(10));
    }

    #[test]
    fn driven_move_completes_and_learns() {
        let (reg, scene) = super::helpers::line(2);
        let mut sim = SimBuilder::new(super::helpers::config(100), reg, Arc::clone(&scene), Arc::clone(&scene))
            .build()
            .unwrap();

        let sched = Arc::clone(sim.scheduler());
        sched.request_move(MoverId(1), ZoneId(1)).unwrap();
        sched.request_move(MoverId(1), ZoneId(2)).unwrap();

        // Plan on frame 0, then 5 × 100 ms frames to cover the 500 ms default.
        sim.run_frames(6, &mut NoopObserver).unwrap();

        assert!(sched.is_idle_at(MoverId(1), ZoneId(2)));
        let snap = sched.snapshot(MoverId(1)).unwrap();
        assert_eq!(snap.phase, Phase::Idle);
        assert_eq!(snap.transform.position.x, 20.0);
        assert_eq!(sched.routing().times().sample_count(ZoneId(1), ZoneId(2)), 1);
    }

    #[test]
    fn random_traffic_drives_movers() {
        let (reg, scene) = super::helpers::line(4);
        let config = super::helpers::config(200);
        let traffic = RandomTraffic::new(20, SimRng::new(config.seed));
        let mut sim = SimBuilder::new(config, reg, Arc::clone(&scene), Arc::clone(&scene))
            .traffic(traffic)
            .build()
            .unwrap();

        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        let requests: usize = rec.summaries.iter().map(|s| s.requests).sum();
        let arrived: usize = rec.summaries.iter().map(|s| s.report.arrived).sum();
        assert!(requests > 0);
        assert!(arrived > 0, "some movers should have completed a trip");
        assert!(sim.scheduler().mover_count() <= 20);
        assert_eq!(scene.entity_count(), sim.scheduler().mover_count());
        assert!(rec.summaries.iter().all(|s| s.rejected == 0));
    }

    #[test]
    fn failed_creations_are_not_fatal() {
        let (reg, _) = super::helpers::line(3);
        let scene = Arc::new(InMemoryScene::new().prefab(Prefab::Missing));
        let config = super::helpers::config(50);
        let traffic = RandomTraffic::new(10, SimRng::new(config.seed));
        let mut sim = SimBuilder::new(config, reg, Arc::clone(&scene), Arc::clone(&scene))
            .traffic(traffic)
            .build()
            .unwrap();

        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        let requests: usize = rec.summaries.iter().map(|s| s.requests).sum();
        let rejected: usize = rec.summaries.iter().map(|s| s.rejected).sum();
        assert!(requests > 0);
        assert_eq!(requests, rejected);
        assert_eq!(sim.scheduler().mover_count(), 0);
    }
}
