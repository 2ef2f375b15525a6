//! traffic — random zone-to-zone traffic over a small synthetic scene.
//!
//! Fifty movers shuttle between six zones of a warehouse-like scene.  A
//! burst of random moves is issued every 500 ms of simulated time, and a
//! second "dispatcher" thread sends its own requests while the frame loop
//! runs.  Learned zone-to-zone transition times are printed at the end.
//!
//! ```text
//! cargo run -p traffic -- [config.json] [output_dir]
//! ```
//!
//! `config.json` is an optional `SimConfig`; missing fields take defaults.
//! With `output_dir`, mover snapshots and frame summaries are written as CSV.

use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use zr_core::{FrameTime, MoverId, SimConfig, SimRng};
use zr_motion::MoverSnapshot;
use zr_output::{CsvWriter, OutputWriter, SimOutputObserver};
use zr_sim::{
    FrameSummary, InMemoryScene, RandomTraffic, SimBuilder, SimObserver, TracingObserver,
    load_scene_reader,
};

// ── Constants ─────────────────────────────────────────────────────────────────

const MOVER_COUNT:       u32 = 50;
const LOG_EVERY_FRAMES:  u64 = 300;
const DISPATCHED_MOVERS: u32 = 5;

// ── Scene ─────────────────────────────────────────────────────────────────────

// Six zones in encounter order.  `charging` has no waypoint: movers sent
// there settle in place.
const SCENE_CSV: &str = "\
zone,waypoint,x,y,z,qx,qy,qz,qw
inbound,1,0,0,0,,,,
inbound,2,2,0,0,,,,
rack_a,3,10,0,5,0,0.7071068,0,0.7071068
rack_a,4,10,0,7,,,,
rack_b,5,10,0,-5,0,-0.7071068,0,0.7071068
charging,,,,,,,,
packing,6,20,0,0,0,1,0,0
outbound,7,30,0,0,,,,
outbound,8,30,0,2,,,,
";

// ── Observer fan-out ──────────────────────────────────────────────────────────

/// Forwards every hook to a log observer and, optionally, a file writer.
struct DemoObserver<W: OutputWriter> {
    log:    TracingObserver,
    output: Option<SimOutputObserver<W>>,
}

impl<W: OutputWriter> SimObserver for DemoObserver<W> {
    fn on_frame_start(&mut self, frame: FrameTime) {
        self.log.on_frame_start(frame);
        if let Some(o) = &mut self.output {
            o.on_frame_start(frame);
        }
    }

    fn on_frame_end(&mut self, summary: &FrameSummary) {
        self.log.on_frame_end(summary);
        if let Some(o) = &mut self.output {
            o.on_frame_end(summary);
        }
    }

    fn on_snapshot(&mut self, frame: FrameTime, movers: &[MoverSnapshot]) {
        if let Some(o) = &mut self.output {
            o.on_snapshot(frame, movers);
        }
    }

    fn on_sim_end(&mut self, final_frame: FrameTime) {
        self.log.on_sim_end(final_frame);
        if let Some(o) = &mut self.output {
            o.on_sim_end(final_frame);
        }
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_tracing();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => load_config(Path::new(&path))?,
        None => SimConfig::default(),
    };
    let output_dir = args.next().map(PathBuf::from);

    info!(
        movers = MOVER_COUNT,
        frames = config.total_frames,
        frame_ms = config.frame_duration.as_millis() as u64,
        seed = config.seed,
        "=== traffic — zone_router demo ==="
    );

    // 1. Discover the scene.
    let (registry, scene) = load_scene_reader(Cursor::new(SCENE_CSV))?;
    info!(
        zones = registry.zone_count(),
        waypoints = registry.waypoint_count(),
        routable = registry.routable_zones().len(),
        "scene loaded"
    );
    let zones = registry.routable_zones().to_vec();
    let scene: Arc<InMemoryScene> = Arc::new(scene);

    // 2. Build the sim.
    let mut rng = SimRng::new(config.seed);
    let traffic = RandomTraffic::new(MOVER_COUNT, rng.child(1));
    let mut sim = SimBuilder::new(config.clone(), registry, Arc::clone(&scene), Arc::clone(&scene))
        .traffic(traffic)
        .build()?;

    // 3. Output.
    let output = match &output_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating {}", dir.display()))?;
            Some(SimOutputObserver::new(CsvWriter::new(dir)?))
        }
        None => None,
    };
    let mut obs = DemoObserver { log: TracingObserver::new(LOG_EVERY_FRAMES), output };

    // 4. Run, with a second thread issuing its own requests.
    let scheduler = Arc::clone(sim.scheduler());
    let mut dispatch_rng = rng.child(2);
    let t0 = Instant::now();
    std::thread::scope(|s| -> Result<()> {
        s.spawn(move || {
            for round in 0..200 {
                let mover = MoverId(MOVER_COUNT + 1 + round % DISPATCHED_MOVERS);
                let Some(&zone) = dispatch_rng.choose(&zones) else { return };
                if let Err(e) = scheduler.request_move(mover, zone) {
                    warn!(mover = mover.0, error = %e, "dispatch failed");
                }
                std::thread::yield_now();
            }
        });
        sim.run(&mut obs)?;
        Ok(())
    })?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.output.as_mut().and_then(|o| o.take_error()) {
        warn!(error = %e, "output error");
    }

    // 5. Summary.
    let scheduler = sim.scheduler();
    info!(
        secs = elapsed.as_secs_f64(),
        movers = scheduler.mover_count(),
        moving = scheduler.active_count(),
        cached_routes = scheduler.routing().routes().len(),
        "simulation complete"
    );

    let routing = scheduler.routing();
    for &origin in routing.registry().zone_ids() {
        for &destination in routing.registry().zone_ids() {
            let Some(estimate) = routing.estimated_duration(origin, destination) else {
                continue;
            };
            info!(
                from = origin.0,
                to = destination.0,
                samples = routing.times().sample_count(origin, destination),
                estimate_ms = estimate.as_millis() as u64,
                "learned transition"
            );
        }
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}

fn load_config(path: &Path) -> Result<SimConfig> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let config: SimConfig = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(config)
}
