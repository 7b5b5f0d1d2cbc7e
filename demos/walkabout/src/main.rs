//! walkabout — a simulated pedestrian walking through a small scene.
//!
//! A seeded random walk generates noisy location fixes once per second; the
//! engine ticks every 10 ms, filters the fixes, and places four points of
//! interest around the start.  The run is traced to CSV.
//!
//! ```text
//! walkabout [config.json] [output-dir]
//! ```
//!
//! `RUST_LOG=gp_location=debug` shows every forwarded fix.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use gp_core::{GeoPoint, NoiseRng, TargetId, offset_by_metres};
use gp_engine::{CsvTraceObserver, EngineBuilder, EngineConfig};
use gp_location::{Availability, LocationSample, SimulatedProvider};
use gp_placement::{Target, TargetRegistry};

// ── Constants ─────────────────────────────────────────────────────────────────

const START:            GeoPoint = GeoPoint::new(48.158526, 11.578670);
const SEED:             u64      = 7;
const CADENCE_MS:       i64      = 10;
const RUN_SECS:         i64      = 90;
const FIX_INTERVAL_MS:  i64      = 1_000;
const WALK_SPEED_MPS:   f64      = 1.4;
const FIX_ACCURACY_M:   f64      = 6.0;
const FIX_JITTER_M:     f64      = 4.0;
const DEFAULT_OUT_DIR:  &str     = "output/walkabout";

// ── Scene ─────────────────────────────────────────────────────────────────────

fn scene() -> Vec<Target> {
    vec![
        Target::new(TargetId(0), offset_by_metres(START, 40.0, 0.0)),
        Target::new(TargetId(1), offset_by_metres(START, 0.0, 60.0)).with_altitude(3.0),
        Target::new(TargetId(2), offset_by_metres(START, 80.0, 80.0)).with_visibility_range(30.0),
        Target::new(TargetId(3), offset_by_metres(START, -25.0, -25.0)).with_visibility_range(50.0),
    ]
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig {
            time_sync_period_secs: 20.0,
            ..EngineConfig::default()
        });
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(config)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let config_path = args.next().map(PathBuf::from);
    let out_dir = args.next().map_or_else(|| PathBuf::from(DEFAULT_OUT_DIR), PathBuf::from);

    // 1. Config and simulated device.
    let config = load_config(config_path.as_deref())?;
    let provider = SimulatedProvider::new()
        .permission(Availability::AfterPolls(50))
        .enabled(Availability::AfterPolls(20))
        .init_polls(100)
        .failures(1);

    // 2. Engine and scene.
    let mut engine = EngineBuilder::new(config, provider).build()?;
    let mut targets = scene();

    // 3. Output.
    std::fs::create_dir_all(&out_dir)?;
    let mut trace = CsvTraceObserver::new(&out_dir)?;

    info!(seed = SEED, secs = RUN_SECS, out = %out_dir.display(), "walk started");

    // 4. Run.  The walker heads north-east; a fix arrives once per second.
    let mut rng = NoiseRng::new(SEED);
    let heading_rad = 45f64.to_radians();
    let t0 = Instant::now();

    let mut now_ms = 0;
    while now_ms < RUN_SECS * 1_000 {
        now_ms += CADENCE_MS;

        if now_ms % FIX_INTERVAL_MS == 0 {
            let walked = WALK_SPEED_MPS * now_ms as f64 / 1_000.0;
            let truth = offset_by_metres(START, walked * heading_rad.cos(), walked * heading_rad.sin());
            let noisy = rng.scatter(truth, FIX_JITTER_M);
            let device = engine.provider_mut();
            device.set_sample(LocationSample {
                lat:                   noisy.lat,
                lon:                   noisy.lon,
                horizontal_accuracy_m: FIX_ACCURACY_M,
                timestamp_secs:        now_ms as f64 / 1_000.0,
            });
            device.set_heading(45.0 + rng.jitter_m(3.0));
        }

        engine.tick(now_ms, &mut targets, &mut trace);
        targets.clear_dirty();

        if let Some(message) = engine.error_message() {
            warn!(reason = message, "acquisition stopped");
            break;
        }
    }
    let elapsed = t0.elapsed();
    trace.finish()?;

    // 5. Summary.
    let diag = &engine.diagnostics;
    info!(
        ticks = engine.clock.current_tick().0,
        state = %engine.state(),
        fixes = diag.samples_accepted,
        recomputes = diag.placements_recomputed,
        provider_failures = diag.provider_failures,
        fps = diag.frames_per_second,
        elapsed_ms = elapsed.as_millis() as u64,
        "walk finished",
    );
    if let Some(position) = engine.device_position() {
        info!(%position, variance = engine.filter.variance(), "final estimate");
    }

    println!();
    println!("{:<8} {:>9} {:>9} {:>6} {:<8} {:>6}", "Target", "East", "North", "Up", "Visible", "Scale");
    println!("{}", "-".repeat(52));
    for t in &targets {
        let p = &t.placement;
        println!(
            "{:<8} {:>9.2} {:>9.2} {:>6.2} {:<8} {:>6.2}",
            t.id.0,
            p.local_offset.east,
            p.local_offset.north,
            p.local_offset.up,
            if p.is_visible { "yes" } else { "no" },
            p.scale,
        );
    }

    Ok(())
}
