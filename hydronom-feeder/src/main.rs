//! Hydronom Feeder binary
//!
//! ```bash
//! hydronom-feeder --api http://localhost:5000/api/telemetry --hz 5 --leak-after 30
//! RUST_LOG=debug hydronom-feeder --config feeder.toml --dry-run --count 50
//! ```
//!
//! Runs until Ctrl-C (or `--count` ticks) and then prints delivery totals.

use clap::Parser;
use hydronom_feeder::cli::Args;
use hydronom_feeder::clock::WallClock;
use hydronom_feeder::error::Result;
use hydronom_feeder::feeder::Feeder;
use hydronom_feeder::sink::{HttpSink, LogSink, TelemetrySink};
use hydronom_feeder::FeederConfig;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    log::info!("Hydronom Feeder v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Some(path) = &args.config {
        log::info!("Using config: {}", path.display());
    }
    let config = args.resolve()?;

    let running = Arc::new(AtomicBool::new(true));
    let r = Arc::clone(&running);
    ctrlc::set_handler(move || {
        log::info!("Received shutdown signal");
        r.store(false, Ordering::Relaxed);
    })?;

    if args.dry_run {
        log::info!("Dry run: records are logged at debug level, not sent");
        let sink = run(config, LogSink::new(), &running)?;
        if let Some(last) = sink.last_json() {
            log::info!("Last of {} records: {}", sink.logged(), last);
        }
    } else {
        let sink = HttpSink::new(config.endpoint.url.clone(), config.request_timeout());
        log::info!(
            "Posting to {} (timeout {} ms)",
            sink.url(),
            config.endpoint.timeout_ms
        );
        run(config, sink, &running)?;
    }

    log::info!("Hydronom Feeder stopped");
    Ok(())
}

fn run<S: TelemetrySink>(config: FeederConfig, sink: S, running: &AtomicBool) -> Result<S> {
    let mut feeder = Feeder::new(config, sink, WallClock::new())?;

    let state = feeder.state();
    log::info!(
        "Vehicle {} ({}) at ({:.5}, {:.5}), heading {:.1}°, SoC {:.1}%",
        state.vehicle_id,
        state.vehicle_type,
        state.lat,
        state.lon,
        state.heading_deg,
        state.soc_pct
    );
    let sim = &feeder.config().simulation;
    if let Some(after) = sim.leak_after_s {
        log::info!("Leak will trip after {:.1}s", after);
    }
    if let Some(floor) = sim.low_battery_pct {
        log::info!("Battery drains toward {:.1}%", floor);
    }

    let stats = feeder.run(running);
    log::info!(
        "Sent {} records: {} delivered, {} failed",
        stats.ticks,
        stats.delivered,
        stats.failed
    );
    Ok(feeder.into_sink())
}
