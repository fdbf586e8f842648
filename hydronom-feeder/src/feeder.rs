//! The fixed-rate feeder loop
//!
//! Each tick:
//!
//! ```text
//! 1. Read elapsed time from the clock
//! 2. Apply fault latches (leak, battery drain)
//! 3. Update heading, speed, position
//! 4. Snapshot a TelemetryRecord with a UTC timestamp
//! 5. One delivery attempt through the sink (failures are counted, not raised)
//! 6. Sleep for what is left of the tick interval
//! ```
//!
//! Slow ticks are not caught up; the next tick simply starts late.

use crate::clock::Clock;
use crate::config::FeederConfig;
use crate::error::Result;
use crate::sink::{Delivered, DeliveryError, TelemetrySink};
use crate::state::{FaultPlan, VehicleState};
use crate::telemetry::TelemetryRecord;
use chrono::Utc;
use log::{debug, info, warn};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Ticks between debug summaries
const SUMMARY_INTERVAL: u64 = 100;

/// Counters over the lifetime of a feeder
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeederStats {
    pub ticks: u64,
    pub delivered: u64,
    pub failed: u64,
}

/// What a single tick produced
#[derive(Debug)]
pub struct TickReport {
    /// Elapsed time seen by this tick
    pub elapsed: Duration,
    pub record: TelemetryRecord,
    pub outcome: std::result::Result<Delivered, DeliveryError>,
}

/// Starting heading: configured value, or uniform in [0, 360).
///
/// A zero seed draws from entropy; any other seed is reproducible.
pub fn initial_heading(config: &FeederConfig) -> f64 {
    if let Some(heading) = config.vehicle.initial_heading_deg {
        return heading;
    }
    let mut rng = if config.vehicle.random_seed == 0 {
        SmallRng::from_entropy()
    } else {
        SmallRng::seed_from_u64(config.vehicle.random_seed)
    };
    rng.gen_range(0.0..360.0)
}

/// Single-vehicle telemetry feeder
pub struct Feeder<S: TelemetrySink, C: Clock> {
    config: FeederConfig,
    faults: FaultPlan,
    interval: Duration,
    state: VehicleState,
    sink: S,
    clock: C,
    stats: FeederStats,
}

impl<S: TelemetrySink, C: Clock> Feeder<S, C> {
    /// Validate the configuration and build the starting state.
    pub fn new(config: FeederConfig, sink: S, clock: C) -> Result<Self> {
        config.validate()?;

        let state = VehicleState::new(&config, initial_heading(&config));
        let faults = FaultPlan::from_config(&config);
        let interval = config.tick_interval();

        Ok(Self {
            config,
            faults,
            interval,
            state,
            sink,
            clock,
            stats: FeederStats::default(),
        })
    }

    pub fn state(&self) -> &VehicleState {
        &self.state
    }

    pub fn stats(&self) -> FeederStats {
        self.stats
    }

    pub fn config(&self) -> &FeederConfig {
        &self.config
    }

    /// Consume the feeder and hand back its sink
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Run one tick without sleeping.
    pub fn tick(&mut self) -> TickReport {
        let elapsed = self.clock.elapsed();
        let events = self
            .state
            .step(elapsed, self.interval.as_secs_f64(), &self.faults);

        if events.leak_tripped {
            warn!(
                "Leak latch tripped at {:.1}s for {}",
                elapsed.as_secs_f64(),
                self.state.vehicle_id
            );
        }
        if events.battery_floor_reached {
            info!("Battery reached floor at {:.2}%", self.state.soc_pct);
        }

        let record = TelemetryRecord::from_state(&self.state, Utc::now());
        let outcome = self.sink.deliver(&record);
        self.stats.ticks += 1;

        match &outcome {
            Ok(_) => self.stats.delivered += 1,
            Err(e) => {
                self.stats.failed += 1;
                // Keep the loop quiet: only the first failure is a warning
                if self.stats.failed == 1 {
                    warn!("Telemetry delivery failed ({}), continuing", e);
                } else {
                    debug!("Telemetry delivery failed: {}", e);
                }
            }
        }

        if self.stats.ticks % SUMMARY_INTERVAL == 0 {
            debug!(
                "tick {}: heading={:.1} speed={:.2} soc={:.2} leak={} delivered={} failed={}",
                self.stats.ticks,
                self.state.heading_deg,
                self.state.speed_mps,
                self.state.soc_pct,
                self.state.leak,
                self.stats.delivered,
                self.stats.failed
            );
        }

        TickReport {
            elapsed,
            record,
            outcome,
        }
    }

    /// Tick at the configured rate until `running` is cleared or the tick
    /// limit is reached.
    pub fn run(&mut self, running: &AtomicBool) -> FeederStats {
        info!(
            "Feeder loop started: {} Hz (interval {:?}), max_ticks={:?}",
            self.config.simulation.hz, self.interval, self.config.simulation.max_ticks
        );

        while running.load(Ordering::Relaxed) && !self.limit_reached() {
            let tick_start = self.clock.elapsed();
            self.tick();

            if self.limit_reached() {
                break;
            }

            let spent = self.clock.elapsed().saturating_sub(tick_start);
            self.clock.sleep(self.interval.saturating_sub(spent));
        }

        info!(
            "Feeder loop stopped after {} ticks ({} delivered, {} failed)",
            self.stats.ticks, self.stats.delivered, self.stats.failed
        );
        self.stats
    }

    fn limit_reached(&self) -> bool {
        self.config
            .simulation
            .max_ticks
            .is_some_and(|max| self.stats.ticks >= max)
    }
}
