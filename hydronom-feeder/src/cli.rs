//! Command line interface
//!
//! Flags override the TOML file given with `--config`, which in turn
//! overrides the built-in defaults. Only flags that are actually passed take
//! effect, so every override is an `Option`.

use crate::config::{FeederConfig, VehicleType};
use crate::error::Result;
use clap::Parser;
use std::path::PathBuf;

/// Send synthetic vehicle telemetry to a Hydronom ingestion endpoint
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Target URL [default: http://localhost:5000/api/telemetry]
    #[arg(long)]
    pub api: Option<String>,

    /// Vehicle identifier [default: hydronom-boat-01]
    #[arg(long)]
    pub vehicle: Option<String>,

    /// Vehicle type [default: boat]
    #[arg(long = "type", value_enum)]
    pub vehicle_type: Option<VehicleType>,

    /// Sample rate in Hz [default: 5.0]
    #[arg(long)]
    pub hz: Option<f64>,

    /// Seconds after start to trigger the leak flag
    #[arg(long)]
    pub leak_after: Option<f64>,

    /// Drain the battery down to this SoC percent
    #[arg(long)]
    pub low_battery: Option<f64>,

    /// Initial battery percent [default: 90.0]
    #[arg(long)]
    pub start_soc: Option<f64>,

    /// Initial latitude [default: 41.025]
    #[arg(long, allow_hyphen_values = true)]
    pub start_lat: Option<f64>,

    /// Initial longitude [default: 28.85]
    #[arg(long, allow_hyphen_values = true)]
    pub start_lon: Option<f64>,

    /// Initial heading in degrees [default: random]
    #[arg(long, allow_hyphen_values = true)]
    pub heading: Option<f64>,

    /// Seed for the random initial heading (0 = entropy)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Stop after this many ticks
    #[arg(long)]
    pub count: Option<u64>,

    /// HTTP request timeout in milliseconds [default: 2000]
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Generate records without sending them
    #[arg(long)]
    pub dry_run: bool,
}

impl Args {
    /// Resolve the final configuration: defaults, then file, then flags.
    pub fn resolve(&self) -> Result<FeederConfig> {
        let mut config = match &self.config {
            Some(path) => FeederConfig::load(path)?,
            None => FeederConfig::default(),
        };
        self.apply(&mut config);
        Ok(config)
    }

    /// Overlay explicitly given flags onto `config`.
    pub fn apply(&self, config: &mut FeederConfig) {
        if let Some(api) = &self.api {
            config.endpoint.url = api.clone();
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.endpoint.timeout_ms = timeout_ms;
        }
        if let Some(vehicle) = &self.vehicle {
            config.vehicle.id = vehicle.clone();
        }
        if let Some(vehicle_type) = self.vehicle_type {
            config.vehicle.vehicle_type = vehicle_type;
        }
        if let Some(heading) = self.heading {
            config.vehicle.initial_heading_deg = Some(heading);
        }
        if let Some(seed) = self.seed {
            config.vehicle.random_seed = seed;
        }

        let sim = &mut config.simulation;
        if let Some(hz) = self.hz {
            sim.hz = hz;
        }
        if self.leak_after.is_some() {
            sim.leak_after_s = self.leak_after;
        }
        if self.low_battery.is_some() {
            sim.low_battery_pct = self.low_battery;
        }
        if let Some(soc) = self.start_soc {
            sim.start_soc_pct = soc;
        }
        if let Some(lat) = self.start_lat {
            sim.start_lat = lat;
        }
        if let Some(lon) = self.start_lon {
            sim.start_lon = lon;
        }
        if self.count.is_some() {
            sim.max_ticks = self.count;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags_gives_defaults() {
        let args = Args::try_parse_from(["hydronom-feeder"]).unwrap();
        assert_eq!(args.resolve().unwrap(), FeederConfig::default());
        assert!(!args.dry_run);
    }

    #[test]
    fn test_flags_override() {
        let args = Args::try_parse_from([
            "hydronom-feeder",
            "--api",
            "http://collector:5000/api/telemetry",
            "--vehicle",
            "hydronom-sub-07",
            "--type",
            "sub",
            "--hz",
            "1",
            "--leak-after",
            "10",
            "--low-battery",
            "20",
            "--start-soc",
            "75.5",
            "--start-lat",
            "-33.9",
            "--start-lon",
            "-70.6",
            "--count",
            "11",
        ])
        .unwrap();
        let config = args.resolve().unwrap();

        assert_eq!(config.endpoint.url, "http://collector:5000/api/telemetry");
        assert_eq!(config.vehicle.id, "hydronom-sub-07");
        assert_eq!(config.vehicle.vehicle_type, VehicleType::Sub);
        assert_eq!(config.simulation.hz, 1.0);
        assert_eq!(config.simulation.leak_after_s, Some(10.0));
        assert_eq!(config.simulation.low_battery_pct, Some(20.0));
        assert_eq!(config.simulation.start_soc_pct, 75.5);
        assert_eq!(config.simulation.start_lat, -33.9);
        assert_eq!(config.simulation.start_lon, -70.6);
        assert_eq!(config.simulation.max_ticks, Some(11));
    }

    #[test]
    fn test_malformed_flags_rejected() {
        assert!(Args::try_parse_from(["hydronom-feeder", "--hz", "fast"]).is_err());
        assert!(Args::try_parse_from(["hydronom-feeder", "--type", "plane"]).is_err());
        assert!(Args::try_parse_from(["hydronom-feeder", "--bogus"]).is_err());
    }

    #[test]
    fn test_apply_leaves_unset_fields_alone() {
        let mut config = FeederConfig::default();
        config.simulation.leak_after_s = Some(30.0);
        config.vehicle.id = "from-file".to_string();

        let args = Args {
            hz: Some(2.0),
            ..Default::default()
        };
        args.apply(&mut config);

        assert_eq!(config.simulation.hz, 2.0);
        assert_eq!(config.simulation.leak_after_s, Some(30.0));
        assert_eq!(config.vehicle.id, "from-file");
    }
}
