//! Configuration loading for the Hydronom feeder
//!
//! Every field has a default, so an empty (or absent) TOML file yields the
//! same configuration as running the binary with no flags:
//!
//! ```toml
//! [endpoint]
//! url = "http://localhost:5000/api/telemetry"
//! timeout_ms = 2000
//!
//! [vehicle]
//! id = "hydronom-boat-01"
//! type = "boat"            # boat | sub
//! left_pwm = 1450
//! right_pwm = 1450
//! # initial_heading_deg = 90.0   # unset = random
//! random_seed = 0          # 0 = random each run
//!
//! [simulation]
//! hz = 5.0
//! # leak_after_s = 10.0
//! # low_battery_pct = 20.0
//! start_soc_pct = 90.0
//! start_lat = 41.025
//! start_lon = 28.85
//! # max_ticks = 100
//! ```

use crate::error::{FeederError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// Accepted thruster command range
pub const PWM_RANGE: std::ops::RangeInclusive<i32> = 1000..=2000;

/// Main configuration structure
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct FeederConfig {
    #[serde(default)]
    pub endpoint: EndpointConfig,
    #[serde(default)]
    pub vehicle: VehicleConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
}

/// Telemetry collection endpoint
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct EndpointConfig {
    /// Target URL for telemetry POSTs
    #[serde(default = "default_url")]
    pub url: String,

    /// Per-request timeout in milliseconds (default: 2000)
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

/// Vehicle kind reported in `vehicle.type`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    /// Surface vessel
    #[default]
    Boat,
    /// Underwater vehicle
    Sub,
}

impl VehicleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleType::Boat => "boat",
            VehicleType::Sub => "sub",
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vehicle identity and actuator setpoints
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct VehicleConfig {
    /// Vehicle identifier (default: hydronom-boat-01)
    #[serde(default = "default_vehicle_id")]
    pub id: String,

    #[serde(default, rename = "type")]
    pub vehicle_type: VehicleType,

    /// Left thruster command (default: 1450)
    #[serde(default = "default_pwm")]
    pub left_pwm: i32,

    /// Right thruster command (default: 1450)
    #[serde(default = "default_pwm")]
    pub right_pwm: i32,

    /// Starting heading in degrees; random in [0, 360) when unset
    #[serde(default)]
    pub initial_heading_deg: Option<f64>,

    /// Seed for the random starting heading (0 = entropy)
    #[serde(default)]
    pub random_seed: u64,
}

/// Loop rate, fault injection and starting conditions
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct SimulationConfig {
    /// Sample rate in Hz (default: 5.0)
    #[serde(default = "default_hz")]
    pub hz: f64,

    /// Seconds after start at which the leak latch trips
    #[serde(default)]
    pub leak_after_s: Option<f64>,

    /// Battery floor; SoC drains toward it when set
    #[serde(default)]
    pub low_battery_pct: Option<f64>,

    /// Initial state of charge (default: 90.0)
    #[serde(default = "default_start_soc")]
    pub start_soc_pct: f64,

    /// Initial latitude (default: 41.025)
    #[serde(default = "default_start_lat")]
    pub start_lat: f64,

    /// Initial longitude (default: 28.85)
    #[serde(default = "default_start_lon")]
    pub start_lon: f64,

    /// Stop after this many ticks; run until interrupted when unset
    #[serde(default)]
    pub max_ticks: Option<u64>,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl Default for VehicleConfig {
    fn default() -> Self {
        Self {
            id: default_vehicle_id(),
            vehicle_type: VehicleType::default(),
            left_pwm: default_pwm(),
            right_pwm: default_pwm(),
            initial_heading_deg: None,
            random_seed: 0,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            hz: default_hz(),
            leak_after_s: None,
            low_battery_pct: None,
            start_soc_pct: default_start_soc(),
            start_lat: default_start_lat(),
            start_lon: default_start_lon(),
            max_ticks: None,
        }
    }
}

// Default value functions
fn default_url() -> String {
    "http://localhost:5000/api/telemetry".to_string()
}
fn default_timeout_ms() -> u64 {
    2000
}
fn default_vehicle_id() -> String {
    "hydronom-boat-01".to_string()
}
fn default_pwm() -> i32 {
    1450
}
fn default_hz() -> f64 {
    5.0
}
fn default_start_soc() -> f64 {
    90.0
}
fn default_start_lat() -> f64 {
    41.025
}
fn default_start_lon() -> f64 {
    28.85
}

impl FeederConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: FeederConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Reject values the loop cannot run with.
    pub fn validate(&self) -> Result<()> {
        let sim = &self.simulation;

        if !sim.hz.is_finite()
            || sim.hz <= 0.0
            || Duration::try_from_secs_f64(1.0 / sim.hz).is_err()
        {
            return Err(FeederError::Config(format!(
                "hz must be a positive number with a representable interval, got {}",
                sim.hz
            )));
        }
        if self.endpoint.url.trim().is_empty() {
            return Err(FeederError::Config("endpoint url is empty".to_string()));
        }
        if self.vehicle.id.trim().is_empty() {
            return Err(FeederError::Config("vehicle id is empty".to_string()));
        }
        check_percent("start_soc_pct", sim.start_soc_pct)?;
        if let Some(floor) = sim.low_battery_pct {
            check_percent("low_battery_pct", floor)?;
        }
        if let Some(after) = sim.leak_after_s
            && Duration::try_from_secs_f64(after).is_err()
        {
            return Err(FeederError::Config(format!(
                "leak_after_s must be a non-negative duration, got {}",
                after
            )));
        }
        for (name, pwm) in [
            ("left_pwm", self.vehicle.left_pwm),
            ("right_pwm", self.vehicle.right_pwm),
        ] {
            if !PWM_RANGE.contains(&pwm) {
                return Err(FeederError::Config(format!(
                    "{} must be within {}..={}, got {}",
                    name,
                    PWM_RANGE.start(),
                    PWM_RANGE.end(),
                    pwm
                )));
            }
        }
        if let Some(heading) = self.vehicle.initial_heading_deg
            && !heading.is_finite()
        {
            return Err(FeederError::Config(format!(
                "initial_heading_deg must be a finite number, got {}",
                heading
            )));
        }
        if !(-90.0..=90.0).contains(&sim.start_lat) {
            return Err(FeederError::Config(format!(
                "start_lat out of range: {}",
                sim.start_lat
            )));
        }
        if !(-180.0..=180.0).contains(&sim.start_lon) {
            return Err(FeederError::Config(format!(
                "start_lon out of range: {}",
                sim.start_lon
            )));
        }
        Ok(())
    }

    /// Fixed tick interval, `1 / hz`
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.simulation.hz)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.endpoint.timeout_ms)
    }
}

fn check_percent(name: &str, value: f64) -> Result<()> {
    if !(0.0..=100.0).contains(&value) {
        return Err(FeederError::Config(format!(
            "{} must be within 0..=100, got {}",
            name, value
        )));
    }
    Ok(())
}
