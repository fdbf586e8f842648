//! Simulated vehicle state and per-tick kinematics
//!
//! The motion model is a flat-earth small-step heuristic: heading follows the
//! thruster differential, speed follows the thruster sum, and position is
//! advanced along the heading with a fixed metres-to-degrees scale. It is
//! good enough to make a track move on a map, nothing more.

use crate::config::{FeederConfig, VehicleType};
use std::time::Duration;

/// SoC removed per tick while draining toward the floor (percent)
pub const SOC_DRAIN_STEP: f64 = 0.02;
/// Heading change per tick per unit of thruster differential (degrees)
pub const TURN_GAIN: f64 = 0.0002;
/// Speed at neutral thruster sum (m/s)
pub const BASE_SPEED_MPS: f64 = 0.5;
/// Thruster sum giving [`BASE_SPEED_MPS`]
pub const NEUTRAL_PWM_SUM: i32 = 2900;
/// Speed change per unit of thruster sum above neutral (m/s)
pub const SPEED_GAIN: f64 = 0.001;
pub const MAX_SPEED_MPS: f64 = 2.5;
/// Rough metres to degrees factor for the position update
pub const POSITION_SCALE: f64 = 1e-5;

const INITIAL_SPEED_MPS: f64 = 0.8;
const DEPTH_M: f64 = 0.0;
const RUDDER_DEG: f64 = 0.0;
const BALLAST_PCT: i32 = 0;
const TEMP_C: f64 = 24.0;
const ROLL_DEG: f64 = 0.2;
const PITCH_DEG: f64 = -1.3;
const MISSION_MODE: &str = "AUTONOMOUS";
const MISSION_TASK_ID: &str = "task-001";
const MISSION_WAYPOINT: u32 = 0;

/// Fault injection thresholds, both optional
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FaultPlan {
    /// Elapsed time at which the leak latch trips
    pub leak_after: Option<Duration>,
    /// SoC floor the battery drains toward
    pub battery_floor: Option<f64>,
}

impl FaultPlan {
    pub fn from_config(config: &FeederConfig) -> Self {
        Self {
            leak_after: config.simulation.leak_after_s.map(Duration::from_secs_f64),
            battery_floor: config.simulation.low_battery_pct,
        }
    }
}

/// Latch transitions that happened during a step
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepEvents {
    pub leak_tripped: bool,
    pub battery_floor_reached: bool,
}

/// Complete state of the single simulated vehicle
#[derive(Clone, Debug, PartialEq)]
pub struct VehicleState {
    pub vehicle_id: String,
    pub vehicle_type: VehicleType,

    pub lat: f64,
    pub lon: f64,
    /// Degrees, always in [0, 360)
    pub heading_deg: f64,
    /// m/s, always in [0, 2.5]
    pub speed_mps: f64,
    pub depth_m: f64,

    pub left_pwm: i32,
    pub right_pwm: i32,
    pub rudder_deg: f64,
    pub ballast_pct: i32,

    pub soc_pct: f64,
    /// One-way latch, never cleared once set
    pub leak: bool,
    pub temp_c: f64,
    pub roll_deg: f64,
    pub pitch_deg: f64,

    pub mission_mode: &'static str,
    pub task_id: &'static str,
    pub waypoint_index: u32,
}

impl VehicleState {
    /// Build the starting state from configuration and a starting heading.
    pub fn new(config: &FeederConfig, heading_deg: f64) -> Self {
        Self {
            vehicle_id: config.vehicle.id.clone(),
            vehicle_type: config.vehicle.vehicle_type,
            lat: config.simulation.start_lat,
            lon: config.simulation.start_lon,
            heading_deg: wrap_heading(heading_deg),
            speed_mps: INITIAL_SPEED_MPS,
            depth_m: DEPTH_M,
            left_pwm: config.vehicle.left_pwm,
            right_pwm: config.vehicle.right_pwm,
            rudder_deg: RUDDER_DEG,
            ballast_pct: BALLAST_PCT,
            soc_pct: config.simulation.start_soc_pct,
            leak: false,
            temp_c: TEMP_C,
            roll_deg: ROLL_DEG,
            pitch_deg: PITCH_DEG,
            mission_mode: MISSION_MODE,
            task_id: MISSION_TASK_ID,
            waypoint_index: MISSION_WAYPOINT,
        }
    }

    /// Battery voltage derived from SoC
    #[inline]
    pub fn voltage(&self) -> f64 {
        12.0 + (self.soc_pct / 100.0) * 3.0
    }

    /// Advance the state by one tick.
    ///
    /// `elapsed` is the time since the loop started, measured at the start of
    /// this tick; `dt` is the fixed tick duration in seconds. Fault latches
    /// are applied before kinematics, in that order.
    pub fn step(&mut self, elapsed: Duration, dt: f64, faults: &FaultPlan) -> StepEvents {
        let mut events = StepEvents::default();

        if let Some(after) = faults.leak_after
            && !self.leak
            && elapsed >= after
        {
            self.leak = true;
            events.leak_tripped = true;
        }

        if let Some(floor) = faults.battery_floor
            && self.soc_pct > floor
        {
            self.soc_pct = (self.soc_pct - SOC_DRAIN_STEP).max(floor);
            events.battery_floor_reached = self.soc_pct <= floor;
        }

        let differential = f64::from(self.right_pwm) - f64::from(self.left_pwm);
        self.heading_deg = wrap_heading(self.heading_deg + differential * TURN_GAIN);

        let sum =
            f64::from(self.left_pwm) + f64::from(self.right_pwm) - f64::from(NEUTRAL_PWM_SUM);
        self.speed_mps = (BASE_SPEED_MPS + sum * SPEED_GAIN).clamp(0.0, MAX_SPEED_MPS);

        let heading_rad = self.heading_deg.to_radians();
        self.lat += heading_rad.cos() * self.speed_mps * dt * POSITION_SCALE;
        self.lon += heading_rad.sin() * self.speed_mps * dt * POSITION_SCALE;

        events
    }
}

/// Wrap an angle in degrees into [0, 360)
pub fn wrap_heading(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}
