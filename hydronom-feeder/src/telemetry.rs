//! Telemetry record sent to the ingestion API
//!
//! Field names and nesting follow the `/api/telemetry` contract:
//!
//! ```json
//! {
//!   "timestamp": "2026-01-01T00:00:00.000000Z",
//!   "vehicle": {"id": "hydronom-boat-01", "type": "boat"},
//!   "pose": {"lat": 41.025, "lon": 28.85, "heading_deg": 90.0, "speed_mps": 0.5},
//!   "depth_m": 0.0,
//!   "imu": {"roll_deg": 0.2, "pitch_deg": -1.3, "yaw_deg": 90.0},
//!   "thrusters": {"left_pwm": 1450, "right_pwm": 1450},
//!   "rudder_deg": 0.0,
//!   "ballast": {"level_pct": 0},
//!   "battery": {"voltage": 14.7, "soc_pct": 90.0},
//!   "leak": false,
//!   "temp_c": 24.0,
//!   "mission": {"mode": "AUTONOMOUS", "task_id": "task-001", "waypoint_index": 0}
//! }
//! ```

use crate::config::VehicleType;
use crate::error::Result;
use crate::state::VehicleState;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TelemetryRecord {
    #[serde(serialize_with = "serialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    pub vehicle: VehicleInfo,
    pub pose: Pose,
    pub depth_m: f64,
    pub imu: Imu,
    pub thrusters: Thrusters,
    pub rudder_deg: f64,
    pub ballast: Ballast,
    pub battery: Battery,
    pub leak: bool,
    pub temp_c: f64,
    pub mission: MissionInfo,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VehicleInfo {
    pub id: String,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub lat: f64,
    pub lon: f64,
    pub heading_deg: f64,
    pub speed_mps: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Imu {
    pub roll_deg: f64,
    pub pitch_deg: f64,
    pub yaw_deg: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Thrusters {
    pub left_pwm: i32,
    pub right_pwm: i32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ballast {
    pub level_pct: i32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Battery {
    pub voltage: f64,
    pub soc_pct: f64,
}

/// Mission context. The API accepts null task and waypoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MissionInfo {
    pub mode: String,
    pub task_id: Option<String>,
    pub waypoint_index: Option<u32>,
}

impl TelemetryRecord {
    /// Snapshot the vehicle state at `timestamp`.
    pub fn from_state(state: &VehicleState, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            vehicle: VehicleInfo {
                id: state.vehicle_id.clone(),
                vehicle_type: state.vehicle_type,
            },
            pose: Pose {
                lat: state.lat,
                lon: state.lon,
                heading_deg: state.heading_deg,
                speed_mps: state.speed_mps,
            },
            depth_m: state.depth_m,
            imu: Imu {
                roll_deg: state.roll_deg,
                pitch_deg: state.pitch_deg,
                yaw_deg: state.heading_deg,
            },
            thrusters: Thrusters {
                left_pwm: state.left_pwm,
                right_pwm: state.right_pwm,
            },
            rudder_deg: state.rudder_deg,
            ballast: Ballast {
                level_pct: state.ballast_pct,
            },
            battery: Battery {
                voltage: state.voltage(),
                soc_pct: state.soc_pct,
            },
            leak: state.leak,
            temp_c: state.temp_c,
            mission: MissionInfo {
                mode: state.mission_mode.to_string(),
                task_id: Some(state.task_id.to_string()),
                waypoint_index: Some(state.waypoint_index),
            },
        }
    }

    /// Encode as a compact JSON body
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

fn serialize_timestamp<S: Serializer>(
    ts: &DateTime<Utc>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Micros, true))
}
