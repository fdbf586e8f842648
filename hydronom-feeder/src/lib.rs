//! Hydronom Feeder - synthetic telemetry for a simulated boat or sub
//!
//! Advances a small kinematic model of one vehicle at a fixed rate and
//! POSTs a JSON telemetry record to an ingestion endpoint every tick.
//! Delivery is best effort: failed sends are counted and dropped.
//!
//! ## Modules
//!
//! - [`config`]: TOML configuration with defaults and validation
//! - [`cli`]: clap flags layered over the configuration
//! - [`state`]: vehicle state, fault latches and per-tick kinematics
//! - [`telemetry`]: the wire record
//! - [`sink`]: delivery (HTTP, in-memory)
//! - [`clock`]: wall-clock and simulated time
//! - [`feeder`]: the loop tying it together

pub mod cli;
pub mod clock;
pub mod config;
pub mod error;
pub mod feeder;
pub mod sink;
pub mod state;
pub mod telemetry;

pub use config::{FeederConfig, VehicleType};
pub use error::{FeederError, Result};
pub use feeder::{Feeder, FeederStats};
