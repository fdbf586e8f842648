//! Delivery of telemetry records
//!
//! A sink makes one best-effort attempt per record. Failures come back as
//! [`DeliveryError`] and the caller decides what to do with them; the feeder
//! loop counts them and moves on.

use crate::telemetry::TelemetryRecord;
use thiserror::Error;

mod http;
mod logging;
mod memory;

pub use http::HttpSink;
pub use logging::LogSink;
pub use memory::MemorySink;

/// Successful delivery
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Delivered {
    /// HTTP status returned by the endpoint (0 for in-process sinks)
    pub status: u16,
}

/// Why a delivery attempt failed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    /// Connection refused, DNS failure, timeout, ...
    #[error("transport error: {0}")]
    Transport(String),

    /// Endpoint answered with a non-success status
    #[error("endpoint returned status {0}")]
    Status(u16),

    /// Record could not be encoded
    #[error("encode error: {0}")]
    Encode(String),
}

/// Destination for telemetry records
pub trait TelemetrySink: Send {
    /// Make a single delivery attempt
    fn deliver(&mut self, record: &TelemetryRecord) -> Result<Delivered, DeliveryError>;
}
