//! Dry-run sink that logs records instead of sending them

use super::{Delivered, DeliveryError, TelemetrySink};
use crate::telemetry::TelemetryRecord;

/// Writes every record as JSON at debug level.
///
/// Keeps the last encoded record so the caller can show it on shutdown.
#[derive(Default)]
pub struct LogSink {
    logged: u64,
    last_json: Option<String>,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records logged so far
    pub fn logged(&self) -> u64 {
        self.logged
    }

    pub fn last_json(&self) -> Option<&str> {
        self.last_json.as_deref()
    }
}

impl TelemetrySink for LogSink {
    fn deliver(&mut self, record: &TelemetryRecord) -> Result<Delivered, DeliveryError> {
        let json = record
            .to_json()
            .map_err(|e| DeliveryError::Encode(e.to_string()))?;
        log::debug!("telemetry: {}", json);

        self.logged += 1;
        self.last_json = Some(json);
        Ok(Delivered { status: 0 })
    }
}
