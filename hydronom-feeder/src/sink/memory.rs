//! In-process sink that keeps every record

use super::{Delivered, DeliveryError, TelemetrySink};
use crate::telemetry::TelemetryRecord;
use std::sync::{Arc, Mutex};

/// Collects records in memory instead of sending them.
///
/// Clones share the same buffer, so a handle kept outside the feeder sees
/// everything the feeder delivered. With `failing`, every attempt is
/// recorded and then rejected with a transport error.
#[derive(Clone, Default)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<TelemetryRecord>>>,
    failing: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sink that rejects every delivery
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// Snapshot of all records seen so far
    pub fn records(&self) -> Vec<TelemetryRecord> {
        self.records
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TelemetrySink for MemorySink {
    fn deliver(&mut self, record: &TelemetryRecord) -> Result<Delivered, DeliveryError> {
        self.records
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(record.clone());

        if self.failing {
            return Err(DeliveryError::Transport(
                "memory sink set to fail".to_string(),
            ));
        }
        Ok(Delivered { status: 0 })
    }
}
