//! HTTP POST delivery to the ingestion API

use super::{Delivered, DeliveryError, TelemetrySink};
use crate::telemetry::TelemetryRecord;
use std::time::Duration;
use ureq::{Agent, AgentBuilder};

/// Posts each record as JSON with a bounded timeout. No retries.
pub struct HttpSink {
    agent: Agent,
    url: String,
}

impl HttpSink {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let agent = AgentBuilder::new().timeout(timeout).build();
        Self {
            agent,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl TelemetrySink for HttpSink {
    fn deliver(&mut self, record: &TelemetryRecord) -> Result<Delivered, DeliveryError> {
        let body = record
            .to_json()
            .map_err(|e| DeliveryError::Encode(e.to_string()))?;

        match self
            .agent
            .post(&self.url)
            .set("Content-Type", "application/json")
            .send_string(&body)
        {
            Ok(response) => {
                let status = response.status();
                if (200..300).contains(&status) {
                    Ok(Delivered { status })
                } else {
                    Err(DeliveryError::Status(status))
                }
            }
            Err(ureq::Error::Status(code, _)) => Err(DeliveryError::Status(code)),
            Err(ureq::Error::Transport(transport)) => {
                Err(DeliveryError::Transport(transport.to_string()))
            }
        }
    }
}
