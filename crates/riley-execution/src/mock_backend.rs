//! Backend that answers with canned bodies after a simulated round trip.

use std::time::Duration;

use async_trait::async_trait;
use riley_core::{ActionOutcome, ApiRequest, Mode, ResponseBackend, Result, Route};
use tracing::debug;

use crate::responses::canned_response;

/// Simulated round-trip time used when nothing else is configured.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(2000);

/// A [`ResponseBackend`] that never leaves the process.
#[derive(Debug, Clone)]
pub struct MockBackend {
    latency: Duration,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::with_latency(DEFAULT_LATENCY)
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResponseBackend for MockBackend {
    async fn respond(
        &self,
        request: &ApiRequest,
        route: &Route,
        mode: Mode,
    ) -> Result<ActionOutcome> {
        debug!(
            endpoint = request.endpoint(),
            latency_ms = self.latency.as_millis() as u64,
            "Simulating backend round trip"
        );
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(canned_response(route, mode))
    }
}
