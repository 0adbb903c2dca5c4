pub mod mock_backend;
pub mod responses;
pub mod tracing_layer;

use std::sync::Arc;

use riley_core::{ActionOutcome, ApiRequest, Mode, ResponseBackend, RileyError, Route};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

pub use mock_backend::{DEFAULT_LATENCY, MockBackend};

/// Runs one backend call at a time under a cancellation token.
#[derive(Clone)]
pub struct ActionExecutor {
    backend: Arc<dyn ResponseBackend>,
}

impl ActionExecutor {
    pub fn new(backend: Arc<dyn ResponseBackend>) -> Self {
        Self { backend }
    }

    /// Resolves a routed request.
    ///
    /// # Returns
    ///
    /// * `Ok(ActionOutcome)` once the backend answers
    /// * `Err(RileyError::Cancelled)` if `cancel` fires first
    /// * any error the backend reports
    pub async fn execute(
        &self,
        request: &ApiRequest,
        route: &Route,
        mode: Mode,
        cancel: &CancellationToken,
    ) -> Result<ActionOutcome, RileyError> {
        debug!(endpoint = request.endpoint(), kind = ?route.kind, "Executing request");

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                warn!(endpoint = request.endpoint(), "Request cancelled before it resolved");
                Err(RileyError::Cancelled)
            }
            result = self.backend.respond(request, route, mode) => result,
        }
    }
}
