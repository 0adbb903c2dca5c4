//! Backend seam for producing assistant replies.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::api::ApiRequest;
use crate::error::Result;
use crate::mode::Mode;
use crate::router::Route;
use crate::tone::{ResponseSource, Tone};

/// A resolved reply, before it becomes a [`Message`](crate::session::Message).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOutcome {
    pub content: String,
    pub source: ResponseSource,
    pub tone: Tone,
}

/// Produces the reply for one routed utterance.
///
/// The shipped implementation is a mock with canned bodies; a networked
/// implementation would post `request.body()` to `request.endpoint()`.
#[async_trait]
pub trait ResponseBackend: Send + Sync {
    async fn respond(&self, request: &ApiRequest, route: &Route, mode: Mode)
    -> Result<ActionOutcome>;
}
