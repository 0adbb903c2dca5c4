//! The single in-flight special action slot.

use serde::{Deserialize, Serialize};

use crate::action::ActionKind;
use crate::api::ApiRequest;

/// A recognised special action that is currently being handled.
///
/// Created when the router recognises an actionable intent and cleared once
/// the mocked response resolves. A session holds at most one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialAction {
    #[serde(rename = "type")]
    pub kind: ActionKind,
    /// The raw user utterance that triggered the action
    pub prompt: String,
    /// The request that would be sent to the backend
    pub request: ApiRequest,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
}

impl SpecialAction {
    pub fn new(kind: ActionKind, prompt: impl Into<String>, request: ApiRequest) -> Self {
        Self {
            kind,
            prompt: prompt.into(),
            request,
            result: None,
        }
    }
}
