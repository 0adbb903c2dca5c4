//! Request shapes of the assistant's REST surface.
//!
//! Requests are built for every utterance so the in-flight action records what
//! a real backend would receive. Nothing here performs I/O.

use serde::{Deserialize, Serialize};

use crate::action::ActionKind;
use crate::mode::Mode;
use crate::router::Route;

/// Field sent with every invention request.
pub const DEFAULT_INVENTION_FIELD: &str = "general";

/// One request to the assistant backend, serialized as its JSON body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApiRequest {
    Invent {
        user_id: String,
        prompt: String,
        field: String,
    },
    Search {
        user_id: String,
        query: String,
    },
    Github {
        user_id: String,
        repo_url: String,
    },
    Repair {
        user_id: String,
        code: String,
    },
    Chat {
        user_id: String,
        message: String,
        mode: Mode,
    },
}

impl ApiRequest {
    /// Builds the request for a routed utterance.
    ///
    /// Equations have no endpoint of their own and go through chat, where the
    /// reasoning engine picks them up.
    pub fn from_route(route: &Route, input: &str, user_id: &str, mode: Mode) -> Self {
        let user_id = user_id.to_string();
        match route.kind {
            Some(ActionKind::Invention) => ApiRequest::Invent {
                user_id,
                prompt: input.to_string(),
                field: DEFAULT_INVENTION_FIELD.to_string(),
            },
            Some(ActionKind::Search) => ApiRequest::Search {
                user_id,
                query: route.parameter.clone(),
            },
            Some(ActionKind::Github) => ApiRequest::Github {
                user_id,
                repo_url: route.parameter.clone(),
            },
            Some(ActionKind::Repair) => ApiRequest::Repair {
                user_id,
                code: route.parameter.clone(),
            },
            Some(ActionKind::Equation) | None => ApiRequest::Chat {
                user_id,
                message: input.to_string(),
                mode,
            },
        }
    }

    pub fn endpoint(&self) -> &'static str {
        match self {
            ApiRequest::Invent { .. } => "/api/invent",
            ApiRequest::Search { .. } => "/api/search",
            ApiRequest::Github { .. } => "/api/github",
            ApiRequest::Repair { .. } => "/api/repair",
            ApiRequest::Chat { .. } => "/api/chat",
        }
    }

    /// JSON body of the request.
    pub fn body(&self) -> crate::error::Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}
