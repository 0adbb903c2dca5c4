//! Intent router.
//!
//! Classifies a raw utterance into an [`ActionKind`] by evaluating a fixed,
//! ordered list of case-insensitive patterns against the start of the input.
//! The first match wins; there is no scoring. Input that matches nothing is
//! plain conversation.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::action::ActionKind;

/// A named pattern evaluated by the router.
#[derive(Debug)]
pub struct IntentPattern {
    pub kind: ActionKind,
    pub regex: Regex,
}

impl IntentPattern {
    fn new(kind: ActionKind, pattern: &str) -> Self {
        Self {
            kind,
            regex: Regex::new(pattern).expect("intent pattern must be a valid regex"),
        }
    }
}

/// Evaluated in order; the first match wins.
static INTENT_PATTERNS: LazyLock<Vec<IntentPattern>> = LazyLock::new(|| {
    vec![
        IntentPattern::new(
            ActionKind::Invention,
            r"(?i)^(create|invent|design|generate)\s+.*(invention|product|device|gadget)",
        ),
        IntentPattern::new(
            ActionKind::Equation,
            r"(?i)^(solve|calculate|compute|equation)\s+.*(equation|formula|expression)",
        ),
        IntentPattern::new(ActionKind::Search, r"(?i)^(search|find|lookup|research)\s+"),
        IntentPattern::new(
            ActionKind::Github,
            r"(?i)^(analyze|clone|learn from)\s+.*(github|repo|repository)",
        ),
        IntentPattern::new(
            ActionKind::Repair,
            r"(?i)^(fix|repair|debug|improve)\s+.*(code|function|method)",
        ),
    ]
});

static SEARCH_VERB: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(search|find|lookup|research)\s+").expect("search verb regex")
});

static GITHUB_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(https://github\.com/\S+)").expect("github url regex"));

static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(.*?)```").expect("code fence regex"));

/// Outcome of routing one utterance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// Recognised action, `None` for plain conversation
    pub kind: Option<ActionKind>,
    /// Parameter extracted for the handler (query, repo URL, code, or the raw text)
    pub parameter: String,
}

impl Route {
    /// A plain-conversation route carrying the raw input.
    pub fn conversation(input: &str) -> Self {
        Self {
            kind: None,
            parameter: input.to_string(),
        }
    }

    pub fn is_action(&self) -> bool {
        self.kind.is_some()
    }
}

/// Ordered first-match classifier over [`INTENT_PATTERNS`].
#[derive(Debug, Clone, Copy)]
pub struct IntentRouter {
    patterns: &'static [IntentPattern],
}

impl Default for IntentRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentRouter {
    pub fn new() -> Self {
        Self {
            patterns: INTENT_PATTERNS.as_slice(),
        }
    }

    /// Returns the first action kind whose pattern matches, if any.
    pub fn classify(&self, input: &str) -> Option<ActionKind> {
        self.patterns
            .iter()
            .find(|pattern| pattern.regex.is_match(input))
            .map(|pattern| pattern.kind)
    }

    /// Classifies the input and extracts the handler parameter.
    pub fn route(&self, input: &str) -> Route {
        match self.classify(input) {
            Some(kind) => Route {
                kind: Some(kind),
                parameter: extract_parameter(kind, input),
            },
            None => Route::conversation(input),
        }
    }
}

/// Extracts the handler parameter for an already-classified utterance.
pub fn extract_parameter(kind: ActionKind, input: &str) -> String {
    match kind {
        ActionKind::Search => strip_search_verb(input),
        ActionKind::Github => extract_repo_url(input),
        ActionKind::Repair => extract_code_block(input),
        ActionKind::Invention | ActionKind::Equation => input.to_string(),
    }
}

/// Removes the leading search verb, leaving the query.
pub fn strip_search_verb(input: &str) -> String {
    SEARCH_VERB.replace(input, "").into_owned()
}

/// Returns the first `https://github.com/...` URL, or the raw input.
pub fn extract_repo_url(input: &str) -> String {
    GITHUB_URL
        .captures(input)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| input.to_string())
}

/// Returns the inner text of the first triple-backtick block, or the raw input.
pub fn extract_code_block(input: &str) -> String {
    CODE_FENCE
        .captures(input)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| input.to_string())
}
