//! Tracing layer that streams console activity to a channel.
//!
//! The REPL subscribes to this in verbose mode to show what the router and the
//! backend are doing while a request is in flight.

use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{Event, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;

/// Event data forwarded to the channel
#[derive(Debug, Clone, serde::Serialize)]
pub struct ConsoleEvent {
    /// Event target (e.g., "riley_interaction")
    pub target: String,
    /// Log level (INFO, DEBUG, WARN, ERROR)
    pub level: String,
    /// Human-readable message
    pub message: String,
    /// Structured fields from the event, excluding `message`
    pub fields: HashMap<String, Value>,
    pub timestamp: String,
}

impl ConsoleEvent {
    /// Compact `key=value` rendering of the structured fields, sorted by key.
    pub fn fields_summary(&self) -> String {
        let mut pairs: Vec<String> = self
            .fields
            .iter()
            .map(|(key, value)| match value {
                Value::String(s) => format!("{}={}", key, s),
                other => format!("{}={}", key, other),
            })
            .collect();
        pairs.sort();
        pairs.join(" ")
    }
}

/// A tracing layer that sends events whose target starts with a prefix to a channel
pub struct ConsoleEventLayer {
    sender: mpsc::UnboundedSender<ConsoleEvent>,
    target_prefix: String,
}

impl ConsoleEventLayer {
    /// Create a layer forwarding every `riley*` event
    pub fn new(sender: mpsc::UnboundedSender<ConsoleEvent>) -> Self {
        Self::with_target_prefix(sender, "riley")
    }

    pub fn with_target_prefix(
        sender: mpsc::UnboundedSender<ConsoleEvent>,
        target_prefix: impl Into<String>,
    ) -> Self {
        Self {
            sender,
            target_prefix: target_prefix.into(),
        }
    }
}

impl<S> Layer<S> for ConsoleEventLayer
where
    S: Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let target = event.metadata().target();
        if !target.starts_with(&self.target_prefix) {
            return;
        }

        let mut fields = HashMap::new();
        let mut visitor = FieldVisitor(&mut fields);
        event.record(&mut visitor);

        let message = match fields.remove("message") {
            Some(Value::String(s)) => s,
            Some(other) => other.to_string(),
            None => String::new(),
        };

        let console_event = ConsoleEvent {
            target: target.to_string(),
            level: event.metadata().level().to_string(),
            message,
            fields,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        // Receiver may be gone during shutdown
        let _ = self.sender.send(console_event);
    }
}

/// Field visitor that extracts tracing event fields into a HashMap
struct FieldVisitor<'a>(&'a mut HashMap<String, Value>);

impl tracing::field::Visit for FieldVisitor<'_> {
    fn record_f64(&mut self, field: &tracing::field::Field, value: f64) {
        self.0
            .insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.0
            .insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0
            .insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.0
            .insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0
            .insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.insert(
            field.name().to_string(),
            serde_json::json!(format!("{:?}", value)),
        );
    }
}
