pub mod action;
pub mod api;
pub mod backend;
pub mod command;
pub mod error;
pub mod mode;
pub mod router;
pub mod session;
pub mod settings;
pub mod tone;
pub mod user;

// Re-export the types most callers need
pub use action::ActionKind;
pub use api::ApiRequest;
pub use backend::{ActionOutcome, ResponseBackend};
pub use error::{Result, RileyError};
pub use mode::Mode;
pub use router::{IntentRouter, Route};
pub use settings::{AllowedTools, Settings, SettingsRepository};
pub use tone::{ResponseSource, Tone};
