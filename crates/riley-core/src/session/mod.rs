//! Session domain module.
//!
//! # Module Structure
//!
//! - `message`: Chat message types (`MessageRole`, `Message`)
//! - `conversation`: The append-only chat log (`Conversation`)
//! - `action`: Transient special action state (`SpecialAction`)

mod action;
mod conversation;
mod message;

pub use action::SpecialAction;
pub use conversation::{Conversation, GREETING};
pub use message::{Message, MessageRole};
