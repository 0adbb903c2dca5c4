//! Console command module.

mod builtin;
mod model;

pub use builtin::{BuiltinCommand, builtin_commands, find_builtin_command};
pub use model::ConsoleCommand;
