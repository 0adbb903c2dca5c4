//! Builtin console commands.
//!
//! These commands are always available. They are loaded once and cached for
//! the lifetime of the process.

use serde::Serialize;
use std::sync::OnceLock;

/// A builtin command provided by the console.
#[derive(Debug, Clone, Serialize)]
pub struct BuiltinCommand {
    /// Command name (without the leading /)
    pub name: &'static str,
    /// Usage format (e.g., "/mode [name]")
    pub usage: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Optional description of expected arguments
    pub args: Option<&'static str>,
}

impl BuiltinCommand {
    pub const fn new(
        name: &'static str,
        usage: &'static str,
        description: &'static str,
        args: Option<&'static str>,
    ) -> Self {
        Self {
            name,
            usage,
            description,
            args,
        }
    }

    /// The command as typed, e.g. `/mode`.
    pub fn invocation(&self) -> String {
        format!("/{}", self.name)
    }
}

static BUILTIN_COMMANDS: OnceLock<Vec<BuiltinCommand>> = OnceLock::new();

/// Returns all builtin commands.
pub fn builtin_commands() -> &'static [BuiltinCommand] {
    BUILTIN_COMMANDS.get_or_init(|| {
        vec![
            BuiltinCommand::new(
                "help",
                "/help [command]",
                "Show available commands and their usage",
                Some("Optional command name to show detailed help"),
            ),
            BuiltinCommand::new(
                "mode",
                "/mode [assistant|genius|inventor|explorer|scientist|engineer|storyteller|teacher]",
                "Switch Riley's persona, or show the current one",
                Some("Mode name (optional)"),
            ),
            BuiltinCommand::new("modes", "/modes", "List every mode with its description", None),
            BuiltinCommand::new("voice", "/voice", "Toggle spoken replies on or off", None),
            BuiltinCommand::new(
                "listen",
                "/listen",
                "Capture one utterance from the microphone (voice must be on)",
                None,
            ),
            BuiltinCommand::new(
                "history",
                "/history [n]",
                "Show the conversation so far",
                Some("Only show the last n messages"),
            ),
            BuiltinCommand::new(
                "status",
                "/status",
                "Display the current mode, voice state and any action in progress",
                None,
            ),
            BuiltinCommand::new("settings", "/settings", "Show the loaded settings", None),
            BuiltinCommand::new("cancel", "/cancel", "Cancel the request in progress", None),
        ]
    })
}

/// Find a builtin command by name.
pub fn find_builtin_command(name: &str) -> Option<&'static BuiltinCommand> {
    builtin_commands().iter().find(|cmd| cmd.name == name)
}
