//! Parsed console commands.

use crate::error::{Result, RileyError};
use crate::mode::Mode;

/// A `/command` typed into the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Help(Option<String>),
    /// `/mode` without an argument shows the current mode
    Mode(Option<Mode>),
    Modes,
    Voice,
    Listen,
    History(Option<usize>),
    Status,
    Settings,
    Cancel,
}

impl ConsoleCommand {
    /// Parses a console command.
    ///
    /// Returns `Ok(None)` when the input is not a command at all (no leading
    /// `/`), so the caller can treat it as chat.
    pub fn parse(input: &str) -> Result<Option<Self>> {
        let Some(rest) = input.trim().strip_prefix('/') else {
            return Ok(None);
        };

        let mut parts = rest.split_whitespace();
        let name = parts.next().unwrap_or_default().to_lowercase();
        let arg = parts.next();

        let command = match name.as_str() {
            "help" => ConsoleCommand::Help(arg.map(|a| a.trim_start_matches('/').to_string())),
            "mode" => ConsoleCommand::Mode(arg.map(Mode::parse).transpose()?),
            "modes" => ConsoleCommand::Modes,
            "voice" => ConsoleCommand::Voice,
            "listen" => ConsoleCommand::Listen,
            "history" => {
                let limit = arg
                    .map(|a| {
                        a.parse::<usize>()
                            .map_err(|_| RileyError::InvalidArgument(format!("history length '{}'", a)))
                    })
                    .transpose()?;
                ConsoleCommand::History(limit)
            }
            "status" => ConsoleCommand::Status,
            "settings" => ConsoleCommand::Settings,
            "cancel" => ConsoleCommand::Cancel,
            _ => return Err(RileyError::UnknownCommand(name)),
        };

        Ok(Some(command))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_not_a_command() {
        assert_eq!(ConsoleCommand::parse("hello").unwrap(), None);
        assert_eq!(ConsoleCommand::parse("search /usr/bin").unwrap(), None);
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!(
            ConsoleCommand::parse("/mode Genius").unwrap(),
            Some(ConsoleCommand::Mode(Some(Mode::Genius)))
        );
        assert_eq!(
            ConsoleCommand::parse("/mode").unwrap(),
            Some(ConsoleCommand::Mode(None))
        );
        assert_eq!(
            ConsoleCommand::parse("/mode pirate"),
            Err(RileyError::InvalidMode("pirate".to_string()))
        );
    }

    #[test]
    fn test_parse_history_limit() {
        assert_eq!(
            ConsoleCommand::parse("/history 5").unwrap(),
            Some(ConsoleCommand::History(Some(5)))
        );
        assert!(ConsoleCommand::parse("/history five").is_err());
    }

    #[test]
    fn test_parse_help_strips_slash() {
        assert_eq!(
            ConsoleCommand::parse("/help /voice").unwrap(),
            Some(ConsoleCommand::Help(Some("voice".to_string())))
        );
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(
            ConsoleCommand::parse("/Dance"),
            Err(RileyError::UnknownCommand("dance".to_string()))
        );
    }
}
