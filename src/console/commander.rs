//! Console command orchestration.
//!
//! This module provides the [`Commander`] struct, the entry point turning
//! typed lines into [`Command`]s or user-facing error messages.

use command_parser::Parser;

use crate::console::{
    CommandParseError,
    command::{Command, format_command_error},
};

/// Parses console lines into commands.
///
/// # Supported Commands
///
/// - `move <0-8>` (or a bare cell number) - Play a cell
/// - `reset` - Start a new game
/// - `refresh` - Read the server state again
/// - `help` - Display help information
/// - `quit` - Leave the console
pub struct Commander {
    /// Command parser for processing user commands
    parser: Parser,
}

impl Commander {
    /// Creates a new Commander with `!` as command prefix and `-` as option prefix.
    pub fn new() -> Self {
        let parser = Parser::new('!', '-');
        Commander { parser }
    }

    /// Parses a console line into a command.
    ///
    /// # Returns
    ///
    /// * `Ok(Command)` - Successfully parsed command
    /// * `Err(CommandParseError::Empty)` - Blank line, nothing to answer
    /// * `Err(CommandParseError::InvalidCommand)` - Unknown command or bad arguments,
    ///   with a message for the user
    ///
    /// # Examples
    ///
    /// ```
    /// let commander = Commander::new();
    /// assert!(commander.parse("reset").is_ok());
    /// assert!(commander.parse("dance").is_err());
    /// ```
    pub fn parse(&self, line: &str) -> Result<Command, CommandParseError> {
        Command::parse(&self.parser, line).map_err(|error| match format_command_error(error) {
            Some(message) => CommandParseError::InvalidCommand(message),
            None => CommandParseError::Empty,
        })
    }
}
