//! Console command parsing.
//!
//! This module converts a line typed by the user into a structured
//! [`Command`].

use command_parser::Parser;
use log::debug;

use crate::{
    console::render::{format_invalid_move, format_unknown_command},
    sync::Intent,
};

/// Represents a parsed console command.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    /// Display help information
    Help,
    /// Forward an intent to the controller
    Play(Intent),
    /// Leave the console
    Quit,
}

/// Errors that can occur during command parsing.
#[derive(Debug, PartialEq, Eq)]
pub enum CommandParsingError {
    /// The line is blank or could not be parsed as a command
    UnableToParse,
    /// The command is not recognized
    Unknown,
    /// The move command has a missing or non numeric cell
    InvalidMove,
}

impl Command {
    /// Parses a line into a Command.
    ///
    /// The `!` prefix is optional and a bare cell number is a move.
    ///
    /// # Examples
    ///
    /// ```
    /// let parser = Parser::new('!', '-');
    /// let result = Command::parse(&parser, "move 4");
    /// assert_eq!(result, Ok(Command::Play(Intent::CellSelected(4))));
    /// ```
    pub fn parse(parser: &Parser, line: &str) -> Result<Self, CommandParsingError> {
        let line = line.trim();
        if line.is_empty() {
            return Err(CommandParsingError::UnableToParse);
        }

        if let Ok(position) = line.trim_start_matches('!').parse::<usize>() {
            return Ok(Command::Play(Intent::CellSelected(position)));
        }

        // The parser drops the last word, so a dummy one is appended
        let body = if line.starts_with('!') {
            format!("{} dummy", line)
        } else {
            format!("!{} dummy", line)
        };

        let command = match parser.parse(&body) {
            Ok(cmd) => cmd,
            Err(_) => return Err(CommandParsingError::UnableToParse),
        };

        debug!("Parsing command: {:?}", command);

        match command.name.to_lowercase().as_str() {
            "help" => Ok(Command::Help),
            "move" | "play" => {
                let position = command
                    .arguments
                    .first()
                    .and_then(|argument| argument.parse::<usize>().ok())
                    .ok_or(CommandParsingError::InvalidMove)?;
                Ok(Command::Play(Intent::CellSelected(position)))
            }
            "reset" | "new" => Ok(Command::Play(Intent::ResetRequested)),
            "refresh" | "state" => Ok(Command::Play(Intent::Refresh)),
            "quit" | "exit" => Ok(Command::Quit),
            _ => Err(CommandParsingError::Unknown),
        }
    }
}

/// Formats a command error into a user-friendly message.
///
/// Blank lines produce no message.
pub fn format_command_error(error: CommandParsingError) -> Option<String> {
    match error {
        CommandParsingError::Unknown => Some(format_unknown_command()),
        CommandParsingError::InvalidMove => Some(format_invalid_move()),
        CommandParsingError::UnableToParse => None,
    }
}
