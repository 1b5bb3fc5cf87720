//! Terminal front end.
//!
//! This module is the presentation layer of the client: it turns typed lines
//! into controller intents and renders the published game state.
//!
//! # Flow
//!
//! ```text
//! stdin line → Commander::parse() → Command::Play(Intent) → SyncController::dispatch()
//!                                                             │
//! stdout ← render::format_view() ← GameState ←────────────────┘
//! ```
//!
//! # Module Organization
//!
//! - [`commander`] - Entry point parsing lines into commands
//! - [`command`] - Command enum and parsing logic
//! - [`render`] - Text formatting of the board, status and banners

mod command;
mod commander;
pub mod render;

pub use crate::console::command::Command;
pub use crate::console::commander::Commander;

/// Errors that can occur during command parsing.
///
/// # Variants
///
/// * `Empty` - Blank line, handled silently.
/// * `InvalidCommand` - Unknown command or bad arguments, with a message to display.
#[derive(Debug)]
pub enum CommandParseError {
    /// Blank line (silent error)
    Empty,
    /// Invalid command with error message
    InvalidCommand(String),
}
