//! Game server API client and failure reporting.
//!
//! This module wraps the three remote operations of the game server and
//! normalizes their outcome into `Result<GameState, Failure>`.
//!
//! # Modules
//!
//! - `requester` - HTTP client for the game server API
//! - `error_reporter` - Maps failures to the messages shown to the user
//!
//! # Examples
//!
//! ```no_run
//! use tictac::remote::{GameRequester, Requester};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let requester = GameRequester::new("http://localhost:8080", 10)?;
//! let state = requester.fetch_state().await?;
//! println!("Player {} to move", state.current_player);
//! # Ok(())
//! # }
//! ```

mod error_reporter;
mod requester;

use std::fmt;

pub use crate::remote::error_reporter::ErrorReporter;
#[cfg(test)]
pub use crate::remote::requester::MockRequester;
pub use crate::remote::requester::{GameRequester, Requester};

/// Remote operation that produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// `GET /api/state`
    FetchState,
    /// `POST /api/move`
    SubmitMove,
    /// `POST /api/reset`
    ResetGame,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Operation::FetchState => write!(f, "fetch state"),
            Operation::SubmitMove => write!(f, "submit move"),
            Operation::ResetGame => write!(f, "reset game"),
        }
    }
}

/// Classification of a [`Failure`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// No usable response from the server
    Transport,
    /// The server refused a move
    Rejected,
}

/// Errors returned by a [`Requester`].
///
/// # Variants
///
/// * `Transport` - Connection error, timeout, unexpected status or malformed
///   response. Carries a description for the logs.
/// * `Rejected` - The server explicitly refused a move. Carries the reason it
///   supplied, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// No usable response from the server.
    Transport(String),
    /// The server refused the move.
    Rejected(Option<String>),
}

impl Failure {
    pub fn kind(&self) -> FailureKind {
        match self {
            Failure::Transport(_) => FailureKind::Transport,
            Failure::Rejected(_) => FailureKind::Rejected,
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Failure::Transport(detail) => write!(f, "transport failure: {}", detail),
            Failure::Rejected(Some(reason)) => write!(f, "rejected: {}", reason),
            Failure::Rejected(None) => write!(f, "rejected without reason"),
        }
    }
}

impl std::error::Error for Failure {}

impl From<reqwest::Error> for Failure {
    fn from(error: reqwest::Error) -> Self {
        Failure::Transport(error.to_string())
    }
}
