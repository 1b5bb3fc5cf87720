//! User facing messages for remote failures.
//!
//! The [`ErrorReporter`] turns a [`Failure`] into the [`LastError`] shown in
//! the error banner. It neither retries nor touches the game state.

use crate::{
    game::LastError,
    remote::{Failure, Operation},
};

/// Message used when the server refuses a move without a reason.
const INVALID_MOVE: &str = "Invalid move";

/// Maps remote failures to banner messages.
pub struct ErrorReporter {
    /// Game server url, named in connectivity messages
    server_url: String,
}

impl ErrorReporter {
    pub fn new(server_url: &str) -> Self {
        ErrorReporter {
            server_url: server_url.trim_end_matches('/').to_string(),
        }
    }

    /// Builds the error to display after `operation` failed with `failure`.
    ///
    /// The failure kind is kept so the online indicator only reacts to
    /// transport failures.
    pub fn report(&self, operation: Operation, failure: &Failure) -> LastError {
        let message = match failure {
            Failure::Rejected(Some(reason)) => reason.to_owned(),
            Failure::Rejected(None) => INVALID_MOVE.to_owned(),
            Failure::Transport(_) => self.connectivity_message(operation),
        };

        LastError {
            kind: failure.kind(),
            message,
        }
    }

    fn connectivity_message(&self, operation: Operation) -> String {
        match operation {
            Operation::FetchState => format!(
                "Cannot reach server at {}. Make sure the game server is running.",
                self.server_url
            ),
            Operation::SubmitMove => "Failed to make move: cannot reach server.".to_owned(),
            Operation::ResetGame => "Failed to reset game: cannot reach server.".to_owned(),
        }
    }
}
