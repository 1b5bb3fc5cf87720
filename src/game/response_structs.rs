//! Request and response bodies of the game server API.
//!
//! This module contains structures for (de)serializing the JSON exchanged
//! with the `/api/state`, `/api/move` and `/api/reset` endpoints.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::game::{BOARD_SIZE, Cell, Player};

/// Game state returned by every successful endpoint.
///
/// ```json
/// {
///   "board": ["X", " ", " ", " ", "O", " ", " ", " ", " "],
///   "currentPlayer": "X",
///   "winner": " ",
///   "gameOver": false
/// }
/// ```
///
/// A board with any other length than [`BOARD_SIZE`] fails to deserialize.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct StateResponse {
    /// Cells in row-major order.
    pub board: [Cell; BOARD_SIZE],
    /// Player to move.
    pub current_player: Player,
    /// Winner, [`Cell::Empty`] when there is none.
    pub winner: Cell,
    /// Whether the game is concluded.
    pub game_over: bool,
}

impl fmt::Display for StateResponse {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "board={:?}, current_player={}, winner={:?}, game_over={}",
            self.board, self.current_player, self.winner, self.game_over
        )
    }
}

/// Body of `POST /api/move`.
#[derive(Serialize, Debug)]
pub struct MoveRequest {
    /// Cell to claim for the current player.
    pub position: usize,
}

/// Body returned by `/api/move` when the server refuses the move.
#[derive(Deserialize, Debug)]
pub struct ErrorResponse {
    /// Reason given by the server.
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorResponse {
    /// Returns the reason if the server supplied a non blank one.
    pub fn reason(self) -> Option<String> {
        self.error.filter(|reason| !reason.trim().is_empty())
    }
}
