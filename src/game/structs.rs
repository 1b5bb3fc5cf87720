//! Data structures representing the locally rendered game.
//!
//! The [`GameState`] snapshot is replaced as a whole each time the server
//! answers, so the renderer never observes a half-updated board.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{game::StateResponse, remote::FailureKind};

/// Number of cells on the board, indexed row-major from 0 to 8.
pub const BOARD_SIZE: usize = 9;

/// One of the two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
        }
    }
}

/// Content of a board cell.
///
/// The empty cell is the single space string `" "` on the wire, never `""`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[serde(rename = " ")]
    Empty,
    X,
    O,
}

impl Cell {
    /// Returns the player owning this cell, if any.
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Cell::Empty => write!(f, " "),
            Cell::X => write!(f, "X"),
            Cell::O => write!(f, "O"),
        }
    }
}

/// Error shown to the user after the most recent remote interaction failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastError {
    /// Kind of the failure, drives the online indicator
    pub kind: FailureKind,
    /// Human readable message for the banner
    pub message: String,
}

impl fmt::Display for LastError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Snapshot of the game as last reported by the server.
///
/// # Invariants
///
/// - The board always holds exactly [`BOARD_SIZE`] cells.
/// - `winner.is_some()` implies `game_over`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    /// Cells in row-major order
    pub board: [Cell; BOARD_SIZE],
    /// Player to move, meaningful only while the game is not over
    pub current_player: Player,
    /// Winner of a concluded game, `None` for a draw or an ongoing game
    pub winner: Option<Player>,
    /// Whether the server reported the game as concluded
    pub game_over: bool,
    /// Set when the most recent remote interaction failed
    pub last_error: Option<LastError>,
}

impl Default for GameState {
    /// Placeholder used until the first state fetch succeeds.
    fn default() -> Self {
        GameState {
            board: [Cell::Empty; BOARD_SIZE],
            current_player: Player::X,
            winner: None,
            game_over: false,
            last_error: None,
        }
    }
}

impl GameState {
    /// Returns `true` if `position` names an empty cell of the board.
    ///
    /// Positions outside the board are never empty.
    pub fn is_cell_empty(&self, position: usize) -> bool {
        matches!(self.board.get(position), Some(Cell::Empty))
    }

    /// Returns `true` unless the last error comes from a transport failure.
    ///
    /// A rejected move leaves the client online.
    pub fn is_online(&self) -> bool {
        !matches!(
            &self.last_error,
            Some(LastError {
                kind: FailureKind::Transport,
                ..
            })
        )
    }
}

impl TryFrom<StateResponse> for GameState {
    type Error = String;

    fn try_from(response: StateResponse) -> Result<Self, Self::Error> {
        let winner = response.winner.owner();

        if winner.is_some() && !response.game_over {
            return Err(format!(
                "state reports winner {} while the game is not over",
                response.winner
            ));
        }

        Ok(GameState {
            board: response.board,
            current_player: response.current_player,
            winner,
            game_over: response.game_over,
            last_error: None,
        })
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let board: String = self.board.iter().map(|cell| cell.to_string()).collect();
        write!(
            f,
            "board=[{}], current_player={}, winner={:?}, game_over={}",
            board, self.current_player, self.winner, self.game_over
        )
    }
}
