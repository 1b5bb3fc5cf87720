//! Text formatters for the terminal front end.
//!
//! This module renders the [`GameState`] and the console messages. Nothing
//! here decides anything: the state is displayed exactly as the controller
//! published it.

use crate::game::{Cell, GameState};

/// Formats the help message listing the console commands.
///
/// # Examples
///
/// ```
/// let help = format_help();
/// assert!(help.contains("Commands:"));
/// ```
pub fn format_help() -> String {
    let body = "Commands:\n\
        - `move <0-8>` (or just `<0-8>`): play the given cell, numbered row by row\n\
        - `reset`: start a new game\n\
        - `refresh`: read the game state from the server again\n\
        - `help`: show this help message\n\
        - `quit`: leave\n\
        Commands may be prefixed with `!`.";

    body.to_owned()
}

pub fn format_unknown_command() -> String {
    "Unknown command. Type `help` for more information.".to_owned()
}

pub fn format_invalid_move() -> String {
    "Invalid move command. Usage: `move <0-8>`.".to_owned()
}

/// Explains why an intent was dropped before reaching the server.
pub fn format_ignored(state: &GameState) -> String {
    if state.game_over {
        "The game is over. Type `reset` to play again.".to_owned()
    } else {
        "Ignored: the cell is taken or a request is still in flight.".to_owned()
    }
}

/// Formats the board as a 3x3 grid.
///
/// Empty cells show their index so the user knows what to type.
pub fn format_board(state: &GameState) -> String {
    state
        .board
        .chunks(3)
        .enumerate()
        .map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(|(column, cell)| match cell {
                    Cell::Empty => format!(" {} ", row * 3 + column),
                    _ => format!(" {} ", cell),
                })
                .collect::<Vec<String>>()
                .join("|")
        })
        .collect::<Vec<String>>()
        .join("\n---+---+---\n")
}

/// Formats the line describing who plays or how the game ended.
pub fn format_status(state: &GameState) -> String {
    match state.winner {
        Some(winner) => format!("Player {} wins!", winner),
        None if state.game_over => "It's a draw!".to_owned(),
        None => format!("Player {}'s turn", state.current_player),
    }
}

/// Formats the whole view: error banner, status, board and backend indicator.
///
/// # Arguments
///
/// * `state` - The state to display
/// * `loading` - Whether a move or a reset is in flight
pub fn format_view(state: &GameState, loading: bool) -> String {
    let mut view = String::new();

    if let Some(error) = &state.last_error {
        view.push_str(&format!("/!\\ {}\n", error));
    }

    view.push_str(&format_status(state));
    view.push_str("\n\n");
    view.push_str(&format_board(state));
    view.push_str("\n\n");

    if loading {
        view.push_str("Loading...\n");
    }

    let backend = if state.is_online() { "Online" } else { "Offline" };
    view.push_str(&format!("Backend status: {}", backend));

    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{BOARD_SIZE, LastError, Player};
    use crate::remote::FailureKind;

    fn center_state() -> GameState {
        let mut board = [Cell::Empty; BOARD_SIZE];
        board[4] = Cell::X;

        GameState {
            board,
            current_player: Player::O,
            ..GameState::default()
        }
    }

    #[test]
    fn test_format_help() {
        let help = format_help();

        assert!(help.contains("Commands:"));
        assert!(help.contains("move <0-8>"));
        assert!(help.contains("reset"));
    }

    #[test]
    fn test_format_ignored() {
        let over = GameState {
            game_over: true,
            ..center_state()
        };

        assert!(format_ignored(&over).contains("reset"));
        assert!(format_ignored(&center_state()).starts_with("Ignored"));
    }

    #[test]
    fn test_format_board() {
        let board = format_board(&center_state());

        assert_eq!(
            board,
            " 0 | 1 | 2 \n---+---+---\n 3 | X | 5 \n---+---+---\n 6 | 7 | 8 "
        );
    }

    #[test]
    fn test_format_status_turn() {
        assert_eq!(format_status(&center_state()), "Player O's turn");
    }

    #[test]
    fn test_format_status_winner() {
        let state = GameState {
            winner: Some(Player::X),
            game_over: true,
            ..center_state()
        };

        assert_eq!(format_status(&state), "Player X wins!");
    }

    #[test]
    fn test_format_status_draw() {
        let state = GameState {
            game_over: true,
            ..center_state()
        };

        assert_eq!(format_status(&state), "It's a draw!");
    }

    #[test]
    fn test_format_view_online() {
        let view = format_view(&GameState::default(), false);

        assert!(view.starts_with("Player X's turn"));
        assert!(view.ends_with("Backend status: Online"));
        assert!(!view.contains("/!\\"));
        assert!(!view.contains("Loading"));
    }

    #[test]
    fn test_format_view_rejected_move_stays_online() {
        let state = GameState {
            last_error: Some(LastError {
                kind: FailureKind::Rejected,
                message: "cell occupied".to_owned(),
            }),
            ..center_state()
        };

        let view = format_view(&state, false);

        assert!(view.starts_with("/!\\ cell occupied\n"));
        assert!(view.ends_with("Backend status: Online"));
    }

    #[test]
    fn test_format_view_offline_and_loading() {
        let state = GameState {
            last_error: Some(LastError {
                kind: FailureKind::Transport,
                message: "Failed to make move: cannot reach server.".to_owned(),
            }),
            ..GameState::default()
        };

        let view = format_view(&state, true);

        assert!(view.contains("Loading..."));
        assert!(view.ends_with("Backend status: Offline"));
    }
}
