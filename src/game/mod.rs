//! Game state model and its JSON representation.
//!
//! This module holds the snapshot the client renders and the wire shapes
//! exchanged with the game server.
//!
//! # Modules
//!
//! - `response_structs` - Request and response bodies of the game server API
//! - `structs` - The [`GameState`] snapshot and its cell and player types
//!
//! The client never computes the winner or the end of a game: both come
//! verbatim from the server and are only checked for consistency when a
//! response is decoded.

mod response_structs;
mod structs;

pub use crate::game::response_structs::{ErrorResponse, MoveRequest, StateResponse};
pub use crate::game::structs::{BOARD_SIZE, Cell, GameState, LastError, Player};
