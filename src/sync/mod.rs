//! Client side synchronization with the game server.
//!
//! - `gate` - [`RequestGate`], the single-flight guard for moves and resets
//! - `controller` - [`SyncController`], which turns user intents into remote
//!   calls and publishes the resulting [`crate::game::GameState`]
//!
//! # State machine
//!
//! ```text
//! IDLE --mount/refresh--------------------------> SYNCING --settled--> IDLE
//! IDLE --cellSelected(i) [empty, !over, idle]---> SYNCING --settled--> IDLE
//! IDLE --resetRequested [idle]------------------> SYNCING --settled--> IDLE
//! any intent failing its guard is dropped
//! ```

mod controller;
mod gate;

pub use crate::sync::controller::{Intent, Outcome, Phase, SyncController};
pub use crate::sync::gate::RequestGate;
