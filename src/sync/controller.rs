//! Synchronization between user intents and the authoritative game state.
//!
//! This module provides the [`SyncController`] which turns user intents into
//! gated remote calls and merges their results into the observable
//! [`GameState`].

use std::sync::atomic::{AtomicUsize, Ordering};

use log::{debug, info, warn};
use tokio::sync::watch;

use crate::{
    game::GameState,
    remote::{ErrorReporter, Failure, FailureKind, Operation, Requester},
    sync::RequestGate,
};

/// Event produced by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// The view was mounted and needs its initial state
    Mount,
    /// The user asked to re-read the server state
    Refresh,
    /// The user selected a board cell
    CellSelected(usize),
    /// The user asked for a new game
    ResetRequested,
}

/// How an intent ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Dropped before any remote call (local pre-check or busy gate)
    Ignored,
    /// The server state was applied
    Synced,
    /// The remote call failed and the error was recorded
    Failed(FailureKind),
}

/// Whether a remote call is outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Syncing,
}

/// Drives the observable game state from user intents.
///
/// The state is published through a [`watch`] channel: a success replaces the
/// whole snapshot, a failure only sets its `last_error`. Mutating intents
/// (moves and resets) go through a [`RequestGate`] so at most one of them is
/// in flight; intents arriving meanwhile are dropped. Reads are not gated and
/// the last response to arrive wins.
///
/// # Examples
///
/// ```no_run
/// let requester = GameRequester::new("http://localhost:8080", 10)?;
/// let controller = SyncController::new(requester, ErrorReporter::new("http://localhost:8080"));
///
/// controller.dispatch(Intent::Mount).await;
/// controller.dispatch(Intent::CellSelected(4)).await;
/// println!("{}", controller.state());
/// ```
pub struct SyncController<R: Requester> {
    /// Client of the game server
    requester: R,
    /// Builds banner messages from failures
    reporter: ErrorReporter,
    /// Single-flight guard for moves and resets
    gate: RequestGate,
    /// Last known state, observable by the presentation layer
    state: watch::Sender<GameState>,
    /// Number of outstanding remote calls, gated or not
    in_flight: AtomicUsize,
}

/// Counts one outstanding remote call until dropped.
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn start(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::AcqRel);
        InFlight(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

impl<R: Requester> SyncController<R> {
    /// Create a new [SyncController] holding the placeholder state.
    ///
    /// # Arguments
    ///
    /// * `requester` - An implementation of the [Requester] trait to reach the game server.
    /// * `reporter` - Maps failures to the messages shown to the user.
    pub fn new(requester: R, reporter: ErrorReporter) -> Self {
        SyncController {
            requester,
            reporter,
            gate: RequestGate::new(),
            state: watch::Sender::new(GameState::default()),
            in_flight: AtomicUsize::new(0),
        }
    }

    /// Returns a receiver notified each time the state changes.
    pub fn subscribe(&self) -> watch::Receiver<GameState> {
        self.state.subscribe()
    }

    /// Returns a clone of the current state.
    pub fn state(&self) -> GameState {
        self.state.borrow().clone()
    }

    /// Returns `true` while a move or a reset is in flight.
    ///
    /// The presentation layer disables its input while this holds.
    pub fn is_loading(&self) -> bool {
        self.gate.is_busy()
    }

    pub fn phase(&self) -> Phase {
        if self.in_flight.load(Ordering::Acquire) > 0 {
            Phase::Syncing
        } else {
            Phase::Idle
        }
    }

    /// Routes an intent to its handler.
    pub async fn dispatch(&self, intent: Intent) -> Outcome {
        debug!("dispatch {:?}", intent);

        match intent {
            Intent::Mount => self.mount().await,
            Intent::Refresh => self.refresh().await,
            Intent::CellSelected(position) => self.cell_selected(position).await,
            Intent::ResetRequested => self.reset_requested().await,
        }
    }

    /// Pulls the initial state from the server.
    pub async fn mount(&self) -> Outcome {
        info!("mount game view");
        self.fetch().await
    }

    /// Re-reads the server state without touching the gate.
    pub async fn refresh(&self) -> Outcome {
        info!("refresh game state");
        self.fetch().await
    }

    /// Submits a move at `position`.
    ///
    /// The intent is dropped without any remote call if the cell is not
    /// empty, the game is over, or another mutating request is in flight.
    /// The server still validates every submitted move.
    pub async fn cell_selected(&self, position: usize) -> Outcome {
        let playable = {
            let state = self.state.borrow();
            !state.game_over && state.is_cell_empty(position)
        };

        if !playable {
            debug!("ignore move at position {}, cell taken or game over", position);
            return Outcome::Ignored;
        }

        let Some(_permit) = self.gate.permit() else {
            debug!("ignore move at position {}, request in flight", position);
            return Outcome::Ignored;
        };
        let _in_flight = InFlight::start(&self.in_flight);

        let result = self.requester.submit_move(position).await;
        self.apply(Operation::SubmitMove, result)
    }

    /// Asks the server for a new game.
    ///
    /// Dropped if another mutating request is in flight.
    pub async fn reset_requested(&self) -> Outcome {
        let Some(_permit) = self.gate.permit() else {
            debug!("ignore reset, request in flight");
            return Outcome::Ignored;
        };
        let _in_flight = InFlight::start(&self.in_flight);

        let result = self.requester.reset_game().await;
        self.apply(Operation::ResetGame, result)
    }

    async fn fetch(&self) -> Outcome {
        let _in_flight = InFlight::start(&self.in_flight);

        let result = self.requester.fetch_state().await;
        self.apply(Operation::FetchState, result)
    }

    /// Merges the result of `operation` into the published state.
    fn apply(&self, operation: Operation, result: Result<GameState, Failure>) -> Outcome {
        match result {
            Ok(state) => {
                debug!("{} succeeded -> {}", operation, state);
                self.state.send_replace(GameState {
                    last_error: None,
                    ..state
                });
                Outcome::Synced
            }
            Err(failure) => {
                warn!("{} failed: {}", operation, failure);
                let error = self.reporter.report(operation, &failure);
                let kind = error.kind;
                self.state.send_modify(|state| state.last_error = Some(error));
                Outcome::Failed(kind)
            }
        }
    }
}
