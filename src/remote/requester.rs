//! HTTP client for the game server API.
//!
//! This module provides the [`GameRequester`] struct for reading, mutating and
//! resetting the authoritative game state held by the server.

use std::time::Duration;

use log::{debug, info};
use mockall::automock;
use reqwest::{Client, Response};

use crate::{
    game::{ErrorResponse, GameState, MoveRequest, StateResponse},
    remote::Failure,
};

/// HTTP client for the game server.
///
/// # Examples
///
/// ```no_run
/// let requester = GameRequester::new("http://localhost:8080", 10).unwrap();
/// let state = requester.submit_move(4).await.unwrap();
/// println!("State: {}", state);
/// ```
pub struct GameRequester {
    /// Game server url, without trailing slash
    url: String,
    /// HTTP client
    client: Client,
}

/// Trait for making requests to the game server.
///
/// This trait abstracts the HTTP operations for easier testing with mocks.
/// No implementation mutates local state: results are handed back to the caller.
#[automock]
pub trait Requester {
    /// Fetches the current authoritative state.
    async fn fetch_state(&self) -> Result<GameState, Failure>;
    /// Asks the server to claim `position` for the current player.
    async fn submit_move(&self, position: usize) -> Result<GameState, Failure>;
    /// Asks the server to discard the current game and start a new one.
    async fn reset_game(&self) -> Result<GameState, Failure>;
}

impl GameRequester {
    /// Create a new [GameRequester].
    ///
    /// # Arguments
    ///
    /// * `url` - The base URL of the game server.
    /// * `timeout` - Transport timeout in seconds applied to every request.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(url: &str, timeout: u64) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout))
            .build()?;

        Ok(GameRequester {
            url: url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Decodes a successful state response.
    ///
    /// Any non success status, undecodable body or inconsistent state is a
    /// transport failure.
    async fn read_state(&self, url: &str, response: Response) -> Result<GameState, Failure> {
        let status = response.status();
        if !status.is_success() {
            return Err(Failure::Transport(format!(
                "unexpected status {} from {}",
                status, url
            )));
        }

        let state_response: StateResponse = response.json().await?;
        debug!("response from {} -> {}", url, &state_response);

        GameState::try_from(state_response).map_err(Failure::Transport)
    }

    /// Decodes the body of a refused move.
    ///
    /// A JSON object is a rejection, anything else is a transport failure.
    async fn read_rejection(&self, url: &str, response: Response) -> Failure {
        let status = response.status();
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => return Failure::from(e),
        };

        match serde_json::from_slice::<ErrorResponse>(&body) {
            Ok(error_response) => {
                debug!("move refused by {} with status {}", url, status);
                Failure::Rejected(error_response.reason())
            }
            Err(e) => Failure::Transport(format!(
                "unexpected status {} from {} with undecodable body: {}",
                status, url, e
            )),
        }
    }
}

impl Requester for GameRequester {
    /// Request `GET /api/state` to get the current game state.
    ///
    /// This api call has no side effect on the server.
    async fn fetch_state(&self) -> Result<GameState, Failure> {
        let url = format!("{}/api/state", &self.url);
        info!("request game state");
        debug!("request GET {}", &url);

        let response = self.client.get(&url).send().await?;

        self.read_state(&url, response).await
    }

    /// Request `POST /api/move` with `{"position": N}`.
    ///
    /// The server answers with the new state on acceptance, or with a non
    /// success status and `{"error": "..."}` when it refuses the move
    /// (occupied cell, concluded game, out of range index).
    async fn submit_move(&self, position: usize) -> Result<GameState, Failure> {
        let url = format!("{}/api/move", &self.url);
        info!("request move at position {}", position);
        debug!("request POST {} position={}", &url, position);

        let response = self
            .client
            .post(&url)
            .json(&MoveRequest { position })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(self.read_rejection(&url, response).await);
        }

        self.read_state(&url, response).await
    }

    /// Request `POST /api/reset` to start a new game.
    async fn reset_game(&self) -> Result<GameState, Failure> {
        let url = format!("{}/api/reset", &self.url);
        info!("request game reset");
        debug!("request POST {}", &url);

        let response = self.client.post(&url).send().await?;

        self.read_state(&url, response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, Player};
    use crate::remote::FailureKind;

    const EMPTY_STATE: &str = r#"{"board": [" ", " ", " ", " ", " ", " ", " ", " ", " "], "currentPlayer": "X", "winner": " ", "gameOver": false}"#;
    const CENTER_STATE: &str = r#"{"board": [" ", " ", " ", " ", "X", " ", " ", " ", " "], "currentPlayer": "O", "winner": " ", "gameOver": false}"#;

    #[tokio::test]
    async fn test_fetch_state() {
        let mut server = mockito::Server::new_async().await;

        server
            .mock("GET", "/api/state")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(EMPTY_STATE)
            .create_async()
            .await;

        let requester = GameRequester::new(&server.url(), 5).unwrap();
        let state = requester.fetch_state().await.unwrap();

        assert_eq!(state, GameState::default());
    }

    #[tokio::test]
    async fn test_fetch_state_strips_trailing_slash() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("GET", "/api/state")
            .with_status(200)
            .with_body(EMPTY_STATE)
            .create_async()
            .await;

        let requester = GameRequester::new(&format!("{}/", server.url()), 5).unwrap();
        assert!(requester.fetch_state().await.is_ok());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_state_error_status_is_transport() {
        let mut server = mockito::Server::new_async().await;

        server
            .mock("GET", "/api/state")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": "nope"}"#)
            .create_async()
            .await;

        let requester = GameRequester::new(&server.url(), 5).unwrap();
        let failure = requester.fetch_state().await.unwrap_err();

        assert_eq!(failure.kind(), FailureKind::Transport);
    }

    #[tokio::test]
    async fn test_fetch_state_malformed_body_is_transport() {
        let mut server = mockito::Server::new_async().await;

        server
            .mock("GET", "/api/state")
            .with_status(200)
            .with_body(r#"{"board": [" ", " "], "currentPlayer": "X"}"#)
            .create_async()
            .await;

        let requester = GameRequester::new(&server.url(), 5).unwrap();
        let failure = requester.fetch_state().await.unwrap_err();

        assert_eq!(failure.kind(), FailureKind::Transport);
    }

    #[tokio::test]
    async fn test_fetch_state_inconsistent_winner_is_transport() {
        let mut server = mockito::Server::new_async().await;

        server
            .mock("GET", "/api/state")
            .with_status(200)
            .with_body(r#"{"board": ["X", "X", "X", "O", "O", " ", " ", " ", " "], "currentPlayer": "O", "winner": "X", "gameOver": false}"#)
            .create_async()
            .await;

        let requester = GameRequester::new(&server.url(), 5).unwrap();
        let failure = requester.fetch_state().await.unwrap_err();

        assert!(matches!(failure, Failure::Transport(detail) if detail.contains("winner X")));
    }

    #[tokio::test]
    async fn test_fetch_state_connection_refused_is_transport() {
        // Nothing listens on the discard port
        let requester = GameRequester::new("http://127.0.0.1:9", 5).unwrap();
        let failure = requester.fetch_state().await.unwrap_err();

        assert_eq!(failure.kind(), FailureKind::Transport);
    }

    #[tokio::test]
    async fn test_submit_move() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("POST", "/api/move")
            .match_header("content-type", "application/json")
            .match_body(mockito::Matcher::JsonString(r#"{"position": 4}"#.to_owned()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(CENTER_STATE)
            .create_async()
            .await;

        let requester = GameRequester::new(&server.url(), 5).unwrap();
        let state = requester.submit_move(4).await.unwrap();

        mock.assert_async().await;
        assert_eq!(state.board[4], Cell::X);
        assert_eq!(state.current_player, Player::O);
        assert_eq!(state.winner, None);
        assert!(!state.game_over);
    }

    #[tokio::test]
    async fn test_submit_move_rejected() {
        let mut server = mockito::Server::new_async().await;

        server
            .mock("POST", "/api/move")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": "cell occupied"}"#)
            .create_async()
            .await;

        let requester = GameRequester::new(&server.url(), 5).unwrap();
        let failure = requester.submit_move(4).await.unwrap_err();

        assert_eq!(failure, Failure::Rejected(Some("cell occupied".to_owned())));
    }

    #[tokio::test]
    async fn test_submit_move_rejected_without_reason() {
        let mut server = mockito::Server::new_async().await;

        server
            .mock("POST", "/api/move")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body("{}")
            .create_async()
            .await;

        let requester = GameRequester::new(&server.url(), 5).unwrap();
        let failure = requester.submit_move(4).await.unwrap_err();

        assert_eq!(failure, Failure::Rejected(None));
    }

    #[tokio::test]
    async fn test_submit_move_undecodable_error_is_transport() {
        let mut server = mockito::Server::new_async().await;

        server
            .mock("POST", "/api/move")
            .with_status(502)
            .with_header("content-type", "text/html")
            .with_body("<html>Bad Gateway</html>")
            .create_async()
            .await;

        let requester = GameRequester::new(&server.url(), 5).unwrap();
        let failure = requester.submit_move(4).await.unwrap_err();

        assert!(matches!(failure, Failure::Transport(detail) if detail.contains("502")));
    }

    #[tokio::test]
    async fn test_reset_game() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("POST", "/api/reset")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(EMPTY_STATE)
            .create_async()
            .await;

        let requester = GameRequester::new(&server.url(), 5).unwrap();
        let state = requester.reset_game().await.unwrap();

        mock.assert_async().await;
        assert_eq!(state, GameState::default());
    }

    #[tokio::test]
    async fn test_reset_game_error_status_is_transport() {
        let mut server = mockito::Server::new_async().await;

        server
            .mock("POST", "/api/reset")
            .with_status(500)
            .create_async()
            .await;

        let requester = GameRequester::new(&server.url(), 5).unwrap();
        let failure = requester.reset_game().await.unwrap_err();

        assert_eq!(failure.kind(), FailureKind::Transport);
    }
}
