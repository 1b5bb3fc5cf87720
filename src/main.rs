//! tictac - A terminal client for a remote tic-tac-toe server.
//!
//! The game rules live entirely on the server. This client keeps its local
//! view of the board consistent with the server state, turns user input
//! into move and reset requests, and never lets two of them race.
//!
//! # Configuration
//!
//! Create a `config.yaml` file:
//!
//! ```yaml
//! server:
//!   url: "http://localhost:8080"
//!   timeout: 10
//! ```
//!
//! Any value can be overridden with a `TICTAC_` environment variable:
//!
//! ```bash
//! export TICTAC_SERVER__URL="http://game.example.com"
//! ```
//!
//! # Usage
//!
//! ```bash
//! tictac --config config.yaml
//! ```
//!
//! Then type `move 4`, `reset`, `refresh`, `help` or `quit`.
//!
//! # Architecture
//!
//! - [`config`] - YAML configuration with environment overrides
//! - [`game`] - Game state snapshot and its JSON representation
//! - [`remote`] - Game server HTTP client and failure messages
//! - [`sync`] - Request gate and synchronization controller
//! - [`console`] - Command parsing and rendering for the terminal
//!
//! # Runtime Behavior
//!
//! A single task reads stdin and drives the dispatched intents. An intent
//! typed while a move or reset is still in flight is dropped by the request
//! gate, not queued.
//!
//! # Environment Variables
//!
//! - `RUST_LOG` - Controls logging level (default: `info`), logs go to stderr

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use futures::{StreamExt, stream::FuturesUnordered};
use log::{debug, error, info};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::{
    config::Config,
    console::{Command, CommandParseError, Commander, render},
    remote::{ErrorReporter, GameRequester},
    sync::{Intent, Outcome, SyncController},
};

mod config;
mod console;
mod game;
mod remote;
mod sync;

/// Command-line arguments for the tictac client.
///
/// # Examples
///
/// ```bash
/// tictac --config config.yaml
/// ```
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the YAML configuration file.
    ///
    /// A missing file is fine: defaults and `TICTAC_` environment variables apply.
    #[arg(short, long, default_value = "config.yaml")]
    config: String,
}

/// Main entry point for the tictac client.
///
/// 1. **Logging Setup**: `info` level by default, overridable with `RUST_LOG`
/// 2. **Argument Parsing**: Parses command-line arguments using `clap`
/// 3. **Configuration Loading**: Reads the YAML file and environment overrides
/// 4. **Console Loop**: Mounts the game view, then forwards typed commands to
///    the controller until `quit` or end of input
///
/// Startup errors are logged and end the process without panicking.
#[tokio::main]
async fn main() {
    // Put logger at info level by default
    let env = Env::default().filter_or("RUST_LOG", "info");
    env_logger::init_from_env(env);

    info!("Starting tictac {}...", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    if let Err(e) = run(&args).await {
        error!("{:#}", e);
    }
}

async fn run(args: &Args) -> Result<(), anyhow::Error> {
    let config = Config::load(&args.config)
        .with_context(|| format!("Failed to load config file {}", &args.config))?;
    debug!("loaded configuration {:?}", config);

    let requester = GameRequester::new(&config.server.url, config.server.timeout)
        .context("Failed to build HTTP client")?;
    let controller = SyncController::new(requester, ErrorReporter::new(&config.server.url));

    info!("Using game server {}", &config.server.url);
    console_loop(&controller).await;

    Ok(())
}

/// Reads commands from stdin and renders the state each time it changes.
///
/// Intents run concurrently with input reading on the current task, so the
/// gate sees input typed while a request is in flight. On end of input the
/// outstanding intents are awaited, never cancelled.
async fn console_loop(controller: &SyncController<GameRequester>) {
    let commander = Commander::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut in_flight = FuturesUnordered::new();
    let mut state_receiver = controller.subscribe();

    println!("{}", render::format_help());
    in_flight.push(controller.dispatch(Intent::Mount));

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        error!("Failed to read input: {}", e);
                        break;
                    }
                };

                match commander.parse(&line) {
                    Ok(Command::Play(intent)) => {
                        if controller.is_loading() {
                            println!("Loading...");
                        }
                        in_flight.push(controller.dispatch(intent));
                    }
                    Ok(Command::Help) => println!("{}", render::format_help()),
                    Ok(Command::Quit) => break,
                    Err(CommandParseError::InvalidCommand(message)) => println!("{}", message),
                    Err(CommandParseError::Empty) => {}
                }
            }
            Some(outcome) = in_flight.next(), if !in_flight.is_empty() => {
                debug!("intent settled with {:?}, controller {:?}", outcome, controller.phase());
                match outcome {
                    Outcome::Ignored => println!("{}", render::format_ignored(&controller.state())),
                    Outcome::Failed(kind) => debug!("intent failed with a {:?} failure", kind),
                    Outcome::Synced => {}
                }
            }
            Ok(()) = state_receiver.changed() => {
                let view = render::format_view(&state_receiver.borrow_and_update(), controller.is_loading());
                println!("{}\n", view);
            }
        }
    }

    while let Some(outcome) = in_flight.next().await {
        debug!("intent settled with {:?} after end of input", outcome);
    }

    info!("Leaving tictac");
}
