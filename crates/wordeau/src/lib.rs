//! Wordeau - terminal client for a remote word-guessing game.
//!
//! The player has six tries to guess a five-letter word chosen by the
//! server. Each guess is evaluated remotely; this crate keeps the session,
//! derives hints from the feedback, enforces hard mode, and persists the
//! game between runs.
//!
//! # Architecture
//!
//! - **Controller**: session lifecycle and the submit state machine
//! - **API**: the guess service trait and its HTTP implementation
//! - **Storage**: versioned session record over a key-value store
//! - **TUI**: ratatui board, hint keyboard and key handling
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use wordeau::{GameController, HttpGuessService, MemoryStore, SessionStore};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let service = HttpGuessService::new(
//!     wordeau::DEFAULT_API_URL.to_string(),
//!     Duration::from_secs(10),
//! )?;
//! let store = SessionStore::new(Arc::new(MemoryStore::new()));
//! let controller = GameController::restore(Arc::new(service), store)?;
//!
//! controller.ensure_started().await?;
//! for letter in "crane".chars() {
//!     controller.push_letter(letter);
//! }
//! let outcome = controller.submit().await?;
//! println!("{:?}", outcome);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod api;
mod cli;
mod config;
mod controller;
mod error;
mod input;
mod session;
mod storage;
mod tui;

// Crate-level exports - Guess service
pub use api::{
    DEFAULT_API_URL, FinishRequest, FinishResponse, GameInfo, GuessRequest, GuessResponse,
    GuessService, HttpGuessService, ServiceError,
};

// Crate-level exports - CLI and configuration
pub use cli::{Cli, Command, CommonArgs};
pub use config::{API_URL_ENV, ClientConfig, ConfigError};

// Crate-level exports - Game controller
pub use controller::{GameController, GameSnapshot, SubmitOutcome};
pub use error::{StartError, SubmitError};
pub use session::{Answer, Difficulty, GamePhase, Session};

// Crate-level exports - Persistence
pub use storage::{
    KeyValueStore, KvEntry, MemoryStore, NewKvEntry, STORAGE_VERSION, SessionStore, Slot,
    SlotWrite, SqliteStore, StorageError,
};

// Crate-level exports - Terminal UI
pub use input::KeyInput;
pub use tui::{KEYBOARD_ROWS, draw, run_tui};

// Core game logic
pub use wordeau_core::{
    Guess, Hints, LetterFeedback, LetterHints, LetterState, MAX_ATTEMPTS, PositionHints,
    WORD_LENGTH, derive_hints, is_winning_guess, unused_hint_letters,
};
