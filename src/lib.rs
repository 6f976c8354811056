//! Detective Quest
//!
//! A mansion mystery played in the terminal: walk the rooms, pick up the
//! clues left behind, then name the culprit.
//!
//! # Game Mechanics
//!
//! - **Exploration**: every room has at most a left and a right exit
//! - **Clues**: each clue is collected once and filed alphabetically
//! - **Accusation**: at least two clues must point at the accused
//!
//! # Architecture
//!
//! - `data` - Room layout, clue notebook, suspect table
//! - `game` - Game state, exploration engine, verdicts, scenarios
//! - `console` - Plain line-based front end
//! - `tui` - Terminal user interface with ratatui

pub mod console;
pub mod data;
pub mod game;
pub mod tui;

pub use data::*;
pub use game::Game;

/// Game version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type for the game
pub type Result<T> = anyhow::Result<T>;

/// Custom error types
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Scenario file unreadable: {0}")]
    ScenarioIo(#[from] std::io::Error),

    #[error("Scenario file malformed: {0}")]
    ScenarioFormat(#[from] serde_json::Error),

    #[error("Invalid layout: {0}")]
    InvalidLayout(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid game state: {0}")]
    InvalidState(String),
}
