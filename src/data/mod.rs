//! Data structures for the game world
//!
//! The mansion layout, the detective's clue notebook and the table that
//! ties each clue to a suspect.

pub mod clues;
pub mod rooms;
pub mod suspects;

pub use clues::*;
pub use rooms::*;
pub use suspects::{SuspectTable, DEFAULT_BUCKET_COUNT};

use serde::{Deserialize, Serialize};

/// How a message to the player should stand out
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tone {
    Narration,
    Discovery,
    Warning,
    Verdict,
}

impl Tone {
    pub fn symbol(&self) -> &'static str {
        match self {
            Tone::Narration => "·",
            Tone::Discovery => "✦",
            Tone::Warning => "▲",
            Tone::Verdict => "⚖",
        }
    }
}
