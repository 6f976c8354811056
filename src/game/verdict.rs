//! Judging the accusation against the collected clues

use crate::data::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Clues that must point at the accused for the accusation to stand
pub const ACCUSATION_THRESHOLD: usize = 2;

/// Longest accused name taken from the player; the rest is dropped
pub const MAX_ACCUSATION_CHARS: usize = 49;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ruling {
    Sustained,
    Insufficient,
}

/// A collected clue and who it points to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exhibit {
    pub clue: String,
    pub suspect: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub accused: String,
    pub matches: usize,
    pub ruling: Ruling,
    /// Every clue in the notebook, alphabetically
    pub evidence: Vec<Exhibit>,
}

impl Verdict {
    pub fn is_sustained(&self) -> bool {
        self.ruling == Ruling::Sustained
    }

    pub fn summary(&self) -> String {
        match self.ruling {
            Ruling::Sustained => format!(
                "{} clue(s) point to {}. The accusation is sustained: case closed!",
                self.matches, self.accused
            ),
            Ruling::Insufficient => format!(
                "Only {} clue(s) point to {}. Not enough evidence, the culprit walks free.",
                self.matches, self.accused
            ),
        }
    }
}

/// Trim the typed name and cut it to [`MAX_ACCUSATION_CHARS`].
pub fn normalize_accusation(raw: &str) -> String {
    raw.trim().chars().take(MAX_ACCUSATION_CHARS).collect::<String>().trim_end().to_string()
}

/// Count the notebook clues whose suspect is exactly `accused`.
///
/// Clues the table knows nothing about count for nobody.
pub fn evaluate(notebook: &ClueTree, table: &SuspectTable, accused: &str) -> Verdict {
    let evidence: Vec<Exhibit> = notebook
        .iter()
        .map(|clue| Exhibit {
            clue: clue.to_string(),
            suspect: table.lookup(clue).map(str::to_string),
        })
        .collect();

    let matches = evidence
        .iter()
        .filter(|exhibit| exhibit.suspect.as_deref() == Some(accused))
        .count();

    let ruling = if matches >= ACCUSATION_THRESHOLD {
        Ruling::Sustained
    } else {
        Ruling::Insufficient
    };
    debug!(accused, matches, ?ruling, "verdict reached");

    Verdict {
        accused: accused.to_string(),
        matches,
        ruling,
        evidence,
    }
}
