//! Core game logic and state management

pub mod exploration;
pub mod scenario;
pub mod verdict;

pub use exploration::{
    Command, EndReason, ExplorationState, Explorer, LeafPolicy, StepOutcome, Visit,
};
pub use scenario::{ClueLink, RoomPlan, Scenario};
pub use verdict::{evaluate, normalize_accusation, Exhibit, Ruling, Verdict};

use crate::data::*;
use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

/// The main game state
#[derive(Debug)]
pub struct Game {
    /// Current game phase
    pub phase: GamePhase,

    pub title: String,
    pub synopsis: String,

    /// The mansion
    map: RoomMap,

    /// Clues picked up so far
    notebook: ClueTree,

    /// Who each clue points to
    suspects: SuspectTable,

    explorer: Explorer,

    /// Game statistics
    pub stats: GameStats,

    /// Message log (for UI display)
    pub message_log: Vec<GameMessage>,
}

/// Current phase of the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Exploring,
    Accusation,
    CaseClosed(Verdict),
}

/// Knobs chosen at startup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameOptions {
    pub leaf_policy: LeafPolicy,
    /// Overrides the scenario's bucket count
    pub buckets: Option<usize>,
}

/// Game statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStats {
    pub moves: u32,
    pub rooms_visited: u32,
    pub clues_collected: u32,
    pub blocked_moves: u32,
    pub invalid_commands: u32,
}

/// A message to display to the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameMessage {
    pub timestamp: DateTime<Utc>,
    pub tone: Tone,
    pub message: String,
}

impl GameMessage {
    pub fn narration(message: &str) -> Self {
        Self::with_tone(Tone::Narration, message)
    }

    pub fn with_tone(tone: Tone, message: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            tone,
            message: message.to_string(),
        }
    }
}

impl Game {
    /// Build the scenario and put the detective in the entrance
    pub fn new(scenario: &Scenario, options: GameOptions) -> Result<Self> {
        scenario.lint();
        let mut map = scenario.build_layout()?;
        let suspects = scenario.build_suspects(options.buckets.unwrap_or(scenario.buckets))?;
        let mut notebook = ClueTree::new();
        let (explorer, visit) =
            Explorer::enter(&mut map, &mut notebook, options.leaf_policy)?;

        let mut game = Self {
            phase: GamePhase::Exploring,
            title: scenario.title.clone(),
            synopsis: scenario.synopsis.clone(),
            map,
            notebook,
            suspects,
            explorer,
            stats: GameStats::default(),
            message_log: Vec::new(),
        };

        info!(title = %game.title, rooms = game.map.len(), "game started");
        if !game.synopsis.is_empty() {
            let synopsis = game.synopsis.clone();
            game.add_message(GameMessage::narration(&synopsis));
        }
        game.record_visit(&visit);
        Ok(game)
    }

    /// Add a message to the log
    pub fn add_message(&mut self, message: GameMessage) {
        self.message_log.push(message);
    }

    pub fn current_room(&self) -> &Room {
        self.map.room(self.explorer.current())
    }

    /// Directions open from the current room
    pub fn exits(&self) -> Vec<Side> {
        self.current_room().exits()
    }

    /// Collected clues, alphabetically
    pub fn clues(&self) -> InOrder<'_> {
        self.notebook.iter()
    }

    /// Clues still lying somewhere in the mansion
    pub fn hidden_clues(&self) -> usize {
        self.map.remaining_clues().len()
    }

    pub fn notebook(&self) -> &ClueTree {
        &self.notebook
    }

    pub fn suspect_table(&self) -> &SuspectTable {
        &self.suspects
    }

    /// Names the player may accuse
    pub fn suspects(&self) -> Vec<&str> {
        self.suspects.suspects()
    }

    pub fn leaf_policy(&self) -> LeafPolicy {
        self.explorer.policy()
    }

    /// Feed one exploration command
    pub fn execute(&mut self, command: Command) -> StepOutcome {
        let outcome = self.explorer.step(command, &mut self.map, &mut self.notebook);
        match &outcome {
            StepOutcome::Moved(visit) => {
                self.stats.moves += 1;
                self.record_visit(visit);
            }
            StepOutcome::Blocked(side) => {
                self.stats.blocked_moves += 1;
                self.add_message(GameMessage::with_tone(
                    Tone::Warning,
                    &format!("Path blocked! There is no way {} from here.", side),
                ));
            }
            StepOutcome::Invalid(key) => {
                self.stats.invalid_commands += 1;
                self.add_message(GameMessage::with_tone(
                    Tone::Warning,
                    &format!("'{}' is not a valid choice. Use 'e', 'd' or 's'.", key),
                ));
            }
            StepOutcome::Ended(_) => {}
        }

        if let ExplorationState::Ended { reason, .. } = self.explorer.state() {
            self.finish_exploration(reason);
        }
        outcome
    }

    /// Judge the accusation and close the case
    pub fn accuse(&mut self, raw_name: &str) -> Result<Verdict> {
        if self.phase != GamePhase::Accusation {
            return Err(crate::GameError::InvalidState(
                "an accusation can only be made once exploration is over".to_string(),
            )
            .into());
        }

        let accused = normalize_accusation(raw_name);
        let verdict = evaluate(&self.notebook, &self.suspects, &accused);
        info!(
            accused = %verdict.accused,
            matches = verdict.matches,
            ruling = ?verdict.ruling,
            "case closed"
        );

        self.add_message(GameMessage::with_tone(Tone::Verdict, &verdict.summary()));
        self.phase = GamePhase::CaseClosed(verdict.clone());
        Ok(verdict)
    }

    /// One-line status for the UI
    pub fn check_status(&self) -> String {
        format!(
            "Room: {} | Moves: {} | Clues: {} | Rooms visited: {}",
            self.current_room().name(),
            self.stats.moves,
            self.notebook.len(),
            self.stats.rooms_visited
        )
    }

    fn record_visit(&mut self, visit: &Visit) {
        self.stats.rooms_visited += 1;
        let name = self.map.room(visit.room).name().to_string();
        self.add_message(GameMessage::narration(&format!("You are in: {}", name)));

        if let Some(clue) = visit.collected.as_deref() {
            self.stats.clues_collected += 1;
            self.add_message(GameMessage::with_tone(
                Tone::Discovery,
                &format!("You found a clue: {}", clue),
            ));
        }
    }

    fn finish_exploration(&mut self, reason: EndReason) {
        if self.phase != GamePhase::Exploring {
            return;
        }
        let text = match reason {
            EndReason::Quit => "You stop searching the mansion.",
            EndReason::DeadEnd => "This room has no more exits. The search ends here.",
        };
        self.add_message(GameMessage::narration(text));
        self.phase = GamePhase::Accusation;
    }
}
