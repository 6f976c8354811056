//! Scenario definitions for mansion mysteries
//!
//! A scenario is the fixed content of one game: the room layout with the
//! clues hidden in it, and which suspect each clue points to. It is built
//! into the runtime structures once, before exploration starts.

use crate::data::*;
use crate::GameError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

/// A complete mystery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub title: String,

    #[serde(default)]
    pub synopsis: String,

    /// First room of the layout; every other room hangs below it
    pub entrance: RoomPlan,

    /// Ground truth linking clues to suspects
    #[serde(default)]
    pub testimony: Vec<ClueLink>,

    /// Bucket count of the suspect table
    #[serde(default = "default_buckets")]
    pub buckets: usize,
}

fn default_buckets() -> usize {
    DEFAULT_BUCKET_COUNT
}

/// One room and the rooms behind it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomPlan {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clue: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<Box<RoomPlan>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<Box<RoomPlan>>,
}

impl RoomPlan {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            clue: None,
            left: None,
            right: None,
        }
    }

    pub fn clue(mut self, clue: &str) -> Self {
        self.clue = Some(clue.to_string());
        self
    }

    pub fn left(mut self, room: RoomPlan) -> Self {
        self.left = Some(Box::new(room));
        self
    }

    pub fn right(mut self, room: RoomPlan) -> Self {
        self.right = Some(Box::new(room));
        self
    }
}

/// "This clue incriminates that suspect"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClueLink {
    pub clue: String,
    pub suspect: String,
}

impl ClueLink {
    pub fn new(clue: &str, suspect: &str) -> Self {
        Self {
            clue: clue.to_string(),
            suspect: suspect.to_string(),
        }
    }
}

impl Scenario {
    /// The default mystery in the old family mansion
    pub fn mansion() -> Self {
        let left_wing = RoomPlan::new("Living Room")
            .clue("Torn Glove")
            .left(
                RoomPlan::new("Dining Room")
                    .clue("Poison Vial")
                    .left(RoomPlan::new("Kitchen").clue("Silver Key")),
            )
            .right(RoomPlan::new("Winter Garden").clue("Muddy Boots"));

        let right_wing = RoomPlan::new("Library")
            .clue("Old Diary")
            .left(
                RoomPlan::new("Study")
                    .clue("Stopped Pocket Watch")
                    .right(RoomPlan::new("Secret Passage").clue("Pruning Shears")),
            )
            .right(RoomPlan::new("Master Bedroom").clue("Love Letter"));

        Self {
            title: "The Mansion Affair".to_string(),
            synopsis: "The master of the house was found dead this morning. \
                       Search the mansion, gather the clues and name the culprit."
                .to_string(),
            entrance: RoomPlan::new("Entrance Hall").left(left_wing).right(right_wing),
            testimony: vec![
                ClueLink::new("Torn Glove", "Butler"),
                ClueLink::new("Poison Vial", "Butler"),
                ClueLink::new("Silver Key", "Butler"),
                ClueLink::new("Old Diary", "Housekeeper"),
                ClueLink::new("Love Letter", "Housekeeper"),
                ClueLink::new("Muddy Boots", "Gardener"),
                ClueLink::new("Stopped Pocket Watch", "Gardener"),
                ClueLink::new("Pruning Shears", "Gardener"),
            ],
            buckets: DEFAULT_BUCKET_COUNT,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, GameError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, GameError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Build the room layout, entrance first.
    pub fn build_layout(&self) -> Result<RoomMap, GameError> {
        let mut map = RoomMap::new();
        let mut pending: Vec<(&RoomPlan, Option<(RoomId, Side)>)> = vec![(&self.entrance, None)];

        while let Some((plan, slot)) = pending.pop() {
            if plan.name.trim().is_empty() {
                return Err(GameError::InvalidLayout("room without a name".to_string()));
            }
            let id = map.create_room(&plan.name, plan.clue.as_deref());
            if let Some((parent, side)) = slot {
                map.attach(parent, side, id)?;
            }
            if let Some(right) = plan.right.as_deref() {
                pending.push((right, Some((id, Side::Right))));
            }
            if let Some(left) = plan.left.as_deref() {
                pending.push((left, Some((id, Side::Left))));
            }
        }

        debug!(rooms = map.len(), title = %self.title, "layout built");
        Ok(map)
    }

    /// Seed the suspect table from the testimony list.
    pub fn build_suspects(&self, bucket_count: usize) -> Result<SuspectTable, GameError> {
        let mut table = SuspectTable::with_buckets(bucket_count)?;
        for link in &self.testimony {
            table.insert(&link.clue, &link.suspect);
        }
        debug!(
            entries = table.len(),
            buckets = table.bucket_count(),
            load_factor = table.load_factor(),
            "suspect table seeded"
        );
        Ok(table)
    }

    /// Content problems that do not stop the game but probably are mistakes
    pub fn lint(&self) -> Vec<String> {
        let mut problems = Vec::new();
        let mut seen: Vec<&str> = Vec::new();
        let mut pending = vec![&self.entrance];

        while let Some(plan) = pending.pop() {
            if let Some(clue) = plan.clue.as_deref() {
                if seen.contains(&clue) {
                    problems.push(format!("clue \"{}\" is hidden in more than one room", clue));
                }
                seen.push(clue);
                if !self.testimony.iter().any(|link| link.clue == clue) {
                    problems.push(format!("clue \"{}\" points to no suspect", clue));
                }
            }
            pending.extend(plan.left.as_deref());
            pending.extend(plan.right.as_deref());
        }

        for link in &self.testimony {
            if !seen.contains(&link.clue.as_str()) {
                problems.push(format!("clue \"{}\" is never hidden in a room", link.clue));
            }
        }

        for problem in &problems {
            warn!(title = %self.title, "{}", problem);
        }
        problems
    }
}

impl Default for Scenario {
    fn default() -> Self {
        Self::mansion()
    }
}
