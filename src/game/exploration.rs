//! Exploration engine
//!
//! A small state machine walking the room layout one command at a time.
//! Entering a room moves its clue, if one is still there, into the
//! detective's notebook.

use crate::data::*;
use crate::GameError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A player command during exploration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Go(Side),
    Quit,
    Invalid(char),
}

impl Command {
    /// `e` goes left (esquerda), `d` right (direita), `s` leaves (sair).
    /// Case does not matter; anything else is invalid.
    pub fn parse(key: char) -> Self {
        match key.to_ascii_lowercase() {
            'e' => Command::Go(Side::Left),
            'd' => Command::Go(Side::Right),
            's' => Command::Quit,
            _ => Command::Invalid(key),
        }
    }
}

/// What happens when the detective walks into a room with no exits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LeafPolicy {
    /// Exploration only ends when the player quits
    #[default]
    QuitOnly,
    /// Exploration ends as soon as a dead end is entered
    EndAtDeadEnd,
}

/// Why exploration ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    Quit,
    DeadEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExplorationState {
    InRoom(RoomId),
    Ended { last_room: RoomId, reason: EndReason },
}

/// Arrival in a room
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visit {
    pub room: RoomId,
    /// Clue picked up on arrival
    pub collected: Option<String>,
}

/// Result of a single command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Moved(Visit),
    /// No exit that way; the detective stays put
    Blocked(Side),
    /// Unrecognized key; the detective stays put
    Invalid(char),
    Ended(EndReason),
}

#[derive(Debug, Clone)]
pub struct Explorer {
    state: ExplorationState,
    policy: LeafPolicy,
}

impl Explorer {
    /// Place the detective in the entrance, collecting whatever lies there.
    pub fn enter(
        map: &mut RoomMap,
        notebook: &mut ClueTree,
        policy: LeafPolicy,
    ) -> Result<(Self, Visit), GameError> {
        let entrance = map
            .root()
            .ok_or_else(|| GameError::InvalidLayout("the mansion has no rooms".to_string()))?;

        let mut explorer = Self {
            state: ExplorationState::InRoom(entrance),
            policy,
        };
        let visit = explorer.arrive(entrance, map, notebook);
        Ok((explorer, visit))
    }

    pub fn state(&self) -> ExplorationState {
        self.state
    }

    pub fn policy(&self) -> LeafPolicy {
        self.policy
    }

    /// Room the detective stands in, or stood in last
    pub fn current(&self) -> RoomId {
        match self.state {
            ExplorationState::InRoom(room) => room,
            ExplorationState::Ended { last_room, .. } => last_room,
        }
    }

    pub fn is_ended(&self) -> bool {
        matches!(self.state, ExplorationState::Ended { .. })
    }

    /// Apply one command. Commands after the end are ignored.
    pub fn step(
        &mut self,
        command: Command,
        map: &mut RoomMap,
        notebook: &mut ClueTree,
    ) -> StepOutcome {
        let current = match self.state {
            ExplorationState::InRoom(room) => room,
            ExplorationState::Ended { reason, .. } => return StepOutcome::Ended(reason),
        };

        match command {
            Command::Go(side) => match map.child(current, side) {
                Some(next) => StepOutcome::Moved(self.arrive(next, map, notebook)),
                None => {
                    debug!(room = %map.room(current).name(), %side, "path blocked");
                    StepOutcome::Blocked(side)
                }
            },
            Command::Quit => {
                self.state = ExplorationState::Ended {
                    last_room: current,
                    reason: EndReason::Quit,
                };
                StepOutcome::Ended(EndReason::Quit)
            }
            Command::Invalid(key) => StepOutcome::Invalid(key),
        }
    }

    fn arrive(&mut self, room: RoomId, map: &mut RoomMap, notebook: &mut ClueTree) -> Visit {
        self.state = ExplorationState::InRoom(room);

        let collected = map.take_clue(room);
        if let Some(clue) = collected.as_deref() {
            notebook.insert(clue);
            debug!(room = %map.room(room).name(), clue, "clue collected");
        }

        if self.policy == LeafPolicy::EndAtDeadEnd && map.room(room).is_dead_end() {
            self.state = ExplorationState::Ended {
                last_room: room,
                reason: EndReason::DeadEnd,
            };
        }

        Visit { room, collected }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hall, with the Library to the left holding the Old Diary
    fn hall_and_library() -> RoomMap {
        let mut map = RoomMap::new();
        let hall = map.create_room("Hall", None);
        let library = map.create_room("Library", Some("Old Diary"));
        map.attach(hall, Side::Left, library).unwrap();
        map
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse('e'), Command::Go(Side::Left));
        assert_eq!(Command::parse('E'), Command::Go(Side::Left));
        assert_eq!(Command::parse('d'), Command::Go(Side::Right));
        assert_eq!(Command::parse('D'), Command::Go(Side::Right));
        assert_eq!(Command::parse('s'), Command::Quit);
        assert_eq!(Command::parse('S'), Command::Quit);
        assert_eq!(Command::parse('x'), Command::Invalid('x'));
        assert_eq!(Command::parse('?'), Command::Invalid('?'));
    }

    #[test]
    fn test_hall_library_walk() {
        let mut map = hall_and_library();
        let mut notebook = ClueTree::new();
        let (mut explorer, visit) =
            Explorer::enter(&mut map, &mut notebook, LeafPolicy::QuitOnly).unwrap();
        assert_eq!(visit.collected, None);

        let outcome = explorer.step(Command::Go(Side::Right), &mut map, &mut notebook);
        assert_eq!(outcome, StepOutcome::Blocked(Side::Right));
        assert_eq!(map.room(explorer.current()).name(), "Hall");

        let outcome = explorer.step(Command::Go(Side::Left), &mut map, &mut notebook);
        match outcome {
            StepOutcome::Moved(visit) => {
                assert_eq!(map.room(visit.room).name(), "Library");
                assert_eq!(visit.collected.as_deref(), Some("Old Diary"));
            }
            other => panic!("expected a move, got {:?}", other),
        }
        // Library is a dead end but the default policy keeps going
        assert!(!explorer.is_ended());

        assert_eq!(
            explorer.step(Command::Quit, &mut map, &mut notebook),
            StepOutcome::Ended(EndReason::Quit)
        );
        assert!(explorer.is_ended());
        assert_eq!(notebook.iter().collect::<Vec<_>>(), vec!["Old Diary"]);
    }

    #[test]
    fn test_invalid_key_keeps_position() {
        let mut map = hall_and_library();
        let mut notebook = ClueTree::new();
        let (mut explorer, _) =
            Explorer::enter(&mut map, &mut notebook, LeafPolicy::QuitOnly).unwrap();
        let before = explorer.current();
        assert_eq!(
            explorer.step(Command::parse('x'), &mut map, &mut notebook),
            StepOutcome::Invalid('x')
        );
        assert_eq!(explorer.current(), before);
    }

    #[test]
    fn test_revisit_collects_nothing() {
        // Hall -> Library is one way, so build a map where the clue sits in
        // the entrance and re-enter it through a fresh explorer.
        let mut map = RoomMap::new();
        map.create_room("Hall", Some("Pipe Ash"));
        let mut notebook = ClueTree::new();

        let (_, first) = Explorer::enter(&mut map, &mut notebook, LeafPolicy::QuitOnly).unwrap();
        let (_, second) = Explorer::enter(&mut map, &mut notebook, LeafPolicy::QuitOnly).unwrap();
        assert_eq!(first.collected.as_deref(), Some("Pipe Ash"));
        assert_eq!(second.collected, None);
        assert_eq!(notebook.len(), 1);
    }

    #[test]
    fn test_dead_end_policy_ends_exploration() {
        let mut map = hall_and_library();
        let mut notebook = ClueTree::new();
        let (mut explorer, _) =
            Explorer::enter(&mut map, &mut notebook, LeafPolicy::EndAtDeadEnd).unwrap();
        assert!(!explorer.is_ended());

        explorer.step(Command::Go(Side::Left), &mut map, &mut notebook);
        assert_eq!(
            explorer.state(),
            ExplorationState::Ended {
                last_room: RoomId(1),
                reason: EndReason::DeadEnd
            }
        );
        assert!(notebook.contains("Old Diary"));
        assert_eq!(
            explorer.step(Command::Go(Side::Right), &mut map, &mut notebook),
            StepOutcome::Ended(EndReason::DeadEnd)
        );
    }

    #[test]
    fn test_empty_map_cannot_be_entered() {
        let mut map = RoomMap::new();
        let mut notebook = ClueTree::new();
        assert!(Explorer::enter(&mut map, &mut notebook, LeafPolicy::QuitOnly).is_err());
    }
}
