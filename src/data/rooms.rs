//! Mansion layout: a fixed binary tree of rooms
//!
//! Rooms are stored in an arena and refer to their children by [`RoomId`].
//! The layout is assembled once with [`RoomMap::create_room`] and
//! [`RoomMap::attach`]; afterwards only a room's clue changes, when the
//! detective picks it up.

use crate::GameError;
use serde::{Deserialize, Serialize};

/// Index of a room inside its [`RoomMap`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomId(pub usize);

impl std::fmt::Display for RoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which child of a room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Key the player presses to take this exit
    pub fn key(&self) -> char {
        match self {
            Side::Left => 'e',
            Side::Right => 'd',
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// A location in the mansion
#[derive(Debug, Clone)]
pub struct Room {
    name: String,
    clue: Option<String>,
    left: Option<RoomId>,
    right: Option<RoomId>,
    parent: Option<RoomId>,
}

impl Room {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Clue still lying in the room, if any
    pub fn clue(&self) -> Option<&str> {
        self.clue.as_deref()
    }

    pub fn child(&self, side: Side) -> Option<RoomId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// Directions that lead somewhere, left first
    pub fn exits(&self) -> Vec<Side> {
        [Side::Left, Side::Right]
            .into_iter()
            .filter(|side| self.child(*side).is_some())
            .collect()
    }

    pub fn is_dead_end(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Arena holding every room of the layout; the first room created is the
/// entrance.
#[derive(Debug, Clone, Default)]
pub struct RoomMap {
    rooms: Vec<Room>,
}

impl RoomMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a room with no exits. `clue` may be absent.
    pub fn create_room(&mut self, name: &str, clue: Option<&str>) -> RoomId {
        let id = RoomId(self.rooms.len());
        self.rooms.push(Room {
            name: name.to_string(),
            clue: clue.map(str::to_string),
            left: None,
            right: None,
            parent: None,
        });
        id
    }

    /// Wire `child` as the `side` exit of `parent`.
    ///
    /// Every room keeps at most one parent, the entrance never gets one and
    /// a room cannot lead back to one of its ancestors, so the layout stays
    /// a tree.
    pub fn attach(
        &mut self,
        parent: RoomId,
        side: Side,
        child: RoomId,
    ) -> Result<(), GameError> {
        self.get(parent)?;
        self.get(child)?;

        if self.ancestors(parent).any(|id| id == child) {
            return Err(GameError::InvalidLayout(format!(
                "room {} cannot lead back to itself",
                self.rooms[child.0].name
            )));
        }

        if Some(child) == self.root() {
            return Err(GameError::InvalidLayout(format!(
                "the entrance {} cannot be placed behind another room",
                child
            )));
        }
        if self.rooms[child.0].parent.is_some() {
            return Err(GameError::InvalidLayout(format!(
                "room {} already has a way in",
                self.rooms[child.0].name
            )));
        }
        if self.rooms[parent.0].child(side).is_some() {
            return Err(GameError::InvalidLayout(format!(
                "the {} exit of {} is already taken",
                side, self.rooms[parent.0].name
            )));
        }

        let room = &mut self.rooms[parent.0];
        match side {
            Side::Left => room.left = Some(child),
            Side::Right => room.right = Some(child),
        }
        self.rooms[child.0].parent = Some(parent);
        Ok(())
    }

    /// `id` followed by each room above it
    fn ancestors(&self, id: RoomId) -> impl Iterator<Item = RoomId> + '_ {
        std::iter::successors(Some(id), |current| self.rooms[current.0].parent)
    }

    /// The entrance, or `None` for an empty map
    pub fn root(&self) -> Option<RoomId> {
        if self.rooms.is_empty() {
            None
        } else {
            Some(RoomId(0))
        }
    }

    pub fn get(&self, id: RoomId) -> Result<&Room, GameError> {
        self.rooms
            .get(id.0)
            .ok_or_else(|| GameError::InvalidLayout(format!("no room with id {}", id)))
    }

    /// Panics on an id from another map
    pub fn room(&self, id: RoomId) -> &Room {
        &self.rooms[id.0]
    }

    pub fn child(&self, id: RoomId, side: Side) -> Option<RoomId> {
        self.room(id).child(side)
    }

    /// Pick up the clue in `id`. Returns it only the first time.
    pub fn take_clue(&mut self, id: RoomId) -> Option<String> {
        self.rooms[id.0].clue.take()
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Clues not yet collected in rooms reachable from the entrance,
    /// depth first with left before right
    pub fn remaining_clues(&self) -> Vec<&str> {
        let mut clues = Vec::new();
        let mut pending: Vec<RoomId> = self.root().into_iter().collect();
        while let Some(id) = pending.pop() {
            let room = &self.rooms[id.0];
            clues.extend(room.clue());
            pending.extend(room.right);
            pending.extend(room.left);
        }
        clues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hall_and_library() -> (RoomMap, RoomId, RoomId) {
        let mut map = RoomMap::new();
        let hall = map.create_room("Hall", None);
        let library = map.create_room("Library", Some("Old Diary"));
        map.attach(hall, Side::Left, library).unwrap();
        (map, hall, library)
    }

    #[test]
    fn test_created_room_is_a_dead_end() {
        let mut map = RoomMap::new();
        let id = map.create_room("Kitchen", None);
        let room = map.room(id);
        assert_eq!(room.name(), "Kitchen");
        assert_eq!(room.clue(), None);
        assert!(room.is_dead_end());
        assert!(room.exits().is_empty());
    }

    #[test]
    fn test_attach_wires_children() {
        let (map, hall, library) = hall_and_library();
        assert_eq!(map.root(), Some(hall));
        assert_eq!(map.child(hall, Side::Left), Some(library));
        assert_eq!(map.child(hall, Side::Right), None);
        assert_eq!(map.room(hall).exits(), vec![Side::Left]);
    }

    #[test]
    fn test_attach_rejects_second_parent() {
        let (mut map, hall, library) = hall_and_library();
        assert!(map.attach(hall, Side::Right, library).is_err());
    }

    #[test]
    fn test_attach_rejects_taken_slot() {
        let (mut map, hall, _) = hall_and_library();
        let study = map.create_room("Study", None);
        assert!(map.attach(hall, Side::Left, study).is_err());
        assert!(map.attach(hall, Side::Right, study).is_ok());
    }

    #[test]
    fn test_attach_rejects_entrance_as_child() {
        let (mut map, hall, library) = hall_and_library();
        assert!(map.attach(library, Side::Left, hall).is_err());
    }

    #[test]
    fn test_attach_rejects_unknown_room() {
        let (mut map, hall, _) = hall_and_library();
        assert!(map.attach(hall, Side::Right, RoomId(42)).is_err());
    }

    #[test]
    fn test_clue_taken_once() {
        let (mut map, _, library) = hall_and_library();
        assert_eq!(map.take_clue(library), Some("Old Diary".to_string()));
        assert_eq!(map.take_clue(library), None);
        assert_eq!(map.room(library).clue(), None);
        assert!(map.remaining_clues().is_empty());
    }

    #[test]
    fn test_attach_rejects_self_loop() {
        let (mut map, _, library) = hall_and_library();
        assert!(map.attach(library, Side::Left, library).is_err());
        assert_eq!(map.child(library, Side::Left), None);
    }

    #[test]
    fn test_attach_rejects_cycle_through_ancestor() {
        let (mut map, _, library) = hall_and_library();
        let study = map.create_room("Study", None);
        let vault = map.create_room("Vault", None);
        map.attach(study, Side::Left, vault).unwrap();
        // Vault already sits below Study, so Study cannot hang off Vault
        assert!(map.attach(vault, Side::Right, study).is_err());
        assert!(map.attach(library, Side::Left, study).is_ok());
    }

    #[test]
    fn test_remaining_clues_skip_detached_rooms() {
        let (mut map, hall, _) = hall_and_library();
        let kitchen = map.create_room("Kitchen", Some("Silver Key"));
        map.create_room("Attic", Some("Dusty Trunk"));
        map.attach(hall, Side::Right, kitchen).unwrap();
        assert_eq!(map.remaining_clues(), vec!["Old Diary", "Silver Key"]);
    }
}
