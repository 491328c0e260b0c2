//! Public data models for generated world maps and their rooms.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use slotmap::{SecondaryMap, SlotMap};
use xxhash_rust::xxh3::xxh3_64;

use crate::types::{Pos, RoomId};

use super::direction::Direction;

/// A grid-aligned node of the world graph with up to one neighbor per direction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Room {
    pub(crate) pos: Pos,
    pub(crate) links: [Option<RoomId>; 4],
}

impl Room {
    pub(crate) fn new(pos: Pos) -> Self {
        Self { pos, links: [None; 4] }
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    pub fn x(&self) -> i32 {
        self.pos.x
    }

    pub fn y(&self) -> i32 {
        self.pos.y
    }

    pub fn neighbor(&self, direction: Direction) -> Option<RoomId> {
        self.links[direction.index()]
    }

    pub fn north(&self) -> Option<RoomId> {
        self.neighbor(Direction::North)
    }

    pub fn east(&self) -> Option<RoomId> {
        self.neighbor(Direction::East)
    }

    pub fn south(&self) -> Option<RoomId> {
        self.neighbor(Direction::South)
    }

    pub fn west(&self) -> Option<RoomId> {
        self.neighbor(Direction::West)
    }

    /// Linked neighbors in canonical direction order.
    pub fn neighbors(&self) -> impl Iterator<Item = (Direction, RoomId)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(|direction| Some((direction, self.neighbor(direction)?)))
    }

    pub fn degree(&self) -> usize {
        self.links.iter().flatten().count()
    }
}

/// Final, normalized room graph. Immutable once built.
#[derive(Clone, Debug)]
pub struct WorldMap {
    width: usize,
    height: usize,
    rooms: SlotMap<RoomId, Room>,
    order: Vec<RoomId>,
    by_pos: BTreeMap<Pos, RoomId>,
}

impl WorldMap {
    pub(crate) fn new(
        width: usize,
        height: usize,
        rooms: SlotMap<RoomId, Room>,
        order: Vec<RoomId>,
    ) -> Self {
        let by_pos = order.iter().map(|&id| (rooms[id].pos, id)).collect();
        Self { width, height, rooms, order, by_pos }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id)
    }

    /// The room generation started from.
    pub fn origin(&self) -> Option<RoomId> {
        self.order.first().copied()
    }

    pub fn room_ids(&self) -> &[RoomId] {
        &self.order
    }

    /// Rooms in placement order.
    pub fn rooms(&self) -> impl Iterator<Item = (RoomId, &Room)> + '_ {
        self.order.iter().map(|&id| (id, &self.rooms[id]))
    }

    pub fn room_at(&self, pos: Pos) -> Option<RoomId> {
        self.by_pos.get(&pos).copied()
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let slots = self.slot_indices();
        let mut bytes = Vec::new();
        bytes.extend((self.width as u32).to_le_bytes());
        bytes.extend((self.height as u32).to_le_bytes());
        bytes.extend((self.order.len() as u32).to_le_bytes());
        for (_, room) in self.rooms() {
            bytes.extend(room.pos.y.to_le_bytes());
            bytes.extend(room.pos.x.to_le_bytes());
            for link in room.links {
                let slot = link.and_then(|id| slots.get(id).copied()).unwrap_or(u32::MAX);
                bytes.extend(slot.to_le_bytes());
            }
        }
        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }

    /// Index-linked, serializable view of the map.
    pub fn to_document(&self) -> MapDocument {
        let slots = self.slot_indices();
        let link = |room: &Room, direction: Direction| {
            room.neighbor(direction).and_then(|id| slots.get(id)).map(|&slot| slot as usize)
        };
        let rooms = self
            .rooms()
            .map(|(_, room)| RoomRecord {
                x: room.pos.x,
                y: room.pos.y,
                north: link(room, Direction::North),
                east: link(room, Direction::East),
                south: link(room, Direction::South),
                west: link(room, Direction::West),
            })
            .collect();
        MapDocument { width: self.width, height: self.height, rooms }
    }

    fn slot_indices(&self) -> SecondaryMap<RoomId, u32> {
        let mut slots = SecondaryMap::with_capacity(self.order.len());
        for (slot, &id) in self.order.iter().enumerate() {
            slots.insert(id, slot as u32);
        }
        slots
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapDocument {
    pub width: usize,
    pub height: usize,
    pub rooms: Vec<RoomRecord>,
}

/// A room whose links are indices into [`MapDocument::rooms`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomRecord {
    pub x: i32,
    pub y: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub north: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub east: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub south: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub west: Option<usize>,
}
