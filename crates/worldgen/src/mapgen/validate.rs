//! Structural checks for generated maps, shared by tests and the fuzz harness.

use std::collections::{BTreeSet, VecDeque};

use thiserror::Error;

use crate::types::{Pos, RoomId};

use super::direction::Direction;
use super::model::WorldMap;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("rooms {first} and {second} share coordinate {pos:?}")]
    SharedCoordinate { first: usize, second: usize, pos: Pos },
    #[error("room {room} at {pos:?} lies outside the {width}x{height} interior")]
    OutsideInterior { room: usize, pos: Pos, width: usize, height: usize },
    #[error("map is not tight: rooms span {span_x}x{span_y} inside a {width}x{height} map")]
    LooseBounds { span_x: usize, span_y: usize, width: usize, height: usize },
    #[error("room {room} links {direction:?} to a room outside the map")]
    DanglingLink { room: usize, direction: Direction },
    #[error("room {room} links {direction:?} but the neighbor does not link back")]
    AsymmetricLink { room: usize, direction: Direction },
    #[error("room {room} links {direction:?} to a room that is not adjacent")]
    DetachedLink { room: usize, direction: Direction },
    #[error("only {reached} of {total} rooms are reachable from the origin")]
    Disconnected { reached: usize, total: usize },
}

/// Checks coordinate uniqueness, bounds, link symmetry and adjacency, and connectivity.
pub fn validate(map: &WorldMap) -> Result<(), InvariantViolation> {
    check_coordinates(map)?;
    check_links(map)?;
    check_connectivity(map)
}

fn check_coordinates(map: &WorldMap) -> Result<(), InvariantViolation> {
    let (width, height) = (map.width(), map.height());
    let mut seen: Vec<(Pos, usize)> = Vec::with_capacity(map.len());
    for (index, (_, room)) in map.rooms().enumerate() {
        let pos = room.pos();
        let inside = pos.x >= 1
            && pos.y >= 1
            && (pos.x as usize) + 2 <= width
            && (pos.y as usize) + 2 <= height;
        if !inside {
            return Err(InvariantViolation::OutsideInterior { room: index, pos, width, height });
        }
        seen.push((pos, index));
    }

    seen.sort();
    for pair in seen.windows(2) {
        if pair[0].0 == pair[1].0 {
            return Err(InvariantViolation::SharedCoordinate {
                first: pair[0].1,
                second: pair[1].1,
                pos: pair[0].0,
            });
        }
    }

    if let (Some(max_x), Some(max_y)) =
        (seen.iter().map(|(pos, _)| pos.x).max(), seen.iter().map(|(pos, _)| pos.y).max())
    {
        let min_x = seen.iter().map(|(pos, _)| pos.x).min().unwrap_or(1);
        let min_y = seen.iter().map(|(pos, _)| pos.y).min().unwrap_or(1);
        let span_x = (max_x - min_x + 1) as usize;
        let span_y = (max_y - min_y + 1) as usize;
        if min_x != 1 || min_y != 1 || span_x + 2 != width || span_y + 2 != height {
            return Err(InvariantViolation::LooseBounds { span_x, span_y, width, height });
        }
    }
    Ok(())
}

fn check_links(map: &WorldMap) -> Result<(), InvariantViolation> {
    for (index, (id, room)) in map.rooms().enumerate() {
        for (direction, neighbor_id) in room.neighbors() {
            let Some(neighbor) = map.room(neighbor_id) else {
                return Err(InvariantViolation::DanglingLink { room: index, direction });
            };
            if neighbor.neighbor(direction.opposite()) != Some(id) {
                return Err(InvariantViolation::AsymmetricLink { room: index, direction });
            }
            if direction.step(room.pos()) != neighbor.pos() {
                return Err(InvariantViolation::DetachedLink { room: index, direction });
            }
        }
    }
    Ok(())
}

fn check_connectivity(map: &WorldMap) -> Result<(), InvariantViolation> {
    let Some(origin) = map.origin() else {
        return Ok(());
    };

    let mut open = VecDeque::from([origin]);
    let mut seen: BTreeSet<RoomId> = BTreeSet::from([origin]);
    while let Some(id) = open.pop_front() {
        let Some(room) = map.room(id) else {
            continue;
        };
        for (_, next) in room.neighbors() {
            if seen.insert(next) {
                open.push_back(next);
            }
        }
    }

    if seen.len() == map.len() {
        Ok(())
    } else {
        Err(InvariantViolation::Disconnected { reached: seen.len(), total: map.len() })
    }
}
