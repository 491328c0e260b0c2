//! Repacks placed rooms into the smallest positive rectangle with a one-cell border.

use slotmap::SlotMap;

use crate::types::{Pos, RoomId};

use super::model::{Room, WorldMap};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Bounds {
    pub(crate) min: Pos,
    pub(crate) max: Pos,
}

impl Bounds {
    pub(crate) fn of<'a>(positions: impl IntoIterator<Item = &'a Pos>) -> Option<Self> {
        let mut positions = positions.into_iter();
        let first = *positions.next()?;
        Some(positions.fold(Bounds { min: first, max: first }, |bounds, pos| Bounds {
            min: Pos { y: bounds.min.y.min(pos.y), x: bounds.min.x.min(pos.x) },
            max: Pos { y: bounds.max.y.max(pos.y), x: bounds.max.x.max(pos.x) },
        }))
    }

    pub(crate) fn bordered_width(self) -> usize {
        (self.max.x - self.min.x + 3) as usize
    }

    pub(crate) fn bordered_height(self) -> usize {
        (self.max.y - self.min.y + 3) as usize
    }
}

pub(crate) fn normalize(mut rooms: SlotMap<RoomId, Room>, order: Vec<RoomId>) -> WorldMap {
    let Some(bounds) = Bounds::of(order.iter().map(|&id| &rooms[id].pos)) else {
        return WorldMap::new(2, 2, rooms, order);
    };

    let (dx, dy) = (1 - bounds.min.x, 1 - bounds.min.y);
    for &id in &order {
        let room = &mut rooms[id];
        room.pos = room.pos.offset(dx, dy);
    }

    WorldMap::new(bounds.bordered_width(), bounds.bordered_height(), rooms, order)
}
