//! Symmetric adjacency between rooms.

use slotmap::SlotMap;

use crate::types::RoomId;

use super::direction::Direction;
use super::model::Room;

/// Points `from` at `to` along `direction` and `to` back at `from` along the opposite.
pub(crate) fn link(
    rooms: &mut SlotMap<RoomId, Room>,
    from: RoomId,
    to: RoomId,
    direction: Direction,
) {
    debug_assert_ne!(from, to);
    rooms[from].links[direction.index()] = Some(to);
    rooms[to].links[direction.opposite().index()] = Some(from);
}
