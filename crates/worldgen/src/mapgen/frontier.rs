//! Breadth-first room growth with a dead-end queue for backtracking.

use std::collections::VecDeque;

use log::{debug, trace, warn};
use slotmap::SlotMap;

use crate::config::{BacktrackPolicy, GeneratorConfig};
use crate::error::{GenerationError, Result};
use crate::types::RoomId;

use super::direction::Direction;
use super::grid::OccupancyGrid;
use super::linker::link;
use super::model::Room;
use super::placement::PlacementPolicy;

/// Rooms and occupancy produced by a successful expansion, before normalization.
#[derive(Debug)]
pub(crate) struct Expansion {
    pub(crate) grid: OccupancyGrid,
    pub(crate) rooms: SlotMap<RoomId, Room>,
    pub(crate) order: Vec<RoomId>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Visit {
    First,
    Reopened,
}

/// Grows `target` rooms outward from the grid center, tossing `coin` for each viable cell.
///
/// Directions are tried in `Direction::ALL` order. A room that places nothing is queued as a
/// dead end and pulled back in whenever the frontier drains.
pub(crate) fn expand<C: FnMut() -> bool>(
    target: usize,
    config: &GeneratorConfig,
    mut coin: C,
) -> Result<Expansion> {
    let policy = PlacementPolicy::new(config.density_limit);
    let budget = config.step_budget(target);

    let mut grid = OccupancyGrid::for_room_count(target);
    let mut rooms = SlotMap::with_key();
    let center = grid.center();
    grid.mark(center);
    let origin = rooms.insert(Room::new(center));
    let mut order = vec![origin];

    let mut frontier = VecDeque::from([(origin, Visit::First)]);
    let mut stalled: VecDeque<RoomId> = VecDeque::new();
    let mut steps = 0_usize;

    debug!("expanding world graph: target={target} grid={}x{}", grid.width(), grid.height());

    while order.len() < target {
        let Some((current, visit)) = frontier.pop_front() else {
            warn!("both queues drained after {} of {target} rooms", order.len());
            return Err(GenerationError::GenerationStalled { placed: order.len(), target });
        };
        if steps >= budget {
            warn!("step budget {budget} spent after {} of {target} rooms", order.len());
            return Err(GenerationError::GenerationStalled { placed: order.len(), target });
        }
        steps += 1;

        let skip = visit == Visit::Reopened && config.backtrack == BacktrackPolicy::Exhausted;
        let mut placed_any = false;
        let mut retryable = false;

        for direction in Direction::ALL {
            if skip {
                break;
            }
            match policy.try_place(&grid, &rooms[current], direction, &mut coin) {
                Ok(room) => {
                    let marked = grid.mark(room.pos);
                    debug_assert!(marked, "placement accepted an occupied cell {:?}", room.pos);
                    if !marked {
                        continue;
                    }
                    let placed = rooms.insert(room);
                    link(&mut rooms, current, placed, direction);
                    order.push(placed);
                    if order.len() == target {
                        break;
                    }
                    frontier.push_back((placed, Visit::First));
                    placed_any = true;
                }
                Err(rejection) => retryable |= !rejection.is_permanent(),
            }
        }

        if order.len() == target {
            break;
        }

        if !placed_any {
            match visit {
                Visit::First => stalled.push_back(current),
                Visit::Reopened if retryable => stalled.push_back(current),
                Visit::Reopened => trace!("dead end {current:?} is closed for good"),
            }
        }

        if frontier.is_empty()
            && let Some(reopened) = stalled.pop_front()
        {
            trace!("frontier drained, reopening {reopened:?} ({} still stalled)", stalled.len());
            frontier.push_back((reopened, Visit::Reopened));
        }
    }

    debug!("placed {} rooms in {steps} steps", order.len());
    Ok(Expansion { grid, rooms, order })
}
