//! Acceptance rules for expanding a room into a neighboring cell.

use rand_chacha::rand_core::Rng;

use crate::types::Pos;

use super::direction::Direction;
use super::grid::OccupancyGrid;
use super::model::Room;

/// Why a candidate cell was turned down.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Rejection {
    OutOfBounds,
    Occupied,
    TooDense,
    CoinFlip,
}

impl Rejection {
    /// Occupancy only grows, so everything but a lost coin flip is permanent.
    pub(crate) fn is_permanent(self) -> bool {
        self != Rejection::CoinFlip
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PlacementPolicy {
    density_limit: usize,
}

impl PlacementPolicy {
    pub(crate) fn new(density_limit: u8) -> Self {
        Self { density_limit: usize::from(density_limit) }
    }

    /// Cell-only checks, independent of randomness.
    pub(crate) fn check_cell(&self, grid: &OccupancyGrid, candidate: Pos) -> Result<(), Rejection> {
        if !grid.in_bounds(candidate) {
            return Err(Rejection::OutOfBounds);
        }
        if grid.is_occupied(candidate) {
            return Err(Rejection::Occupied);
        }
        if grid.occupied_neighbors(candidate) >= self.density_limit {
            return Err(Rejection::TooDense);
        }
        Ok(())
    }

    /// Builds an unlinked, unmarked room next to `from` if the cell passes and the coin lands
    /// heads. The coin is only tossed for cells that pass.
    pub(crate) fn try_place(
        &self,
        grid: &OccupancyGrid,
        from: &Room,
        direction: Direction,
        coin: impl FnOnce() -> bool,
    ) -> Result<Room, Rejection> {
        let candidate = direction.step(from.pos);
        self.check_cell(grid, candidate)?;
        if !coin() {
            return Err(Rejection::CoinFlip);
        }
        Ok(Room::new(candidate))
    }
}

pub(crate) fn flip_coin<R: Rng + ?Sized>(rng: &mut R) -> bool {
    rng.next_u32() & 1 == 1
}
