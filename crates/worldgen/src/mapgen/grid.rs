//! Fixed-size occupancy buffer with bounds-checked access and neighbor counting.

use crate::types::Pos;

use super::direction::Direction;

/// Side of the `(2k+1)²` grid for `rooms` rooms, or `None` when the cell count overflows
/// `usize` or the side does not fit an `i32` coordinate.
pub(crate) fn grid_side(rooms: usize) -> Option<usize> {
    let side = rooms.checked_mul(2)?.checked_add(1)?;
    if i32::try_from(side).is_err() {
        return None;
    }
    side.checked_mul(side).map(|_| side)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct OccupancyGrid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl OccupancyGrid {
    pub(crate) fn new(width: usize, height: usize) -> Self {
        Self { width, height, cells: vec![false; width * height] }
    }

    /// Square grid large enough for a straight line of `rooms` cells from the center.
    ///
    /// Callers must have checked `rooms` with [`grid_side`].
    pub(crate) fn for_room_count(rooms: usize) -> Self {
        let side = grid_side(rooms).unwrap_or(1);
        Self::new(side, side)
    }

    pub(crate) fn width(&self) -> usize {
        self.width
    }

    pub(crate) fn height(&self) -> usize {
        self.height
    }

    pub(crate) fn center(&self) -> Pos {
        Pos { y: (self.height / 2) as i32, x: (self.width / 2) as i32 }
    }

    pub(crate) fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    /// Cells outside the buffer read as free.
    pub(crate) fn is_occupied(&self, pos: Pos) -> bool {
        self.index(pos).is_some_and(|index| self.cells[index])
    }

    /// Claims a free in-bounds cell. Returns `false` and leaves the grid untouched otherwise.
    pub(crate) fn mark(&mut self, pos: Pos) -> bool {
        match self.index(pos) {
            Some(index) if !self.cells[index] => {
                self.cells[index] = true;
                true
            }
            _ => false,
        }
    }

    pub(crate) fn occupied_neighbors(&self, pos: Pos) -> usize {
        Direction::ALL.into_iter().filter(|direction| self.is_occupied(direction.step(pos))).count()
    }

    #[cfg(test)]
    pub(crate) fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    #[cfg(test)]
    pub(crate) fn occupied_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        self.cells.iter().enumerate().filter(|(_, cell)| **cell).map(|(index, _)| Pos {
            y: (index / self.width) as i32,
            x: (index % self.width) as i32,
        })
    }

    fn index(&self, pos: Pos) -> Option<usize> {
        self.in_bounds(pos).then(|| (pos.y as usize) * self.width + (pos.x as usize))
    }
}
