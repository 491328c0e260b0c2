//! Compass directions, their coordinate deltas, and their opposites.

use serde::{Deserialize, Serialize};

use crate::types::Pos;

/// One of the four 4-connected compass directions.
///
/// `y` grows downward, so `North` moves to `y - 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

const DELTAS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];
const OPPOSITES: [Direction; 4] =
    [Direction::South, Direction::West, Direction::North, Direction::East];

impl Direction {
    /// Canonical expansion order used by the frontier scheduler.
    pub const ALL: [Direction; 4] =
        [Direction::North, Direction::East, Direction::South, Direction::West];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// `(dx, dy)` step for this direction.
    pub const fn delta(self) -> (i32, i32) {
        DELTAS[self.index()]
    }

    pub const fn opposite(self) -> Direction {
        OPPOSITES[self.index()]
    }

    pub fn step(self, from: Pos) -> Pos {
        let (dx, dy) = self.delta();
        from.offset(dx, dy)
    }
}
