//! Grid cell coordinates and the four movement directions.
//!
//! The grid is screen-oriented: `x` grows to the right and `y` grows
//! downwards, so `Top` is `(0, -1)`.

use std::fmt;

// ── Cell ──────────────────────────────────────────────────────────────────────

/// Integer grid coordinate.  Bounds are owned by the world, not the cell.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell one step away in `dir` (`Current` returns `self`).
    #[inline]
    pub fn step(self, dir: Direction) -> Cell {
        let (dx, dy) = dir.offset();
        Cell::new(self.x + dx, self.y + dy)
    }

    /// The four 4-connected neighbours, in `Direction::NEIGHBORS` order.
    pub fn neighbors(self) -> [Cell; 4] {
        Direction::NEIGHBORS.map(|d| self.step(d))
    }

    /// Manhattan distance.
    #[inline]
    pub fn manhattan(self, other: Cell) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// `true` if `other` is exactly one 4-connected step away.
    #[inline]
    pub fn is_neighbor(self, other: Cell) -> bool {
        self.manhattan(other) == 1
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Cell {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Cell::new(x, y)
    }
}

// ── Direction ─────────────────────────────────────────────────────────────────

/// A 4-connected step, plus `Current` for "the cell itself".
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Direction {
    Bottom,
    Right,
    Top,
    Left,
    Current,
}

impl Direction {
    /// Neighbour directions in default approach order.
    pub const NEIGHBORS: [Direction; 4] =
        [Direction::Bottom, Direction::Right, Direction::Top, Direction::Left];

    /// `(dx, dy)` offset of this direction.
    #[inline]
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::Bottom  => (0, 1),
            Direction::Right   => (1, 0),
            Direction::Top     => (0, -1),
            Direction::Left    => (-1, 0),
            Direction::Current => (0, 0),
        }
    }

    /// Direction of the single step `from → to`, or `None` if the cells are
    /// not 4-adjacent (equal cells give `Current`).
    pub fn between(from: Cell, to: Cell) -> Option<Direction> {
        match (to.x - from.x, to.y - from.y) {
            (0, 1)  => Some(Direction::Bottom),
            (1, 0)  => Some(Direction::Right),
            (0, -1) => Some(Direction::Top),
            (-1, 0) => Some(Direction::Left),
            (0, 0)  => Some(Direction::Current),
            _       => None,
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Bottom  => Direction::Top,
            Direction::Right   => Direction::Left,
            Direction::Top     => Direction::Bottom,
            Direction::Left    => Direction::Right,
            Direction::Current => Direction::Current,
        }
    }

    /// Walking this way shows the left-facing sprite.
    #[inline]
    pub fn is_left(self) -> bool {
        matches!(self, Direction::Left | Direction::Bottom)
    }

    /// Walking this way shows the back-facing ("top") sprite.
    #[inline]
    pub fn is_top(self) -> bool {
        matches!(self, Direction::Left | Direction::Top)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Bottom  => "bottom",
            Direction::Right   => "right",
            Direction::Top     => "top",
            Direction::Left    => "left",
            Direction::Current => "current",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Direction {
    type Err = crate::DwError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bottom"  => Ok(Direction::Bottom),
            "right"   => Ok(Direction::Right),
            "top"     => Ok(Direction::Top),
            "left"    => Ok(Direction::Left),
            "current" => Ok(Direction::Current),
            other     => Err(crate::DwError::Parse(format!("unknown direction {other:?}"))),
        }
    }
}
