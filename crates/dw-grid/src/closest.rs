//! Closest-approach search: reach *next to* a target rather than onto it.
//!
//! For every candidate side `d` of the goal the finder searches a path to
//! `goal + offset(d)` and keeps the shortest.  A side whose cell is off the
//! grid or statically blocked counts as unreachable.  If the walker already
//! stands on one of the side cells the search stops at once with an empty
//! path.

use dw_core::{Cell, Direction};

use crate::path::{BfsPathFinder, Path, PathFinder};
use crate::world::GridWorld;
use crate::GridResult;

/// Approach order used when an object does not restrict its entries.
pub const DEFAULT_ENTRIES: [Direction; 4] = Direction::NEIGHBORS;

/// Winning side and the path that reaches it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Approach {
    pub direction: Direction,
    pub path:      Path,
}

impl Approach {
    /// The cell the walker ends on.
    pub fn end(&self, origin: Cell) -> Cell {
        self.path.last().unwrap_or(origin)
    }
}

#[derive(Clone, Debug, Default)]
pub struct ClosestPathFinder<P: PathFinder = BfsPathFinder> {
    finder: P,
}

impl<P: PathFinder> ClosestPathFinder<P> {
    pub fn new(finder: P) -> Self {
        Self { finder }
    }

    pub fn inner(&self) -> &P {
        &self.finder
    }

    /// Shortest path from `origin` to any of the `directions`-sides of `goal`.
    ///
    /// Ties go to the side listed first.  `Ok(None)` when no side is
    /// reachable; `Err` only for an origin or goal off the grid.
    pub fn find_approach(
        &self,
        world: &GridWorld,
        origin: Cell,
        goal: Cell,
        directions: &[Direction],
    ) -> GridResult<Option<Approach>> {
        world.check_bounds(origin)?;
        world.check_bounds(goal)?;

        let mut best: Option<Approach> = None;
        for &direction in directions {
            let gapped = goal.step(direction);
            if gapped == origin {
                return Ok(Some(Approach { direction, path: Path::default() }));
            }
            // `Current` keeps the goal itself, which may be an object and
            // is already bounds-checked.
            if direction != Direction::Current && !world.is_free(gapped) {
                continue;
            }
            let Some(path) = self.finder.find_path(world, origin, gapped)? else {
                continue;
            };
            if best.as_ref().is_none_or(|b| path.len() < b.path.len()) {
                best = Some(Approach { direction, path });
            }
        }
        Ok(best)
    }

    /// Direct path onto `goal` itself.
    pub fn find_path(&self, world: &GridWorld, origin: Cell, goal: Cell) -> GridResult<Option<Path>> {
        Ok(self
            .find_approach(world, origin, goal, &[Direction::Current])?
            .map(|a| a.path))
    }

    /// Shortest path to a side of `goal` among the four default entries.
    pub fn find_neighbor_path(
        &self,
        world: &GridWorld,
        origin: Cell,
        goal: Cell,
    ) -> GridResult<Option<Path>> {
        Ok(self
            .find_approach(world, origin, goal, &DEFAULT_ENTRIES)?
            .map(|a| a.path))
    }
}
