//! Shortest-path search trait and the default breadth-first implementation.
//!
//! # Pluggability
//!
//! `dw-mobility` searches through the [`PathFinder`] trait, so an A* or a
//! crowd-aware finder can replace [`BfsPathFinder`] without touching the
//! behavior layer.
//!
//! # Contract
//!
//! * `Ok(Some(path))`: `path` excludes `origin`, ends at `goal`, and every
//!   consecutive pair is 4-adjacent.  Empty when `origin == goal`.
//! * `Ok(None)`: the goal is unreachable.  An expected outcome.
//! * `Err(OutOfBounds)`: origin or goal off the grid.  A caller bug.
//!
//! Intermediate cells must be statically free.  The goal is entered even if
//! it is an object (stepping onto a sofa) and the origin is never tested
//! (a human may start on the desk it just left).

use std::collections::VecDeque;

use dw_core::{Cell, Direction};

use crate::world::GridWorld;
use crate::GridResult;

// ── Path ──────────────────────────────────────────────────────────────────────

/// Cells to walk, nearest first.  The starting cell is not included.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Path {
    pub cells: Vec<Cell>,
}

impl Path {
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// `true` if the walker is already at the goal.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn last(&self) -> Option<Cell> {
        self.cells.last().copied()
    }
}

// ── PathFinder trait ──────────────────────────────────────────────────────────

pub trait PathFinder {
    fn find_path(&self, world: &GridWorld, origin: Cell, goal: Cell) -> GridResult<Option<Path>>;
}

// ── BfsPathFinder ─────────────────────────────────────────────────────────────

/// Unweighted breadth-first search.  Neighbours expand in
/// `Direction::NEIGHBORS` order, which makes tie-breaking deterministic.
#[derive(Clone, Copy, Debug, Default)]
pub struct BfsPathFinder;

impl PathFinder for BfsPathFinder {
    fn find_path(&self, world: &GridWorld, origin: Cell, goal: Cell) -> GridResult<Option<Path>> {
        world.check_bounds(origin)?;
        world.check_bounds(goal)?;
        Ok(bfs(world, origin, goal))
    }
}

fn bfs(world: &GridWorld, origin: Cell, goal: Cell) -> Option<Path> {
    if origin == goal {
        return Some(Path::default());
    }

    const UNSEEN: u32 = u32::MAX;
    // prev[i] = row-major index of the cell that reached i.
    let mut prev = vec![UNSEEN; world.cell_count()];
    let start = world.index(origin);
    prev[start] = start as u32;

    let mut frontier = VecDeque::from([origin]);
    while let Some(cell) = frontier.pop_front() {
        for dir in Direction::NEIGHBORS {
            let next = cell.step(dir);
            if !world.in_bounds(next) {
                continue;
            }
            let idx = world.index(next);
            if prev[idx] != UNSEEN {
                continue;
            }
            if next == goal {
                prev[idx] = world.index(cell) as u32;
                return Some(reconstruct(world, &prev, start, idx));
            }
            if world.is_free(next) {
                prev[idx] = world.index(cell) as u32;
                frontier.push_back(next);
            }
        }
    }
    None
}

fn reconstruct(world: &GridWorld, prev: &[u32], start: usize, goal: usize) -> Path {
    let mut cells = Vec::new();
    let mut cur = goal;
    while cur != start {
        cells.push(world.cell_at(cur));
        cur = prev[cur] as usize;
    }
    cells.reverse();
    Path { cells }
}
