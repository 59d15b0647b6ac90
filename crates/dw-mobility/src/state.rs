//! Per-human movement state.

use std::collections::VecDeque;

use dw_core::{Cell, Direction, Tick};

/// One committed cell-to-cell step that the renderer is animating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transit {
    pub from:      Cell,
    pub to:        Cell,
    pub direction: Direction,
    pub departed:  Tick,
    /// When the headless driver will complete the step.
    pub arrives:   Tick,
}

/// Walking state of a single human.
///
/// `cell` is the *logical* position: during a transit it already equals the
/// transit's destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovementState {
    pub cell: Cell,

    /// Remaining cells, nearest first.  Excludes `cell`.
    pub path: VecDeque<Cell>,

    pub transit: Option<Transit>,

    /// `false` until the human is placed on the grid.
    pub placed: bool,
}

impl Default for MovementState {
    fn default() -> Self {
        Self { cell: Cell::default(), path: VecDeque::new(), transit: None, placed: false }
    }
}

impl MovementState {
    pub fn at(cell: Cell) -> Self {
        Self { cell, path: VecDeque::new(), transit: None, placed: true }
    }

    #[inline]
    pub fn is_moving(&self) -> bool {
        self.transit.is_some()
    }

    /// Standing still with nothing left to walk.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.transit.is_none() && self.path.is_empty()
    }

    /// Direction of the step in progress, if any.
    pub fn next_step(&self) -> Option<Direction> {
        self.transit.map(|t| t.direction)
    }

    /// The full remaining route: the cell being entered (if moving) followed
    /// by the queued cells.
    pub fn route(&self) -> Vec<Cell> {
        self.transit
            .map(|t| t.to)
            .into_iter()
            .chain(self.path.iter().copied())
            .collect()
    }

    /// Where the human will stop.
    pub fn destination(&self) -> Cell {
        self.path.back().copied().unwrap_or(self.cell)
    }

    /// Fraction of the current step completed at `now`, in `[0, 1]`.
    pub fn progress(&self, now: Tick) -> f32 {
        match self.transit {
            Some(t) if t.arrives > t.departed => {
                let elapsed = now.since(t.departed) as f32;
                let total = (t.arrives - t.departed) as f32;
                (elapsed / total).min(1.0)
            }
            _ => 1.0,
        }
    }
}
