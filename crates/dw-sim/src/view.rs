//! What a renderer needs to draw one human.

use dw_behavior::StateKind;
use dw_core::{AgentId, Animation, Cell, Direction, Facing};

/// Outbound snapshot of one human, rebuilt on demand by
/// [`Sim::views`][crate::Sim::views].
#[derive(Clone, Debug, PartialEq)]
pub struct AgentView {
    pub agent:     AgentId,
    /// Logical cell; the destination of a step in progress.
    pub cell:      Cell,
    pub next_step: Option<Direction>,
    /// Cells still to walk, the one in progress first.
    pub route:     Vec<Cell>,
    pub animation: Animation,
    pub facing:    Facing,
    pub state:     Option<StateKind>,
    /// Pixel anchor shift while seated: 5 px toward the side faced and 1 px
    /// up, relative to the object's position gap.
    pub seat_offset: Option<(i32, i32)>,
}

/// Anchor shift of a human seated on an object with `gap`, facing left if
/// `left`.
pub fn seat_offset(gap: (i32, i32), left: bool) -> (i32, i32) {
    let dx = if left { -5 } else { 5 };
    (gap.0 + dx, gap.1 - 1)
}
