//! Declarative world description and the built-in floor plans.
//!
//! A `WorldLayout` is plain data: it can be written by hand, loaded from
//! JSON (with the `serde` feature) or from CSV (see [`crate::loader`]), and
//! turned into a [`GridWorld`] with [`WorldLayout::build`].  Fixed objects are
//! placed first, then `random_objects` are scattered over the remaining
//! vacant cells using the supplied seed RNG.

use dw_core::{Cell, Direction, SimRng};

use crate::object::ObjectKind;
use crate::world::{GridWorld, GridWorldBuilder};
use crate::GridResult;

/// Side length of both built-in floor plans.
pub const OFFICE_SIZE: i32 = 12;

/// One object at a fixed cell.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectSpec {
    pub kind: ObjectKind,
    pub cell: Cell,
    /// Allowed approach sides; empty means all four.
    #[cfg_attr(feature = "serde", serde(default))]
    pub entries: Vec<Direction>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub position_gap: (i32, i32),
    #[cfg_attr(feature = "serde", serde(default))]
    pub forced_left: Option<bool>,
}

impl ObjectSpec {
    pub fn new(kind: ObjectKind, cell: Cell) -> Self {
        Self { kind, cell, entries: Vec::new(), position_gap: (0, 0), forced_left: None }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldLayout {
    pub width:  i32,
    pub height: i32,
    /// Surround the floor with walls.
    #[cfg_attr(feature = "serde", serde(default))]
    pub border: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub walls: Vec<Cell>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub objects: Vec<ObjectSpec>,
    /// `(kind, count)` pairs placed on random vacant cells at build time.
    #[cfg_attr(feature = "serde", serde(default))]
    pub random_objects: Vec<(ObjectKind, usize)>,
}

impl WorldLayout {
    /// An empty `width × height` floor.
    pub fn empty(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            border: false,
            walls: Vec::new(),
            objects: Vec::new(),
            random_objects: Vec::new(),
        }
    }

    /// The regular office: walled 12×12 room, a 2×2 pillar, an interior
    /// wall with a gap, three desks, three sofas and three dispensers.
    pub fn office() -> Self {
        let mid = OFFICE_SIZE / 2 + 1;
        let mut walls = Vec::new();
        walls.push(Cell::new(1, mid));
        walls.extend((5..OFFICE_SIZE - 1).map(|x| Cell::new(x, mid)));
        walls.extend([Cell::new(4, 3), Cell::new(4, 4), Cell::new(3, 4), Cell::new(3, 3)]);

        Self {
            width:  OFFICE_SIZE,
            height: OFFICE_SIZE,
            border: true,
            walls,
            objects: Vec::new(),
            random_objects: vec![
                (ObjectKind::Desk, 3),
                (ObjectKind::Sofa, 3),
                (ObjectKind::Dispenser, 3),
            ],
        }
    }

    /// Small debugging room with no border: two walls, two desks and a
    /// dispenser, all at fixed cells.
    pub fn compact() -> Self {
        Self {
            width:  OFFICE_SIZE,
            height: OFFICE_SIZE,
            border: false,
            walls: vec![Cell::new(5, 5), Cell::new(6, 5)],
            objects: vec![
                ObjectSpec::new(ObjectKind::Desk, Cell::new(4, 5)),
                ObjectSpec::new(ObjectKind::Desk, Cell::new(4, 6)),
                ObjectSpec::new(ObjectKind::Dispenser, Cell::new(5, 4)),
            ],
            random_objects: Vec::new(),
        }
    }

    /// Validate and build the world.  `rng` only drives `random_objects`.
    pub fn build(&self, rng: &mut SimRng) -> GridResult<GridWorld> {
        let mut b = GridWorldBuilder::new(self.width, self.height);
        if self.border {
            b.add_border();
        }
        for &wall in &self.walls {
            b.add_wall(wall);
        }
        for spec in &self.objects {
            let entries = if spec.entries.is_empty() {
                Direction::NEIGHBORS.to_vec()
            } else {
                spec.entries.clone()
            };
            let id = b.add_object_with_entries(spec.kind, spec.cell, entries);
            if let Some(obj) = b.object_mut(id) {
                obj.position_gap = spec.position_gap;
                obj.forced_left = spec.forced_left;
            }
        }
        for &(kind, count) in &self.random_objects {
            b.scatter(kind, count, rng)?;
        }
        b.build()
    }
}
