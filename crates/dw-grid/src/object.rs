//! Furniture placed on the grid.

use std::fmt;

use dw_core::{Cell, Direction, ObjectId};

/// The kinds of usable furniture.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ObjectKind {
    Desk,
    Sofa,
    Dispenser,
}

impl ObjectKind {
    pub const ALL: [ObjectKind; 3] = [ObjectKind::Desk, ObjectKind::Sofa, ObjectKind::Dispenser];

    /// Humans step onto sittable objects; dispensers are used from an
    /// adjacent cell.
    #[inline]
    pub fn is_sittable(self) -> bool {
        matches!(self, ObjectKind::Desk | ObjectKind::Sofa)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ObjectKind::Desk      => "desk",
            ObjectKind::Sofa      => "sofa",
            ObjectKind::Dispenser => "dispenser",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ObjectKind {
    type Err = crate::GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "desk"      => Ok(ObjectKind::Desk),
            "sofa"      => Ok(ObjectKind::Sofa),
            "dispenser" => Ok(ObjectKind::Dispenser),
            other       => Err(crate::GridError::Parse(format!("unknown object kind {other:?}"))),
        }
    }
}

/// An object instance on the floor.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedObject {
    pub id:   ObjectId,
    pub kind: ObjectKind,
    pub cell: Cell,
    /// Sides from which the object may be approached, in preference order.
    pub entries: Vec<Direction>,
    /// Pixel offset the renderer applies to a human using the object.
    pub position_gap: (i32, i32),
    /// Sitting orientation imposed by the object (`Some(true)` = left).
    pub forced_left: Option<bool>,
}

impl PlacedObject {
    /// Cells adjacent to the object through its entry sides.
    pub fn entry_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.entries.iter().map(move |&d| self.cell.step(d))
    }
}
