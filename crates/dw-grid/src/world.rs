//! Static grid world: walls and placed objects.
//!
//! # Data layout
//!
//! Walls and the object index are flat row-major arrays of length
//! `width * height`, indexed by `y * width + x`.  The world is immutable once
//! built; humans are tracked elsewhere (`dw-mobility`) and are never part of
//! the static free-cell test.

use dw_core::{Cell, Direction, ObjectId, SimRng};

use crate::object::{ObjectKind, PlacedObject};
use crate::{GridError, GridResult};

// ── GridWorld ─────────────────────────────────────────────────────────────────

pub struct GridWorld {
    width:  i32,
    height: i32,
    walls:  Vec<bool>,
    /// `object_at[idx]` = object occupying that cell.
    object_at: Vec<Option<ObjectId>>,
    objects:   Vec<PlacedObject>,
}

impl GridWorld {
    // ── Dimensions ────────────────────────────────────────────────────────

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.walls.len()
    }

    #[inline]
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.width && cell.y < self.height
    }

    /// Row-major index of an in-bounds cell.
    #[inline]
    pub fn index(&self, cell: Cell) -> usize {
        (cell.y * self.width + cell.x) as usize
    }

    /// Inverse of [`GridWorld::index`].
    #[inline]
    pub fn cell_at(&self, idx: usize) -> Cell {
        let idx = idx as i32;
        Cell::new(idx % self.width, idx / self.width)
    }

    /// `Err(OutOfBounds)` unless `cell` lies on the grid.
    pub fn check_bounds(&self, cell: Cell) -> GridResult<()> {
        if self.in_bounds(cell) {
            Ok(())
        } else {
            Err(GridError::OutOfBounds { cell, width: self.width, height: self.height })
        }
    }

    // ── Static occupancy ──────────────────────────────────────────────────

    #[inline]
    pub fn is_wall(&self, cell: Cell) -> bool {
        self.in_bounds(cell) && self.walls[self.index(cell)]
    }

    /// In bounds, not a wall, not an object.
    #[inline]
    pub fn is_free(&self, cell: Cell) -> bool {
        self.in_bounds(cell) && {
            let idx = self.index(cell);
            !self.walls[idx] && self.object_at[idx].is_none()
        }
    }

    pub fn object_id_at(&self, cell: Cell) -> Option<ObjectId> {
        if self.in_bounds(cell) { self.object_at[self.index(cell)] } else { None }
    }

    pub fn object_at(&self, cell: Cell) -> Option<&PlacedObject> {
        self.object_id_at(cell).map(|id| &self.objects[id.index()])
    }

    // ── Objects ───────────────────────────────────────────────────────────

    pub fn object(&self, id: ObjectId) -> GridResult<&PlacedObject> {
        self.objects.get(id.index()).ok_or(GridError::ObjectNotFound(id))
    }

    pub fn objects(&self) -> &[PlacedObject] {
        &self.objects
    }

    pub fn objects_of(&self, kind: ObjectKind) -> impl Iterator<Item = &PlacedObject> + '_ {
        self.objects.iter().filter(move |o| o.kind == kind)
    }

    // ── Free-cell queries ─────────────────────────────────────────────────

    /// All statically free cells in row-major order.
    pub fn free_cells(&self) -> Vec<Cell> {
        (0..self.cell_count())
            .map(|i| self.cell_at(i))
            .filter(|&c| self.is_free(c))
            .collect()
    }

    /// A random free cell not listed in `exclude`.
    pub fn random_free_cell(&self, rng: &mut dw_core::AgentRng, exclude: &[Cell]) -> Option<Cell> {
        let cells: Vec<Cell> =
            self.free_cells().into_iter().filter(|c| !exclude.contains(c)).collect();
        rng.choose(&cells).copied()
    }

    /// Free neighbours of `cell` through `entries`, skipping `exclude`.
    pub fn free_entry_cells(&self, cell: Cell, entries: &[Direction], exclude: &[Cell]) -> Vec<Cell> {
        entries
            .iter()
            .map(|&d| cell.step(d))
            .filter(|c| self.is_free(*c) && !exclude.contains(c))
            .collect()
    }

    /// Two adjacent free cells for a conversation between humans standing on
    /// `sources`.
    ///
    /// The pair minimises the summed Manhattan distance from every source to
    /// its first cell; ties keep the earliest pair in row-major order.  Cells
    /// listed in `exclude` (other humans) are skipped.
    pub fn meeting_cells(&self, sources: &[Cell], exclude: &[Cell]) -> Option<(Cell, Cell)> {
        let usable = |c: Cell| self.is_free(c) && !exclude.contains(&c);
        let mut best: Option<(u32, Cell, Cell)> = None;

        for first in self.free_cells() {
            if exclude.contains(&first) {
                continue;
            }
            let dist: u32 = sources.iter().map(|s| s.manhattan(first)).sum();
            if best.is_some_and(|(d, _, _)| d <= dist) {
                continue;
            }
            // Partner sits right or below so each unordered pair is seen once.
            for dir in [Direction::Right, Direction::Bottom] {
                let second = first.step(dir);
                if usable(second) {
                    best = Some((dist, first, second));
                    break;
                }
            }
        }
        best.map(|(_, a, b)| (a, b))
    }

    /// Walls that would cover a human standing just below or right of them.
    /// The renderer fades these out.
    pub fn walls_hidden_by(&self, agent_cells: &[Cell]) -> Vec<Cell> {
        (0..self.cell_count())
            .filter(|&i| self.walls[i])
            .map(|i| self.cell_at(i))
            .filter(|w| {
                agent_cells.iter().any(|h| {
                    (h.x == w.x + 1 && h.y == w.y + 1)
                        || (h.x == w.x && h.y == w.y + 1)
                        || (h.x == w.x + 1 && h.y == w.y)
                })
            })
            .collect()
    }
}

// ── GridWorldBuilder ──────────────────────────────────────────────────────────

/// Incrementally describe a world, then validate and freeze it with
/// [`GridWorldBuilder::build`].
pub struct GridWorldBuilder {
    width:   i32,
    height:  i32,
    walls:   Vec<Cell>,
    objects: Vec<PlacedObject>,
}

impl GridWorldBuilder {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height, walls: Vec::new(), objects: Vec::new() }
    }

    pub fn add_wall(&mut self, cell: Cell) -> &mut Self {
        self.walls.push(cell);
        self
    }

    /// Wall every border cell.
    pub fn add_border(&mut self) -> &mut Self {
        for x in 0..self.width {
            self.walls.push(Cell::new(x, 0));
            self.walls.push(Cell::new(x, self.height - 1));
        }
        for y in 1..self.height - 1 {
            self.walls.push(Cell::new(0, y));
            self.walls.push(Cell::new(self.width - 1, y));
        }
        self
    }

    /// Place an object approachable from all four sides.
    pub fn add_object(&mut self, kind: ObjectKind, cell: Cell) -> ObjectId {
        self.add_object_with_entries(kind, cell, Direction::NEIGHBORS.to_vec())
    }

    pub fn add_object_with_entries(
        &mut self,
        kind: ObjectKind,
        cell: Cell,
        entries: Vec<Direction>,
    ) -> ObjectId {
        let id = ObjectId(self.objects.len() as u32);
        self.objects.push(PlacedObject {
            id,
            kind,
            cell,
            entries,
            position_gap: (0, 0),
            forced_left: None,
        });
        id
    }

    /// Mutable access to an already added object (gap, orientation).
    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut PlacedObject> {
        self.objects.get_mut(id.index())
    }

    /// `true` if nothing has been placed on `cell` yet.
    pub fn is_vacant(&self, cell: Cell) -> bool {
        cell.x >= 0
            && cell.y >= 0
            && cell.x < self.width
            && cell.y < self.height
            && !self.walls.contains(&cell)
            && !self.objects.iter().any(|o| o.cell == cell)
    }

    /// Place `count` objects of `kind` on random vacant cells.
    pub fn scatter(&mut self, kind: ObjectKind, count: usize, rng: &mut SimRng) -> GridResult<()> {
        for _ in 0..count {
            let vacant: Vec<Cell> = (0..self.height)
                .flat_map(|y| (0..self.width).map(move |x| Cell::new(x, y)))
                .filter(|&c| self.is_vacant(c))
                .collect();
            let cell = *rng.choose(&vacant).ok_or(GridError::NoRoom(kind.as_str()))?;
            self.add_object(kind, cell);
        }
        Ok(())
    }

    /// Validate bounds and overlaps and freeze the world.
    pub fn build(self) -> GridResult<GridWorld> {
        if self.width <= 0 || self.height <= 0 {
            return Err(GridError::Layout(format!(
                "grid must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        let n = (self.width * self.height) as usize;
        let mut world = GridWorld {
            width:     self.width,
            height:    self.height,
            walls:     vec![false; n],
            object_at: vec![None; n],
            objects:   Vec::with_capacity(self.objects.len()),
        };

        for cell in self.walls {
            world.check_bounds(cell)?;
            let idx = world.index(cell);
            world.walls[idx] = true;
        }
        for obj in self.objects {
            world.check_bounds(obj.cell)?;
            let idx = world.index(obj.cell);
            if world.walls[idx] || world.object_at[idx].is_some() {
                return Err(GridError::Occupied(obj.cell));
            }
            world.object_at[idx] = Some(obj.id);
            world.objects.push(obj);
        }
        Ok(world)
    }
}
