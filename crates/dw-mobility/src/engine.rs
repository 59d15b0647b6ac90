//! High-level mobility engine: turns route requests into committed steps.

use dw_core::{AgentId, Cell, Direction, Facing, Tick};
use dw_grid::{BfsPathFinder, ClosestPathFinder, GridWorld, Path, PathFinder};

use crate::state::Transit;
use crate::{MobilityError, MobilityResult, MobilityStore, MovementState};

/// A committed one-cell step, emitted for the renderer to animate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveCommand {
    pub agent:     AgentId,
    pub from:      Cell,
    pub to:        Cell,
    pub direction: Direction,
    pub facing:    Facing,
    pub arrives:   Tick,
}

/// Result of a route request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// A path of `steps` cells was stored and walking has begun (or will
    /// continue after the step in progress).
    Walking { steps: usize },
    /// The human already stands where it should.
    Arrived,
    /// No path exists.  The caller aborts its attempt.
    Unreachable,
}

/// Wraps a [`ClosestPathFinder`] and the [`MobilityStore`].
///
/// `P` is the underlying single-target finder (BFS by default); swap it at
/// compile time with no runtime overhead.
pub struct MobilityEngine<P: PathFinder = BfsPathFinder> {
    pub finder: ClosestPathFinder<P>,

    pub store: MobilityStore,

    /// Ticks the headless driver lets one step last.
    pub walk_ticks: u64,

    /// Steps committed since the last `take_commands`.
    outbox: Vec<MoveCommand>,
}

impl<P: PathFinder> MobilityEngine<P> {
    pub fn new(finder: P, agent_count: usize, walk_ticks: u64) -> Self {
        Self {
            finder:     ClosestPathFinder::new(finder),
            store:      MobilityStore::new(agent_count),
            walk_ticks: walk_ticks.max(1),
            outbox:     Vec::new(),
        }
    }

    /// Put `agent` on `cell` without walking (initial placement).
    pub fn place(&mut self, agent: AgentId, cell: Cell) {
        self.store.states[agent.index()] = MovementState::at(cell);
    }

    fn placed_cell(&self, agent: AgentId) -> MobilityResult<Cell> {
        let state = self.store.get(agent);
        if !state.placed {
            return Err(MobilityError::NotPlaced(agent));
        }
        Ok(state.cell)
    }

    // ── Route requests ────────────────────────────────────────────────────

    /// Walk onto `goal` itself.
    pub fn route_to(
        &mut self,
        agent: AgentId,
        goal:  Cell,
        world: &GridWorld,
        now:   Tick,
    ) -> MobilityResult<RouteOutcome> {
        let origin = self.placed_cell(agent)?;
        match self.finder.find_path(world, origin, goal)? {
            Some(path) => Ok(self.follow(agent, path, now)),
            None => Ok(RouteOutcome::Unreachable),
        }
    }

    /// Walk next to `goal`, entering from the cheapest of `entries`.
    pub fn route_to_closest(
        &mut self,
        agent:   AgentId,
        goal:    Cell,
        entries: &[Direction],
        world:   &GridWorld,
        now:     Tick,
    ) -> MobilityResult<RouteOutcome> {
        let origin = self.placed_cell(agent)?;
        match self.finder.find_approach(world, origin, goal, entries)? {
            Some(approach) => Ok(self.follow(agent, approach.path, now)),
            None => Ok(RouteOutcome::Unreachable),
        }
    }

    /// Replace the remaining path with `path` and start walking if standing.
    pub fn follow(&mut self, agent: AgentId, path: Path, now: Tick) -> RouteOutcome {
        let steps = path.len();
        let state = &mut self.store.states[agent.index()];
        state.path = path.cells.into();
        if steps == 0 {
            return RouteOutcome::Arrived;
        }
        self.advance(agent, now);
        RouteOutcome::Walking { steps }
    }

    /// Step onto an adjacent cell regardless of its occupancy (used to sit on
    /// furniture).  Fails while a step is in progress.
    pub fn step_onto(&mut self, agent: AgentId, cell: Cell, now: Tick) -> MobilityResult<MoveCommand> {
        let state = self.store.get(agent);
        if state.is_moving() {
            return Err(MobilityError::AlreadyInTransit(agent));
        }
        if !state.cell.is_neighbor(cell) {
            return Err(MobilityError::NotAdjacent { agent, from: state.cell, to: cell });
        }
        self.store.states[agent.index()].path.clear();
        Ok(self.commit(agent, cell, now))
    }

    /// Drop the remaining path; a step in progress still completes.
    pub fn clear_path(&mut self, agent: AgentId) {
        self.store.states[agent.index()].path.clear();
    }

    // ── Step consumption ──────────────────────────────────────────────────

    /// Pop the next cell if the human is standing still.
    fn advance(&mut self, agent: AgentId, now: Tick) -> Option<MoveCommand> {
        let state = &mut self.store.states[agent.index()];
        if state.is_moving() {
            return None;
        }
        let next = state.path.pop_front()?;
        Some(self.commit(agent, next, now))
    }

    fn commit(&mut self, agent: AgentId, to: Cell, now: Tick) -> MoveCommand {
        let arrives = now + self.walk_ticks;
        let state = &mut self.store.states[agent.index()];
        let from = state.cell;
        let direction = Direction::between(from, to).unwrap_or(Direction::Current);
        state.cell = to;
        state.transit = Some(Transit { from, to, direction, departed: now, arrives });

        let cmd = MoveCommand {
            agent,
            from,
            to,
            direction,
            facing: Facing::toward(direction),
            arrives,
        };
        self.outbox.push(cmd);
        cmd
    }

    /// Finish the step in progress and start the next one.
    ///
    /// Returns `true` when the path is exhausted and the human stands still.
    pub fn complete_transit(&mut self, agent: AgentId, now: Tick) -> MobilityResult<bool> {
        let state = self
            .store
            .states
            .get_mut(agent.index())
            .ok_or(MobilityError::NotPlaced(agent))?;
        if state.transit.take().is_none() {
            return Err(MobilityError::NotInTransit(agent));
        }
        Ok(self.advance(agent, now).is_none())
    }

    /// Humans whose step should be over by `now` under the headless driver.
    pub fn due_arrivals(&self, now: Tick) -> Vec<AgentId> {
        self.store
            .states
            .iter()
            .enumerate()
            .filter(|(_, s)| s.transit.is_some_and(|t| t.arrives <= now))
            .map(|(i, _)| AgentId(i as u32))
            .collect()
    }

    /// Drain the committed-step log.
    pub fn take_commands(&mut self) -> Vec<MoveCommand> {
        std::mem::take(&mut self.outbox)
    }
}
