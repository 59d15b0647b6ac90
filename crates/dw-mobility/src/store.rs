//! `MobilityStore` — SoA-style container for all movement state.

use dw_core::{AgentId, Cell};

use crate::state::MovementState;

pub struct MobilityStore {
    /// Indexed by `AgentId`.
    pub states: Vec<MovementState>,
}

impl MobilityStore {
    pub fn new(agent_count: usize) -> Self {
        Self { states: vec![MovementState::default(); agent_count] }
    }

    #[inline]
    pub fn get(&self, agent: AgentId) -> &MovementState {
        &self.states[agent.index()]
    }

    #[inline]
    pub fn cell(&self, agent: AgentId) -> Cell {
        self.states[agent.index()].cell
    }

    #[inline]
    pub fn is_moving(&self, agent: AgentId) -> bool {
        self.states[agent.index()].is_moving()
    }

    #[inline]
    pub fn is_idle(&self, agent: AgentId) -> bool {
        self.states[agent.index()].is_idle()
    }

    /// Logical cells of every placed human.
    pub fn cells(&self) -> Vec<Cell> {
        self.states.iter().filter(|s| s.placed).map(|s| s.cell).collect()
    }

    /// Cells of every placed human except `agent`.
    pub fn other_cells(&self, agent: AgentId) -> Vec<Cell> {
        self.states
            .iter()
            .enumerate()
            .filter(|&(i, s)| s.placed && i != agent.index())
            .map(|(_, s)| s.cell)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
