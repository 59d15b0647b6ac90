//! Plain data row types written by output backends.

use dw_agent::{AgentStore, NeedKind};
use dw_behavior::Transition;
use dw_core::Tick;
use dw_sim::AgentView;

/// One human at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentSnapshotRow {
    pub tick:       u64,
    /// Virtual time since the start of the run.
    pub time_ms:    u64,
    pub agent_id:   u32,
    pub x:          i32,
    pub y:          i32,
    /// Empty while the human is between states.
    pub state:      &'static str,
    pub animation:  &'static str,
    pub relaxation: f32,
    pub hunger:     f32,
    pub social:     f32,
}

impl AgentSnapshotRow {
    pub fn from_view(tick: Tick, time_ms: u64, view: &AgentView, agents: &AgentStore) -> Self {
        let needs = agents.needs(view.agent);
        Self {
            tick:       tick.0,
            time_ms,
            agent_id:   view.agent.0,
            x:          view.cell.x,
            y:          view.cell.y,
            state:      view.state.map_or("", |k| k.as_str()),
            animation:  view.animation.as_str(),
            relaxation: needs.value(NeedKind::Relaxation),
            hunger:     needs.value(NeedKind::Hunger),
            social:     needs.value(NeedKind::Social),
        }
    }
}

/// One state change.  `from` is empty for a human's first state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionRow {
    pub tick:     u64,
    pub agent_id: u32,
    pub from:     &'static str,
    pub to:       &'static str,
}

impl From<&Transition> for TransitionRow {
    fn from(t: &Transition) -> Self {
        Self {
            tick:     t.tick.0,
            agent_id: t.agent.0,
            from:     t.from.map_or("", |k| k.as_str()),
            to:       t.to.as_str(),
        }
    }
}
