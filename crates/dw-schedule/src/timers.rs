//! Cancellable per-human timers.

use dw_core::{AgentId, Tick};

use crate::wake_queue::{Wake, WakeQueue};
use crate::{ScheduleError, ScheduleResult};

#[derive(Debug)]
pub struct Timers {
    queue:  WakeQueue,
    epochs: Vec<u32>,
}

impl Timers {
    pub fn new(agent_count: usize) -> Self {
        Self { queue: WakeQueue::new(), epochs: vec![0; agent_count] }
    }

    /// Wake `agent` at `at` under its current epoch.
    pub fn schedule(&mut self, agent: AgentId, at: Tick) -> ScheduleResult<()> {
        let epoch = *self
            .epochs
            .get(agent.index())
            .ok_or(ScheduleError::UnknownAgent(agent))?;
        self.queue.push(at, Wake { agent, epoch });
        Ok(())
    }

    /// Invalidate every pending wake of `agent`.
    pub fn cancel_all(&mut self, agent: AgentId) {
        if let Some(e) = self.epochs.get_mut(agent.index()) {
            *e = e.wrapping_add(1);
        }
    }

    /// Agents with a live wake due at or before `now`, in firing order.
    /// Stale wakes are dropped.
    pub fn drain_live(&mut self, now: Tick) -> Vec<AgentId> {
        let epochs = &self.epochs;
        self.queue
            .drain_due(now)
            .into_iter()
            .filter(|w| epochs.get(w.agent.index()) == Some(&w.epoch))
            .map(|w| w.agent)
            .collect()
    }

    /// Pending entries, stale ones included.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}
