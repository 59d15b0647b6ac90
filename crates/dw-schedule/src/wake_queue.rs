//! `WakeQueue` — sparse tick-keyed activation queue.
//!
//! Most humans spend most ticks waiting on an animation or a walk.  Instead
//! of polling every timer every tick, each wait registers the tick at which
//! it ends and the simulation drains only what is due.
//!
//! `BTreeMap` gives O(log W) insert and pop where W is the number of distinct
//! pending ticks.

use std::collections::BTreeMap;

use dw_core::{AgentId, Tick};

/// One pending wake-up, stamped with the epoch it was registered under.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Wake {
    pub agent: AgentId,
    pub epoch: u32,
}

#[derive(Default, Debug)]
pub struct WakeQueue {
    inner: BTreeMap<Tick, Vec<Wake>>,
    /// Cached total entry count for O(1) `len()`.
    total: usize,
}

impl WakeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, tick: Tick, wake: Wake) {
        self.inner.entry(tick).or_default().push(wake);
        self.total += 1;
    }

    /// Remove and return everything scheduled at or before `now`, earliest
    /// tick first, insertion order within a tick.
    pub fn drain_due(&mut self, now: Tick) -> Vec<Wake> {
        let later = self.inner.split_off(&now.offset(1));
        let due = std::mem::replace(&mut self.inner, later);
        let wakes: Vec<Wake> = due.into_values().flatten().collect();
        self.total -= wakes.len();
        wakes
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
