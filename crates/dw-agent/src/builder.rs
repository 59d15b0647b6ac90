//! Fluent builder for constructing `AgentStore` + `AgentRngs` in one step.
//!
//! ```rust
//! use dw_agent::{AgentStoreBuilder, NeedKind};
//!
//! let (store, rngs) = AgentStoreBuilder::new(4, /*seed=*/ 42).baseline(0.8).build();
//! assert_eq!(store.count, 4);
//! assert_eq!(rngs.len(), 4);
//! assert_eq!(store.needs[0].value(NeedKind::Social), 0.8);
//! ```

use crate::{AgentRngs, AgentStore};

pub struct AgentStoreBuilder {
    count:    usize,
    seed:     u64,
    baseline: f32,
}

impl AgentStoreBuilder {
    pub fn new(count: usize, seed: u64) -> Self {
        Self { count, seed, baseline: 1.0 }
    }

    /// Initial value of every need.  Default: 1.0.
    pub fn baseline(mut self, value: f32) -> Self {
        self.baseline = value;
        self
    }

    pub fn build(self) -> (AgentStore, AgentRngs) {
        let store = AgentStore::new(self.count, self.baseline);
        let rngs = AgentRngs::new(self.count, self.seed);
        (store, rngs)
    }
}
