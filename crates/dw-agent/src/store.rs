//! Human storage: `AgentStore` (SoA data) and `AgentRngs` (per-agent RNG).
//!
//! RNGs live in their own struct so the scheduler can hold `&mut AgentRngs`
//! for the acting human while it also writes another human's animation in
//! `&mut AgentStore` (two-person talks).

use dw_core::{AgentId, AgentRng, Animation, DwError, DwResult, Facing};

use crate::needs::Needs;

// ── AgentRngs ─────────────────────────────────────────────────────────────────

pub struct AgentRngs {
    pub inner: Vec<AgentRng>,
}

impl AgentRngs {
    /// Allocate and seed `count` per-agent RNGs from `global_seed`.
    pub(crate) fn new(count: usize, global_seed: u64) -> Self {
        let inner = (0..count as u32)
            .map(|i| AgentRng::new(global_seed, AgentId(i)))
            .collect();
        Self { inner }
    }

    #[inline]
    pub fn get_mut(&mut self, agent: AgentId) -> &mut AgentRng {
        &mut self.inner[agent.index()]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── AgentStore ────────────────────────────────────────────────────────────────

/// Structure-of-Arrays storage for per-human presentation and need state.
///
/// Every `Vec` has exactly `count` elements and `AgentId` indexes all of
/// them.  Position and path state belong to `dw-mobility`; the active state
/// machine belongs to `dw-behavior`.
pub struct AgentStore {
    pub count: usize,

    pub needs: Vec<Needs>,

    /// Animation the renderer should be playing.
    pub animation: Vec<Animation>,

    pub facing: Vec<Facing>,
}

impl AgentStore {
    pub(crate) fn new(count: usize, baseline: f32) -> Self {
        Self {
            count,
            needs:     vec![Needs::new(baseline); count],
            animation: vec![Animation::Freeze; count],
            facing:    vec![Facing::default(); count],
        }
    }

    /// Iterator over all valid `AgentId`s.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> {
        (0..self.count as u32).map(AgentId)
    }

    pub fn check(&self, agent: AgentId) -> DwResult<()> {
        if agent.index() < self.count {
            Ok(())
        } else {
            Err(DwError::AgentNotFound(agent))
        }
    }

    #[inline]
    pub fn needs(&self, agent: AgentId) -> &Needs {
        &self.needs[agent.index()]
    }

    #[inline]
    pub fn needs_mut(&mut self, agent: AgentId) -> &mut Needs {
        &mut self.needs[agent.index()]
    }

    /// Switch animation; `facing` of `None` keeps the current orientation.
    pub fn play(&mut self, agent: AgentId, animation: Animation, facing: Option<Facing>) {
        self.animation[agent.index()] = animation;
        if let Some(f) = facing {
            self.facing[agent.index()] = f;
        }
    }
}
