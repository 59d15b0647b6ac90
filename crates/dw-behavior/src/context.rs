//! Mutable views handed to states while they run.

use dw_agent::{AgentRngs, AgentStore};
use dw_core::{AgentId, AgentRng, Animation, Cell, Facing, SimClock, Tick};
use dw_grid::{GridWorld, PathFinder, ResourceRepository};
use dw_mobility::MobilityEngine;
use dw_schedule::Timers;

use crate::config::{BehaviorConfig, DurationRange};
use crate::kind::StateKind;
use crate::meeting::MeetingBoard;
use crate::BehaviorResult;

/// Everything outside the behavior layer that states read or mutate during
/// one tick.  Built by `dw-sim` and passed by `&mut` to the scheduler.
pub struct Env<'a, P: PathFinder> {
    pub now:       Tick,
    pub clock:     &'a SimClock,
    pub world:     &'a GridWorld,
    pub resources: &'a mut ResourceRepository,
    pub mobility:  &'a mut MobilityEngine<P>,
    pub agents:    &'a mut AgentStore,
    pub rngs:      &'a mut AgentRngs,
}

/// One state's view of the world while acting for `agent`.
pub struct StateCtx<'s, 'a, P: PathFinder> {
    pub agent:    AgentId,
    pub env:      &'s mut Env<'a, P>,
    pub config:   &'s BehaviorConfig,
    pub timers:   &'s mut Timers,
    pub meetings: &'s mut MeetingBoard,
}

impl<'s, 'a, P: PathFinder> StateCtx<'s, 'a, P> {
    pub fn new(
        agent:    AgentId,
        env:      &'s mut Env<'a, P>,
        config:   &'s BehaviorConfig,
        timers:   &'s mut Timers,
        meetings: &'s mut MeetingBoard,
    ) -> Self {
        Self { agent, env, config, timers, meetings }
    }

    #[inline]
    pub fn now(&self) -> Tick {
        self.env.now
    }

    #[inline]
    pub fn cell(&self) -> Cell {
        self.env.mobility.store.cell(self.agent)
    }

    /// Not moving and nothing left to walk.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.env.mobility.store.is_idle(self.agent)
    }

    /// Cells of every other human.
    pub fn other_cells(&self) -> Vec<Cell> {
        self.env.mobility.store.other_cells(self.agent)
    }

    #[inline]
    pub fn rng(&mut self) -> &mut AgentRng {
        self.env.rngs.get_mut(self.agent)
    }

    pub fn play(&mut self, animation: Animation, facing: Option<Facing>) {
        self.env.agents.play(self.agent, animation, facing);
    }

    // ── Timers ────────────────────────────────────────────────────────────

    /// Call this state's `on_timer` after `ms` virtual milliseconds.
    pub fn wait_ms(&mut self, ms: u64) -> BehaviorResult<()> {
        let at = self.env.clock.deadline(self.env.now, ms);
        self.timers.schedule(self.agent, at)?;
        Ok(())
    }

    /// Wait for one walked cell plus the settle margin.
    pub fn wait_walk(&mut self) -> BehaviorResult<()> {
        let walk = self.env.mobility.walk_ticks;
        let settle = self.env.clock.ticks_for_ms(self.config.settle_ms);
        let at = self.env.now + (walk + settle).max(1);
        self.timers.schedule(self.agent, at)?;
        Ok(())
    }

    /// Random duration in `range`.
    pub fn roll(&mut self, range: DurationRange) -> u64 {
        self.rng().between_ms(range.min_ms, range.max_ms)
    }

    /// `animation` cycles times a random factor in `loops`.
    pub fn roll_loops(&mut self, animation: Animation, loops: (f64, f64)) -> u64 {
        let (lo, hi) = loops;
        let factor = if hi > lo { self.rng().gen_range(lo..hi) } else { lo };
        (factor * animation.duration_ms() as f64).round() as u64
    }

    // ── Needs ─────────────────────────────────────────────────────────────

    /// Apply the completion gains of `state` to this human.
    pub fn replenish(&mut self, state: StateKind) {
        let gains = &self.config.gains;
        let needs = self.env.agents.needs_mut(self.agent);
        for need in dw_agent::NeedKind::ALL {
            let g = gains.gain(state, need);
            if g > 0.0 {
                needs.replenish(need, g);
            }
        }
    }
}
