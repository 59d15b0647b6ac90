//! The `Sim` struct and its tick loop.

use dw_agent::{AgentRngs, AgentStore};
use dw_behavior::{BehaviorScheduler, Env, StateKind};
use dw_core::{AgentId, Animation, Cell, SimClock, SimConfig, Tick};
use dw_grid::{BfsPathFinder, GridWorld, PathFinder, ResourceRepository};
use dw_mobility::MobilityEngine;
use tracing::{info, trace};

use crate::view::{seat_offset, AgentView};
use crate::{SimObserver, SimResult};

/// Who finishes a committed one-cell step.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TransitMode {
    /// The sim completes each step `walk_ticks` after it was committed.
    #[default]
    Headless,
    /// A renderer reports completion through [`Sim::notify_transit_complete`].
    External,
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim<P>` owns the office, its humans and their behavior, and drives the
/// tick loop:
///
/// 1. **Arrivals** (headless mode only): steps whose walk time has elapsed
///    complete; humans with more path take their next step.
/// 2. **Timers**: due state timers fire.
/// 3. **Updates**, ascending `AgentId`: needs decay by one tick, then the
///    scheduler polls the current state and replaces it if it ended.
/// 4. **Publish**: committed steps and state changes go to the observer;
///    every `output_interval_ticks` a snapshot of all views follows.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<P: PathFinder = BfsPathFinder> {
    pub config: SimConfig,

    /// Tracks the current tick and maps ticks to virtual time.
    pub clock: SimClock,

    /// Static floor, walls and furniture.
    pub world: GridWorld,

    /// Furniture and peer claims.
    pub resources: ResourceRepository,

    /// Needs, animations and facings (SoA arrays).
    pub agents: AgentStore,

    /// Per-human deterministic RNGs, separated for the split-borrow pattern.
    pub rngs: AgentRngs,

    pub mobility: MobilityEngine<P>,

    pub scheduler: BehaviorScheduler,

    pub transit_mode: TransitMode,

    /// First states are selected lazily, at the first tick or `force_state`.
    started: bool,
}

impl<P: PathFinder> Sim<P> {
    pub(crate) fn new(
        config:       SimConfig,
        world:        GridWorld,
        agents:       AgentStore,
        rngs:         AgentRngs,
        mobility:     MobilityEngine<P>,
        scheduler:    BehaviorScheduler,
        transit_mode: TransitMode,
    ) -> Self {
        Self {
            clock: config.make_clock(),
            config,
            world,
            resources: ResourceRepository::new(),
            agents,
            rngs,
            mobility,
            scheduler,
            transit_mode,
            started: false,
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    #[inline]
    pub fn now(&self) -> Tick {
        self.clock.current_tick
    }

    pub fn agent_count(&self) -> usize {
        self.agents.count
    }

    /// Run the simulation from the current tick to `config.end_tick()`.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        info!(humans = self.agents.count, ticks = self.config.total_ticks, "simulation started");
        while self.now() < self.config.end_tick() {
            self.step(observer)?;
        }
        observer.on_sim_end(self.now());
        info!(tick = %self.now(), "simulation finished");
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer)?;
        }
        Ok(())
    }

    /// Inbound renderer event: the tween of `agent`'s current step finished.
    ///
    /// In headless mode this completes the step early.  The next step, if
    /// any, is committed at once and published on the next tick.
    pub fn notify_transit_complete(&mut self, agent: AgentId) -> SimResult<()> {
        self.agents.check(agent)?;
        self.finish_transit(agent, self.now())
    }

    /// Stop `agent`'s activity and start `kind` directly, without fallback.
    ///
    /// Before the first tick, the other humans get their first states here
    /// and `agent` skips the random pick.
    pub fn force_state(&mut self, agent: AgentId, kind: StateKind) -> SimResult<bool> {
        self.agents.check(agent)?;
        let first = !self.started;
        self.started = true;
        let now = self.now();
        let (scheduler, mut env) = self.split(now);
        if first {
            scheduler.start_except(Some(agent), &mut env)?;
        }
        Ok(scheduler.force(agent, kind, &mut env)?)
    }

    /// Give every human its first state.  Idempotent.
    pub fn start(&mut self) -> SimResult<()> {
        if self.started {
            return Ok(());
        }
        self.started = true;
        let now = self.now();
        let (scheduler, mut env) = self.split(now);
        scheduler.start_all(&mut env)?;
        Ok(())
    }

    // ── Outbound views ────────────────────────────────────────────────────

    pub fn view(&self, agent: AgentId) -> SimResult<AgentView> {
        self.agents.check(agent)?;
        let i = agent.index();
        let movement = self.mobility.store.get(agent);
        let state = self.scheduler.state(agent);
        let seat = match state.and_then(|s| s.seat()) {
            Some((object, left)) => Some(seat_offset(self.world.object(object)?.position_gap, left)),
            None => None,
        };
        Ok(AgentView {
            agent,
            cell:        movement.cell,
            next_step:   movement.next_step(),
            route:       movement.route(),
            animation:   self.agents.animation[i],
            facing:      self.agents.facing[i],
            state:       state.map(|s| s.kind()),
            seat_offset: seat,
        })
    }

    pub fn views(&self) -> SimResult<Vec<AgentView>> {
        self.agents.agent_ids().map(|a| self.view(a)).collect()
    }

    /// Walls the renderer should fade because a human stands behind them.
    pub fn hidden_walls(&self) -> Vec<Cell> {
        self.world.walls_hidden_by(&self.mobility.store.cells())
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.now();
        observer.on_tick_start(now);
        self.process_tick(now, observer)?;
        observer.on_tick_end(now);
        if now.0.is_multiple_of(self.config.output_interval_ticks) {
            let views = self.views()?;
            observer.on_snapshot(now, &views, &self.agents);
        }
        self.clock.advance();
        Ok(())
    }

    fn process_tick<O: SimObserver>(&mut self, now: Tick, observer: &mut O) -> SimResult<()> {
        self.start()?;

        // ── Phase 1: headless arrivals ────────────────────────────────────
        if self.transit_mode == TransitMode::Headless {
            for agent in self.mobility.due_arrivals(now) {
                self.finish_transit(agent, now)?;
            }
        }

        // ── Phases 2–3: timers, decay, state updates ──────────────────────
        let dt = self.clock.tick_secs();
        let (scheduler, mut env) = self.split(now);
        scheduler.fire_timers(&mut env)?;
        for i in 0..env.agents.count {
            let agent = AgentId(i as u32);
            env.agents.needs_mut(agent).decay(dt, &scheduler.config.need_rates);
            scheduler.update(agent, &mut env)?;
        }

        // ── Phase 4: publish ──────────────────────────────────────────────
        let moves = self.mobility.take_commands();
        for cmd in &moves {
            self.agents.play(cmd.agent, Animation::Walk, Some(cmd.facing));
            observer.on_move(cmd);
        }
        let transitions = self.scheduler.take_transitions();
        for t in &transitions {
            observer.on_state_change(t);
        }
        trace!(
            tick = %now,
            moves = moves.len(),
            transitions = transitions.len(),
            timers = self.scheduler.timers.pending(),
            "tick done"
        );
        Ok(())
    }

    /// Complete `agent`'s step.  A human left standing mid-walk plays
    /// Freeze; an animation set by a state since the step began is kept.
    fn finish_transit(&mut self, agent: AgentId, now: Tick) -> SimResult<()> {
        let idle = self.mobility.complete_transit(agent, now)?;
        if idle && self.agents.animation[agent.index()] == Animation::Walk {
            self.agents.play(agent, Animation::Freeze, None);
        }
        Ok(())
    }

    /// Borrow the scheduler and everything it acts on as disjoint fields.
    fn split(&mut self, now: Tick) -> (&mut BehaviorScheduler, Env<'_, P>) {
        let Self { clock, world, resources, agents, rngs, mobility, scheduler, .. } = self;
        let env = Env {
            now,
            clock: &*clock,
            world: &*world,
            resources,
            mobility,
            agents,
            rngs,
        };
        (scheduler, env)
    }
}
