//! Per-human state slots, timer dispatch, selection and meeting recruitment.
//!
//! # Tick protocol
//!
//! The simulation loop calls, in order:
//!
//! 1. [`BehaviorScheduler::fire_timers`] once;
//! 2. [`BehaviorScheduler::update`] once per human, in `AgentId` order.
//!
//! `update` polls the current state and, when it has gone inactive, stops it
//! and selects the next one.  A state that declines to start is penalised and
//! selection is retried up to `max_start_attempts` times before Freeze.

use dw_core::{AgentId, Cell, Tick};
use dw_grid::{ObjectKind, PathFinder, ResourceRef};
use dw_schedule::Timers;
use tracing::{debug, info, warn};

use crate::config::BehaviorConfig;
use crate::context::{Env, StateCtx};
use crate::kind::StateKind;
use crate::meeting::MeetingBoard;
use crate::selection::{self, Availability};
use crate::states::{State, Talk};
use crate::BehaviorResult;

// ── Transition ────────────────────────────────────────────────────────────────

/// One state change.  `from` is `None` for the first state of a human.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub tick:  Tick,
    pub agent: AgentId,
    pub from:  Option<StateKind>,
    pub to:    StateKind,
}

// ── BehaviorScheduler ─────────────────────────────────────────────────────────

pub struct BehaviorScheduler {
    pub config:   BehaviorConfig,
    pub timers:   Timers,
    pub meetings: MeetingBoard,
    /// `None` between a stop and the next successful start.
    states:      Vec<Option<State>>,
    /// Kind of the most recently stopped state, penalised by selection.
    last_kind:   Vec<Option<StateKind>>,
    transitions: Vec<Transition>,
}

impl BehaviorScheduler {
    pub fn new(config: BehaviorConfig, agent_count: usize) -> BehaviorResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            timers:      Timers::new(agent_count),
            meetings:    MeetingBoard::new(),
            states:      (0..agent_count).map(|_| None).collect(),
            last_kind:   vec![None; agent_count],
            transitions: Vec::new(),
        })
    }

    pub fn agent_count(&self) -> usize {
        self.states.len()
    }

    pub fn state(&self, agent: AgentId) -> Option<&State> {
        self.states.get(agent.index())?.as_ref()
    }

    pub fn kind(&self, agent: AgentId) -> Option<StateKind> {
        self.state(agent).map(State::kind)
    }

    /// Drain the transition log.
    pub fn take_transitions(&mut self) -> Vec<Transition> {
        std::mem::take(&mut self.transitions)
    }

    // ── Tick entry points ─────────────────────────────────────────────────

    /// Give every human its first state.
    pub fn start_all<P: PathFinder>(&mut self, env: &mut Env<'_, P>) -> BehaviorResult<()> {
        self.start_except(None, env)
    }

    /// Give every stateless human other than `skip` its first state.
    pub fn start_except<P: PathFinder>(
        &mut self,
        skip: Option<AgentId>,
        env:  &mut Env<'_, P>,
    ) -> BehaviorResult<()> {
        for i in 0..self.states.len() {
            let agent = AgentId(i as u32);
            if Some(agent) != skip && self.states[i].is_none() {
                self.select_next(agent, env)?;
            }
        }
        Ok(())
    }

    /// Run `on_timer` for every live timer due at `env.now`.
    pub fn fire_timers<P: PathFinder>(&mut self, env: &mut Env<'_, P>) -> BehaviorResult<()> {
        for agent in self.timers.drain_live(env.now) {
            self.with_state(agent, env, |state, ctx| state.on_timer(ctx))
                .transpose()?;
        }
        Ok(())
    }

    /// Poll `agent`'s state; replace it if it has finished or failed.
    pub fn update<P: PathFinder>(&mut self, agent: AgentId, env: &mut Env<'_, P>) -> BehaviorResult<()> {
        let active = self
            .with_state(agent, env, |state, ctx| state.is_active(ctx))
            .transpose()?
            .unwrap_or(false);
        if !active {
            self.stop_current(agent, env);
            self.select_next(agent, env)?;
        }
        Ok(())
    }

    /// Stop the current state and start `kind` without fallback.
    ///
    /// Returns whether `kind` started.  On `false` the human has no state
    /// until its next `update`.
    pub fn force<P: PathFinder>(
        &mut self,
        agent: AgentId,
        kind:  StateKind,
        env:   &mut Env<'_, P>,
    ) -> BehaviorResult<bool> {
        self.stop_current(agent, env);
        match self.try_start(agent, kind, env)? {
            Some(state) => {
                info!(%agent, %kind, "forced state");
                self.install(agent, state, env.now);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    fn install(&mut self, agent: AgentId, state: State, now: Tick) {
        let i = agent.index();
        let to = state.kind();
        let from = self.last_kind[i];
        debug!(tick = %now, %agent, from = ?from, %to, "state change");
        self.transitions.push(Transition { tick: now, agent, from, to });
        self.states[i] = Some(state);
    }

    /// Stop and discard the current state, cancel its timers and drop the
    /// rest of its walk.
    fn stop_current<P: PathFinder>(&mut self, agent: AgentId, env: &mut Env<'_, P>) {
        let Some(mut state) = self.states[agent.index()].take() else {
            return;
        };
        self.with_detached(agent, env, &mut state, |state, ctx| state.stop(ctx));
        self.timers.cancel_all(agent);
        env.mobility.clear_path(agent);
        self.last_kind[agent.index()] = Some(state.kind());
    }

    fn select_next<P: PathFinder>(&mut self, agent: AgentId, env: &mut Env<'_, P>) -> BehaviorResult<()> {
        let mut penalised = self.last_kind[agent.index()];

        for attempt in 0..self.config.max_start_attempts {
            let candidates = self.candidates(agent, env);
            let needs = *env.agents.needs(agent);
            if tracing::enabled!(tracing::Level::DEBUG) {
                let weights: Vec<(StateKind, f64)> = candidates
                    .iter()
                    .map(|&k| (k, selection::weight(k, penalised, &needs, &self.config)))
                    .collect();
                debug!(%agent, attempt, ?weights, "selection weights");
            }
            let rng = env.rngs.get_mut(agent);
            let Some(kind) = selection::draw(&candidates, penalised, &needs, &self.config, rng) else {
                break;
            };
            if let Some(state) = self.try_start(agent, kind, env)? {
                self.install(agent, state, env.now);
                return Ok(());
            }
            debug!(%agent, %kind, "start declined");
            penalised = Some(kind);
        }

        warn!(%agent, "no state could start, falling back to freeze");
        if let Some(state) = self.try_start(agent, StateKind::Freeze, env)? {
            self.install(agent, state, env.now);
        }
        Ok(())
    }

    fn try_start<P: PathFinder>(
        &mut self,
        agent: AgentId,
        kind:  StateKind,
        env:   &mut Env<'_, P>,
    ) -> BehaviorResult<Option<State>> {
        let Some(mut state) = State::fresh(kind) else {
            return self.start_talk(agent, env);
        };
        let started = self.with_detached(agent, env, &mut state, |state, ctx| state.start(ctx))?;
        Ok(started.then_some(state))
    }

    // ── Meetings ──────────────────────────────────────────────────────────

    /// Recruit a random idle peer, open a meeting and start both sides.
    ///
    /// Returns the initiator's state; the peer's is installed directly.
    fn start_talk<P: PathFinder>(&mut self, agent: AgentId, env: &mut Env<'_, P>) -> BehaviorResult<Option<State>> {
        let peers = self.idle_peers(agent, env);
        let Some(&peer) = env.rngs.get_mut(agent).choose(&peers) else {
            return Ok(None);
        };
        let Some(claim) = env.resources.try_claim(ResourceRef::Agent(peer), agent) else {
            return Ok(None);
        };

        let store = &env.mobility.store;
        let (own_cell, peer_cell) = (store.cell(agent), store.cell(peer));
        let bystanders: Vec<Cell> = store
            .states
            .iter()
            .enumerate()
            .filter(|&(i, s)| s.placed && i != agent.index() && i != peer.index())
            .map(|(_, s)| s.cell)
            .collect();
        let Some((a, b)) = env.world.meeting_cells(&[own_cell, peer_cell], &bystanders) else {
            debug!(%agent, %peer, "no room to meet");
            env.resources.release(claim);
            return Ok(None);
        };
        // Seat each participant on the nearer cell of the pair.
        let cells = if own_cell.manhattan(a) + peer_cell.manhattan(b) <= own_cell.manhattan(b) + peer_cell.manhattan(a) {
            [a, b]
        } else {
            [b, a]
        };
        let meeting = self.meetings.open([agent, peer], cells);

        let mut own = State::Talk(Talk::new(meeting, 0, peer).with_claim(claim));
        if !self.with_detached(agent, env, &mut own, |state, ctx| state.start(ctx))? {
            self.with_detached(agent, env, &mut own, |state, ctx| state.stop(ctx));
            self.meetings.close(meeting);
            return Ok(None);
        }

        self.stop_current(peer, env);
        let mut theirs = State::Talk(Talk::new(meeting, 1, agent));
        if !self.with_detached(peer, env, &mut theirs, |state, ctx| state.start(ctx))? {
            self.with_detached(peer, env, &mut theirs, |state, ctx| state.stop(ctx));
            self.with_detached(agent, env, &mut own, |state, ctx| state.stop(ctx));
            self.timers.cancel_all(agent);
            env.mobility.clear_path(agent);
            if let Some(state) = self.try_start(peer, StateKind::Freeze, env)? {
                self.install(peer, state, env.now);
            }
            return Ok(None);
        }
        info!(%agent, %peer, %meeting, "meeting arranged");
        self.install(peer, theirs, env.now);
        Ok(Some(own))
    }

    /// Humans `agent` may pull into a conversation.
    pub fn idle_peers<P: PathFinder>(&self, agent: AgentId, env: &Env<'_, P>) -> Vec<AgentId> {
        self.states
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != agent.index())
            .filter(|(_, s)| s.as_ref().is_some_and(|s| s.kind().is_interruptible()))
            .map(|(i, _)| AgentId(i as u32))
            .filter(|&peer| env.mobility.store.get(peer).placed)
            .filter(|&peer| !env.resources.is_claimed(ResourceRef::Agent(peer)))
            .collect()
    }

    /// Kinds `agent` could start right now.
    pub fn candidates<P: PathFinder>(&self, agent: AgentId, env: &Env<'_, P>) -> Vec<StateKind> {
        let cells = env.mobility.store.cells();
        let free = |kind| env.resources.has_free(env.world, kind, &cells);
        selection::candidate_set(Availability {
            peer:      !self.idle_peers(agent, env).is_empty(),
            sofa:      free(ObjectKind::Sofa),
            desk:      free(ObjectKind::Desk),
            dispenser: free(ObjectKind::Dispenser),
        })
    }

    // ── Context plumbing ──────────────────────────────────────────────────

    fn with_state<P: PathFinder, R>(
        &mut self,
        agent: AgentId,
        env:   &mut Env<'_, P>,
        f:     impl FnOnce(&mut State, &mut StateCtx<'_, '_, P>) -> R,
    ) -> Option<R> {
        let Self { config, states, timers, meetings, .. } = self;
        let state = states.get_mut(agent.index())?.as_mut()?;
        let mut ctx = StateCtx::new(agent, env, config, timers, meetings);
        Some(f(state, &mut ctx))
    }

    fn with_detached<P: PathFinder, R>(
        &mut self,
        agent: AgentId,
        env:   &mut Env<'_, P>,
        state: &mut State,
        f:     impl FnOnce(&mut State, &mut StateCtx<'_, '_, P>) -> R,
    ) -> R {
        let Self { config, timers, meetings, .. } = self;
        let mut ctx = StateCtx::new(agent, env, config, timers, meetings);
        f(state, &mut ctx)
    }
}
