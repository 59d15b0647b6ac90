//! Simulation observer trait for rendering, progress reporting and output.

use dw_agent::AgentStore;
use dw_behavior::Transition;
use dw_core::Tick;
use dw_mobility::MoveCommand;

use crate::AgentView;

/// Callbacks invoked by [`Sim`][crate::Sim] at key points in the tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — transition printer
///
/// ```rust,ignore
/// struct Printer;
///
/// impl SimObserver for Printer {
///     fn on_state_change(&mut self, t: &Transition) {
///         println!("{} {}: {:?} -> {}", t.tick, t.agent, t.from, t.to);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// A human committed to a one-cell step.  A renderer starts its tween
    /// here and reports back through `Sim::notify_transit_complete`.
    fn on_move(&mut self, _cmd: &MoveCommand) {}

    /// A human switched activity.
    fn on_state_change(&mut self, _transition: &Transition) {}

    /// Called at the end of each tick.
    fn on_tick_end(&mut self, _tick: Tick) {}

    /// Called every `config.output_interval_ticks` ticks with the outbound
    /// view of every human and their needs.
    fn on_snapshot(&mut self, _tick: Tick, _views: &[AgentView], _agents: &AgentStore) {}

    /// Called once after the final tick of [`Sim::run`][crate::Sim::run].
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
