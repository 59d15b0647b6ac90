//! `dw-sim` — tick loop orchestrator for `deskworld`.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Arrivals — headless mode: steps whose walk time has elapsed complete
//!                and the next step of the path is committed.
//!   ② Timers   — due state timers fire (sit down, stop typing, …).
//!   ③ Update   — for each human in ascending AgentId order: needs decay by
//!                one tick, then the scheduler polls the current state and
//!                selects a new one if it ended.
//!   ④ Publish  — MoveCommands and Transitions go to the observer; every
//!                output interval a snapshot of all AgentViews follows.
//! ```
//!
//! With [`TransitMode::External`] step ① is skipped and a renderer calls
//! [`Sim::notify_transit_complete`] instead.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use dw_core::{SimConfig, SimRng};
//! use dw_grid::WorldLayout;
//! use dw_sim::{NoopObserver, SimBuilder};
//!
//! let config = SimConfig::default();
//! let world = WorldLayout::office().build(&mut SimRng::new(config.seed))?;
//! let mut sim = SimBuilder::new(config, world, 5).build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;
pub mod view;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::{Sim, TransitMode};
pub use view::AgentView;
