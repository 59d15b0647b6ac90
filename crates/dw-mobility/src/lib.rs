//! `dw-mobility` — cell-by-cell movement along computed paths.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                          |
//! |-------------|-------------------------------------------------------------------|
//! | [`state`]   | `MovementState`, `Transit` — per-human walking state              |
//! | [`store`]   | `MobilityStore` — `Vec<MovementState>`                            |
//! | [`engine`]  | `MobilityEngine<P>` — routing, step commits, transit completion   |
//! | [`error`]   | `MobilityError`, `MobilityResult<T>`                              |
//!
//! # Movement model
//!
//! A path is consumed one cell at a time:
//!
//! 1. A route request stores the path and, if the human is standing still,
//!    pops the first cell at once.
//! 2. Popping a cell *commits* the step: the human's logical cell becomes the
//!    next cell immediately and a [`MoveCommand`] is queued for the renderer.
//!    The human is now in transit.
//! 3. Transit ends only through [`MobilityEngine::complete_transit`], called
//!    either by the renderer when its tween finishes or by the headless driver
//!    once `walk_ticks` have elapsed.  Completion pops the next cell.
//!
//! At most one transit per human is ever outstanding.

pub mod engine;
pub mod error;
pub mod state;
pub mod store;

#[cfg(test)]
mod tests;

pub use engine::{MobilityEngine, MoveCommand, RouteOutcome};
pub use error::{MobilityError, MobilityResult};
pub use state::{MovementState, Transit};
pub use store::MobilityStore;
