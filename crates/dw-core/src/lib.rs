//! `dw-core` — foundational types for the `deskworld` office simulation.
//!
//! Every other `dw-*` crate depends on this one.  It has no `dw-*`
//! dependencies and only `rand` and `thiserror` externally, plus optional
//! `serde`.
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `ObjectId`, `MeetingId`                    |
//! | [`cell`]        | `Cell`, `Direction`                                   |
//! | [`animation`]   | `Animation` catalogue, `Facing`                       |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`                       |
//! | [`rng`]         | `AgentRng` (per-agent), `SimRng` (global)             |
//! | [`error`]       | `DwError`, `DwResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod animation;
pub mod cell;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use animation::{Animation, Facing};
pub use cell::{Cell, Direction};
pub use error::{DwError, DwResult};
pub use ids::{AgentId, MeetingId, ObjectId};
pub use rng::{AgentRng, SimRng};
pub use time::{SimClock, SimConfig, Tick};
