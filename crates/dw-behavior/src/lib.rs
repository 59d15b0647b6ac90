//! `dw-behavior` — what the humans of `deskworld` decide to do.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                      |
//! |---------------|---------------------------------------------------------------|
//! | [`kind`]      | `StateKind`, the closed set of activities                     |
//! | [`config`]    | `BehaviorConfig`, base weights, gain table, durations         |
//! | [`selection`] | Need-weighted random choice of the next activity              |
//! | [`states`]    | `State` enum and the per-activity state machines              |
//! | [`meeting`]   | `MeetingBoard` shared by the two sides of a conversation      |
//! | [`context`]   | `Env` and `StateCtx`, the mutable views states act through    |
//! | [`scheduler`] | `BehaviorScheduler`: timers, selection, recruitment, log      |
//! | [`error`]     | `BehaviorError`, `BehaviorResult<T>`                          |
//!
//! # Design notes
//!
//! States never see each other.  The only cross-human coupling is the
//! `ResourceRepository` (claims on furniture and recruited peers) and the
//! `MeetingBoard`.  Everything runs on the simulation thread, so states
//! mutate the world directly through `StateCtx` instead of emitting intents.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                        |
//! |---------|---------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `BehaviorConfig`.        |

pub mod config;
pub mod context;
pub mod error;
pub mod kind;
pub mod meeting;
pub mod scheduler;
pub mod selection;
pub mod states;

#[cfg(test)]
mod tests;

pub use config::{BaseWeights, BehaviorConfig, DurationRange, GainTable};
pub use context::{Env, StateCtx};
pub use error::{BehaviorError, BehaviorResult};
pub use kind::StateKind;
pub use meeting::{Meeting, MeetingBoard, MeetingStatus};
pub use scheduler::{BehaviorScheduler, Transition};
pub use selection::Availability;
pub use states::State;
