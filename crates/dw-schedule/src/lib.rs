//! `dw-schedule` — timers for the behavior layer.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                 |
//! |----------------|----------------------------------------------------------|
//! | [`wake_queue`] | `WakeQueue` (`BTreeMap<Tick, Vec<Wake>>`), `Wake`        |
//! | [`timers`]     | `Timers`: wake queue plus per-human epochs               |
//! | [`error`]      | `ScheduleError`, `ScheduleResult<T>`                     |
//!
//! # Cancellation model
//!
//! A state that waits ("stand up in 5 s") registers a wake tick stamped with
//! its human's current *epoch*.  Stopping the state bumps the epoch.  When a
//! wake comes due it is delivered only if its stamp still matches, so a
//! stopped state is never called back.

pub mod error;
pub mod timers;
pub mod wake_queue;


pub use error::{ScheduleError, ScheduleResult};
pub use timers::Timers;
pub use wake_queue::{Wake, WakeQueue};
