//! `dw-agent` — Structure-of-Arrays storage for the humans of `deskworld`.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`needs`]       | `NeedKind`, `Needs`, `NeedRates`                          |
//! | [`store`]       | `AgentStore` (SoA arrays), `AgentRngs` (per-agent RNG)    |
//! | [`builder`]     | `AgentStoreBuilder` (fluent construction)                 |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                     |
//! |------------|------------------------------------------------------------|
//! | `serde`    | Derives `Serialize`/`Deserialize` on needs and rates.      |

pub mod builder;
pub mod needs;
pub mod store;


pub use builder::AgentStoreBuilder;
pub use needs::{NeedKind, NeedRates, Needs};
pub use store::{AgentRngs, AgentStore};
