//! `dw-grid` — the static office floor and everything that searches it.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`object`]    | `ObjectKind`, `PlacedObject`                              |
//! | [`world`]     | `GridWorld`, `GridWorldBuilder`                           |
//! | [`layout`]    | `WorldLayout` presets and random object placement         |
//! | [`loader`]    | CSV layout loader                                         |
//! | [`path`]      | `PathFinder` trait, `Path`, `BfsPathFinder`               |
//! | [`closest`]   | `ClosestPathFinder`, `Approach`                           |
//! | [`resources`] | `ResourceRepository`, `ClaimHandle`                       |
//! | [`error`]     | `GridError`, `GridResult<T>`                              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on layouts and objects.    |

pub mod closest;
pub mod error;
pub mod layout;
pub mod loader;
pub mod object;
pub mod path;
pub mod resources;
pub mod world;


pub use closest::{Approach, ClosestPathFinder, DEFAULT_ENTRIES};
pub use error::{GridError, GridResult};
pub use layout::{ObjectSpec, WorldLayout};
pub use loader::{load_layout_csv, load_layout_reader};
pub use object::{ObjectKind, PlacedObject};
pub use path::{BfsPathFinder, Path, PathFinder};
pub use resources::{ClaimHandle, ResourceRef, ResourceRepository};
pub use world::{GridWorld, GridWorldBuilder};
