//! `dw-output` — simulation output writers for deskworld.
//!
//! | Module       | Contents                                               |
//! |--------------|--------------------------------------------------------|
//! | [`row`]      | Plain row types: `AgentSnapshotRow`, `TransitionRow`   |
//! | [`writer`]   | The `OutputWriter` backend trait                       |
//! | [`csv`]      | `CsvWriter`                                            |
//! | [`observer`] | `SimOutputObserver`, the `SimObserver` bridge          |
//!
//! The CSV backend creates `agent_snapshots.csv` and `state_transitions.csv`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use dw_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer, &config);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{AgentSnapshotRow, TransitionRow};
pub use writer::OutputWriter;
