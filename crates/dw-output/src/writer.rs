//! The `OutputWriter` trait implemented by backend writers.

use crate::{AgentSnapshotRow, OutputResult, TransitionRow};

/// A sink for simulation rows.
///
/// Errors never interrupt the run; [`SimOutputObserver`][crate::SimOutputObserver]
/// keeps the first one for [`take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Write one snapshot batch (one row per human).
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()>;

    fn write_transition(&mut self, row: &TransitionRow) -> OutputResult<()>;

    /// Flush and close.  Idempotent; writes after `finish` fail with
    /// [`OutputError::Finished`][crate::OutputError::Finished].
    fn finish(&mut self) -> OutputResult<()>;
}
