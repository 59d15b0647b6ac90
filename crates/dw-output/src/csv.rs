//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `agent_snapshots.csv`
//! - `state_transitions.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{AgentSnapshotRow, OutputError, OutputResult, TransitionRow};

pub const SNAPSHOT_HEADER: [&str; 10] =
    ["tick", "time_ms", "agent_id", "x", "y", "state", "animation", "relaxation", "hunger", "social"];

pub const TRANSITION_HEADER: [&str; 4] = ["tick", "agent_id", "from", "to"];

pub struct CsvWriter {
    snapshots:   Writer<File>,
    transitions: Writer<File>,
    finished:    bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open both files and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut snapshots = Writer::from_path(dir.join("agent_snapshots.csv"))?;
        snapshots.write_record(SNAPSHOT_HEADER)?;

        let mut transitions = Writer::from_path(dir.join("state_transitions.csv"))?;
        transitions.write_record(TRANSITION_HEADER)?;

        Ok(Self { snapshots, transitions, finished: false })
    }

    fn check_open(&self) -> OutputResult<()> {
        if self.finished { Err(OutputError::Finished) } else { Ok(()) }
    }
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        self.check_open()?;
        for row in rows {
            self.snapshots.write_record(&[
                row.tick.to_string(),
                row.time_ms.to_string(),
                row.agent_id.to_string(),
                row.x.to_string(),
                row.y.to_string(),
                row.state.to_owned(),
                row.animation.to_owned(),
                format!("{:.4}", row.relaxation),
                format!("{:.4}", row.hunger),
                format!("{:.4}", row.social),
            ])?;
        }
        Ok(())
    }

    fn write_transition(&mut self, row: &TransitionRow) -> OutputResult<()> {
        self.check_open()?;
        self.transitions.write_record(&[
            row.tick.to_string(),
            row.agent_id.to_string(),
            row.from.to_owned(),
            row.to.to_owned(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.transitions.flush()?;
        Ok(())
    }
}
