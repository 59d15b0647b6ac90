//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use dw_agent::AgentStore;
use dw_behavior::Transition;
use dw_core::{SimConfig, Tick};
use dw_sim::{AgentView, SimObserver};

use crate::row::{AgentSnapshotRow, TransitionRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes snapshots and state transitions to any
/// [`OutputWriter`].
///
/// `SimObserver` hooks return nothing, so write errors are stored.  After
/// `sim.run()` returns, check with [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:           W,
    tick_duration_ms: u64,
    last_error:       Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// `config` maps ticks to the `time_ms` column.
    pub fn new(writer: W, config: &SimConfig) -> Self {
        Self {
            writer,
            tick_duration_ms: u64::from(config.tick_duration_ms),
            last_error:       None,
        }
    }

    /// The first write error, if any.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_state_change(&mut self, transition: &Transition) {
        let result = self.writer.write_transition(&TransitionRow::from(transition));
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, views: &[AgentView], agents: &AgentStore) {
        let time_ms = tick.0 * self.tick_duration_ms;
        let rows: Vec<AgentSnapshotRow> = views
            .iter()
            .map(|v| AgentSnapshotRow::from_view(tick, time_ms, v, agents))
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
