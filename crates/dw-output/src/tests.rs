//! Tests for dw-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::{CsvWriter, SNAPSHOT_HEADER, TRANSITION_HEADER};
    use crate::row::{AgentSnapshotRow, TransitionRow};
    use crate::writer::OutputWriter;
    use crate::OutputError;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn snap_row(agent_id: u32, tick: u64) -> AgentSnapshotRow {
        AgentSnapshotRow {
            tick,
            time_ms:    tick * 100,
            agent_id,
            x:          agent_id as i32,
            y:          2,
            state:      "sit",
            animation:  "sit_down",
            relaxation: 0.5,
            hunger:     0.25,
            social:     1.0,
        }
    }

    fn headers(path: &std::path::Path) -> Vec<String> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.headers().unwrap().iter().map(str::to_owned).collect()
    }

    #[test]
    fn files_created_with_headers() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        assert_eq!(headers(&dir.path().join("agent_snapshots.csv")), SNAPSHOT_HEADER);
        assert_eq!(headers(&dir.path().join("state_transitions.csv")), TRANSITION_HEADER);
    }

    #[test]
    fn missing_dir_is_created() {
        let dir = tmp();
        let nested = dir.path().join("run").join("01");
        let _w = CsvWriter::new(&nested).unwrap();
        assert!(nested.join("agent_snapshots.csv").exists());
    }

    #[test]
    fn snapshot_rows_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[snap_row(0, 5), snap_row(1, 5)]).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("agent_snapshots.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[1][0], "5");      // tick
        assert_eq!(&rows[1][1], "500");    // time_ms
        assert_eq!(&rows[1][2], "1");      // agent_id
        assert_eq!(&rows[1][5], "sit");
        assert_eq!(&rows[1][7], "0.5000"); // relaxation
    }

    #[test]
    fn first_transition_has_empty_from() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_transition(&TransitionRow { tick: 0, agent_id: 3, from: "", to: "freeze" }).unwrap();
        w.write_transition(&TransitionRow { tick: 9, agent_id: 3, from: "freeze", to: "smoke" }).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("state_transitions.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][2], "");
        assert_eq!(&rows[1][2], "freeze");
        assert_eq!(&rows[1][3], "smoke");
    }

    #[test]
    fn finish_idempotent_and_final() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
        assert!(matches!(w.write_snapshots(&[snap_row(0, 0)]), Err(OutputError::Finished)));
    }

    #[test]
    fn empty_snapshot_ok() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[]).unwrap();
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use dw_core::{Cell, SimConfig};
    use dw_grid::{GridWorldBuilder, ObjectKind};
    use dw_sim::SimBuilder;
    use tempfile::TempDir;

    use crate::csv::CsvWriter;
    use crate::observer::SimOutputObserver;

    fn config() -> SimConfig {
        SimConfig {
            tick_duration_ms:      100,
            total_ticks:           6,
            seed:                  1,
            output_interval_ticks: 2,
            walk_cell_ms:          1_200,
        }
    }

    fn run(dir: &TempDir) -> SimOutputObserver<CsvWriter> {
        let mut b = GridWorldBuilder::new(6, 6);
        b.add_object(ObjectKind::Sofa, Cell::new(3, 3));
        let world = b.build().unwrap();

        let config = config();
        let mut sim = SimBuilder::new(config.clone(), world, 3)
            .initial_positions(vec![Cell::new(0, 0), Cell::new(5, 0), Cell::new(0, 5)])
            .build()
            .unwrap();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = SimOutputObserver::new(writer, &config);
        sim.run(&mut obs).unwrap();
        obs
    }

    #[test]
    fn snapshots_follow_output_interval() {
        let dir = tempfile::tempdir().unwrap();
        let mut obs = run(&dir);
        assert!(obs.take_error().is_none(), "no write errors expected");

        // Snapshots at ticks 0, 2, 4 for 3 humans.
        let mut rdr = csv::Reader::from_path(dir.path().join("agent_snapshots.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 9);
        assert_eq!(&rows[3][0], "2");
        assert_eq!(&rows[3][1], "200");
        assert!(rows.iter().all(|r| !r[5].is_empty()), "every human has a state");
    }

    #[test]
    fn first_states_are_logged() {
        let dir = tempfile::tempdir().unwrap();
        let mut obs = run(&dir);
        assert!(obs.take_error().is_none());

        let mut rdr = csv::Reader::from_path(dir.path().join("state_transitions.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        let first: Vec<_> = rows.iter().filter(|r| &r[2] == "").collect();
        assert_eq!(first.len(), 3);
        assert!(first.iter().all(|r| &r[0] == "0"));
    }
}
