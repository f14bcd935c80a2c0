//! Integration tests for sw-output.

#[cfg(test)]
mod fixtures {
    use crate::row::{AgentSnapshotRow, TickSummaryRow};

    pub fn snap_row(agent_id: u32, tick: u64) -> AgentSnapshotRow {
        AgentSnapshotRow {
            tick,
            agent_id,
            state:                "moving",
            x:                    agent_id as f64,
            y:                    -1.5,
            z:                    5.0,
            energy:               0.5,
            distance_traveled:    12.25,
            communications_count: 3,
        }
    }

    pub fn summary_row(tick: u64) -> TickSummaryRow {
        TickSummaryRow {
            tick,
            simulation_time:      tick as f64 * 0.5,
            active_agents:        10,
            average_energy:       0.75,
            active_links:         4,
            total_messages:       tick * 7,
            packet_delivery_rate: 0.9,
            transitions:          1,
            active_missions:      2,
        }
    }
}

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use super::fixtures::{snap_row, summary_row};
    use crate::csv::{CsvWriter, SNAPSHOT_COLUMNS, SUMMARY_COLUMNS};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("agent_snapshots.csv").exists());
        assert!(dir.path().join("tick_summaries.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("agent_snapshots.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, SNAPSHOT_COLUMNS);
        assert_eq!(headers[0], "tick");

        let mut rdr2 = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let headers2: Vec<_> = rdr2.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers2, SUMMARY_COLUMNS);
    }

    #[test]
    fn csv_snapshot_rows_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        let rows = vec![snap_row(0, 5), snap_row(1, 5), snap_row(2, 5)];
        w.write_snapshots(&rows).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("agent_snapshots.csv")).unwrap();
        let read_rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(read_rows.len(), 3);
        assert_eq!(&read_rows[0][0], "5");      // tick
        assert_eq!(&read_rows[0][1], "0");      // agent_id
        assert_eq!(&read_rows[0][2], "moving"); // state
        assert_eq!(&read_rows[2][1], "2");
        assert_eq!(read_rows[0][7].parse::<f64>().unwrap(), 12.25);
    }

    #[test]
    fn csv_tick_summary_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&summary_row(3)).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let read_rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(read_rows.len(), 1);
        assert_eq!(&read_rows[0][0], "3");   // tick
        assert_eq!(&read_rows[0][1], "1.5"); // simulation_time
        assert_eq!(&read_rows[0][5], "21");  // total_messages
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn csv_empty_snapshot_ok() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[]).unwrap();
    }

    #[test]
    fn missing_directory_errors() {
        let dir = tmp();
        assert!(CsvWriter::new(&dir.path().join("does/not/exist")).is_err());
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use tempfile::TempDir;

    use sw_core::SimConfig;
    use sw_link::BruteForceIndex;
    use sw_motion::RandomWalk;
    use sw_sim::{Sim, SimBuilder};
    use sw_world::WorldBuilder;

    use crate::csv::CsvWriter;
    use crate::observer::SimOutputObserver;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn small_sim(agents: usize, interval: u64) -> Sim {
        let config = SimConfig {
            initial_agents:        agents,
            output_interval_ticks: interval,
            seed:                  1,
            ..SimConfig::default()
        };
        let mut world = WorldBuilder::new();
        world.add_station(0.0, 0.0, 40.0, 8);
        let mut sim = SimBuilder::new(config, RandomWalk::default(), BruteForceIndex)
            .world(world.build().unwrap())
            .build()
            .unwrap();
        sim.set_running(true);
        sim
    }

    #[test]
    fn integration_csv() {
        let mut sim = small_sim(3, 2);
        let dir = tmp();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = SimOutputObserver::new(writer);
        for _ in 0..6 {
            sim.step_observed(16.0, &mut obs);
        }
        obs.finish();
        assert!(obs.take_error().is_none(), "no write errors expected");

        // output_interval = 2 → snapshots after ticks 2, 4, 6 (3 × 3 agents = 9 rows)
        let mut rdr = csv::Reader::from_path(dir.path().join("agent_snapshots.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 9, "expected 3 snapshots × 3 agents = 9 rows, got {}", rows.len());
        let ticks: Vec<&str> = rows.iter().map(|r| r.get(0).unwrap()).collect();
        assert_eq!(ticks, ["2", "2", "2", "4", "4", "4", "6", "6", "6"]);

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        assert_eq!(rdr.records().count(), 6);
    }

    #[test]
    fn paused_sim_writes_nothing() {
        let mut sim = small_sim(3, 1);
        sim.set_running(false);
        let dir = tmp();
        let mut obs = SimOutputObserver::new(CsvWriter::new(dir.path()).unwrap());
        for _ in 0..4 {
            sim.step_observed(16.0, &mut obs);
        }
        obs.finish();

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        assert_eq!(rdr.records().count(), 0);
    }
}

// ── SQLite tests ──────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use tempfile::TempDir;

    use super::fixtures::{snap_row, summary_row};
    use crate::sqlite::SqliteWriter;
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn sqlite_db_created() {
        let dir = tmp();
        let _w = SqliteWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("output.db").exists());
    }

    #[test]
    fn sqlite_snapshot_count() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[snap_row(0, 1), snap_row(1, 1), snap_row(2, 1)]).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM agent_snapshots", [], |r| r.get(0)
        ).unwrap();
        assert_eq!(count, 3);
    }

    #[test]
    fn sqlite_state_stored_as_text() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        let mut row = snap_row(4, 0);
        row.state = "charging";
        w.write_snapshots(&[row]).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let state: String = conn.query_row(
            "SELECT state FROM agent_snapshots WHERE agent_id = 4", [], |r| r.get(0)
        ).unwrap();
        assert_eq!(state, "charging");
    }

    #[test]
    fn sqlite_tick_summary() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&summary_row(7)).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let (tick, time, messages): (i64, f64, i64) = conn.query_row(
            "SELECT tick, simulation_time, total_messages FROM tick_summaries WHERE tick = 7",
            [],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
        ).unwrap();
        assert_eq!(tick, 7);
        assert_eq!(time, 3.5);
        assert_eq!(messages, 49);
    }

    #[test]
    fn sqlite_rewound_tick_overwrites() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&summary_row(1)).unwrap();
        let mut again = summary_row(1);
        again.active_links = 9;
        w.write_tick_summary(&again).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let (count, links): (i64, i64) = conn.query_row(
            "SELECT COUNT(*), MAX(active_links) FROM tick_summaries", [], |r| Ok((r.get(0)?, r.get(1)?))
        ).unwrap();
        assert_eq!((count, links), (1, 9));
    }
}

// ── Parquet tests ─────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "parquet"))]
mod parquet_tests {
    use tempfile::TempDir;

    use arrow::datatypes::DataType;
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

    use super::fixtures::{snap_row, summary_row};
    use crate::parquet::ParquetWriter;
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn parquet_files_created() {
        let dir = tmp();
        let mut w = ParquetWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        assert!(dir.path().join("agent_snapshots.parquet").exists());
        assert!(dir.path().join("tick_summaries.parquet").exists());
    }

    #[test]
    fn parquet_snapshot_rows_and_schema() {
        let dir = tmp();
        let mut w = ParquetWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[snap_row(0, 2), snap_row(1, 2)]).unwrap();
        w.finish().unwrap();

        let file = std::fs::File::open(dir.path().join("agent_snapshots.parquet")).unwrap();
        let builder = ParquetRecordBatchReaderBuilder::try_new(file).unwrap();
        let schema = builder.schema().clone();
        let reader = builder.build().unwrap();

        let total_rows: usize = reader.map(|b| b.unwrap().num_rows()).sum();
        assert_eq!(total_rows, 2);

        let state = schema.field_with_name("state").unwrap();
        assert_eq!(*state.data_type(), DataType::Utf8);
        let energy = schema.field_with_name("energy").unwrap();
        assert_eq!(*energy.data_type(), DataType::Float64);
    }

    #[test]
    fn parquet_summaries_flushed_on_finish() {
        let dir = tmp();
        let mut w = ParquetWriter::new(dir.path()).unwrap();
        for tick in 1..=4 {
            w.write_tick_summary(&summary_row(tick)).unwrap();
        }
        w.finish().unwrap();

        let file = std::fs::File::open(dir.path().join("tick_summaries.parquet")).unwrap();
        let reader = ParquetRecordBatchReaderBuilder::try_new(file).unwrap().build().unwrap();
        let total_rows: usize = reader.map(|b| b.unwrap().num_rows()).sum();
        assert_eq!(total_rows, 4);
    }

    #[test]
    fn parquet_finish_required() {
        let dir = tmp();
        {
            let mut w = ParquetWriter::new(dir.path()).unwrap();
            w.write_snapshots(&[snap_row(0, 0)]).unwrap();
            // Dropped without finish(): no footer.
        }

        let file = std::fs::File::open(dir.path().join("agent_snapshots.parquet")).unwrap();
        let result = ParquetRecordBatchReaderBuilder::try_new(file);
        assert!(result.is_err(), "file without Parquet footer should fail to open");
    }
}
