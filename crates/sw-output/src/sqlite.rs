//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! two tables: `agent_snapshots` and `tick_summaries`.

use std::path::Path;

use rusqlite::Connection;

use crate::{AgentSnapshotRow, OutputResult, TickSummaryRow};
use crate::writer::OutputWriter;

/// Writes simulation output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS agent_snapshots (
                 tick                 INTEGER NOT NULL,
                 agent_id             INTEGER NOT NULL,
                 state                TEXT    NOT NULL,
                 x                    REAL    NOT NULL,
                 y                    REAL    NOT NULL,
                 z                    REAL    NOT NULL,
                 energy               REAL    NOT NULL,
                 distance_traveled    REAL    NOT NULL,
                 communications_count INTEGER NOT NULL,
                 PRIMARY KEY (tick, agent_id)
             );
             CREATE TABLE IF NOT EXISTS tick_summaries (
                 tick                 INTEGER PRIMARY KEY,
                 simulation_time      REAL    NOT NULL,
                 active_agents        INTEGER NOT NULL,
                 average_energy       REAL    NOT NULL,
                 active_links         INTEGER NOT NULL,
                 total_messages       INTEGER NOT NULL,
                 packet_delivery_rate REAL    NOT NULL,
                 transitions          INTEGER NOT NULL,
                 active_missions      INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT OR REPLACE INTO agent_snapshots \
                 (tick, agent_id, state, x, y, z, energy, distance_traveled, communications_count) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.tick as i64,
                    row.agent_id,
                    row.state,
                    row.x,
                    row.y,
                    row.z,
                    row.energy,
                    row.distance_traveled,
                    row.communications_count as i64,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        // A reset rewinds the tick counter, so later ticks overwrite earlier rows.
        self.conn.execute(
            "INSERT OR REPLACE INTO tick_summaries \
             (tick, simulation_time, active_agents, average_energy, active_links, \
              total_messages, packet_delivery_rate, transitions, active_missions) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            rusqlite::params![
                row.tick as i64,
                row.simulation_time,
                row.active_agents as i64,
                row.average_energy,
                row.active_links as i64,
                row.total_messages as i64,
                row.packet_delivery_rate,
                row.transitions as i64,
                row.active_missions as i64,
            ],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn
            .execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
