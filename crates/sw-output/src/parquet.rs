//! Parquet output backend (feature `parquet`).
//!
//! Creates two files in the configured output directory:
//! - `agent_snapshots.parquet`
//! - `tick_summaries.parquet`

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Float64Builder, StringBuilder, UInt32Builder, UInt64Builder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use crate::writer::OutputWriter;
use crate::{AgentSnapshotRow, OutputResult, TickSummaryRow};

fn snapshot_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("tick",                 DataType::UInt64,  false),
        Field::new("agent_id",             DataType::UInt32,  false),
        Field::new("state",                DataType::Utf8,    false),
        Field::new("x",                    DataType::Float64, false),
        Field::new("y",                    DataType::Float64, false),
        Field::new("z",                    DataType::Float64, false),
        Field::new("energy",               DataType::Float64, false),
        Field::new("distance_traveled",    DataType::Float64, false),
        Field::new("communications_count", DataType::UInt64,  false),
    ]))
}

fn summary_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("tick",                 DataType::UInt64,  false),
        Field::new("simulation_time",      DataType::Float64, false),
        Field::new("active_agents",        DataType::UInt64,  false),
        Field::new("average_energy",       DataType::Float64, false),
        Field::new("active_links",         DataType::UInt64,  false),
        Field::new("total_messages",       DataType::UInt64,  false),
        Field::new("packet_delivery_rate", DataType::Float64, false),
        Field::new("transitions",          DataType::UInt64,  false),
        Field::new("active_missions",      DataType::UInt64,  false),
    ]))
}

fn snappy_props() -> WriterProperties {
    WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build()
}

/// Writes simulation output to two Parquet files.
///
/// `finish()` **must** be called to write the Parquet file footer; files
/// written without calling `finish()` cannot be opened by Parquet readers.
///
/// Tick summaries arrive one row at a time, so they are buffered and written
/// as a single batch on `finish()`.
pub struct ParquetWriter {
    snapshots:   Option<ArrowWriter<File>>,
    summaries:   Option<ArrowWriter<File>>,
    pending:     Vec<TickSummaryRow>,
    snap_schema: Arc<Schema>,
    summ_schema: Arc<Schema>,
}

impl ParquetWriter {
    /// Create both Parquet files in `dir`.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let snap_schema = snapshot_schema();
        let summ_schema = summary_schema();

        let snap_file = File::create(dir.join("agent_snapshots.parquet"))?;
        let snapshots = ArrowWriter::try_new(
            snap_file,
            Arc::clone(&snap_schema),
            Some(snappy_props()),
        )?;

        let summ_file = File::create(dir.join("tick_summaries.parquet"))?;
        let summaries = ArrowWriter::try_new(
            summ_file,
            Arc::clone(&summ_schema),
            Some(snappy_props()),
        )?;

        Ok(Self {
            snapshots: Some(snapshots),
            summaries: Some(summaries),
            pending:   Vec::new(),
            snap_schema,
            summ_schema,
        })
    }

    fn summary_batch(&self) -> OutputResult<RecordBatch> {
        let mut ticks       = UInt64Builder::new();
        let mut times       = Float64Builder::new();
        let mut active      = UInt64Builder::new();
        let mut energy      = Float64Builder::new();
        let mut links       = UInt64Builder::new();
        let mut messages    = UInt64Builder::new();
        let mut delivery    = Float64Builder::new();
        let mut transitions = UInt64Builder::new();
        let mut missions    = UInt64Builder::new();

        for row in &self.pending {
            ticks.append_value(row.tick);
            times.append_value(row.simulation_time);
            active.append_value(row.active_agents);
            energy.append_value(row.average_energy);
            links.append_value(row.active_links);
            messages.append_value(row.total_messages);
            delivery.append_value(row.packet_delivery_rate);
            transitions.append_value(row.transitions);
            missions.append_value(row.active_missions);
        }

        Ok(RecordBatch::try_new(
            Arc::clone(&self.summ_schema),
            vec![
                Arc::new(ticks.finish()),
                Arc::new(times.finish()),
                Arc::new(active.finish()),
                Arc::new(energy.finish()),
                Arc::new(links.finish()),
                Arc::new(messages.finish()),
                Arc::new(delivery.finish()),
                Arc::new(transitions.finish()),
                Arc::new(missions.finish()),
            ],
        )?)
    }
}

impl OutputWriter for ParquetWriter {
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let Some(writer) = self.snapshots.as_mut() else {
            return Ok(());
        };

        let mut ticks    = UInt64Builder::new();
        let mut ids      = UInt32Builder::new();
        let mut states   = StringBuilder::new();
        let mut xs       = Float64Builder::new();
        let mut ys       = Float64Builder::new();
        let mut zs       = Float64Builder::new();
        let mut energy   = Float64Builder::new();
        let mut distance = Float64Builder::new();
        let mut comms    = UInt64Builder::new();

        for row in rows {
            ticks.append_value(row.tick);
            ids.append_value(row.agent_id);
            states.append_value(row.state);
            xs.append_value(row.x);
            ys.append_value(row.y);
            zs.append_value(row.z);
            energy.append_value(row.energy);
            distance.append_value(row.distance_traveled);
            comms.append_value(row.communications_count);
        }

        let batch = RecordBatch::try_new(
            Arc::clone(&self.snap_schema),
            vec![
                Arc::new(ticks.finish()),
                Arc::new(ids.finish()),
                Arc::new(states.finish()),
                Arc::new(xs.finish()),
                Arc::new(ys.finish()),
                Arc::new(zs.finish()),
                Arc::new(energy.finish()),
                Arc::new(distance.finish()),
                Arc::new(comms.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        if self.summaries.is_some() {
            self.pending.push(*row);
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if let Some(w) = self.snapshots.take() {
            w.close()?;
        }
        if let Some(mut w) = self.summaries.take() {
            if !self.pending.is_empty() {
                let batch = self.summary_batch()?;
                w.write(&batch)?;
                self.pending.clear();
            }
            w.close()?;
        }
        Ok(())
    }
}
