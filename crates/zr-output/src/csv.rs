//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `mover_snapshots.csv`
//! - `frame_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{FrameSummaryRow, MoverSnapshotRow, OutputResult};

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    snapshots: Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut snapshots = Writer::from_path(dir.join("mover_snapshots.csv"))?;
        snapshots.write_record([
            "mover_id", "frame", "current_zone", "target_zone", "state", "x", "y", "z",
        ])?;

        let mut summaries = Writer::from_path(dir.join("frame_summaries.csv"))?;
        summaries.write_record(["frame", "total_ms", "movers", "moving", "arrived"])?;

        Ok(Self {
            snapshots,
            summaries,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[MoverSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.mover_id.to_string(),
                row.frame.to_string(),
                row.current_zone.to_string(),
                row.target_zone.to_string(),
                row.state.as_str().to_owned(),
                row.x.to_string(),
                row.y.to_string(),
                row.z.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_frame_summary(&mut self, row: &FrameSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.frame.to_string(),
            row.total_ms.to_string(),
            row.movers.to_string(),
            row.moving.to_string(),
            row.arrived.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
