//! The `OutputWriter` trait implemented by backend writers.

use crate::{FrameSummaryRow, MoverSnapshotRow, OutputResult};

/// Sink for simulation output rows.
///
/// Errors are stored by [`SimOutputObserver`][crate::SimOutputObserver] and
/// retrieved with `take_error` after the run.
pub trait OutputWriter {
    /// Write a batch of mover snapshots.
    fn write_snapshots(&mut self, rows: &[MoverSnapshotRow]) -> OutputResult<()>;

    /// Write one frame summary row.
    fn write_frame_summary(&mut self, row: &FrameSummaryRow) -> OutputResult<()>;

    /// Flush all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
