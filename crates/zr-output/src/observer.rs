//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use zr_core::FrameTime;
use zr_motion::MoverSnapshot;
use zr_sim::{FrameSummary, SimObserver};

use crate::row::{FrameSummaryRow, MoverSnapshotRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes mover snapshots and frame summaries to any
/// [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
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
    fn on_frame_end(&mut self, summary: &FrameSummary) {
        let result = self.writer.write_frame_summary(&FrameSummaryRow::from(summary));
        self.store_err(result);
    }

    fn on_snapshot(&mut self, frame: FrameTime, movers: &[MoverSnapshot]) {
        if movers.is_empty() {
            return;
        }
        let rows: Vec<MoverSnapshotRow> = movers
            .iter()
            .map(|s| MoverSnapshotRow::from_snapshot(frame.frame, s))
            .collect();
        let result = self.writer.write_snapshots(&rows);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_frame: FrameTime) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
