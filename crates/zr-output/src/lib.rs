//! `zr-output` — simulation output writers for the zone_router framework.
//!
//! | Backend | Files created                                     |
//! |---------|---------------------------------------------------|
//! | CSV     | `mover_snapshots.csv`, `frame_summaries.csv`      |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `zr_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use zr_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{FrameSummaryRow, MoverSnapshotRow};
pub use writer::OutputWriter;
