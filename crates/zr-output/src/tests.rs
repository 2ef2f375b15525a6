//! Integration tests for zr-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use zr_motion::Phase;

    use crate::csv::CsvWriter;
    use crate::row::{FrameSummaryRow, MoverSnapshotRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn snap_row(mover_id: u32, frame: u64) -> MoverSnapshotRow {
        MoverSnapshotRow {
            mover_id,
            frame,
            current_zone: 1,
            target_zone:  2,
            state:        Phase::Moving,
            x:            1.5,
            y:            0.0,
            z:            -2.0,
        }
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("mover_snapshots.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(
            headers,
            ["mover_id", "frame", "current_zone", "target_zone", "state", "x", "y", "z"]
        );

        let mut rdr2 = csv::Reader::from_path(dir.path().join("frame_summaries.csv")).unwrap();
        let headers2: Vec<_> = rdr2.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers2, ["frame", "total_ms", "movers", "moving", "arrived"]);
    }

    #[test]
    fn snapshot_rows_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[snap_row(3, 60), snap_row(4, 60)]).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("mover_snapshots.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "3");
        assert_eq!(&rows[0][1], "60");
        assert_eq!(&rows[0][4], "moving");
        assert_eq!(&rows[0][5], "1.5");
        assert_eq!(&rows[0][7], "-2");
        assert_eq!(&rows[1][0], "4");
    }

    #[test]
    fn summary_rows_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_frame_summary(&FrameSummaryRow { frame: 3, total_ms: 48, movers: 10, moving: 4, arrived: 1 })
            .unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("frame_summaries.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "3");
        assert_eq!(&rows[0][1], "48");
        assert_eq!(&rows[0][4], "1");
    }

    #[test]
    fn finish_is_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn missing_directory_is_error() {
        let dir = tmp();
        assert!(CsvWriter::new(&dir.path().join("nope")).is_err());
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use std::sync::Arc;
    use std::time::Duration;

    use zr_core::{MoverId, SimConfig, Transform, Vec3, WaypointId, ZoneId};
    use zr_routing::WaypointRegistryBuilder;
    use zr_sim::{InMemoryScene, SimBuilder};

    use crate::{CsvWriter, FrameSummaryRow, MoverSnapshotRow, OutputError, OutputResult, OutputWriter, SimOutputObserver};

    #[derive(Default)]
    struct MemWriter {
        snapshots: Vec<MoverSnapshotRow>,
        summaries: Vec<FrameSummaryRow>,
        finished:  usize,
        fail:      bool,
    }

    impl OutputWriter for MemWriter {
        fn write_snapshots(&mut self, rows: &[MoverSnapshotRow]) -> OutputResult<()> {
            self.snapshots.extend_from_slice(rows);
            Ok(())
        }
        fn write_frame_summary(&mut self, row: &FrameSummaryRow) -> OutputResult<()> {
            if self.fail {
                return Err(std::io::Error::other("disk full").into());
            }
            self.summaries.push(*row);
            Ok(())
        }
        fn finish(&mut self) -> OutputResult<()> {
            self.finished += 1;
            Ok(())
        }
    }

    fn run_with<W: OutputWriter>(writer: W, frames: u64) -> SimOutputObserver<W> {
        let mut b = WaypointRegistryBuilder::new();
        let mut scene = InMemoryScene::new();
        for i in 1..=2 {
            let z = b.add_zone().unwrap();
            b.register(z, WaypointId(i)).unwrap();
            scene.insert_waypoint(WaypointId(i), Transform::at(Vec3::new(i as f32, 0.0, 0.0)));
        }
        let scene = Arc::new(scene);
        let config = SimConfig {
            frame_duration:           Duration::from_millis(100),
            total_frames:             frames,
            snapshot_interval_frames: 5,
            ..SimConfig::default()
        };
        let mut sim = SimBuilder::new(config, b.build(), Arc::clone(&scene), scene)
            .build()
            .unwrap();
        sim.scheduler().request_move(MoverId(1), ZoneId(1)).unwrap();
        sim.scheduler().request_move(MoverId(1), ZoneId(2)).unwrap();

        let mut obs = SimOutputObserver::new(writer);
        sim.run(&mut obs).unwrap();
        obs
    }

    #[test]
    fn observer_records_frames_and_snapshots() {
        let mut obs = run_with(MemWriter::default(), 10);
        assert!(obs.take_error().is_none());
        let w = obs.into_writer();

        assert_eq!(w.summaries.len(), 10);
        assert_eq!(w.summaries[0].moving, 1);
        assert_eq!(w.summaries[5].arrived, 1);
        assert_eq!(w.summaries[9].moving, 0);
        assert_eq!(w.finished, 1);

        // Snapshots at frames 0 and 5, one mover each.
        assert_eq!(w.snapshots.len(), 2);
        assert_eq!(w.snapshots[0].target_zone, 2);
        assert_eq!(w.snapshots[1].current_zone, 2);
        assert_eq!(w.snapshots[1].x, 2.0);
    }

    #[test]
    fn first_error_is_kept() {
        let mut obs = run_with(MemWriter { fail: true, ..MemWriter::default() }, 3);
        assert!(matches!(obs.take_error(), Some(OutputError::Io(_))));
        assert!(obs.take_error().is_none());
    }

    #[test]
    fn csv_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let mut obs = run_with(CsvWriter::new(dir.path()).unwrap(), 10);
        assert!(obs.take_error().is_none());

        let mut rdr = csv::Reader::from_path(dir.path().join("frame_summaries.csv")).unwrap();
        assert_eq!(rdr.records().count(), 10);
        let mut rdr = csv::Reader::from_path(dir.path().join("mover_snapshots.csv")).unwrap();
        assert_eq!(rdr.records().count(), 2);
    }
}
