//! Plain data row types written by output backends.

use zr_motion::{MoverSnapshot, Phase};
use zr_sim::FrameSummary;

/// One mover's state at a snapshot frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoverSnapshotRow {
    pub mover_id:     u32,
    pub frame:        u64,
    /// Zone the mover is at, or departed from while in transit.
    pub current_zone: u32,
    pub target_zone:  u32,
    pub state:        Phase,
    pub x:            f32,
    pub y:            f32,
    pub z:            f32,
}

impl MoverSnapshotRow {
    pub fn from_snapshot(frame: u64, s: &MoverSnapshot) -> Self {
        let p = s.transform.position;
        Self {
            mover_id:     s.id.0,
            frame,
            current_zone: s.current_zone.0,
            target_zone:  s.target_zone.0,
            state:        s.phase,
            x:            p.x,
            y:            p.y,
            z:            p.z,
        }
    }
}

/// Summary statistics for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSummaryRow {
    pub frame:    u64,
    pub total_ms: u64,
    pub movers:   u64,
    pub moving:   u64,
    pub arrived:  u64,
}

impl From<&FrameSummary> for FrameSummaryRow {
    fn from(s: &FrameSummary) -> Self {
        Self {
            frame:    s.frame.frame,
            total_ms: s.frame.total.as_millis() as u64,
            movers:   s.movers as u64,
            moving:   s.moving as u64,
            arrived:  s.report.arrived as u64,
        }
    }
}
