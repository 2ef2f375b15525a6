//! Routing-subsystem error type.

use thiserror::Error;

use zr_core::{CoreError, ZoneId};

/// Errors produced by `zr-routing`.
///
/// Only registration can fail.  An empty route is a valid answer ("already
/// there / nowhere to go"), never an error.
#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("absent waypoint passed for {zone}")]
    InvalidWaypoint { zone: ZoneId },

    #[error("invalid zone id {0}")]
    InvalidZone(ZoneId),

    #[error("no zone ids left to assign")]
    ZonesExhausted,

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type RoutingResult<T> = Result<T, RoutingError>;
