use thiserror::Error;

use zr_core::{CoreError, EntityId, MoverId, ZoneId};

#[derive(Debug, Error)]
pub enum MotionError {
    #[error("entity {entity} created for {mover} carries no mover marker")]
    MissingMarker { mover: MoverId, entity: EntityId },

    #[error("invalid target zone {0}")]
    InvalidZone(ZoneId),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type MotionResult<T> = Result<T, MotionError>;
