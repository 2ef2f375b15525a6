use thiserror::Error;

use zr_core::CoreError;
use zr_motion::MotionError;
use zr_routing::RoutingError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Routing(#[from] RoutingError),

    #[error(transparent)]
    Motion(#[from] MotionError),

    #[error("scene error at row {row}: {reason}")]
    Scene { row: usize, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type SimResult<T> = Result<T, SimError>;
