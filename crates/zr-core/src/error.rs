//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`, so `?` works across crate boundaries.

use thiserror::Error;

/// The top-level error type for `zr-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A caller passed a null-equivalent handle or an out-of-domain value.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A collaborator required to complete the operation is unavailable.
    #[error("missing dependency: {0}")]
    MissingDependency(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `zr-core`.
pub type CoreResult<T> = Result<T, CoreError>;
