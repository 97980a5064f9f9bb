use thiserror::Error;

/// Errors returned by the plane operations in this crate.
///
/// Every error is recoverable: the rejected operation leaves the dataset exactly
/// as it was before the call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A live point already carries this name.
    #[error("a point named {0:?} already exists")]
    DuplicateName(String),

    /// No live point carries this name.
    #[error("no point named {0:?}")]
    NotFound(String),

    /// Requested cluster count is outside `1..=max`.
    #[error("invalid cluster count: requested {requested}, must be between 1 and {max}")]
    InvalidClusterCount {
        /// Requested number of clusters.
        requested: usize,
        /// Largest admissible cluster count for the current dataset.
        max: usize,
    },

    /// The operation needs a prior clustering run.
    #[error("no clustering available; run clustering first")]
    NoClustering,

    /// Malformed user input (names, numbers, commands).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
