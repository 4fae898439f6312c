//! Error types for statement binding and result decoding.

/// A boxed error raised by the underlying database driver.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced while binding parameters or reading results.
///
/// Rendering itself never fails: a malformed operator sequence is a
/// programming error and panics instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The driver rejected an operation. The original error is kept as the source.
    #[error("driver error: {0}")]
    Driver(#[source] BoxError),

    /// Parameter positions are 1-based.
    #[error("parameter position {0} is invalid, positions start at 1")]
    InvalidPosition(usize),

    /// A placeholder was left without a value before execution.
    #[error("no value bound for parameter {position}")]
    UnboundParameter {
        /// The 1-based position of the missing value.
        position: usize,
    },

    /// A column was read before the cursor was advanced onto a row.
    #[error("cursor is not positioned on a row")]
    NoCurrentRow,
}

impl Error {
    /// Wraps a driver error.
    pub fn driver(error: impl Into<BoxError>) -> Self {
        Self::Driver(error.into())
    }
}

/// Result type alias for binding and decoding.
pub type Result<T> = std::result::Result<T, Error>;
