//! Error types for the execution environment.

use thiserror::Error;

/// Errors raised while connecting, executing or decoding.
#[derive(Debug, Error)]
pub enum OrmError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Binding or decoding error reported through the driver traits.
    ///
    /// Driver errors that wrap a [`sqlx::Error`] are unwrapped into
    /// [`OrmError::Database`] instead, so sqlx failures have one shape
    /// whether they happen while connecting or while executing.
    #[error(transparent)]
    Core(stacksql_core::Error),

    /// The blocking runtime could not be created.
    #[error("runtime error: {0}")]
    Io(#[from] std::io::Error),

    /// The driver name is not supported.
    #[error("unknown driver: {0}")]
    UnknownDriver(String),

    /// Connection settings are incomplete or inconsistent.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<stacksql_core::Error> for OrmError {
    fn from(error: stacksql_core::Error) -> Self {
        match error {
            stacksql_core::Error::Driver(source) => match source.downcast::<sqlx::Error>() {
                Ok(error) => Self::Database(*error),
                Err(source) => Self::Core(stacksql_core::Error::Driver(source)),
            },
            error => Self::Core(error),
        }
    }
}

/// Result type alias for environment operations.
pub type Result<T> = std::result::Result<T, OrmError>;
