//! Top-level error type for startup and runtime plumbing
//!
//! Request-path errors use the structured types in [`crate::store::StoreError`]
//! and [`crate::web::ApiError`]; this type covers everything outside the
//! request path (configuration, socket binding, database startup).

use thiserror::Error;

/// Service-level errors
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration loading or extraction failed
    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    /// I/O error (socket binding, signal handling)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Database connection or startup failure
    #[error("Database error: {0}")]
    Database(String),
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

/// Result type alias using the service-level [`Error`]
pub type Result<T> = std::result::Result<T, Error>;
