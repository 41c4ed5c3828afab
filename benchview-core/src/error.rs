//! Error types for benchview operations

use thiserror::Error;

/// Upstream API failures.
///
/// The caches never inspect which variant occurred, only success/failure;
/// the variants exist so diagnostics carry enough context to be actionable.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UpstreamError {
    #[error("Transport failure: {message}")]
    Transport { message: String },

    #[error("Upstream returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Failed to decode upstream response: {message}")]
    Decode { message: String },
}

/// Master error type for all benchview errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),

    #[error("Invalid identifier: {id:?} is not numeric")]
    InvalidId { id: String },
}

/// Result type alias for benchview operations.
pub type BenchviewResult<T> = Result<T, Error>;
