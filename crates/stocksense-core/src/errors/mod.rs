//! Error types. One umbrella enum plus per-layer sub-errors, converted via
//! `#[from]` so `?` works across crate boundaries.

mod storage_error;

pub use storage_error::StorageError;

/// Convenience alias used across the workspace.
pub type StockResult<T> = Result<T, StockError>;

/// The umbrella error for every fallible operation in the system.
///
/// Validation variants reject a write before any side effect, `RateLimited`
/// rejects without recording an attempt, and storage failures propagate
/// unmodified. No retries happen at this layer.
#[derive(Debug, thiserror::Error)]
pub enum StockError {
    #[error("item not found: {id}")]
    ItemNotFound { id: String },

    #[error("location not found: {id}")]
    LocationNotFound { id: String },

    #[error("invalid status value: {value}")]
    InvalidStatus { value: String },

    #[error("invalid source value: {value}")]
    InvalidSource { value: String },

    #[error("missing required field: {field}")]
    MissingField { field: String },

    #[error("invalid coordinate: {detail}")]
    InvalidCoordinate { detail: String },

    #[error("rate limit exceeded for route {route}")]
    RateLimited { route: String },

    #[error("config error: {detail}")]
    ConfigError { detail: String },

    #[error("storage error: {0}")]
    StorageError(#[from] StorageError),
}
