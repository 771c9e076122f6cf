//! Application-level error type for service operations.

use supportwiki_core::CoreError;
use supportwiki_entities::ClientError;

/// Errors surfaced by the application services.
///
/// Wraps [`CoreError`] for domain and validation failures and
/// [`ClientError`] for entity service failures, and adds the submit-gate
/// rejection. None of these are fatal; frontends render them and move on.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `supportwiki_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An entity service error from the client layer.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// A submit was rejected because another one is still in flight.
    #[error("A submission is already in progress")]
    Busy,
}

/// Convenience type alias for service return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Whether this error is a validation failure (missing or invalid
    /// fields) rather than a service or concurrency problem.
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Core(CoreError::Validation(_)))
    }
}
