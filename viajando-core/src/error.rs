//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

/// Core layer error type
///
/// A logical no-op (update/delete of an id that does not exist) is not an
/// error; it is reported as [`crate::types::WriteOutcome::NoOp`].
#[derive(Error, Debug, Clone, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Connection or schema bootstrap failed during initialization.
    ///
    /// Fatal: no other operation can succeed until initialization does.
    #[error("Storage initialization error: {0}")]
    StorageInit(String),

    /// A read or write against an initialized durable backend failed.
    /// The operation had no effect.
    #[error("Storage query error: {0}")]
    StorageQuery(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl CoreError {
    /// Whether it is expected behavior (bad user input), used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added. **
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::ValidationError(_) => true,
            Self::StorageInit(_) | Self::StorageQuery(_) => false,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
