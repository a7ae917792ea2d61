//! Error types for control operations.

use thiserror::Error;

/// Result type for control operations.
pub type ControlResult<T> = Result<T, ControlError>;

/// Errors that can occur when configuring a response filter.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ControlError {
    /// Numeric guard from the core crate.
    #[error(transparent)]
    Core(#[from] rf_core::RfError),
}
