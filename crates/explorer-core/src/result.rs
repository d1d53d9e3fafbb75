//! Convenience result type alias for WITSML Explorer.

use crate::error::AppError;

/// A specialized `Result` type for explorer operations.
pub type AppResult<T> = Result<T, AppError>;
