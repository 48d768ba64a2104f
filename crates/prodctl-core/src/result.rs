//! Convenience result type alias for production control.

use crate::error::AppError;

/// A specialized `Result` type for data access operations.
pub type AppResult<T> = Result<T, AppError>;
