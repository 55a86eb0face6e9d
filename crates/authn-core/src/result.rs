//! Convenience result type alias for authn.

use crate::error::AppError;

/// A specialized `Result` type for authn operations.
pub type AppResult<T> = Result<T, AppError>;
