//! Result type aliases for the Northwind data access layer.

use crate::NorthwindError;

/// A specialized `Result` type for Northwind operations.
pub type NorthwindResult<T> = Result<T, NorthwindError>;
