//! Unified error type for the data access layer.

use std::fmt::Debug;
use thiserror::Error;

/// Unified error type for the Northwind data access layer.
///
/// Variants are grouped by where the failure originates: caller input,
/// configuration, the database link, or row mapping.
#[derive(Error, Debug)]
pub enum NorthwindError {
    // ============ Input Errors ============
    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    // ============ Configuration Errors ============
    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    // ============ Connection Errors ============
    /// The driver could not establish a session
    #[error("Connect error: {0}")]
    Connect(String),

    /// A statement failed while preparing, binding or running
    #[error("Connection error: {0}")]
    Connection(String),

    /// A named parameter did not match the statement
    #[error("Binding error: {0}")]
    Binding(String),

    /// Operation timed out
    #[error("Operation timed out: {0}")]
    Timeout(String),

    // ============ Mapping Errors ============
    /// A row could not be read as a domain object
    #[error("Row mapping error: {0}")]
    RowMapping(String),

    // ============ Internal Errors ============
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl NorthwindError {
    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Connect(_) => "CONNECT_ERROR",
            Self::Connection(_) => "CONNECTION_ERROR",
            Self::Binding(_) => "BINDING_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::RowMapping(_) => "ROW_MAPPING_ERROR",
            Self::Internal(_) | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a statement execution error.
    #[must_use]
    pub fn connection<T: Into<String>>(message: T) -> Self {
        Self::Connection(message.into())
    }

    /// Creates a row mapping error.
    #[must_use]
    pub fn row_mapping<T: Into<String>>(message: T) -> Self {
        Self::RowMapping(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Checks if the failure came from the database link rather than the
    /// caller's input.
    ///
    /// Nothing in this layer retries; callers may use this to decide.
    #[must_use]
    pub const fn is_retriable(&self) -> bool {
        matches!(
            self,
            Self::Connect(_) | Self::Connection(_) | Self::Timeout(_)
        )
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for NorthwindError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::ColumnNotFound(column) => {
                Self::RowMapping(format!("missing column `{}`", column))
            }
            sqlx::Error::ColumnDecode { index, source } => {
                Self::RowMapping(format!("cannot decode column {}: {}", index, source))
            }
            sqlx::Error::PoolTimedOut => Self::Timeout(err.to_string()),
            _ => Self::Connection(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for NorthwindError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON serialization error: {}", err))
    }
}
