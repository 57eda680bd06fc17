//! Run-level error types with exit codes

use thiserror::Error;

/// Error that ends an alertcheck run
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CheckError {
    /// One or more documents did not match the schema
    #[error("Validation failed: {failed} of {total} document(s) did not match the schema")]
    Validation { failed: usize, total: usize },

    /// Schema Error - schema could not be loaded or compiled
    #[error("Schema error: {message}")]
    Schema { message: String },

    /// Input Error - a candidate document could not be read or parsed
    #[error("Input error: {message}")]
    Input { message: String },
}

impl CheckError {
    /// Get the appropriate exit code for this error type
    #[must_use]
    #[inline]
    pub const fn exit_code(&self) -> i32 {
        match *self {
            Self::Validation { .. } => 1,
            Self::Schema { .. } => 2,
            Self::Input { .. } => 3,
        }
    }

    /// Message without the category prefix, for the `[x]` status line
    #[must_use]
    #[inline]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Schema { message } | Self::Input { message } => Some(message),
            Self::Validation { .. } => None,
        }
    }

    /// Create a schema error
    #[inline]
    pub fn schema<S: Into<String>>(message: S) -> Self {
        Self::Schema {
            message: message.into(),
        }
    }

    /// Create an input error
    #[inline]
    pub fn input<S: Into<String>>(message: S) -> Self {
        Self::Input {
            message: message.into(),
        }
    }
}
