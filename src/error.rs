//! Error types for `HashTable` construction

use thiserror::Error;

/// Errors reported when a table cannot be built from the requested parameters
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A construction parameter was out of range; the table was not created
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument {
        /// Name of the offending parameter
        name: &'static str,
        /// Why the value was rejected
        reason: String,
    },
}

impl Error {
    /// Shorthand for building an [`Error::InvalidArgument`]
    pub(crate) fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument { name, reason: reason.into() }
    }
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, Error>;
