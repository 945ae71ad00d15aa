//! # Error Types
//!
//! Errors raised while constructing core primitives. Ledger operations
//! have their own error type in `credledger-state`, which wraps this one.

use thiserror::Error;

/// Error constructing or parsing a core primitive.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// An identifier was empty or contained only whitespace.
    #[error("{kind} must not be empty")]
    EmptyIdentifier {
        /// Which identifier kind was rejected (e.g. "principal").
        kind: &'static str,
    },

    /// Credential identifiers start at 1; zero is never allocated.
    #[error("invalid credential id {0}: identifiers start at 1")]
    InvalidCredentialId(u64),

    /// Timestamp input was malformed or not UTC.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Textual input could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),
}
