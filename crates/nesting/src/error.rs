//! The nesting error taxonomy (§7).
//!
//! The geometry kernel (L0) never raises; the placement oracle (L1) returns
//! "no position" as a value, not an error; the packer (L2) returns unplaced
//! pieces as a value. The only error type surfaced upward is
//! [`NestingError`], and only for the two kinds §7 calls out as actual
//! errors: malformed input and internal anomaly. "Unsatisfiable request"
//! and "partial placement" are not errors: they are ordinary `Ok` results
//! with empty or partial placement lists.

use std::fmt;

/// An error surfaced by the request handler (L4).
#[derive(Debug, Clone, PartialEq)]
pub enum NestingError {
    /// Malformed input (§7.1): caught before any packing is attempted.
    InvalidInput(String),
    /// Internal anomaly (§7.4): an invariant the core assumed was violated.
    /// Never silently swallowed into a "no overlap" assumption.
    Internal(String),
}

impl NestingError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidInput(reason.into())
    }

    pub fn internal(reason: impl Into<String>) -> Self {
        Self::Internal(reason.into())
    }

    /// Whether this error should be reported to the caller as their fault
    /// (4xx at the HTTP boundary) rather than the server's (5xx).
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

impl fmt::Display for NestingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput(reason) => write!(f, "invalid nesting request: {reason}"),
            Self::Internal(reason) => write!(f, "internal nesting error: {reason}"),
        }
    }
}

impl std::error::Error for NestingError {}

pub type Result<T> = std::result::Result<T, NestingError>;
