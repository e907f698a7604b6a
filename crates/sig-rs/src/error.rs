//! Error taxonomy for the bookkeeping layer.
//!
//! Exactly two kinds of failure exist here: an entry point rejecting a
//! malformed argument, and a backwards-info capsule that does not resolve to
//! the context it was claimed to hold. Everything past validation is total
//! over well-formed input and does not fail.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type SigResult<T> = Result<T, SigError>;

/// Errors reported synchronously to the immediate caller; never retried or
/// recovered internally.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SigError {
    /// A shape, rank, size, or value-range constraint on an argument was
    /// violated. Raised before any computation or context mutation occurs.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// An opaque capsule did not hold a live backwards-info context of the
    /// expected kind.
    #[error("invalid backwards-info handle: {0}")]
    InvalidHandle(String),
}

impl SigError {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        SigError::InvalidArgument(message.into())
    }

    pub(crate) fn invalid_handle(message: impl Into<String>) -> Self {
        SigError::InvalidHandle(message.into())
    }
}
