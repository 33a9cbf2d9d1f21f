//! Error types for snapshot retrieval.
//!
//! A retrieval failure is always recoverable: it flips the connection-health
//! flag and schedules a retry, it never propagates past the fetch loop.

use thiserror::Error;

/// Why a single snapshot retrieval failed
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure (connect, timeout, body decode)
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// Backend answered with a non-2xx status
    #[error("unexpected status: {0}")]
    Status(reqwest::StatusCode),
}
