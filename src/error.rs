//! Error types for the wicker crate.
//!
//! All fallible operations return [`WickerError`] so callers can match on
//! the failure they care about while still propagating with `?`. Fetch
//! failures are ordinary values; nothing in this crate aborts the process
//! on a bad response.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, WickerError>;

/// Top-level error type for all wicker operations.
#[derive(Debug, thiserror::Error)]
pub enum WickerError {
    /// The exchange answered with a status other than 200 OK. Only the
    /// numeric code is kept; the body is not inspected.
    #[error("exchange returned HTTP {status}")]
    HttpStatus { status: u16 },

    /// The request failed before a status line was received, or the body
    /// could not be read (DNS, connect, timeout, broken transfer).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The body arrived but was not valid JSON, or did not have the
    /// twelve-field kline row shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// A configuration value was present but failed validation.
    #[error("configuration error: {0}")]
    Config(String),

    /// Terminal setup, drawing, or teardown failed.
    #[error("terminal error: {0}")]
    Io(String),
}
