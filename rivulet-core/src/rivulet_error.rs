// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for rivulet pipelines.
//!
//! A single [`RivuletError`] covers both the generic stream failures raised by
//! operators and the failures of the network fetch pipeline. None of them is
//! fatal to the process: they terminate the stream that produced them and
//! surface through the subscriber's error callback.
//!
//! # Examples
//!
//! ```
//! use rivulet_core::{Result, RivuletError};
//!
//! fn validate(status: u16) -> Result<()> {
//!     if (200..=299).contains(&status) {
//!         Ok(())
//!     } else {
//!         Err(RivuletError::bad_server_response(Some(status)))
//!     }
//! }
//!
//! assert!(validate(204).is_ok());
//! assert!(validate(404).is_err());
//! ```

/// Root error type for all rivulet operations
#[derive(Debug, Clone, thiserror::Error)]
pub enum RivuletError {
    /// The server answered without response metadata, or with a status code
    /// outside the inclusive success range `[200, 299]`.
    #[error("Bad server response: {}", describe_status(.status))]
    BadServerResponse {
        /// HTTP status code, if the response carried any metadata
        status: Option<u16>,
    },

    /// A payload did not match the expected shape.
    #[error("Decode error: {context}")]
    DecodeError {
        /// What failed to decode and why
        context: String,
    },

    /// A configured location could not be parsed as a URL.
    ///
    /// Raised at construction time; the fetch pipeline is never started.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The rejected input
        url: String,
        /// Parser diagnostic
        reason: String,
    },

    /// The transport failed before a response was received.
    #[error("Transport error: {context}")]
    Transport {
        /// Transport diagnostic (connection refused, DNS failure, ...)
        context: String,
    },

    /// Stream processing encountered an error
    ///
    /// This is a general error for stream operations that don't fit
    /// other specific categories.
    #[error("Stream processing error: {context}")]
    StreamProcessingError {
        /// Description of what went wrong during stream processing
        context: String,
    },
}

fn describe_status(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!("status code {code}"),
        None => "no response metadata".to_string(),
    }
}

impl RivuletError {
    /// Create a bad server response error for the given status
    #[must_use]
    pub const fn bad_server_response(status: Option<u16>) -> Self {
        Self::BadServerResponse { status }
    }

    /// Create a decode error with the given context
    pub fn decode_error(context: impl Into<String>) -> Self {
        Self::DecodeError {
            context: context.into(),
        }
    }

    /// Create an invalid URL error
    pub fn invalid_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create a transport error with the given context
    pub fn transport(context: impl Into<String>) -> Self {
        Self::Transport {
            context: context.into(),
        }
    }

    /// Create a stream processing error with the given context
    pub fn stream_error(context: impl Into<String>) -> Self {
        Self::StreamProcessingError {
            context: context.into(),
        }
    }

    /// Check if retrying the same operation could succeed
    ///
    /// Server and transport failures are transient; a payload that failed to
    /// decode or a malformed URL will fail again.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::BadServerResponse { .. } | Self::Transport { .. })
    }
}

/// Specialized Result type for rivulet operations
pub type Result<T> = std::result::Result<T, RivuletError>;
