//! Classification of serenity errors raised while adding reactions.
//!
//! Failed reactions are never retried; classification only decides what the
//! operator sees in the log.

use std::fmt;

use serenity::http::HttpError;
use tracing::error;
use winloss_types::{DiscordErrorCode, ErrorCategory};

/// A failed reaction request, classified by Discord error code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionFailure {
    pub code: DiscordErrorCode,
    pub category: ErrorCategory,
    /// Human-readable message from the Discord API (or the transport).
    pub message: String,
    /// Raw Discord JSON error code (0 if not an API error).
    pub raw_code: u32,
    /// HTTP status code (0 if not an HTTP error).
    pub http_status: u16,
}

impl ReactionFailure {
    pub fn new(code: DiscordErrorCode, message: &str, raw_code: u32, http_status: u16) -> Self {
        Self {
            code,
            category: code.category(),
            message: message.to_string(),
            raw_code,
            http_status,
        }
    }

    /// Build from the parts of an unsuccessful Discord HTTP response.
    pub fn from_response(http_status: u16, raw_code: u32, message: &str) -> Self {
        let code = if http_status == 429 {
            DiscordErrorCode::RateLimited
        } else {
            DiscordErrorCode::from_raw(raw_code)
        };
        Self::new(code, message, raw_code, http_status)
    }

    pub fn network(message: &str) -> Self {
        Self::new(DiscordErrorCode::NetworkError, message, 0, 0)
    }
}

impl fmt::Display for ReactionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{:?}]", self.code.describe(), self.code)?;
        if self.http_status != 0 {
            write!(f, " (HTTP {} / code {})", self.http_status, self.raw_code)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for ReactionFailure {}

/// Classify a serenity `Error`.
pub fn classify(err: &serenity::Error) -> ReactionFailure {
    match err {
        serenity::Error::Http(HttpError::UnsuccessfulRequest(resp)) => ReactionFailure::from_response(
            resp.status_code.as_u16(),
            resp.error.code as u32,
            &resp.error.message,
        ),
        _ => ReactionFailure::network(&err.to_string()),
    }
}

/// Log a failed reaction pair for one message.
pub fn log_failure(failure: &ReactionFailure, channel: &str, message_id: u64) {
    error!(
        category = ?failure.category,
        "Failed to react to message {} in {}: {}",
        message_id,
        channel,
        failure
    );
}
