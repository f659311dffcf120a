//! Shared types for the win/loss reaction bot.
//!
//! Everything here is pure data and logic: the persisted configuration
//! document, content filter evaluation, statistics counters, log levels and
//! the Discord error-code taxonomy used to classify failed reactions. No I/O
//! and no Discord client types live in this crate.

pub mod config;
pub mod error;
pub mod error_codes;
pub mod filters;
pub mod log_level;

pub use config::{BotConfig, ReactionSettings, Settings, Statistics, REACTIONS_PER_MESSAGE};
pub use error::{Error, Result};
pub use error_codes::{DiscordErrorCode, ErrorCategory};
pub use filters::{ContentFilters, FilterRejection};
pub use log_level::LogLevel;
