//! Discord error codes relevant to adding reactions and answering commands.

use serde::{Deserialize, Serialize};

/// High-level category of a Discord API error.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Rate limit hit.
    RateLimit,
    /// Target channel, message or emoji no longer exists.
    NotFound,
    /// The bot lacks a permission for the action.
    PermissionDenied,
    /// A per-message limit was hit or the target refuses reactions.
    LimitReached,
    /// Network or I/O error on the client side.
    Network,
    Unknown,
}

/// Classified Discord JSON error code.
///
/// See <https://discord.com/developers/docs/topics/opcodes-and-status-codes#json>.
/// Codes not listed fall through to [`DiscordErrorCode::Unknown`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DiscordErrorCode {
    /// 10003
    UnknownChannel,
    /// 10008: the message was deleted before we reacted.
    UnknownMessage,
    /// 10014: configured emoji does not exist or is not usable.
    UnknownEmoji,
    /// 10062: interaction token expired or already acknowledged.
    UnknownInteraction,
    /// 50001
    MissingAccess,
    /// 50013: usually missing Add Reactions / Read Message History.
    MissingPermissions,
    /// HTTP 429
    RateLimited,
    /// 30010: 20 distinct reactions already on the message.
    MaxReactionsReached,
    /// 90001: the author has blocked the bot.
    ReactionBlocked,
    /// 130000
    ApiOverloaded,
    NetworkError,
    Unknown,
}

impl DiscordErrorCode {
    pub fn from_raw(code: u32) -> Self {
        match code {
            10003 => Self::UnknownChannel,
            10008 => Self::UnknownMessage,
            10014 => Self::UnknownEmoji,
            10062 => Self::UnknownInteraction,
            30010 => Self::MaxReactionsReached,
            50001 => Self::MissingAccess,
            50013 => Self::MissingPermissions,
            90001 => Self::ReactionBlocked,
            130000 => Self::ApiOverloaded,
            _ => Self::Unknown,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownChannel
            | Self::UnknownMessage
            | Self::UnknownEmoji
            | Self::UnknownInteraction => ErrorCategory::NotFound,
            Self::MissingAccess | Self::MissingPermissions => ErrorCategory::PermissionDenied,
            Self::RateLimited => ErrorCategory::RateLimit,
            Self::MaxReactionsReached | Self::ReactionBlocked => ErrorCategory::LimitReached,
            Self::NetworkError => ErrorCategory::Network,
            Self::ApiOverloaded | Self::Unknown => ErrorCategory::Unknown,
        }
    }

    /// Operator-facing explanation used in failure logs.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::UnknownChannel => "channel no longer exists",
            Self::UnknownMessage => "message was deleted before it could be reacted to",
            Self::UnknownEmoji => "configured emoji is unknown or unavailable to the bot",
            Self::UnknownInteraction => "interaction expired or was already acknowledged",
            Self::MissingAccess => "bot cannot access this channel",
            Self::MissingPermissions => "missing permission to add reactions",
            Self::RateLimited => "rate limited by Discord",
            Self::MaxReactionsReached => "message already has the maximum number of reactions",
            Self::ReactionBlocked => "author has blocked the bot",
            Self::ApiOverloaded => "Discord API overloaded",
            Self::NetworkError => "network error",
            Self::Unknown => "unexpected Discord error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_known_codes() {
        assert_eq!(DiscordErrorCode::from_raw(10003), DiscordErrorCode::UnknownChannel);
        assert_eq!(DiscordErrorCode::from_raw(10008), DiscordErrorCode::UnknownMessage);
        assert_eq!(DiscordErrorCode::from_raw(10014), DiscordErrorCode::UnknownEmoji);
        assert_eq!(DiscordErrorCode::from_raw(30010), DiscordErrorCode::MaxReactionsReached);
        assert_eq!(DiscordErrorCode::from_raw(50001), DiscordErrorCode::MissingAccess);
        assert_eq!(DiscordErrorCode::from_raw(50013), DiscordErrorCode::MissingPermissions);
        assert_eq!(DiscordErrorCode::from_raw(90001), DiscordErrorCode::ReactionBlocked);
        assert_eq!(DiscordErrorCode::from_raw(130000), DiscordErrorCode::ApiOverloaded);
    }

    #[test]
    fn test_from_raw_unknown() {
        assert_eq!(DiscordErrorCode::from_raw(0), DiscordErrorCode::Unknown);
        assert_eq!(DiscordErrorCode::from_raw(99999), DiscordErrorCode::Unknown);
    }

    #[test]
    fn test_categories() {
        assert_eq!(
            DiscordErrorCode::MissingPermissions.category(),
            ErrorCategory::PermissionDenied
        );
        assert_eq!(DiscordErrorCode::RateLimited.category(), ErrorCategory::RateLimit);
        assert_eq!(DiscordErrorCode::UnknownMessage.category(), ErrorCategory::NotFound);
        assert_eq!(
            DiscordErrorCode::MaxReactionsReached.category(),
            ErrorCategory::LimitReached
        );
        assert_eq!(DiscordErrorCode::NetworkError.category(), ErrorCategory::Network);
        assert_eq!(DiscordErrorCode::Unknown.category(), ErrorCategory::Unknown);
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&DiscordErrorCode::MaxReactionsReached).unwrap();
        assert_eq!(json, "\"max_reactions_reached\"");
        let json = serde_json::to_string(&ErrorCategory::PermissionDenied).unwrap();
        assert_eq!(json, "\"permission_denied\"");
    }

    #[test]
    fn test_describe_mentions_deleted_message() {
        assert!(DiscordErrorCode::UnknownMessage.describe().contains("deleted"));
    }
}
