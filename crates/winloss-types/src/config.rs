//! The persisted configuration document (`config.json`).

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::filters::ContentFilters;

/// Reactions added per accepted message (win + loss).
pub const REACTIONS_PER_MESSAGE: u64 = 2;

/// Complete configuration document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotConfig {
    /// Channel ids (snowflakes as strings) the bot reacts in. No duplicates.
    pub enabled_channels: Vec<String>,
    #[serde(default)]
    pub content_filters: ContentFilters,
    #[serde(default)]
    pub reactions: ReactionSettings,
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub statistics: Statistics,
}

/// Emoji added to qualifying messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionSettings {
    /// Unicode emoji or custom emoji as `name:id`
    #[serde(default = "default_win")]
    pub win: String,
    #[serde(default = "default_loss")]
    pub loss: String,
    /// Pause between the two reaction calls
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Persist after every successful reaction. When off, persist every
    /// `save_interval` processed messages instead.
    #[serde(default = "default_auto_save")]
    pub auto_save: bool,
    #[serde(default = "default_save_interval")]
    pub save_interval: u64,
}

/// Cumulative usage counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    #[serde(default)]
    pub total_reactions: u64,
    #[serde(default)]
    pub messages_processed: u64,
    #[serde(default)]
    pub failed_reactions: u64,
    #[serde(default)]
    pub bot_start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_reaction_time: Option<DateTime<Utc>>,
}

impl Default for ReactionSettings {
    fn default() -> Self {
        Self {
            win: default_win(),
            loss: default_loss(),
            delay_ms: None,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_save: default_auto_save(),
            save_interval: default_save_interval(),
        }
    }
}

fn default_win() -> String {
    "🇼".to_string()
}

fn default_loss() -> String {
    "🇱".to_string()
}

fn default_auto_save() -> bool {
    true
}

fn default_save_interval() -> u64 {
    10
}

impl BotConfig {
    /// Parse a document. Duplicate channel ids are kept; call
    /// [`BotConfig::dedup_channels`] to enforce uniqueness.
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Pretty-printed JSON, as written to disk.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn is_channel_enabled(&self, channel_id: u64) -> bool {
        let id = channel_id.to_string();
        self.enabled_channels.iter().any(|c| *c == id)
    }

    /// Returns true if the channel was not already enabled.
    pub fn insert_channel(&mut self, channel_id: u64) -> bool {
        if self.is_channel_enabled(channel_id) {
            return false;
        }
        self.enabled_channels.push(channel_id.to_string());
        true
    }

    /// Returns true if the channel was enabled.
    pub fn remove_channel(&mut self, channel_id: u64) -> bool {
        let id = channel_id.to_string();
        let before = self.enabled_channels.len();
        self.enabled_channels.retain(|c| *c != id);
        self.enabled_channels.len() != before
    }

    /// Drop repeated channel ids, keeping first occurrences. Returns the
    /// number removed.
    pub fn dedup_channels(&mut self) -> usize {
        let before = self.enabled_channels.len();
        let mut seen = std::collections::HashSet::new();
        self.enabled_channels.retain(|c| seen.insert(c.clone()));
        before - self.enabled_channels.len()
    }
}

impl ReactionSettings {
    pub fn delay(&self) -> Option<Duration> {
        self.delay_ms.filter(|ms| *ms > 0).map(Duration::from_millis)
    }
}

impl Settings {
    /// Whether a save is due after `messages_processed` successful messages.
    pub fn should_persist(&self, messages_processed: u64) -> bool {
        self.auto_save || messages_processed % self.save_interval.max(1) == 0
    }
}

impl Statistics {
    pub fn record_success(&mut self, now: DateTime<Utc>) {
        self.total_reactions += REACTIONS_PER_MESSAGE;
        self.messages_processed += 1;
        self.last_reaction_time = Some(now);
    }

    pub fn record_failure(&mut self) {
        self.failed_reactions += 1;
    }
}
