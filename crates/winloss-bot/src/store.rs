//! Configuration store: the JSON document plus the path it is persisted to.
//!
//! The store owns the single mutable [`BotConfig`]. It is shared between the
//! event handler, the pipeline and the commands as [`SharedStore`]; every
//! read-modify-write happens under that lock and persistence is an explicit
//! [`ConfigStore::save`] call.

#[path = "store_tests.rs"]
mod store_tests;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, error, warn};
use winloss_types::BotConfig;

use crate::commands::{ChannelChange, ChannelControl};
use crate::fs::{ReadFile, WriteFile};

pub type SharedStore<F> = Arc<Mutex<ConfigStore<F>>>;

pub struct ConfigStore<F> {
    fs: F,
    path: PathBuf,
    config: BotConfig,
}

impl<F: ReadFile + WriteFile> ConfigStore<F> {
    /// Read and parse the document at `path`.
    ///
    /// Missing or malformed files are errors; the caller treats them as fatal.
    pub fn load(fs: F, path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = fs
            .read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut config = BotConfig::from_json(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        let dropped = config.dedup_channels();
        if dropped > 0 {
            warn!(
                "Removed {} duplicate channel id(s) from {}",
                dropped,
                path.display()
            );
        }

        Ok(Self { fs, path, config })
    }

    pub fn into_shared(self) -> SharedStore<F> {
        Arc::new(Mutex::new(self))
    }

    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the document back to disk, pretty-printed.
    ///
    /// Returns false on failure; the error is logged, never propagated.
    pub fn save(&self) -> bool {
        let json = match self.config.to_json_pretty() {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize configuration: {}", e);
                return false;
            }
        };

        match self.fs.write(&self.path, &json) {
            Ok(()) => {
                debug!("Configuration saved to {}", self.path.display());
                true
            }
            Err(e) => {
                error!(
                    "Failed to save configuration to {}: {}",
                    self.path.display(),
                    e
                );
                false
            }
        }
    }

    pub fn is_channel_enabled(&self, channel_id: u64) -> bool {
        self.config.is_channel_enabled(channel_id)
    }

    /// Enable a channel and persist. Already-enabled channels are a no-op
    /// success without touching the disk.
    pub fn add_channel(&mut self, channel_id: u64) -> bool {
        if !self.config.insert_channel(channel_id) {
            return true;
        }
        self.save()
    }

    /// Disable a channel and persist. Channels that were not enabled are a
    /// no-op success without touching the disk.
    pub fn remove_channel(&mut self, channel_id: u64) -> bool {
        if !self.config.remove_channel(channel_id) {
            return true;
        }
        self.save()
    }

    /// Stamp the process start time.
    pub fn mark_started(&mut self, now: DateTime<Utc>) {
        self.config.statistics.bot_start_time = Some(now);
    }

    /// Count one fully reacted message. Returns true when the save policy
    /// says the document should be persisted now.
    pub fn record_success(&mut self, now: DateTime<Utc>) -> bool {
        self.config.statistics.record_success(now);
        self.config
            .settings
            .should_persist(self.config.statistics.messages_processed)
    }

    pub fn record_failure(&mut self) {
        self.config.statistics.record_failure();
    }
}

#[async_trait]
impl<F> ChannelControl for Mutex<ConfigStore<F>>
where
    F: ReadFile + WriteFile + Send + 'static,
{
    async fn is_enabled(&self, channel_id: u64) -> bool {
        self.lock().await.is_channel_enabled(channel_id)
    }

    async fn enable(&self, channel_id: u64) -> ChannelChange {
        let mut store = self.lock().await;
        let changed = !store.is_channel_enabled(channel_id);
        let saved = store.add_channel(channel_id);
        ChannelChange { changed, saved }
    }

    async fn disable(&self, channel_id: u64) -> ChannelChange {
        let mut store = self.lock().await;
        let changed = store.is_channel_enabled(channel_id);
        let saved = store.remove_channel(channel_id);
        ChannelChange { changed, saved }
    }

    async fn snapshot(&self) -> BotConfig {
        self.lock().await.config().clone()
    }
}
