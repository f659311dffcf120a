//! Process settings: command-line flags, their env fallbacks and the token.
//!
//! The JSON document itself lives in `winloss_types::BotConfig` and is owned
//! by the [`crate::store::ConfigStore`].

#[path = "config_tests.rs"]
mod config_tests;

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use winloss_types::LogLevel;

use crate::env::ReadEnv;

/// Token variables, in lookup order.
pub const TOKEN_VARS: [&str; 2] = ["DISCORD_TOKEN", "DISCORD_BOT_TOKEN"];

/// Win/loss reaction bot
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the JSON configuration document
    #[arg(short, long, env = "WINLOSS_CONFIG", default_value = "config.json")]
    pub config: PathBuf,

    /// Path to the append-only log file
    #[arg(long, env = "WINLOSS_LOG_FILE", default_value = "bot.log")]
    pub log_file: PathBuf,

    /// Minimum level written to the log: error, warn, info or debug
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: LogLevel,

    /// Serve GET /health on this port
    #[arg(long, env = "HEALTH_CHECK_PORT")]
    pub health_port: Option<u16>,

    /// Register slash commands to this guild only instead of globally
    #[arg(long, env = "DISCORD_GUILD_ID")]
    pub guild_id: Option<u64>,
}

/// First non-empty token from [`TOKEN_VARS`].
pub fn resolve_token<E: ReadEnv>(env: &E) -> Result<String> {
    for key in TOKEN_VARS {
        if let Ok(value) = env.var(key) {
            let value = value.trim();
            if !value.is_empty() {
                return Ok(value.to_string());
            }
        }
    }
    bail!("No Discord token found; set {} or {}", TOKEN_VARS[0], TOKEN_VARS[1])
}
