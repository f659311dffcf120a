use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use winloss_types::BotConfig;

use super::{CommandContext, CommandDescriptor, Interaction, SlashCommand};

/// `/status`: channel state, filters, reactions and statistics.
pub struct StatusCommand;

#[async_trait]
impl SlashCommand for StatusCommand {
    fn descriptor(&self) -> CommandDescriptor {
        CommandDescriptor {
            name: "status",
            description: "Show bot status for this channel",
            options: Vec::new(),
            admin_only: false,
        }
    }

    async fn execute(
        &self,
        interaction: &mut dyn Interaction,
        ctx: &CommandContext<'_>,
    ) -> Result<()> {
        let enabled_here = ctx.channels.is_enabled(interaction.channel_id()).await;
        let config = ctx.channels.snapshot().await;
        let reply = render_status(&config, enabled_here, Utc::now());
        interaction.reply(&reply).await
    }
}

pub fn render_status(config: &BotConfig, enabled_here: bool, now: DateTime<Utc>) -> String {
    let stats = &config.statistics;
    let here = if enabled_here {
        "✅ enabled"
    } else {
        "❌ disabled"
    };
    let last = stats
        .last_reaction_time
        .map(|t| format!("<t:{}:R>", t.timestamp()))
        .unwrap_or_else(|| "never".to_string());
    let uptime = stats
        .bot_start_time
        .map(|start| format_uptime((now - start).num_seconds().max(0) as u64))
        .unwrap_or_else(|| "unknown".to_string());

    [
        "**Win/Loss Bot Status**".to_string(),
        format!("This channel: {here}"),
        format!("Enabled channels: {}", config.enabled_channels.len()),
        format!("Content filters: {}", config.content_filters.summary()),
        format!(
            "Reactions: {} / {}",
            config.reactions.win, config.reactions.loss
        ),
        format!(
            "Messages processed: {} | Reactions added: {} | Failed: {}",
            stats.messages_processed, stats.total_reactions, stats.failed_reactions
        ),
        format!("Last reaction: {last}"),
        format!("Uptime: {uptime}"),
    ]
    .join("\n")
}

/// `1d 2h 3m`, dropping leading zero units. Under a minute is `0m`.
pub fn format_uptime(secs: u64) -> String {
    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3_600;
    let minutes = (secs % 3_600) / 60;
    if days > 0 {
        format!("{days}d {hours}h {minutes}m")
    } else if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}
