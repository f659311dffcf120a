//! `/enable`, `/disable` and `/channels`.

use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

use super::{
    ChannelChange, CommandContext, CommandDescriptor, CommandOption, Interaction, SlashCommand,
    DISCORD_MESSAGE_LIMIT,
};

const CHANNEL_OPTION: &str = "channel";

fn target_channel(interaction: &dyn Interaction) -> u64 {
    interaction
        .channel_option(CHANNEL_OPTION)
        .unwrap_or_else(|| interaction.channel_id())
}

fn change_reply(change: ChannelChange, channel_id: u64, verb: &str) -> String {
    match (change.changed, change.saved) {
        (false, _) => format!("Reactions are already {verb} in <#{channel_id}>."),
        (true, true) => format!("Reactions {verb} in <#{channel_id}>."),
        (true, false) => format!(
            "Reactions {verb} in <#{channel_id}>, but the configuration could not be saved. \
             The change will be lost on restart."
        ),
    }
}

pub struct EnableCommand;

#[async_trait]
impl SlashCommand for EnableCommand {
    fn descriptor(&self) -> CommandDescriptor {
        CommandDescriptor {
            name: "enable",
            description: "Enable win/loss reactions in a channel",
            options: vec![CommandOption::channel(
                CHANNEL_OPTION,
                "Channel to enable (defaults to this one)",
            )],
            admin_only: true,
        }
    }

    async fn execute(
        &self,
        interaction: &mut dyn Interaction,
        ctx: &CommandContext<'_>,
    ) -> Result<()> {
        let channel_id = target_channel(interaction);
        let change = ctx.channels.enable(channel_id).await;
        if change.changed {
            info!("Reactions enabled in channel {}", channel_id);
        }
        interaction
            .reply(&change_reply(change, channel_id, "enabled"))
            .await
    }
}

pub struct DisableCommand;

#[async_trait]
impl SlashCommand for DisableCommand {
    fn descriptor(&self) -> CommandDescriptor {
        CommandDescriptor {
            name: "disable",
            description: "Disable win/loss reactions in a channel",
            options: vec![CommandOption::channel(
                CHANNEL_OPTION,
                "Channel to disable (defaults to this one)",
            )],
            admin_only: true,
        }
    }

    async fn execute(
        &self,
        interaction: &mut dyn Interaction,
        ctx: &CommandContext<'_>,
    ) -> Result<()> {
        let channel_id = target_channel(interaction);
        let change = ctx.channels.disable(channel_id).await;
        if change.changed {
            info!("Reactions disabled in channel {}", channel_id);
        }
        interaction
            .reply(&change_reply(change, channel_id, "disabled"))
            .await
    }
}

pub struct ChannelsCommand;

#[async_trait]
impl SlashCommand for ChannelsCommand {
    fn descriptor(&self) -> CommandDescriptor {
        CommandDescriptor {
            name: "channels",
            description: "List channels with win/loss reactions enabled",
            options: Vec::new(),
            admin_only: true,
        }
    }

    async fn execute(
        &self,
        interaction: &mut dyn Interaction,
        ctx: &CommandContext<'_>,
    ) -> Result<()> {
        let config = ctx.channels.snapshot().await;
        interaction
            .reply(&channel_list(&config.enabled_channels))
            .await
    }
}

/// One mention per line, cut off with an "…and N more" line before the reply
/// would exceed [`DISCORD_MESSAGE_LIMIT`].
fn channel_list(ids: &[String]) -> String {
    if ids.is_empty() {
        return "No channels are enabled.".to_string();
    }
    let more_line = |hidden: usize| format!("\n…and {hidden} more");

    let mut reply = format!("Enabled channels ({}):", ids.len());
    let mut used = reply.chars().count();
    for (shown, id) in ids.iter().enumerate() {
        let line = format!("\n• <#{id}>");
        let hidden_after = ids.len() - shown - 1;
        let reserve = if hidden_after > 0 {
            more_line(hidden_after).chars().count()
        } else {
            0
        };
        if used + line.chars().count() + reserve > DISCORD_MESSAGE_LIMIT {
            reply.push_str(&more_line(ids.len() - shown));
            return reply;
        }
        used += line.chars().count();
        reply.push_str(&line);
    }
    reply
}
