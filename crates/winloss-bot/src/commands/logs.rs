//! `/logs` and `/clearlogs`.

use anyhow::Result;
use async_trait::async_trait;

use crate::logging::DEFAULT_RECENT_LINES;

use super::{
    CommandContext, CommandDescriptor, CommandOption, Interaction, SlashCommand,
    DISCORD_MESSAGE_LIMIT,
};

const LINES_OPTION: &str = "lines";
const MAX_LINES: i64 = 100;
const FENCE_OPEN: &str = "```\n";
const FENCE_CLOSE: &str = "\n```";

pub struct LogsCommand;

#[async_trait]
impl SlashCommand for LogsCommand {
    fn descriptor(&self) -> CommandDescriptor {
        CommandDescriptor {
            name: "logs",
            description: "Show recent bot log lines",
            options: vec![CommandOption::integer(
                LINES_OPTION,
                "Number of lines to show (default 50)",
                1,
                MAX_LINES as u64,
            )],
            admin_only: true,
        }
    }

    async fn execute(
        &self,
        interaction: &mut dyn Interaction,
        ctx: &CommandContext<'_>,
    ) -> Result<()> {
        let lines = interaction
            .integer_option(LINES_OPTION)
            .unwrap_or(DEFAULT_RECENT_LINES as i64)
            .clamp(1, MAX_LINES) as usize;
        let recent = ctx.logs.recent(lines);
        let reply = if recent.trim().is_empty() {
            "Log file is empty.".to_string()
        } else {
            code_block(&recent)
        };
        interaction.reply(&reply).await
    }
}

pub struct ClearLogsCommand;

#[async_trait]
impl SlashCommand for ClearLogsCommand {
    fn descriptor(&self) -> CommandDescriptor {
        CommandDescriptor {
            name: "clearlogs",
            description: "Clear the bot log file",
            options: Vec::new(),
            admin_only: true,
        }
    }

    async fn execute(
        &self,
        interaction: &mut dyn Interaction,
        ctx: &CommandContext<'_>,
    ) -> Result<()> {
        let reply = if ctx.logs.clear() {
            "Log file cleared."
        } else {
            "Failed to clear the log file."
        };
        interaction.reply(reply).await
    }
}

/// Wrap `text` in a code fence that fits one Discord message, keeping the
/// newest lines.
pub fn code_block(text: &str) -> String {
    let budget = DISCORD_MESSAGE_LIMIT - FENCE_OPEN.len() - FENCE_CLOSE.len();
    format!("{FENCE_OPEN}{}{FENCE_CLOSE}", tail_within(text, budget))
}

/// The longest suffix of `text` of at most `max_chars` characters, starting
/// at a line boundary when any whole line fits.
fn tail_within(text: &str, max_chars: usize) -> &str {
    let total = text.chars().count();
    if total <= max_chars {
        return text;
    }
    let skip = total - max_chars;
    let Some((cut, _)) = text.char_indices().nth(skip) else {
        return "";
    };
    let tail = &text[cut..];
    if cut > 0 && text[..cut].ends_with('\n') {
        return tail;
    }
    match tail.find('\n') {
        Some(nl) if nl + 1 < tail.len() => &tail[nl + 1..],
        _ => tail,
    }
}
