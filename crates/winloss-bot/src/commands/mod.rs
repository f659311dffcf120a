//! Slash commands: descriptors, the registration table and dispatch.
//!
//! Commands never touch serenity directly. They receive an [`Interaction`]
//! (the invocation, with reply operations) and a [`CommandContext`] carrying
//! the channel and log controls, so every command is testable in memory.

#[path = "dispatch_tests.rs"]
mod dispatch_tests;

mod channels;
mod logs;
#[cfg(test)]
pub(crate) mod mock;
mod status;

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, error, warn};
use winloss_types::BotConfig;

pub use channels::{ChannelsCommand, DisableCommand, EnableCommand};
pub use logs::{ClearLogsCommand, LogsCommand};
pub use status::StatusCommand;

/// The only text users see when a command fails.
pub const COMMAND_ERROR_REPLY: &str = "There was an error while executing this command!";

/// Discord message content limit, in characters.
pub const DISCORD_MESSAGE_LIMIT: usize = 2000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub options: Vec<CommandOption>,
    /// Registered with the Manage Channels default member permission.
    pub admin_only: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOption {
    pub kind: OptionKind,
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
    pub min: Option<u64>,
    pub max: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Channel,
    Integer,
}

impl CommandOption {
    pub fn channel(name: &'static str, description: &'static str) -> Self {
        Self {
            kind: OptionKind::Channel,
            name,
            description,
            required: false,
            min: None,
            max: None,
        }
    }

    pub fn integer(name: &'static str, description: &'static str, min: u64, max: u64) -> Self {
        Self {
            kind: OptionKind::Integer,
            name,
            description,
            required: false,
            min: Some(min),
            max: Some(max),
        }
    }
}

/// A slash-command invocation as seen by a command.
#[async_trait]
pub trait Interaction: Send {
    fn command_name(&self) -> &str;
    /// Channel the command was invoked in.
    fn channel_id(&self) -> u64;
    fn channel_option(&self, name: &str) -> Option<u64>;
    fn integer_option(&self, name: &str) -> Option<i64>;
    /// True once an initial response has been sent.
    fn has_replied(&self) -> bool;
    async fn reply(&mut self, content: &str) -> Result<()>;
    async fn follow_up(&mut self, content: &str) -> Result<()>;
}

/// Result of enabling or disabling a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelChange {
    /// False when the channel was already in the requested state.
    pub changed: bool,
    /// Persistence result (true for no-op changes).
    pub saved: bool,
}

/// Channel allow-list operations available to commands.
#[async_trait]
pub trait ChannelControl: Send + Sync {
    async fn is_enabled(&self, channel_id: u64) -> bool;
    async fn enable(&self, channel_id: u64) -> ChannelChange;
    async fn disable(&self, channel_id: u64) -> ChannelChange;
    async fn snapshot(&self) -> BotConfig;
}

pub trait LogControl: Send + Sync {
    fn recent(&self, lines: usize) -> String;
    fn clear(&self) -> bool;
}

pub struct CommandContext<'a> {
    pub channels: &'a dyn ChannelControl,
    pub logs: &'a dyn LogControl,
}

#[async_trait]
pub trait SlashCommand: Send + Sync {
    fn descriptor(&self) -> CommandDescriptor;

    async fn execute(
        &self,
        interaction: &mut dyn Interaction,
        ctx: &CommandContext<'_>,
    ) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// No command is registered under the invoked name; nothing was sent.
    Unknown,
    Completed,
    /// The command failed and the error reply was attempted.
    Failed,
}

/// Command name → handler. Filled once at startup.
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<&'static str, Box<dyn SlashCommand>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every command the bot ships with.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(EnableCommand));
        registry.register(Box::new(DisableCommand));
        registry.register(Box::new(StatusCommand));
        registry.register(Box::new(ChannelsCommand));
        registry.register(Box::new(LogsCommand));
        registry.register(Box::new(ClearLogsCommand));
        registry
    }

    /// Register a command under its descriptor name, replacing any previous
    /// command with that name.
    pub fn register(&mut self, command: Box<dyn SlashCommand>) {
        let name = command.descriptor().name;
        if self.commands.insert(name, command).is_some() {
            warn!("Command '{}' registered twice; keeping the latest", name);
        }
        debug!("Registered command '{}'", name);
    }

    pub fn get(&self, name: &str) -> Option<&dyn SlashCommand> {
        self.commands.get(name).map(|c| c.as_ref())
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Descriptors sorted by name.
    pub fn descriptors(&self) -> Vec<CommandDescriptor> {
        let mut descriptors: Vec<_> = self.commands.values().map(|c| c.descriptor()).collect();
        descriptors.sort_by_key(|d| d.name);
        descriptors
    }

    /// Run the command named by `interaction`.
    ///
    /// Unknown names are logged and ignored. A failing command produces
    /// exactly one [`COMMAND_ERROR_REPLY`], as a follow-up if the interaction
    /// was already answered.
    pub async fn dispatch(
        &self,
        interaction: &mut dyn Interaction,
        ctx: &CommandContext<'_>,
    ) -> DispatchOutcome {
        let name = interaction.command_name().to_string();
        let Some(command) = self.get(&name) else {
            warn!("No command matching '{}' was found", name);
            return DispatchOutcome::Unknown;
        };

        debug!("Executing command '{}'", name);
        match command.execute(interaction, ctx).await {
            Ok(()) => DispatchOutcome::Completed,
            Err(e) => {
                error!("Error executing command '{}': {:#}", name, e);
                let sent = if interaction.has_replied() {
                    interaction.follow_up(COMMAND_ERROR_REPLY).await
                } else {
                    interaction.reply(COMMAND_ERROR_REPLY).await
                };
                if let Err(e) = sent {
                    error!("Failed to send error reply for '{}': {:#}", name, e);
                }
                DispatchOutcome::Failed
            }
        }
    }
}
