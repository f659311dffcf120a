//! serenity side of slash commands: the [`Interaction`] adapter over a
//! `CommandInteraction`, and descriptor → `CreateCommand` conversion.

use anyhow::{Context as _, Result};
use async_trait::async_trait;
use serenity::builder::{
    CreateCommand, CreateCommandOption, CreateInteractionResponse,
    CreateInteractionResponseFollowup, CreateInteractionResponseMessage,
};
use serenity::http::Http;
use serenity::model::application::{CommandDataOptionValue, CommandInteraction, CommandOptionType};
use serenity::model::channel::ChannelType;
use serenity::model::permissions::Permissions;

use crate::commands::{CommandDescriptor, CommandOption, Interaction, OptionKind};

/// All replies are ephemeral.
pub struct SerenityInteraction<'a> {
    http: &'a Http,
    command: &'a CommandInteraction,
    replied: bool,
}

impl<'a> SerenityInteraction<'a> {
    pub fn new(http: &'a Http, command: &'a CommandInteraction) -> Self {
        Self {
            http,
            command,
            replied: false,
        }
    }

    fn option(&self, name: &str) -> Option<&CommandDataOptionValue> {
        self.command
            .data
            .options
            .iter()
            .find(|o| o.name == name)
            .map(|o| &o.value)
    }
}

#[async_trait]
impl Interaction for SerenityInteraction<'_> {
    fn command_name(&self) -> &str {
        &self.command.data.name
    }

    fn channel_id(&self) -> u64 {
        self.command.channel_id.get()
    }

    fn channel_option(&self, name: &str) -> Option<u64> {
        match self.option(name)? {
            CommandDataOptionValue::Channel(id) => Some(id.get()),
            _ => None,
        }
    }

    fn integer_option(&self, name: &str) -> Option<i64> {
        match self.option(name)? {
            CommandDataOptionValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    fn has_replied(&self) -> bool {
        self.replied
    }

    async fn reply(&mut self, content: &str) -> Result<()> {
        let message = CreateInteractionResponseMessage::new()
            .content(content)
            .ephemeral(true);
        self.command
            .create_response(self.http, CreateInteractionResponse::Message(message))
            .await
            .with_context(|| format!("Failed to reply to /{}", self.command.data.name))?;
        self.replied = true;
        Ok(())
    }

    async fn follow_up(&mut self, content: &str) -> Result<()> {
        let builder = CreateInteractionResponseFollowup::new()
            .content(content)
            .ephemeral(true);
        self.command
            .create_followup(self.http, builder)
            .await
            .with_context(|| format!("Failed to follow up on /{}", self.command.data.name))?;
        Ok(())
    }
}

/// Build the registration payload for one command.
pub fn create_command(descriptor: &CommandDescriptor) -> CreateCommand {
    let mut command = CreateCommand::new(descriptor.name).description(descriptor.description);
    if descriptor.admin_only {
        command = command.default_member_permissions(Permissions::MANAGE_CHANNELS);
    }
    for option in &descriptor.options {
        command = command.add_option(create_option(option));
    }
    command
}

fn create_option(option: &CommandOption) -> CreateCommandOption {
    let kind = match option.kind {
        OptionKind::Channel => CommandOptionType::Channel,
        OptionKind::Integer => CommandOptionType::Integer,
    };
    let mut builder = CreateCommandOption::new(kind, option.name, option.description)
        .required(option.required);
    if option.kind == OptionKind::Channel {
        builder = builder.channel_types(vec![ChannelType::Text, ChannelType::News]);
    }
    if let Some(min) = option.min {
        builder = builder.min_int_value(min);
    }
    if let Some(max) = option.max {
        builder = builder.max_int_value(max);
    }
    builder
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;
    use crate::commands::CommandRegistry;

    fn payload(name: &str) -> Value {
        let registry = CommandRegistry::with_defaults();
        let descriptor = registry
            .descriptors()
            .into_iter()
            .find(|d| d.name == name)
            .unwrap();
        serde_json::to_value(create_command(&descriptor)).unwrap()
    }

    #[test]
    fn test_admin_command_requires_manage_channels() {
        let json = payload("enable");
        assert_eq!(json["name"], "enable");
        assert_eq!(
            json["default_member_permissions"],
            Permissions::MANAGE_CHANNELS.bits().to_string()
        );
        assert_eq!(json["options"][0]["name"], "channel");
        assert_eq!(json["options"][0]["type"], 7);
        assert_eq!(json["options"][0]["required"], false);
    }

    #[test]
    fn test_status_is_open_to_everyone() {
        let json = payload("status");
        assert!(json["default_member_permissions"].is_null());
    }

    #[test]
    fn test_logs_lines_bounds() {
        let json = payload("logs");
        let lines = &json["options"][0];
        assert_eq!(lines["name"], "lines");
        assert_eq!(lines["type"], 4);
        assert_eq!(lines["min_value"], 1);
        assert_eq!(lines["max_value"], 100);
    }
}
