//! Serenity event handler implementation

mod interaction;

use std::sync::Arc;

use serenity::async_trait;
use serenity::builder::CreateCommand;
use serenity::gateway::ActivityData;
use serenity::model::application::{Command, Interaction};
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::model::id::GuildId;
use serenity::prelude::*;
use tracing::{debug, error, info};

use crate::commands::{CommandContext, CommandRegistry};
use crate::fs::SystemFs;
use crate::health::AppState;
use crate::logging::LogSink;
use crate::pipeline::{HttpReactor, IncomingMessage, ReactionPipeline};
use crate::store::SharedStore;

pub use interaction::{create_command, SerenityInteraction};

/// Everything the handler needs, stored in the client's `TypeMap`.
pub struct BotState {
    pub store: SharedStore<SystemFs>,
    pub logs: Arc<LogSink<SystemFs>>,
    pub commands: CommandRegistry,
    pub pipeline: ReactionPipeline<SystemFs>,
    /// Register commands to this guild instead of globally.
    pub guild_id: Option<u64>,
    pub health: AppState,
}

impl TypeMapKey for BotState {
    type Value = Arc<BotState>;
}

pub fn presence_text(enabled_channels: usize) -> String {
    match enabled_channels {
        1 => "1 channel".to_string(),
        n => format!("{n} channels"),
    }
}

pub struct Handler;

impl Handler {
    async fn state(ctx: &Context) -> Option<Arc<BotState>> {
        let data = ctx.data.read().await;
        let state = data.get::<BotState>().cloned();
        if state.is_none() {
            error!("BotState not found in context data");
        }
        state
    }

    async fn register_commands(ctx: &Context, state: &BotState) {
        let commands: Vec<CreateCommand> = state
            .commands
            .descriptors()
            .iter()
            .map(create_command)
            .collect();
        let count = commands.len();

        let result = match state.guild_id {
            Some(guild_id) => GuildId::new(guild_id)
                .set_commands(&ctx.http, commands)
                .await
                .map(|_| format!("guild {guild_id}")),
            None => Command::set_global_commands(&ctx.http, commands)
                .await
                .map(|_| "global scope".to_string()),
        };
        match result {
            Ok(scope) => info!("Registered {} slash commands in {}", count, scope),
            Err(e) => error!("Failed to register slash commands: {}", e),
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!(
            "Discord bot connected as {}#{:04}",
            ready.user.name,
            ready.user.discriminator.map_or(0, |d| d.get())
        );

        let Some(state) = Self::state(&ctx).await else {
            return;
        };
        state.health.set_bot_username(ready.user.name.clone()).await;

        Self::register_commands(&ctx, &state).await;

        let enabled = state.store.lock().await.config().enabled_channels.len();
        ctx.set_activity(Some(ActivityData::watching(presence_text(enabled))));
        info!("Watching {} enabled channel(s)", enabled);
    }

    async fn message(&self, ctx: Context, msg: Message) {
        let Some(state) = Self::state(&ctx).await else {
            return;
        };

        let channel_name = msg.guild(&ctx.cache).and_then(|guild| {
            guild
                .channels
                .get(&msg.channel_id)
                .map(|channel| channel.name.clone())
        });
        let bot_user_id = ctx.cache.current_user().id.get();

        let incoming = IncomingMessage::from_message(&msg, channel_name);
        let reactor = HttpReactor::new(ctx.http.clone());
        let outcome = state
            .pipeline
            .process(&incoming, Some(bot_user_id), &reactor)
            .await;
        debug!("Message {} outcome: {:?}", incoming.message_id, outcome);
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::Command(command) = interaction else {
            return;
        };
        let Some(state) = Self::state(&ctx).await else {
            return;
        };

        info!(
            "/{} invoked by {} in channel {}",
            command.data.name, command.user.name, command.channel_id
        );

        let command_ctx = CommandContext {
            channels: &*state.store,
            logs: &*state.logs,
        };
        let mut adapter = SerenityInteraction::new(&ctx.http, &command);
        state.commands.dispatch(&mut adapter, &command_ctx).await;
    }
}
