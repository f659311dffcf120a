//! Win/loss reaction bot
//!
//! Watches an allow-list of Discord channels and reacts to every qualifying
//! message with a "win" and a "loss" emoji so members can vote on it.
//! Channels are managed with slash commands and the allow-list, filters and
//! usage statistics persist in a JSON document.

mod commands;
mod config;
mod env;
mod errors;
mod fs;
mod handlers;
mod health;
mod logging;
mod pipeline;
mod signal;
mod store;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use chrono::Utc;
use clap::Parser;
use serenity::model::gateway::GatewayIntents;
use serenity::prelude::*;
use tracing::{error, info, warn};

use crate::commands::CommandRegistry;
use crate::config::{resolve_token, Args};
use crate::env::SystemEnv;
use crate::fs::SystemFs;
use crate::handlers::{BotState, Handler};
use crate::health::AppState;
use crate::logging::{init_logging, LogSink};
use crate::pipeline::ReactionPipeline;
use crate::store::ConfigStore;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let logs = Arc::new(LogSink::new(SystemFs, &args.log_file, args.log_level));
    init_logging(logs.clone());
    install_panic_hook();

    match run(args, logs).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Panics anywhere are logged. serenity runs each event on its own task, so
/// a panicking handler is logged and the bot keeps running.
fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        error!("Unhandled panic: {}", info);
    }));
}

async fn run(args: Args, logs: Arc<LogSink<SystemFs>>) -> Result<()> {
    info!(
        "Starting win/loss bot (log file {}, level {})",
        logs.path().display(),
        logs.threshold()
    );

    let mut store = ConfigStore::load(SystemFs, &args.config)?;
    info!(
        "Loaded configuration from {} ({} enabled channels)",
        store.path().display(),
        store.config().enabled_channels.len()
    );

    let token = resolve_token(&SystemEnv)?;

    store.mark_started(Utc::now());
    if !store.save() {
        warn!("Could not persist start time; continuing");
    }
    let store = store.into_shared();

    let commands = CommandRegistry::with_defaults();
    info!("{} slash commands available", commands.len());

    let health = AppState::new(store.clone());
    let state = Arc::new(BotState {
        store: store.clone(),
        logs,
        commands,
        pipeline: ReactionPipeline::new(store.clone()),
        guild_id: args.guild_id,
        health: health.clone(),
    });

    let intents =
        GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES | GatewayIntents::MESSAGE_CONTENT;
    let mut client = Client::builder(&token, intents)
        .event_handler(Handler)
        .await
        .context("Failed to create Discord client")?;

    {
        let mut data = client.data.write().await;
        data.insert::<BotState>(state);
    }

    if let Some(port) = args.health_port {
        tokio::spawn(async move {
            if let Err(e) = health::start_health_server(health, port).await {
                error!("Health server error: {}", e);
            }
        });
    }

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        let received = signal::wait_for_shutdown().await;
        info!("Received {}, saving configuration and disconnecting", received);
        store.lock().await.save();
        shard_manager.shutdown_all().await;
    });

    info!("Starting Discord gateway connection...");
    client.start().await.context("Discord client error")?;

    info!("Discord bot stopped");
    Ok(())
}
