//! Message reaction pipeline: filter an inbound message, then add the win
//! and loss reactions to it.

#[path = "pipeline_tests.rs"]
mod pipeline_tests;

use std::sync::Arc;

use chrono::Utc;
use serenity::http::Http;
use serenity::model::channel::{Message, ReactionType};
use serenity::model::id::{ChannelId, EmojiId, MessageId};
use tracing::{debug, info};
use winloss_types::{FilterRejection, ReactionSettings};

use crate::errors::{self, ReactionFailure};
use crate::fs::{ReadFile, WriteFile};
use crate::store::SharedStore;

/// The parts of a Discord message the pipeline looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub message_id: u64,
    pub channel_id: u64,
    /// Resolved from the cache when available; only used in logs.
    pub channel_name: Option<String>,
    pub author_id: u64,
    pub author_is_bot: bool,
    pub content: String,
}

impl IncomingMessage {
    pub fn from_message(msg: &Message, channel_name: Option<String>) -> Self {
        Self {
            message_id: msg.id.get(),
            channel_id: msg.channel_id.get(),
            channel_name,
            author_id: msg.author.id.get(),
            author_is_bot: msg.author.bot,
            content: msg.content.clone(),
        }
    }

    fn channel_label(&self) -> String {
        match &self.channel_name {
            Some(name) => format!("#{name}"),
            None => format!("channel {}", self.channel_id),
        }
    }
}

/// Why a message was not reacted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Skip {
    OwnMessage,
    BotAuthor,
    ChannelDisabled,
    Filtered(FilterRejection),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Skipped(Skip),
    /// Both reactions were added. `saved` is `None` when no save was due.
    Reacted { saved: Option<bool> },
    Failed(ReactionFailure),
}

/// Adds one reaction to a message.
/// Implemented by [`HttpReactor`] (serenity) and a recording mock in tests.
#[allow(async_fn_in_trait)]
pub trait AddReaction {
    async fn add_reaction(
        &self,
        channel_id: u64,
        message_id: u64,
        emoji: &str,
    ) -> Result<(), ReactionFailure>;
}

pub struct HttpReactor {
    http: Arc<Http>,
}

impl HttpReactor {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

impl AddReaction for HttpReactor {
    async fn add_reaction(
        &self,
        channel_id: u64,
        message_id: u64,
        emoji: &str,
    ) -> Result<(), ReactionFailure> {
        self.http
            .create_reaction(
                ChannelId::new(channel_id),
                MessageId::new(message_id),
                &parse_reaction_type(emoji),
            )
            .await
            .map_err(|e| errors::classify(&e))
    }
}

/// Parse an emoji string into a serenity `ReactionType`.
///
/// Supports Unicode emoji (`👍`) and custom emoji as `name:id`.
pub fn parse_reaction_type(emoji: &str) -> ReactionType {
    if let Some((name, id)) = emoji.split_once(':')
        && let Ok(id) = id.parse::<u64>()
        && id != 0
    {
        return ReactionType::Custom {
            animated: false,
            id: EmojiId::new(id),
            name: Some(name.to_string()),
        };
    }
    ReactionType::Unicode(emoji.to_string())
}

pub struct ReactionPipeline<F> {
    store: SharedStore<F>,
}

impl<F> ReactionPipeline<F>
where
    F: ReadFile + WriteFile,
{
    pub fn new(store: SharedStore<F>) -> Self {
        Self { store }
    }

    /// Run one message through the pipeline.
    ///
    /// The store lock is held while checking and while updating statistics,
    /// never across the reaction requests.
    pub async fn process<R: AddReaction>(
        &self,
        msg: &IncomingMessage,
        bot_user_id: Option<u64>,
        reactor: &R,
    ) -> Outcome {
        let reactions = match self.admit(msg, bot_user_id).await {
            Ok(reactions) => reactions,
            Err(skip) => {
                debug!("Skipping message {}: {:?}", msg.message_id, skip);
                return Outcome::Skipped(skip);
            }
        };

        if let Err(failure) = react_pair(reactor, msg, &reactions).await {
            self.store.lock().await.record_failure();
            errors::log_failure(&failure, &msg.channel_label(), msg.message_id);
            return Outcome::Failed(failure);
        }

        let mut store = self.store.lock().await;
        let saved = store.record_success(Utc::now()).then(|| store.save());
        info!(
            "Reacted to message {} in {}",
            msg.message_id,
            msg.channel_label()
        );
        Outcome::Reacted { saved }
    }

    /// Author, channel and content checks, in that order.
    async fn admit(
        &self,
        msg: &IncomingMessage,
        bot_user_id: Option<u64>,
    ) -> Result<ReactionSettings, Skip> {
        if bot_user_id == Some(msg.author_id) {
            return Err(Skip::OwnMessage);
        }
        if msg.author_is_bot {
            return Err(Skip::BotAuthor);
        }

        let store = self.store.lock().await;
        let config = store.config();
        if !config.is_channel_enabled(msg.channel_id) {
            return Err(Skip::ChannelDisabled);
        }
        config
            .content_filters
            .evaluate(&msg.content)
            .map_err(Skip::Filtered)?;

        Ok(config.reactions.clone())
    }
}

/// Win first, then loss. The first failure ends the attempt.
async fn react_pair<R: AddReaction>(
    reactor: &R,
    msg: &IncomingMessage,
    reactions: &ReactionSettings,
) -> Result<(), ReactionFailure> {
    reactor
        .add_reaction(msg.channel_id, msg.message_id, &reactions.win)
        .await?;
    if let Some(delay) = reactions.delay() {
        tokio::time::sleep(delay).await;
    }
    reactor
        .add_reaction(msg.channel_id, msg.message_id, &reactions.loss)
        .await
}
