//! Discord gateway adapter.
//!
//! Translates serenity message events into [`InboundMessage`]s, hands them to
//! the dispatcher and posts each reply chunk back to the originating channel.

use std::sync::Arc;

use secrecy::ExposeSecret;
use serenity::all::{
    Context, CreateAllowedMentions, CreateMessage, EventHandler, GatewayIntents, Message, Ready,
};
use serenity::async_trait;
use serenity::Client;
use tracing::Instrument;

use feelgood_core::command::InboundMessage;
use feelgood_infra::credentials::Credentials;
use feelgood_types::profile::UserId;

use crate::state::ConcreteDispatcher;

/// Gateway intents the bot needs to read commands in guilds and DMs.
pub fn intents() -> GatewayIntents {
    GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT
}

/// Convert a serenity message into the dispatcher's view of it.
pub fn to_inbound(msg: &Message) -> InboundMessage {
    InboundMessage::new(
        UserId::new(msg.author.id.to_string()),
        msg.author.bot,
        msg.content.clone(),
    )
}

/// Build an outgoing reply. Mentions are never parsed, so user-supplied
/// profile values and provider titles cannot ping anyone.
pub fn reply_message(chunk: &str) -> CreateMessage {
    CreateMessage::new()
        .content(chunk)
        .allowed_mentions(CreateAllowedMentions::new())
}

/// Serenity event handler backed by the command dispatcher.
pub struct Handler {
    dispatcher: Arc<ConcreteDispatcher>,
}

impl Handler {
    pub fn new(dispatcher: Arc<ConcreteDispatcher>) -> Self {
        Self { dispatcher }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }

        let span = tracing::info_span!(
            "discord_message",
            channel_id = %msg.channel_id,
            author_id = %msg.author.id,
        );

        async {
            let replies = self.dispatcher.handle(&to_inbound(&msg)).await;
            for (index, chunk) in replies.iter().enumerate() {
                if let Err(e) = msg.channel_id.send_message(&ctx.http, reply_message(chunk)).await {
                    tracing::error!(chunk = index, error = %e, "failed to send reply");
                }
            }
        }
        .instrument(span)
        .await;
    }

    async fn ready(&self, _ctx: Context, ready: Ready) {
        tracing::info!(
            user = %ready.user.name,
            guilds = ready.guilds.len(),
            "connected to Discord"
        );
    }
}

/// Connect to Discord and run until a shutdown signal arrives.
pub async fn run(credentials: &Credentials, dispatcher: ConcreteDispatcher) -> anyhow::Result<()> {
    let handler = Handler::new(Arc::new(dispatcher));

    let mut client = Client::builder(credentials.discord_token.expose_secret(), intents())
        .event_handler(handler)
        .await?;

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        crate::shutdown_signal().await;
        tracing::info!("shutdown signal received, disconnecting");
        shard_manager.shutdown_all().await;
    });

    client.start().await?;
    tracing::info!("Discord client stopped");
    Ok(())
}
