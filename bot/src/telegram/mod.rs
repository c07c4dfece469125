//! # Telegram Transport
//!
//! File: bot/src/telegram/mod.rs
//!
//! ## Overview
//!
//! Connects the conversation engine to the Telegram Bot API using `teloxide`
//! long polling. Each inbound message becomes an engine `Event`; the reply is
//! sent back to the same chat with HTML parse mode.
//!
//! ## Routing
//!
//! - `/start`, `/cancel`, `/help` are parsed by `Command` and handled by
//!   `on_command`.
//! - Any other text that is not a `/command` goes to `on_text`.
//! - Everything else (stickers, photos, unknown commands, channel posts) is
//!   ignored.
//!
//! The engine is injected into the handlers as a dependency; the session map
//! lives inside it.
//!
use crate::conversation::prompts::escape_html;
use crate::conversation::{ConversationEngine, Event, Reply, UserKey};
use crate::core::error::{GpaBotError, Result};
use std::sync::Arc;
use std::time::Duration;
use teloxide::dispatching::UpdateHandler;
use teloxide::requests::ResponseResult;
use teloxide::prelude::*;
use teloxide::types::{ParseMode, User};
use teloxide::utils::command::BotCommands;
use teloxide::RequestError;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

/// Commands understood by the bot.
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "GPA calculator commands:")]
pub enum Command {
    #[command(description = "begin a new GPA calculation")]
    Start,
    #[command(description = "stop the current calculation")]
    Cancel,
    #[command(description = "show the grade scale")]
    Help,
}

impl Command {
    /// The engine event for this command, sent by `user`.
    fn into_event(self, user: &User) -> Event {
        match self {
            Command::Start => Event::Start {
                mention: mention_html(user),
            },
            Command::Cancel => Event::Cancel,
            Command::Help => Event::Help,
        }
    }
}

/// Checks the token against the API and registers the command list.
///
/// An invalid token fails here, before any task is spawned.
pub async fn connect(bot: &Bot) -> Result<()> {
    let me = bot.get_me().await.map_err(GpaBotError::from)?;
    info!(username = %me.username(), "Authenticated with Telegram");

    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!("Failed to register bot commands: {}", e);
    }
    Ok(())
}

/// Runs the update dispatcher until `shutdown` is cancelled.
pub async fn run_dispatcher(
    bot: Bot,
    engine: Arc<ConversationEngine>,
    shutdown: CancellationToken,
) {
    let mut dispatcher = Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![engine])
        .default_handler(|update| async move {
            trace!("Unhandled update: {:?}", update.id);
        })
        .error_handler(LoggingErrorHandler::with_custom_text(
            "Error while handling a Telegram update",
        ))
        .build();

    let stop = dispatcher.shutdown_token();
    let watcher = tokio::spawn(async move {
        shutdown.cancelled().await;
        loop {
            match stop.shutdown() {
                Ok(done) => {
                    done.await;
                    break;
                }
                // The dispatcher has not started polling yet.
                Err(_) => tokio::time::sleep(Duration::from_millis(100)).await,
            }
        }
    });

    info!("Telegram dispatcher started");
    dispatcher.dispatch().await;
    watcher.abort();
    info!("Telegram dispatcher stopped");
}

/// The update routing tree.
pub fn schema() -> UpdateHandler<RequestError> {
    Update::filter_message()
        .branch(
            dptree::entry()
                .filter_command::<Command>()
                .endpoint(on_command),
        )
        .branch(dptree::filter(|msg: Message| is_free_text(msg.text())).endpoint(on_text))
}

async fn on_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    engine: Arc<ConversationEngine>,
) -> ResponseResult<()> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };
    debug!(user = user.id.0, command = ?cmd, "command received");
    let reply = engine.handle(UserKey(user.id.0), cmd.into_event(user));
    send_reply(&bot, &msg, &reply).await
}

async fn on_text(bot: Bot, msg: Message, engine: Arc<ConversationEngine>) -> ResponseResult<()> {
    let (Some(user), Some(text)) = (msg.from.as_ref(), msg.text()) else {
        return Ok(());
    };
    let reply = engine.handle(UserKey(user.id.0), Event::Text(text.to_string()));
    send_reply(&bot, &msg, &reply).await
}

async fn send_reply(bot: &Bot, msg: &Message, reply: &Reply) -> ResponseResult<()> {
    bot.send_message(msg.chat.id, reply.html())
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}

/// Text that should reach the conversation engine: present and not a command.
fn is_free_text(text: Option<&str>) -> bool {
    text.is_some_and(|t| !t.starts_with('/'))
}

/// HTML link mentioning `user` by full name.
fn mention_html(user: &User) -> String {
    format_mention(user.url().as_str(), &user.full_name())
}

fn format_mention(url: &str, name: &str) -> String {
    format!("<a href=\"{}\">{}</a>", url, escape_html(name))
}
