//! Message handling shared by the polling bot and the webhook route

use super::{TelegramClient, Update};
use crate::agent::Orchestrator;
use crate::Result;
use std::sync::Arc;
use tracing::{debug, error, info};

pub const HELP_TEXT: &str = "Hi! I can:\n\
1) Teach investing concepts (beginner → intermediate)\n\
2) Provide neutral market commentary\n\n\
Try:\n\
- Explain ETFs\n\
- What is SIP?\n\
- Why is the market down today?\n\n\
Note: Educational purposes only — not investment advice.";

pub const PONG: &str = "pong ✅";

pub const BLANK_TEXT_REPLY: &str = "Send a text message and I’ll respond.";

pub const APOLOGY: &str = "Sorry — I hit an internal error while generating the response.\n\
Please try again. If it keeps happening, check the bot logs.";

/// What an incoming text amounts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inbound<'a> {
    Command(&'a str),
    Blank,
    Text(&'a str),
}

/// `/start@SomeBot args` → `Command("start")`
pub fn parse_inbound(text: &str) -> Inbound<'_> {
    let text = text.trim();

    if text.is_empty() {
        return Inbound::Blank;
    }

    if let Some(rest) = text.strip_prefix('/') {
        let name = rest
            .split_whitespace()
            .next()
            .unwrap_or("")
            .split('@')
            .next()
            .unwrap_or("");
        return Inbound::Command(name);
    }

    Inbound::Text(text)
}

/// Fixed replies for known commands; `None` means ignore
pub fn command_reply(command: &str) -> Option<&'static str> {
    match command.to_lowercase().as_str() {
        "start" | "help" => Some(HELP_TEXT),
        "ping" => Some(PONG),
        _ => None,
    }
}

pub struct TelegramResponder {
    client: Arc<TelegramClient>,
    orchestrator: Arc<Orchestrator>,
}

impl TelegramResponder {
    pub fn new(client: Arc<TelegramClient>, orchestrator: Arc<Orchestrator>) -> Self {
        Self {
            client,
            orchestrator,
        }
    }

    /// Answer one update. Updates without a text message are ignored.
    pub async fn handle_update(&self, update: &Update) -> Result<()> {
        let Some(message) = update.message.as_ref() else {
            return Ok(());
        };
        let Some(text) = message.text.as_deref() else {
            return Ok(());
        };

        let chat_id = message.chat.id;
        info!(
            update_id = update.update_id,
            chat_id,
            user_id = message.from.as_ref().map(|u| u.id),
            chars = text.chars().count(),
            "Incoming message"
        );

        match parse_inbound(text) {
            Inbound::Command(command) => match command_reply(command) {
                Some(reply) => self.client.send_message(chat_id, reply).await,
                None => {
                    debug!(command, "Ignoring unknown command");
                    Ok(())
                }
            },
            Inbound::Blank => self.client.send_message(chat_id, BLANK_TEXT_REPLY).await,
            Inbound::Text(text) => {
                if let Err(e) = self.client.send_chat_action(chat_id, "typing").await {
                    debug!(error = %e, "Typing indicator failed");
                }

                let reply = match self.orchestrator.handle(text).await {
                    Ok(outcome) => outcome.response,
                    Err(e) => {
                        error!(error = %e, chat_id, "Handler error");
                        APOLOGY.to_string()
                    }
                };

                self.client.send_message(chat_id, &reply).await
            }
        }
    }
}
