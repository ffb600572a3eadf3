//! Telegram bot for receiving operator commands
//!
//! Long-polls `getUpdates`, filters to the authorized chat and forwards
//! commands to the monitoring loop over a channel. Only commands that need
//! loop state go through the channel; greetings are answered in place.

use crate::error::Result;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};

/// Commands the monitoring loop handles between cycles.
#[derive(Debug, Clone)]
pub enum BotCommand {
    /// Report streak, phase and history depth.
    Status,
    /// Probe post/delete permissions on the target chat and report back.
    CheckPermissions,
}

pub struct TelegramBot {
    http: Client,
    bot_token: String,
    chat_id: String,
    last_update_id: RwLock<i64>,
    command_tx: mpsc::Sender<BotCommand>,
}

#[derive(Debug, Deserialize)]
struct TelegramUpdate {
    update_id: i64,
    message: Option<TelegramMessage>,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct TelegramMessage {
    message_id: i64,
    chat: TelegramChat,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TelegramChat {
    id: i64,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct GetUpdatesResponse {
    ok: bool,
    result: Vec<TelegramUpdate>,
}

#[derive(Debug, Serialize)]
struct SendMessageRequest {
    chat_id: String,
    text: String,
    parse_mode: String,
}

impl TelegramBot {
    pub fn new(bot_token: String, chat_id: String, command_tx: mpsc::Sender<BotCommand>) -> Self {
        Self {
            http: Client::new(),
            bot_token,
            chat_id,
            last_update_id: RwLock::new(0),
            command_tx,
        }
    }

    /// Start polling for updates
    pub async fn start_polling(self: Arc<Self>) {
        tracing::info!("Starting Telegram command listener...");

        loop {
            match self.poll_updates().await {
                Ok(updates) => {
                    for update in updates {
                        if let Some(msg) = update.message {
                            // Only process messages from the authorized chat
                            if msg.chat.id.to_string() == self.chat_id {
                                if let Some(text) = msg.text {
                                    self.handle_message(&text).await;
                                }
                            }
                        }

                        let mut last_id = self.last_update_id.write().await;
                        *last_id = update.update_id + 1;
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to poll Telegram updates: {}", e);
                    tokio::time::sleep(tokio::time::Duration::from_secs(5)).await;
                }
            }

            tokio::time::sleep(tokio::time::Duration::from_millis(500)).await;
        }
    }

    async fn poll_updates(&self) -> Result<Vec<TelegramUpdate>> {
        let last_id = *self.last_update_id.read().await;

        let url = format!(
            "https://api.telegram.org/bot{}/getUpdates?offset={}&timeout=30",
            self.bot_token, last_id
        );

        let response: GetUpdatesResponse = self.http.get(&url).send().await?.json().await?;

        Ok(response.result)
    }

    async fn handle_message(&self, text: &str) {
        let text = text.trim();

        let cmd = if let Some(stripped) = text.strip_prefix('/') {
            let word = stripped.split_whitespace().next().unwrap_or("");
            word.split('@').next().unwrap_or(word) // Remove @botname
        } else {
            return; // Ignore non-commands
        };

        tracing::info!("Received command: /{}", cmd);

        match cmd.to_lowercase().as_str() {
            "start" => {
                self.reply("Bac Bo monitoring bot is running! 🤌").await;
            }
            "help" => {
                self.send_help().await;
            }
            "status" => {
                let _ = self.command_tx.send(BotCommand::Status).await;
            }
            "check_permissions" => {
                let _ = self.command_tx.send(BotCommand::CheckPermissions).await;
            }
            _ => {
                self.reply(&format!(
                    "❓ Unknown command: /{}\nUse /help for available commands",
                    cmd
                ))
                .await;
            }
        }
    }

    async fn send_help(&self) {
        let help_text = "🤖 <b>Bac Bo Signal Bot Commands</b>\n\n\
            /status - Streak, phase and history depth\n\
            /check_permissions - Verify send/delete rights in this chat\n\
            /help - Show this message";

        self.reply(help_text).await;
    }

    async fn reply(&self, text: &str) {
        let url = format!("https://api.telegram.org/bot{}/sendMessage", self.bot_token);

        let request = SendMessageRequest {
            chat_id: self.chat_id.clone(),
            text: text.to_string(),
            parse_mode: "HTML".to_string(),
        };

        if let Err(e) = self.http.post(&url).json(&request).send().await {
            tracing::error!("Failed to send Telegram reply: {}", e);
        }
    }
}
