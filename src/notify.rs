//! Telegram notifier
//!
//! Sends signal and validation messages to the configured chat over the Bot
//! API. Returned message ids are tracked by the runner so a stale pending
//! signal can be deleted before the next one goes out.

use crate::error::{BotError, Result};
use crate::types::BetSide;
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Clone)]
pub struct Notifier {
    http: Client,
    bot_token: String,
    chat_id: String,
    enabled: bool,
}

#[derive(Debug, Serialize)]
struct SendMessageRequest {
    chat_id: String,
    text: String,
    parse_mode: String,
}

#[derive(Debug, Serialize)]
struct DeleteMessageRequest {
    chat_id: String,
    message_id: i64,
}

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SentMessage {
    message_id: i64,
}

#[derive(Debug, Deserialize)]
struct BotUser {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct ChatMember {
    status: String,
    can_post_messages: Option<bool>,
    can_delete_messages: Option<bool>,
}

impl Notifier {
    pub fn new(bot_token: String, chat_id: String) -> Self {
        Self {
            http: Client::new(),
            bot_token,
            chat_id,
            enabled: true,
        }
    }

    /// A notifier that drops everything, for running without Telegram.
    pub fn disabled() -> Self {
        Self {
            http: Client::new(),
            bot_token: String::new(),
            chat_id: String::new(),
            enabled: false,
        }
    }

    fn url(&self, method: &str) -> String {
        format!("https://api.telegram.org/bot{}/{}", self.bot_token, method)
    }

    /// Send an HTML-formatted message, returning its id when delivered.
    pub async fn send(&self, text: &str) -> Result<Option<i64>> {
        if !self.enabled {
            return Ok(None);
        }

        let request = SendMessageRequest {
            chat_id: self.chat_id.clone(),
            text: text.to_string(),
            parse_mode: "HTML".to_string(),
        };

        let response: ApiResponse<SentMessage> = self
            .http
            .post(self.url("sendMessage"))
            .json(&request)
            .send()
            .await?
            .json()
            .await?;

        match (response.ok, response.result) {
            (true, Some(msg)) => Ok(Some(msg.message_id)),
            _ => Err(BotError::Telegram(
                response
                    .description
                    .unwrap_or_else(|| "sendMessage rejected".to_string()),
            )),
        }
    }

    pub async fn delete(&self, message_id: i64) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let request = DeleteMessageRequest {
            chat_id: self.chat_id.clone(),
            message_id,
        };

        let response: ApiResponse<bool> = self
            .http
            .post(self.url("deleteMessage"))
            .json(&request)
            .send()
            .await?
            .json()
            .await?;

        if response.ok {
            Ok(())
        } else {
            Err(BotError::Telegram(
                response
                    .description
                    .unwrap_or_else(|| "deleteMessage rejected".to_string()),
            ))
        }
    }

    // ----- message builders -----

    pub async fn signal(&self, pattern_id: u32, bet: BetSide) -> Result<Option<i64>> {
        let text = format!(
            "⚠️ <b>PADRÃO {} DETECTADO</b>\n\
            Entrar no {}: {}\n\
            Proteger o empate: 🟡\n\
            Fazer até 1 gale 🔥\n\
            Mais dinheiro e menos amigos 🤏",
            pattern_id,
            bet,
            bet.emoji()
        );
        self.send(&text).await
    }

    pub async fn win(&self, streak: u32) -> Result<Option<i64>> {
        let text = format!(
            "Mais dinheiro no bolso🤌\nPlacar de acertos: {} ✅",
            streak
        );
        self.send(&text).await
    }

    pub async fn gale(&self) -> Result<Option<i64>> {
        self.send("Vamos entrar no 1 Gale🔥").await
    }

    pub async fn loss(&self) -> Result<Option<i64>> {
        self.send("Perdemos no 1 Gale😔, vamos pegar a outra rodada🤌")
            .await
    }

    pub async fn monitoring(&self) -> Result<Option<i64>> {
        self.send("MONITORANDO A MESA🤌").await
    }

    pub async fn error(&self, context: &str, detail: &str) -> Result<Option<i64>> {
        let text = format!("⚠️ <b>{}</b>\n{}", context, detail);
        self.send(&text).await
    }

    /// Operator diagnostic: does the bot have post + delete rights in the
    /// target chat?
    pub async fn check_permissions(&self) -> Result<String> {
        if !self.enabled {
            return Ok("Telegram is not configured.".to_string());
        }

        let me: ApiResponse<BotUser> = self
            .http
            .get(self.url("getMe"))
            .send()
            .await?
            .json()
            .await?;

        let bot_id = match (me.ok, me.result) {
            (true, Some(user)) => user.id,
            _ => {
                return Err(BotError::Telegram(
                    me.description.unwrap_or_else(|| "getMe rejected".to_string()),
                ))
            }
        };

        let member: ApiResponse<ChatMember> = self
            .http
            .get(self.url("getChatMember"))
            .query(&[
                ("chat_id", self.chat_id.as_str()),
                ("user_id", &bot_id.to_string()),
            ])
            .send()
            .await?
            .json()
            .await?;

        let member = match (member.ok, member.result) {
            (true, Some(m)) => m,
            _ => {
                return Err(BotError::Telegram(
                    member
                        .description
                        .unwrap_or_else(|| "getChatMember rejected".to_string()),
                ))
            }
        };

        let can_post = member.can_post_messages.unwrap_or(member.status == "creator");
        let can_delete = member
            .can_delete_messages
            .unwrap_or(member.status == "creator");

        if can_post && can_delete {
            Ok("Bot has the required permissions (send and delete messages). ✅".to_string())
        } else {
            Ok(
                "Bot is missing permissions. Make it an admin that can send and delete messages. ⚠️"
                    .to_string(),
            )
        }
    }
}
