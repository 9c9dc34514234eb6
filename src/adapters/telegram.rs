use crate::config::TelegramConfig;
use crate::domain::model::{InboundEvent, OutboundMessage};
use crate::domain::ports::{ChatTransport, EventSource};
use crate::utils::error::{KahinError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
    pub callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub from: Option<User>,
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,
    pub message: Option<Message>,
    pub data: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct User {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct Chat {
    pub id: i64,
}

impl Update {
    /// Only text messages and button presses matter to the bot.
    pub fn into_event(self) -> Option<InboundEvent> {
        if let Some(message) = self.message {
            return Some(InboundEvent::Text {
                sender: message.from?.id,
                chat: message.chat.id,
                message_id: message.message_id,
                text: message.text?,
            });
        }

        let query = self.callback_query?;
        Some(InboundEvent::Action {
            sender: query.from.id,
            chat: query.message.map(|m| m.chat.id).unwrap_or(query.from.id),
            callback_id: query.id,
            data: query.data.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Serialize)]
struct GetUpdates {
    offset: i64,
    timeout: u64,
    allowed_updates: [&'static str; 2],
}

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: i64,
    text: &'a str,
    parse_mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_parameters: Option<ReplyParameters>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_markup: Option<InlineKeyboardMarkup<'a>>,
}

#[derive(Debug, Serialize)]
struct ReplyParameters {
    message_id: i64,
    allow_sending_without_reply: bool,
}

#[derive(Debug, Serialize)]
struct InlineKeyboardMarkup<'a> {
    inline_keyboard: Vec<Vec<InlineKeyboardButton<'a>>>,
}

#[derive(Debug, Serialize)]
struct InlineKeyboardButton<'a> {
    text: &'a str,
    callback_data: &'a str,
}

#[derive(Debug, Serialize)]
struct AnswerCallbackQuery<'a> {
    callback_query_id: &'a str,
}

/// Telegram Bot API over HTTPS with long polling.
pub struct TelegramClient {
    client: Client,
    config: TelegramConfig,
    next_offset: AtomicI64,
}

impl TelegramClient {
    pub fn new(config: TelegramConfig) -> Result<Self> {
        // The HTTP timeout must outlast the long poll.
        let client = Client::builder()
            .timeout(Duration::from_secs(config.poll_timeout_secs + 30))
            .build()?;
        Ok(Self {
            client,
            config,
            next_offset: AtomicI64::new(0),
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.config.api_base.trim_end_matches('/'),
            self.config.bot_token,
            method
        )
    }

    async fn call<B: Serialize + ?Sized, T: DeserializeOwned>(&self, method: &str, body: &B) -> Result<T> {
        let response = self
            .client
            .post(self.method_url(method))
            .json(body)
            .send()
            .await
            .map_err(|e| KahinError::upstream(format!("Telegram {} failed: {}", method, e.without_url())))?;

        let status = response.status();
        let parsed: ApiResponse<T> = response.json().await.map_err(|e| {
            KahinError::upstream(format!("Telegram {} returned {} with unreadable body: {}", method, status, e.without_url()))
        })?;

        match (parsed.ok, parsed.result) {
            (true, Some(result)) => Ok(result),
            _ => Err(KahinError::upstream(format!(
                "Telegram {} returned {}: {}",
                method,
                status,
                parsed.description.unwrap_or_else(|| "no description".to_string())
            ))),
        }
    }

    pub async fn get_updates(&self) -> Result<Vec<Update>> {
        let request = GetUpdates {
            offset: self.next_offset.load(Ordering::SeqCst),
            timeout: self.config.poll_timeout_secs,
            allowed_updates: ["message", "callback_query"],
        };
        let updates: Vec<Update> = self.call("getUpdates", &request).await?;

        if let Some(last) = updates.iter().map(|u| u.update_id).max() {
            self.next_offset.store(last + 1, Ordering::SeqCst);
        }
        Ok(updates)
    }
}

#[async_trait]
impl EventSource for TelegramClient {
    async fn next_events(&self) -> Result<Vec<InboundEvent>> {
        let updates = self.get_updates().await?;
        tracing::debug!("Received {} updates", updates.len());
        Ok(updates.into_iter().filter_map(Update::into_event).collect())
    }
}

#[async_trait]
impl ChatTransport for TelegramClient {
    async fn send(&self, message: &OutboundMessage) -> Result<()> {
        let reply_markup = (!message.buttons.is_empty()).then(|| InlineKeyboardMarkup {
            inline_keyboard: message
                .buttons
                .iter()
                .map(|b| {
                    vec![InlineKeyboardButton {
                        text: &b.label,
                        callback_data: &b.data,
                    }]
                })
                .collect(),
        });

        let request = SendMessage {
            chat_id: message.chat_id,
            text: &message.text,
            parse_mode: "HTML",
            reply_parameters: message.reply_to.map(|message_id| ReplyParameters {
                message_id,
                allow_sending_without_reply: true,
            }),
            reply_markup,
        };

        let _: serde_json::Value = self.call("sendMessage", &request).await?;
        Ok(())
    }

    async fn acknowledge(&self, callback_id: &str) -> Result<()> {
        let _: bool = self
            .call(
                "answerCallbackQuery",
                &AnswerCallbackQuery {
                    callback_query_id: callback_id,
                },
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_update_becomes_event() {
        let update: Update = serde_json::from_value(serde_json::json!({
            "update_id": 7,
            "message": {
                "message_id": 42,
                "from": {"id": 1001, "is_bot": false, "first_name": "Ada"},
                "chat": {"id": 5005, "type": "private"},
                "date": 0,
                "text": "31.07.2002"
            }
        }))
        .unwrap();

        assert_eq!(
            update.into_event(),
            Some(InboundEvent::Text {
                sender: 1001,
                chat: 5005,
                message_id: 42,
                text: "31.07.2002".to_string()
            })
        );
    }

    #[test]
    fn test_callback_update_becomes_action() {
        let update: Update = serde_json::from_value(serde_json::json!({
            "update_id": 8,
            "callback_query": {
                "id": "cb-1",
                "from": {"id": 1001, "is_bot": false, "first_name": "Ada"},
                "message": {"message_id": 43, "chat": {"id": 5005, "type": "private"}, "date": 0},
                "chat_instance": "x",
                "data": "zodiac_traits"
            }
        }))
        .unwrap();

        assert_eq!(
            update.into_event(),
            Some(InboundEvent::Action {
                sender: 1001,
                chat: 5005,
                callback_id: "cb-1".to_string(),
                data: "zodiac_traits".to_string()
            })
        );
    }

    #[test]
    fn test_non_text_message_is_skipped() {
        let update: Update = serde_json::from_value(serde_json::json!({
            "update_id": 9,
            "message": {"message_id": 44, "chat": {"id": 5005, "type": "private"}, "date": 0, "from": {"id": 1}}
        }))
        .unwrap();
        assert!(update.into_event().is_none());
    }
}
