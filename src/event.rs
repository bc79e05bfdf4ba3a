//! Inbound webhook wire model.
//!
//! One webhook POST carries one Telegram update. Only the fields the
//! dispatcher actually routes on are deserialized; everything else in the
//! payload is ignored. The update is then flattened into an [`InboundEvent`],
//! the single input type of the dispatcher.

use serde::Deserialize;

use crate::errors::BotError;

/// One update as POSTed by the Telegram webhook.
#[derive(Debug, Deserialize)]
pub struct WebhookUpdate {
    #[serde(default)]
    pub message: Option<WireMessage>,
    #[serde(default)]
    pub callback_query: Option<WireCallbackQuery>,
}

#[derive(Debug, Deserialize)]
pub struct WireMessage {
    pub chat: WireChat,
    #[serde(default)]
    pub message_id: Option<i64>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub reply_to_message: Option<Box<WireRepliedTo>>,
}

#[derive(Debug, Deserialize)]
pub struct WireRepliedTo {
    #[serde(default)]
    pub from: Option<WireUser>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WireUser {
    #[serde(default)]
    pub is_bot: bool,
}

#[derive(Debug, Deserialize)]
pub struct WireChat {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct WireCallbackQuery {
    pub id: String,
    #[serde(default)]
    pub message: Option<WireMessage>,
    #[serde(default)]
    pub data: Option<String>,
}

impl WebhookUpdate {
    pub fn from_json(body: &str) -> Result<Self, BotError> {
        serde_json::from_str(body).map_err(|e| BotError::Decode(e.to_string()))
    }
}

/// The dispatcher's input: one inbound event, already classified by shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    /// Plain text message (commands and anything else typed directly)
    TextCommand { chat_id: i64, text: String },
    /// Text message sent as a reply to an earlier message
    TextReply {
        chat_id: i64,
        text: String,
        replied_to_text: String,
        replied_to_is_bot: bool,
    },
    /// Inline keyboard button press
    ButtonPress {
        chat_id: i64,
        message_id: Option<i64>,
        callback_id: String,
        token: String,
    },
}

impl InboundEvent {
    /// Flatten an update into an event. Updates the bot has no use for
    /// (photo messages, presses with no originating chat) yield `None`.
    pub fn from_update(update: WebhookUpdate) -> Option<Self> {
        if let Some(query) = update.callback_query {
            // A press without an attached message has no chat to reply
            // into; nothing can be done with it.
            let message = query.message?;
            return Some(InboundEvent::ButtonPress {
                chat_id: message.chat.id,
                message_id: message.message_id,
                callback_id: query.id,
                token: query.data.unwrap_or_default(),
            });
        }

        let message = update.message?;
        let chat_id = message.chat.id;
        let text = message.text?;

        if let Some(replied) = message.reply_to_message {
            if let Some(replied_to_text) = replied.text {
                return Some(InboundEvent::TextReply {
                    chat_id,
                    text,
                    replied_to_text,
                    replied_to_is_bot: replied.from.map(|u| u.is_bot).unwrap_or(false),
                });
            }
        }

        Some(InboundEvent::TextCommand { chat_id, text })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event_from(json: &str) -> Option<InboundEvent> {
        InboundEvent::from_update(WebhookUpdate::from_json(json).unwrap())
    }

    #[test]
    fn test_plain_message_is_text_command() {
        let event = event_from(r#"{"message": {"chat": {"id": 42}, "text": "/start"}}"#);
        assert_eq!(
            event,
            Some(InboundEvent::TextCommand {
                chat_id: 42,
                text: "/start".to_string()
            })
        );
    }

    #[test]
    fn test_reply_message_carries_quote() {
        let event = event_from(
            r#"{"message": {"chat": {"id": 42}, "text": " KODE-1 ",
                "reply_to_message": {"from": {"id": 7, "is_bot": true}, "text": "Masukkan kode di sini"}}}"#,
        );
        assert_eq!(
            event,
            Some(InboundEvent::TextReply {
                chat_id: 42,
                text: " KODE-1 ".to_string(),
                replied_to_text: "Masukkan kode di sini".to_string(),
                replied_to_is_bot: true,
            })
        );
    }

    #[test]
    fn test_reply_without_quoted_text_is_text_command() {
        let event = event_from(
            r#"{"message": {"chat": {"id": 42}, "text": "hello",
                "reply_to_message": {"from": {"id": 7, "is_bot": true}}}}"#,
        );
        assert_eq!(
            event,
            Some(InboundEvent::TextCommand {
                chat_id: 42,
                text: "hello".to_string()
            })
        );
    }

    #[test]
    fn test_callback_query_is_button_press() {
        let event = event_from(
            r#"{"callback_query": {"id": "cb9", "data": "app_1",
                "message": {"message_id": 5, "chat": {"id": 42}}}}"#,
        );
        assert_eq!(
            event,
            Some(InboundEvent::ButtonPress {
                chat_id: 42,
                message_id: Some(5),
                callback_id: "cb9".to_string(),
                token: "app_1".to_string(),
            })
        );
    }

    #[test]
    fn test_callback_query_without_data_keeps_empty_token() {
        let event = event_from(
            r#"{"callback_query": {"id": "cb9", "message": {"chat": {"id": 42}}}}"#,
        );
        match event {
            Some(InboundEvent::ButtonPress { token, .. }) => assert_eq!(token, ""),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_callback_query_without_message_is_dropped() {
        assert_eq!(
            event_from(r#"{"callback_query": {"id": "cb9", "data": "app_1"}}"#),
            None
        );
    }

    #[test]
    fn test_non_text_message_is_dropped() {
        assert_eq!(event_from(r#"{"message": {"chat": {"id": 42}}}"#), None);
    }

    #[test]
    fn test_invalid_json_is_a_decode_error() {
        assert!(WebhookUpdate::from_json("not json").is_err());
    }
}
