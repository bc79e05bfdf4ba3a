//! Outbound chat delivery.
//!
//! The dispatcher speaks to the [`MessageSender`] trait; the production
//! implementation wraps a teloxide [`Bot`]. Replies are sent with HTML
//! formatting (callers escape interpolated text), and button presses are
//! acknowledged separately so the client-side spinner stops even when no
//! reply follows.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{CallbackQueryId, ParseMode, ReplyMarkup};

use crate::errors::BotError;

#[async_trait]
pub trait MessageSender: Send + Sync {
    /// Deliver one message, optionally carrying an inline keyboard or a
    /// force-reply prompt.
    async fn send(
        &self,
        chat_id: i64,
        text: &str,
        control: Option<ReplyMarkup>,
    ) -> Result<(), BotError>;

    /// Acknowledge a button press to the delivery platform.
    async fn ack_button(&self, callback_id: &str) -> Result<(), BotError>;
}

/// Bot-API-backed sender.
pub struct TelegramSender {
    bot: Bot,
}

impl TelegramSender {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl MessageSender for TelegramSender {
    async fn send(
        &self,
        chat_id: i64,
        text: &str,
        control: Option<ReplyMarkup>,
    ) -> Result<(), BotError> {
        let mut request = self
            .bot
            .send_message(ChatId(chat_id), text)
            .parse_mode(ParseMode::Html);
        if let Some(markup) = control {
            request = request.reply_markup(markup);
        }
        request
            .await
            .map_err(|e| BotError::Upstream(e.to_string()))?;
        Ok(())
    }

    async fn ack_button(&self, callback_id: &str) -> Result<(), BotError> {
        self.bot
            .answer_callback_query(CallbackQueryId(callback_id.to_string()))
            .await
            .map_err(|e| BotError::Upstream(e.to_string()))?;
        Ok(())
    }
}
