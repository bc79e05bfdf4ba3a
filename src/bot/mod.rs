//! Bot module: the conversation dispatcher and its handler submodules.
//!
//! - `message_handler`: text commands, the `/hay` prompt, and reply capture
//! - `callback_handler`: inline keyboard button presses
//! - `ui_builder`: keyboards and reply controls
//!
//! The dispatcher holds no conversation state. Each event carries enough
//! context (callback token payload or quoted prompt text) to pick its
//! branch, so concurrent events are independent by construction.

pub mod callback_handler;
pub mod message_handler;
pub mod ui_builder;

use std::sync::Arc;

use anyhow::Result;

use crate::config::SiteCredentialConfig;
use crate::event::InboundEvent;
use crate::gateway::AccessCodeGateway;
use crate::netlify::SiteDirectory;
use crate::telegram::MessageSender;

/// Routes one inbound event at a time through the collaborator seams.
pub struct Dispatcher {
    pub(crate) sites: SiteCredentialConfig,
    pub(crate) directory: Arc<dyn SiteDirectory>,
    pub(crate) gateway: Arc<dyn AccessCodeGateway>,
    pub(crate) sender: Arc<dyn MessageSender>,
}

impl Dispatcher {
    pub fn new(
        sites: SiteCredentialConfig,
        directory: Arc<dyn SiteDirectory>,
        gateway: Arc<dyn AccessCodeGateway>,
        sender: Arc<dyn MessageSender>,
    ) -> Self {
        Self {
            sites,
            directory,
            gateway,
            sender,
        }
    }

    /// Select the branch implied by the event's shape and run it to
    /// completion. Client failures inside a branch become user-facing
    /// replies; an `Err` here only means the reply itself could not be
    /// delivered.
    pub async fn handle_event(&self, event: InboundEvent) -> Result<()> {
        match event {
            InboundEvent::TextCommand { chat_id, text } => {
                message_handler::handle_text(self, chat_id, &text).await
            }
            InboundEvent::TextReply {
                chat_id,
                text,
                replied_to_text,
                replied_to_is_bot,
            } => {
                message_handler::handle_reply(
                    self,
                    chat_id,
                    &text,
                    &replied_to_text,
                    replied_to_is_bot,
                )
                .await
            }
            InboundEvent::ButtonPress {
                chat_id,
                message_id,
                callback_id,
                token,
            } => {
                callback_handler::handle_button_press(
                    self,
                    chat_id,
                    message_id,
                    &callback_id,
                    &token,
                )
                .await
            }
        }
    }
}
