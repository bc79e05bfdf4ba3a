//! Message Handler module for processing incoming text events

use anyhow::Result;
use teloxide::types::ReplyMarkup;
use tracing::{debug, warn};

use super::ui_builder;
use super::Dispatcher;
use crate::netlify::Site;
use crate::texts;

/// Handle a plain text message: the two known commands and the
/// unrecognized-command fallback.
pub async fn handle_text(d: &Dispatcher, chat_id: i64, text: &str) -> Result<()> {
    match text {
        "/start" => handle_start(d, chat_id).await,
        "/hay" => handle_hay(d, chat_id).await,
        _ => {
            debug!(chat_id, "unrecognized command");
            d.sender.send(chat_id, texts::UNKNOWN_COMMAND, None).await?;
            Ok(())
        }
    }
}

/// Handle a text message that quotes an earlier one. Only a reply to the
/// bot's own `/hay` prompt is special; everything else goes through the
/// normal command chain.
pub async fn handle_reply(
    d: &Dispatcher,
    chat_id: i64,
    text: &str,
    replied_to_text: &str,
    replied_to_is_bot: bool,
) -> Result<()> {
    if replied_to_is_bot && replied_to_text == texts::HAY_PROMPT {
        debug!(chat_id, "captured forced-reply input");
        d.sender
            .send(chat_id, &texts::greeting(text.trim()), None)
            .await?;
        return Ok(());
    }

    handle_text(d, chat_id, text).await
}

/// `/start`: list the operator's sites and offer the configured ones as
/// buttons. The directory is queried fresh on every invocation.
async fn handle_start(d: &Dispatcher, chat_id: i64) -> Result<()> {
    debug!(chat_id, "handling /start");

    let sites = match d.directory.list_sites().await {
        Ok(sites) => sites,
        Err(e) => {
            // An unreachable directory and an empty one read the same to
            // the operator.
            warn!(chat_id, error = %e, "site directory unavailable");
            Vec::new()
        }
    };

    let configured: Vec<Site> = sites
        .into_iter()
        .filter(|site| d.sites.contains(&site.name))
        .collect();

    if configured.is_empty() {
        d.sender.send(chat_id, texts::NO_APPS, None).await?;
        return Ok(());
    }

    let keyboard = ui_builder::site_list_keyboard(&configured);
    d.sender
        .send(
            chat_id,
            texts::CHOOSE_APP,
            Some(ReplyMarkup::InlineKeyboard(keyboard)),
        )
        .await?;
    Ok(())
}

/// `/hay`: send the force-reply prompt that anchors the capture path.
async fn handle_hay(d: &Dispatcher, chat_id: i64) -> Result<()> {
    debug!(chat_id, "handling /hay");
    d.sender
        .send(chat_id, texts::HAY_PROMPT, Some(ui_builder::force_reply()))
        .await?;
    Ok(())
}
