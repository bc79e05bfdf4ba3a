//! Callback Handler module for processing inline keyboard button presses

use anyhow::Result;
use teloxide::types::ReplyMarkup;
use tracing::{debug, warn};

use super::ui_builder;
use super::Dispatcher;
use crate::config::ResolvedCredentials;
use crate::errors::BotError;
use crate::texts;
use crate::token::CallbackToken;

/// Handle one button press. Whatever the branch does, the press itself is
/// acknowledged so the client-side loading indicator stops.
pub async fn handle_button_press(
    d: &Dispatcher,
    chat_id: i64,
    message_id: Option<i64>,
    callback_id: &str,
    token: &str,
) -> Result<()> {
    debug!(chat_id, ?message_id, token, "handling button press");

    match CallbackToken::parse(token) {
        Some(CallbackToken::SelectApp { site_id }) => select_app(d, chat_id, &site_id).await?,
        Some(CallbackToken::GetCode { site_name }) => get_code(d, chat_id, &site_name).await?,
        Some(CallbackToken::MarkUsed { site_name, code }) => {
            mark_used(d, chat_id, &site_name, &code).await?
        }
        None => {
            // Stale or foreign button; nothing to say.
            warn!(chat_id, token, "unrecognized callback token ignored");
        }
    }

    d.sender.ack_button(callback_id).await?;
    Ok(())
}

/// `app_<id>`: re-resolve the site against a fresh directory snapshot and
/// offer code issuance for it.
async fn select_app(d: &Dispatcher, chat_id: i64, site_id: &str) -> Result<()> {
    let sites = match d.directory.list_sites().await {
        Ok(sites) => sites,
        Err(e) => {
            warn!(chat_id, error = %e, "site directory unavailable");
            Vec::new()
        }
    };

    let selected = sites
        .into_iter()
        .find(|site| site.id == site_id)
        .filter(|site| d.sites.contains(&site.name));

    let Some(site) = selected else {
        d.sender.send(chat_id, texts::APP_NOT_FOUND, None).await?;
        return Ok(());
    };

    let text = texts::app_selected(&site.name, site.admin_url.as_deref());
    let keyboard = ui_builder::get_code_keyboard(&site.name);
    d.sender
        .send(chat_id, &text, Some(ReplyMarkup::InlineKeyboard(keyboard)))
        .await?;
    Ok(())
}

/// `getcode_<name>`: resolve the site's secrets and ask its gateway for an
/// unused code.
async fn get_code(d: &Dispatcher, chat_id: i64, site_name: &str) -> Result<()> {
    let Some(creds) = resolve_or_report(d, chat_id, site_name).await? else {
        return Ok(());
    };

    match d.gateway.issue_code(&creds).await {
        Ok(Some(code)) => {
            let text = texts::code_issued(site_name, &code);
            let keyboard = ui_builder::mark_used_keyboard(site_name, &code);
            d.sender
                .send(chat_id, &text, Some(ReplyMarkup::InlineKeyboard(keyboard)))
                .await?;
        }
        Ok(None) => {
            d.sender.send(chat_id, texts::NO_CODE, None).await?;
        }
        Err(e) => {
            warn!(chat_id, site = site_name, error = %e, "code issuance failed");
            d.sender.send(chat_id, texts::NO_CODE, None).await?;
        }
    }
    Ok(())
}

/// `markused_<name>_<code>`: resolve secrets and mark the code consumed.
async fn mark_used(d: &Dispatcher, chat_id: i64, site_name: &str, code: &str) -> Result<()> {
    let Some(creds) = resolve_or_report(d, chat_id, site_name).await? else {
        return Ok(());
    };

    match d.gateway.mark_used(&creds, code).await {
        Ok(true) => {
            d.sender
                .send(chat_id, &texts::mark_used_ok(code), None)
                .await?;
        }
        Ok(false) => {
            d.sender.send(chat_id, texts::MARK_USED_FAILED, None).await?;
        }
        Err(e) => {
            warn!(chat_id, site = site_name, error = %e, "mark used failed");
            d.sender.send(chat_id, texts::MARK_USED_FAILED, None).await?;
        }
    }
    Ok(())
}

/// Resolve a site's secrets, reporting failures to the operator. `None`
/// means the interaction already ended with an error reply; the gateway
/// must not be called.
async fn resolve_or_report(
    d: &Dispatcher,
    chat_id: i64,
    site_name: &str,
) -> Result<Option<ResolvedCredentials>> {
    match d.sites.resolve(site_name) {
        Ok(creds) => Ok(Some(creds)),
        Err(BotError::MissingSecrets { names, .. }) if !names.is_empty() => {
            warn!(chat_id, site = site_name, "secrets unset for site");
            d.sender
                .send(chat_id, &texts::missing_secrets(&names), None)
                .await?;
            Ok(None)
        }
        Err(e) => {
            // Token named a site the config does not know (renamed or
            // removed since the button was sent).
            warn!(chat_id, site = site_name, error = %e, "credential resolution failed");
            d.sender.send(chat_id, texts::APP_NOT_FOUND, None).await?;
            Ok(None)
        }
    }
}
