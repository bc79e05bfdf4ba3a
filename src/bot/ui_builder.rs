//! UI Builder module for creating keyboards and reply controls

use teloxide::types::{ForceReply, InlineKeyboardButton, InlineKeyboardMarkup, ReplyMarkup};

use crate::netlify::Site;
use crate::texts;
use crate::token::CallbackToken;

/// One button per configured site, one site per row, in directory order.
pub fn site_list_keyboard(sites: &[Site]) -> InlineKeyboardMarkup {
    let buttons: Vec<Vec<InlineKeyboardButton>> = sites
        .iter()
        .map(|site| {
            vec![InlineKeyboardButton::callback(
                site.name.clone(),
                CallbackToken::SelectApp {
                    site_id: site.id.clone(),
                }
                .encode(),
            )]
        })
        .collect();

    InlineKeyboardMarkup::new(buttons)
}

/// Single button offering code issuance for the selected site.
pub fn get_code_keyboard(site_name: &str) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
        texts::GET_CODE_BUTTON,
        CallbackToken::GetCode {
            site_name: site_name.to_string(),
        }
        .encode(),
    )]])
}

/// Single button that marks the issued code consumed. The code rides along
/// in the token; nothing is remembered server-side.
pub fn mark_used_keyboard(site_name: &str, code: &str) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
        texts::MARK_USED_BUTTON,
        CallbackToken::MarkUsed {
            site_name: site_name.to_string(),
            code: code.to_string(),
        }
        .encode(),
    )]])
}

/// Force-reply control for the `/hay` prompt.
pub fn force_reply() -> ReplyMarkup {
    ReplyMarkup::ForceReply(ForceReply::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::types::InlineKeyboardButtonKind;

    fn callback_data(button: &InlineKeyboardButton) -> &str {
        match &button.kind {
            InlineKeyboardButtonKind::CallbackData(data) => data,
            other => panic!("expected callback button, got {other:?}"),
        }
    }

    #[test]
    fn test_site_list_keyboard_one_row_per_site_in_order() {
        let sites = vec![
            Site {
                id: "1".to_string(),
                name: "site-a".to_string(),
                admin_url: None,
            },
            Site {
                id: "2".to_string(),
                name: "site-b".to_string(),
                admin_url: None,
            },
        ];

        let InlineKeyboardMarkup {
            inline_keyboard: keyboard,
        } = site_list_keyboard(&sites);

        assert_eq!(keyboard.len(), 2);
        assert_eq!(keyboard[0].len(), 1);
        assert_eq!(keyboard[0][0].text, "site-a");
        assert_eq!(callback_data(&keyboard[0][0]), "app_1");
        assert_eq!(keyboard[1][0].text, "site-b");
        assert_eq!(callback_data(&keyboard[1][0]), "app_2");
    }

    #[test]
    fn test_get_code_keyboard_encodes_site_name() {
        let InlineKeyboardMarkup {
            inline_keyboard: keyboard,
        } = get_code_keyboard("site-a");

        assert_eq!(keyboard.len(), 1);
        assert_eq!(keyboard[0][0].text, texts::GET_CODE_BUTTON);
        assert_eq!(callback_data(&keyboard[0][0]), "getcode_c2l0ZS1h");
    }

    #[test]
    fn test_mark_used_keyboard_round_trips_through_token() {
        let InlineKeyboardMarkup {
            inline_keyboard: keyboard,
        } = mark_used_keyboard("site-a", "ABC123");

        let token = CallbackToken::parse(callback_data(&keyboard[0][0])).unwrap();
        assert_eq!(
            token,
            CallbackToken::MarkUsed {
                site_name: "site-a".to_string(),
                code: "ABC123".to_string(),
            }
        );
    }
}
