//! Callback token grammar for inline keyboard buttons.
//!
//! The whole multi-step conversation is round-tripped through these tokens;
//! nothing is held in memory between events. A token is `action_payload`,
//! where site names and codes are base64-encoded (standard alphabet, so the
//! `_` delimiter can never appear inside a payload field).

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

/// Decoded instruction carried by an inline keyboard button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackToken {
    /// `app_<siteId>`: operator picked a site from the `/start` list
    SelectApp { site_id: String },
    /// `getcode_<name>`: operator asked for a fresh access code
    GetCode { site_name: String },
    /// `markused_<name>_<code>`: operator consumed the code
    MarkUsed { site_name: String, code: String },
}

impl CallbackToken {
    /// Parse raw callback data. Anything that does not match the grammar
    /// yields `None`; pressing a stale or foreign button must never crash
    /// the dispatcher.
    pub fn parse(raw: &str) -> Option<Self> {
        if let Some(site_id) = raw.strip_prefix("app_") {
            if site_id.is_empty() {
                return None;
            }
            return Some(CallbackToken::SelectApp {
                site_id: site_id.to_string(),
            });
        }

        if let Some(encoded) = raw.strip_prefix("getcode_") {
            let site_name = decode_field(encoded)?;
            return Some(CallbackToken::GetCode { site_name });
        }

        if let Some(rest) = raw.strip_prefix("markused_") {
            // Split on the first delimiter only; payload fields are
            // base64 and cannot contain '_' themselves.
            let (encoded_name, encoded_code) = rest.split_once('_')?;
            let site_name = decode_field(encoded_name)?;
            let code = decode_field(encoded_code)?;
            return Some(CallbackToken::MarkUsed { site_name, code });
        }

        None
    }

    /// Encode back into the wire form used as `callback_data`.
    pub fn encode(&self) -> String {
        match self {
            CallbackToken::SelectApp { site_id } => format!("app_{site_id}"),
            CallbackToken::GetCode { site_name } => {
                format!("getcode_{}", BASE64.encode(site_name))
            }
            CallbackToken::MarkUsed { site_name, code } => {
                format!("markused_{}_{}", BASE64.encode(site_name), BASE64.encode(code))
            }
        }
    }
}

fn decode_field(encoded: &str) -> Option<String> {
    let bytes = BASE64.decode(encoded).ok()?;
    let value = String::from_utf8(bytes).ok()?;
    if value.is_empty() {
        return None;
    }
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_app_round_trip() {
        let token = CallbackToken::SelectApp {
            site_id: "4f2a9b".to_string(),
        };
        assert_eq!(token.encode(), "app_4f2a9b");
        assert_eq!(CallbackToken::parse("app_4f2a9b"), Some(token));
    }

    #[test]
    fn test_get_code_wire_form() {
        let token = CallbackToken::GetCode {
            site_name: "site-a".to_string(),
        };
        assert_eq!(token.encode(), "getcode_c2l0ZS1h");
        assert_eq!(CallbackToken::parse("getcode_c2l0ZS1h"), Some(token));
    }

    #[test]
    fn test_mark_used_wire_form() {
        // "site-a" / "ABC123"
        let parsed = CallbackToken::parse("markused_c2l0ZS1h_QUJDMTIz").unwrap();
        assert_eq!(
            parsed,
            CallbackToken::MarkUsed {
                site_name: "site-a".to_string(),
                code: "ABC123".to_string(),
            }
        );
        assert_eq!(parsed.encode(), "markused_c2l0ZS1h_QUJDMTIz");
    }

    #[test]
    fn test_underscores_in_payload_survive_round_trip() {
        let token = CallbackToken::MarkUsed {
            site_name: "my_site_2".to_string(),
            code: "a_b_c".to_string(),
        };
        assert_eq!(CallbackToken::parse(&token.encode()), Some(token));
    }

    #[test]
    fn test_unknown_prefix_is_none() {
        assert_eq!(CallbackToken::parse("delete_3"), None);
        assert_eq!(CallbackToken::parse(""), None);
        assert_eq!(CallbackToken::parse("apppp"), None);
    }

    #[test]
    fn test_malformed_payloads_are_none() {
        // Empty site id
        assert_eq!(CallbackToken::parse("app_"), None);
        // Not base64
        assert_eq!(CallbackToken::parse("getcode_%%%"), None);
        // Missing second field
        assert_eq!(CallbackToken::parse("markused_c2l0ZS1h"), None);
        // Valid base64 of an empty string
        assert_eq!(CallbackToken::parse("getcode_"), None);
    }
}
