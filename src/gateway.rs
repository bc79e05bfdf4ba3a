//! Access-code gateway client.
//!
//! Each site's backend keeps its one-time codes in a PostgREST-style
//! datastore (`/rest/v1/access_codes`), reached with the per-site URL and
//! key resolved by the credential config. Codes are opaque strings; the bot
//! never inspects them, it only carries them between the gateway and the
//! operator.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::config::ResolvedCredentials;
use crate::errors::BotError;

#[async_trait]
pub trait AccessCodeGateway: Send + Sync {
    /// Fetch one unused code, if any remain.
    async fn issue_code(&self, creds: &ResolvedCredentials) -> Result<Option<String>, BotError>;

    /// Mark a code consumed. `false` means the code no longer exists or was
    /// already used.
    async fn mark_used(&self, creds: &ResolvedCredentials, code: &str) -> Result<bool, BotError>;
}

#[derive(Debug, Deserialize)]
struct CodeRow {
    code: String,
}

/// Gateway implementation against the per-site PostgREST endpoint.
pub struct SupabaseGateway {
    client: reqwest::Client,
}

impl SupabaseGateway {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for SupabaseGateway {
    fn default() -> Self {
        Self::new()
    }
}

fn codes_endpoint(datastore_url: &str) -> String {
    format!("{}/rest/v1/access_codes", datastore_url.trim_end_matches('/'))
}

#[async_trait]
impl AccessCodeGateway for SupabaseGateway {
    async fn issue_code(&self, creds: &ResolvedCredentials) -> Result<Option<String>, BotError> {
        let response = self
            .client
            .get(codes_endpoint(&creds.datastore_url))
            .query(&[("select", "code"), ("used", "eq.false"), ("limit", "1")])
            .header("apikey", &creds.datastore_key)
            .bearer_auth(&creds.datastore_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(BotError::Upstream(format!(
                "issue code failed: {}",
                response.status()
            )));
        }

        let rows: Vec<CodeRow> = response.json().await?;
        debug!(found = !rows.is_empty(), "queried unused codes");
        Ok(rows.into_iter().next().map(|row| row.code))
    }

    async fn mark_used(&self, creds: &ResolvedCredentials, code: &str) -> Result<bool, BotError> {
        let response = self
            .client
            .patch(codes_endpoint(&creds.datastore_url))
            // The `used=eq.false` guard makes a double-press a no-op
            // instead of a second "success".
            .query(&[
                ("code", format!("eq.{code}")),
                ("used", "eq.false".to_string()),
            ])
            .header("apikey", &creds.datastore_key)
            .bearer_auth(&creds.datastore_key)
            .header("Prefer", "return=representation")
            .json(&serde_json::json!({ "used": true }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(BotError::Upstream(format!(
                "mark used failed: {}",
                response.status()
            )));
        }

        let rows: Vec<serde_json::Value> = response.json().await?;
        Ok(!rows.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_endpoint_normalizes_trailing_slash() {
        assert_eq!(
            codes_endpoint("https://db.example/"),
            "https://db.example/rest/v1/access_codes"
        );
        assert_eq!(
            codes_endpoint("https://db.example"),
            "https://db.example/rest/v1/access_codes"
        );
    }

    #[test]
    fn test_code_row_deserialization() {
        let rows: Vec<CodeRow> =
            serde_json::from_str(r#"[{"code": "ABC123", "used": false}]"#).unwrap();
        assert_eq!(rows[0].code, "ABC123");
    }
}
