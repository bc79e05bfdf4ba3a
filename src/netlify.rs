//! Site directory client.
//!
//! Fetches the operator's deployed sites from the Netlify API. The
//! dispatcher talks to the [`SiteDirectory`] trait so tests can substitute
//! a canned directory; [`NetlifyDirectory`] is the real implementation.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::config::NETLIFY_API_BASE;
use crate::errors::BotError;

/// One deployable site as reported by the directory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Site {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub admin_url: Option<String>,
}

#[async_trait]
pub trait SiteDirectory: Send + Sync {
    async fn list_sites(&self) -> Result<Vec<Site>, BotError>;
}

/// Netlify-backed directory: `GET /api/v1/sites` with a bearer token.
pub struct NetlifyDirectory {
    api_base: String,
    access_token: String,
    client: reqwest::Client,
}

impl NetlifyDirectory {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self::with_base(NETLIFY_API_BASE, access_token)
    }

    pub fn with_base(api_base: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            access_token: access_token.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl SiteDirectory for NetlifyDirectory {
    async fn list_sites(&self) -> Result<Vec<Site>, BotError> {
        let url = format!("{}/api/v1/sites", self.api_base);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(BotError::Upstream(format!(
                "list sites failed: {}",
                response.status()
            )));
        }

        let sites: Vec<Site> = response.json().await?;
        debug!(count = sites.len(), "fetched site directory");
        Ok(sites)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The Netlify response carries far more fields than the bot reads;
    /// deserialization must ignore them.
    #[test]
    fn test_site_deserialization_ignores_extra_fields() {
        let json = r#"{
            "id": "4f2a9b",
            "name": "site-a",
            "admin_url": "https://app.netlify.com/sites/site-a",
            "ssl_url": "https://site-a.netlify.app",
            "created_at": "2024-01-01T00:00:00Z"
        }"#;
        let site: Site = serde_json::from_str(json).unwrap();
        assert_eq!(site.id, "4f2a9b");
        assert_eq!(site.name, "site-a");
        assert_eq!(
            site.admin_url.as_deref(),
            Some("https://app.netlify.com/sites/site-a")
        );
    }

    #[test]
    fn test_site_admin_url_is_optional() {
        let site: Site = serde_json::from_str(r#"{"id": "1", "name": "site-b"}"#).unwrap();
        assert_eq!(site.admin_url, None);
    }
}
