//! # Configuration Module
//!
//! Process configuration and the per-site credential mapping. The mapping
//! itself is built once at startup and is immutable afterwards; the secret
//! *values* it points at are read from the environment at call time, so a
//! rotated key is picked up without a restart.

use crate::errors::BotError;
use std::collections::HashMap;
use std::env;

pub const DEFAULT_PORT: u16 = 8080;
pub const NETLIFY_API_BASE: &str = "https://api.netlify.com";

/// Names of the environment variables holding one site's datastore secrets.
#[derive(Debug, Clone)]
pub struct SiteSecretNames {
    pub datastore_url_env: String,
    pub datastore_key_env: String,
}

/// Secret values resolved for one interaction. Both fields are non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCredentials {
    pub datastore_url: String,
    pub datastore_key: String,
}

/// Immutable mapping `site name -> secret variable names`.
#[derive(Debug, Clone, Default)]
pub struct SiteCredentialConfig {
    entries: HashMap<String, SiteSecretNames>,
}

impl SiteCredentialConfig {
    /// Build the mapping from a list of site names. Secret variable names
    /// are derived by convention: `MY-SITE` -> `MY_SITE_DATASTORE_URL` /
    /// `MY_SITE_DATASTORE_KEY`.
    pub fn from_sites<I, S>(sites: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries = HashMap::new();
        for site in sites {
            let name = site.as_ref().trim();
            if name.is_empty() {
                continue;
            }
            let prefix = env_prefix(name);
            entries.insert(
                name.to_string(),
                SiteSecretNames {
                    datastore_url_env: format!("{prefix}_DATASTORE_URL"),
                    datastore_key_env: format!("{prefix}_DATASTORE_KEY"),
                },
            );
        }
        Self { entries }
    }

    /// Read the site list from `BOT_SITES` (comma separated).
    pub fn from_env() -> Self {
        let raw = env::var("BOT_SITES").unwrap_or_default();
        Self::from_sites(raw.split(','))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, site_name: &str) -> bool {
        self.entries.contains_key(site_name)
    }

    pub fn secret_names(&self, site_name: &str) -> Option<&SiteSecretNames> {
        self.entries.get(site_name)
    }

    /// Resolve a site's secrets against the process environment.
    pub fn resolve(&self, site_name: &str) -> Result<ResolvedCredentials, BotError> {
        self.resolve_with(site_name, |name| env::var(name).ok())
    }

    /// Resolve a site's secrets through an arbitrary lookup. A variable
    /// that is unset or blank counts as missing; when anything is missing
    /// the error names every missing variable so the operator can fix the
    /// deployment in one pass.
    pub fn resolve_with<F>(
        &self,
        site_name: &str,
        lookup: F,
    ) -> Result<ResolvedCredentials, BotError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let names = self
            .secret_names(site_name)
            .ok_or_else(|| BotError::MissingSecrets {
                site: site_name.to_string(),
                names: vec![],
            })?;

        let mut missing = Vec::new();
        let url = non_blank(lookup(&names.datastore_url_env));
        if url.is_none() {
            missing.push(names.datastore_url_env.clone());
        }
        let key = non_blank(lookup(&names.datastore_key_env));
        if key.is_none() {
            missing.push(names.datastore_key_env.clone());
        }

        match (url, key) {
            (Some(datastore_url), Some(datastore_key)) => Ok(ResolvedCredentials {
                datastore_url,
                datastore_key,
            }),
            _ => Err(BotError::MissingSecrets {
                site: site_name.to_string(),
                names: missing,
            }),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// `my-site.example` -> `MY_SITE_EXAMPLE`
fn env_prefix(site_name: &str) -> String {
    site_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// Process-level configuration loaded once in `main`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bot_token: String,
    pub netlify_token: String,
    pub port: u16,
    pub sites: SiteCredentialConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        use anyhow::Context;

        let bot_token =
            env::var("TELEGRAM_BOT_TOKEN").context("TELEGRAM_BOT_TOKEN must be set")?;
        let netlify_token =
            env::var("NETLIFY_ACCESS_TOKEN").context("NETLIFY_ACCESS_TOKEN must be set")?;
        let port = match env::var("PORT") {
            Ok(raw) => raw.parse().context("PORT must be a number")?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            bot_token,
            netlify_token,
            port,
            sites: SiteCredentialConfig::from_env(),
        })
    }
}
