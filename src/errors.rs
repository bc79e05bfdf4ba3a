//! # Bot Error Types Module
//!
//! This module defines the error taxonomy used when handling one inbound
//! event. Every variant is terminal to the current event only; nothing here
//! is fatal to the process.

/// Failure modes of a single dispatched event
#[derive(Debug, Clone)]
pub enum BotError {
    /// Required datastore secrets are missing or empty for a site
    MissingSecrets { site: String, names: Vec<String> },
    /// A directory or gateway call failed or returned a non-success status
    Upstream(String),
    /// Inbound payload could not be decoded into a known event shape
    Decode(String),
}

impl std::fmt::Display for BotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BotError::MissingSecrets { site, names } => {
                write!(f, "missing secrets for {site}: {}", names.join(", "))
            }
            BotError::Upstream(msg) => write!(f, "upstream error: {msg}"),
            BotError::Decode(msg) => write!(f, "decode error: {msg}"),
        }
    }
}

impl std::error::Error for BotError {}

impl From<reqwest::Error> for BotError {
    fn from(err: reqwest::Error) -> Self {
        BotError::Upstream(err.to_string())
    }
}
