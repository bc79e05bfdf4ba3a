//! # Aksesbot
//!
//! A Telegram webhook bot that lists an operator's deployed Netlify sites
//! and retrieves one-time access codes from each site's backend datastore.
//! The conversation is stateless: multi-step flows are reconstructed per
//! event from callback-token payloads and reply-quote matching.

pub mod bot;
pub mod config;
pub mod errors;
pub mod event;
pub mod gateway;
pub mod netlify;
pub mod telegram;
pub mod texts;
pub mod token;
pub mod webhook;
