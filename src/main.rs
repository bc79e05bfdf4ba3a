use std::sync::Arc;

use anyhow::Result;
use teloxide::Bot;
use tracing::{info, warn};

use aksesbot::bot::Dispatcher;
use aksesbot::config::AppConfig;
use aksesbot::gateway::SupabaseGateway;
use aksesbot::netlify::NetlifyDirectory;
use aksesbot::telegram::TelegramSender;
use aksesbot::webhook::{self, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let config = AppConfig::from_env()?;
    info!(port = config.port, "starting aksesbot");

    if config.sites.is_empty() {
        warn!("BOT_SITES is empty; /start will never find a configured app");
    }

    let bot = Bot::new(&config.bot_token);
    let dispatcher = Dispatcher::new(
        config.sites.clone(),
        Arc::new(NetlifyDirectory::new(&config.netlify_token)),
        Arc::new(SupabaseGateway::new()),
        Arc::new(TelegramSender::new(bot)),
    );

    webhook::run_server(
        config.port,
        AppState {
            dispatcher: Arc::new(dispatcher),
        },
    )
    .await
}
