use anyhow::Result;
use portfolio_site::config::Config;
use portfolio_site::server::{self, AppState};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("portfolio_site=info".parse()?),
        )
        .init();

    info!("Starting portfolio site");

    let config = Config::from_env()?;
    info!(
        "Locale prefix policy: {}, detection: {}",
        config.locale_prefix, config.locale_detection
    );
    if config.telegram_bot_token.is_none() || config.telegram_chat_id.is_none() {
        info!("Telegram not configured; contact form submissions will fail");
    }

    let state = AppState::load(config)?;
    server::run(state).await
}
