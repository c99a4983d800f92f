//! PredictX - A Terminal UI for a binary prediction market
//!
//! Reads market state from the PredictX contract and places bets against
//! it, built with ratatui and alloy.

use predictx::{App, Config, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Pick up RPC URL / signer key overrides from .env if present
    dotenvy::dotenv().ok();

    // Log to a rolling file; stdout belongs to the TUI
    let log_dir = predictx::config::log_dir().unwrap_or_else(|_| std::path::PathBuf::from("."));
    let file_appender = tracing_appender::rolling::daily(log_dir, "predictx.log");
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "predictx=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false),
        )
        .init();

    // Load configuration
    let config = Config::load_or_default()?;

    // Run the application
    let mut app = App::new(config).await?;
    app.run().await?;

    Ok(())
}
