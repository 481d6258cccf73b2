use std::sync::Arc;
use tokio::io::BufReader;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use robosight_tank_bot::config::BotConfig;
use robosight_tank_bot::metrics::Metrics;
use robosight_tank_bot::net::session::BotSession;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize logging on stderr; stdout is the protocol channel
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env("BOT_LOG"))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    info!("Robosight Tank Bot v{}", env!("CARGO_PKG_VERSION"));

    let config = BotConfig::load_or_default();

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        anyhow::bail!(e);
    }
    info!(
        "Configuration loaded: seed={:?}, strict_input={}, max_line_bytes={}",
        config.seed, config.strict_input, config.max_line_bytes
    );

    let metrics = Arc::new(Metrics::new());
    let mut session = BotSession::new(&config, metrics.clone());

    let mut stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();

    let result = session.run(&mut stdin, &mut stdout).await;

    info!("Session summary: {}", metrics.summary());

    if let Err(e) = result {
        error!("Session error: {}", e);
        return Err(e.into());
    }

    info!("Bot stopped");
    Ok(())
}
