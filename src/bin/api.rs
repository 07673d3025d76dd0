use forex_strategy_assistant::{api::start_server, AssistantConfig, StrategyAssistant};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables before the filter reads RUST_LOG
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AssistantConfig::from_env()?;

    info!("🚀 Forex Strategy Assistant - API Server");
    info!("📍 Port: {}", config.port);

    // Refuse to start without the stop words a normalizing level depends on
    let assistant = match StrategyAssistant::from_config(&config) {
        Ok(assistant) => Arc::new(assistant),
        Err(e) => {
            error!("Failed to initialize assistant: {}", e);
            return Err(e.into());
        }
    };

    info!("✅ Assistant initialized");
    info!("📡 Starting API server...");

    start_server(assistant, config.port).await?;

    Ok(())
}
