use forex_strategy_assistant::{AssistantConfig, StrategyAssistant};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables before the filter reads RUST_LOG
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let config = AssistantConfig::from_env()?;
    let assistant = StrategyAssistant::from_config(&config)?;

    info!(level = ?assistant.level(), "Strategy assistant CLI starting");

    let mut stdout = tokio::io::stdout();
    stdout
        .write_all(format!("{}\n> ", assistant.greet()).as_bytes())
        .await?;
    stdout.flush().await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();

        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            break;
        }

        let reply = if let Some(level) = line.strip_prefix("/risk") {
            let level = level.trim();
            assistant
                .risk_advice(if level.is_empty() { None } else { Some(level) })
                .to_string()
        } else {
            // "query | params" passes params through to the domain layer
            let (query, params) = line.split_once('|').unwrap_or((line, ""));
            assistant.handle_turn(query.trim(), params.trim())
        };

        stdout.write_all(format!("{}\n> ", reply).as_bytes()).await?;
        stdout.flush().await?;
    }

    info!("Strategy assistant CLI exiting");
    Ok(())
}
