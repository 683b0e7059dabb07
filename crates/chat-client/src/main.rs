// crates/chat-client/src/main.rs

use anyhow::Result;
use clap::Parser;
use tokio::io::BufReader;
use tracing::info;

use chat_client::cli::Cli;
use chat_client::{network, ClientConversation};

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    if cli.debug {
        init_tracing();
    }

    let config = cli.into_config()?;
    let addr = config.addr_string();

    println!("Attempting connection to {}", addr);
    let stream = network::connect(&config).await?;

    let report = ClientConversation::new(
        stream,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        config.prompt(),
    )
    .with_idle_timeout(config.idle_timeout())
    .run()
    .await?;

    info!(sent = report.sent, received = report.received, "session finished");
    println!("Connection to {} closed, exiting.", addr);

    Ok(())
}
