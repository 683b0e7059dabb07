//! Chat server: accepts one client and converses until it logs out.

use anyhow::Result;
use chat_server::config::Config;
use chat_server::server;
use tracing::info;

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = Config::from_env()?;
    let listener = server::bind(&config).await?;

    println!("Server starting on port {}.", config.port);
    println!("Ctrl + C to exit.");

    let report = server::serve_one(listener, config.script(), config.idle_timeout).await?;

    println!("Client terminated connection.");
    info!(sent = report.sent, received = report.received, "session finished");

    Ok(())
}
