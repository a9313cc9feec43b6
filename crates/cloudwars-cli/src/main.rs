//! cloudwars-client: join a CloudWars game, print its height, make one move
//!
//! Usage: `cloudwars-client [host] [port] [name] [color]`
//!
//! Positional arguments override `CLOUDWARS_*` environment variables, which
//! override the built-in defaults (127.0.0.1:3333, Mike, red).

use anyhow::{Context, Result};
use cloudwars_client::{ClientConfig, config::parse_port, play};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn config_from_args(mut config: ClientConfig, args: &[String]) -> Result<ClientConfig> {
    if let Some(host) = args.first() {
        config.host = host.clone();
    }
    if let Some(port) = args.get(1) {
        config.port = parse_port(port)?;
    }
    if let Some(name) = args.get(2) {
        config.name = name.clone();
    }
    if let Some(color) = args.get(3) {
        config.color = color.parse()?;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging; stdout is kept for game output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = config_from_args(ClientConfig::from_env()?, &args)?;

    info!(
        "Joining {}:{} as {} ({})",
        config.host, config.port, config.name, config.color
    );

    let report = play(&config)
        .await
        .with_context(|| format!("session with {}:{} failed", config.host, config.port))?;

    for message in &report.messages {
        if message.starts_with("err") {
            warn!("Server replied: {}", message);
        }
        println!("{}", message);
    }
    if let Some(reply) = report.move_reply.as_ref().filter(|r| r.is_structured()) {
        println!("{}", reply.content());
    }
    if let Some(height) = report.height() {
        println!("{}", height);
    }

    Ok(())
}
