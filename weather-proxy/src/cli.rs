use std::net::SocketAddr;

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::Password;
use weather_core::{FileConfig, ProxyConfig};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-proxy", version, about = "Weather dashboard proxy")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the proxy (the default when no subcommand is given).
    Serve,

    /// Store the OpenWeather API key in the config file.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Serve) {
            Command::Serve => serve().await,
            Command::Configure => configure(),
        }
    }
}

async fn serve() -> anyhow::Result<()> {
    let config = ProxyConfig::load()?;
    let state = weather_proxy::AppState::from_config(&config);
    let app = weather_proxy::router(state, &config.allowed_origins);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!(
        %addr,
        origins = ?config.allowed_origins,
        upstream = %config.upstream_url,
        "weather proxy listening"
    );
    axum::serve(listener, app).await.context("Server terminated")?;

    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let mut file = FileConfig::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    let api_key = api_key.trim().to_string();
    if api_key.is_empty() {
        anyhow::bail!("API key must not be empty");
    }

    file.set_api_key(api_key);
    file.save()?;

    println!("Saved API key to {}", FileConfig::config_file_path()?.display());
    Ok(())
}
