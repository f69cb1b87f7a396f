use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use weatherbot::{AppConfig, QueryOrchestrator, telemetry, web};

/// Chat assistant that answers questions with live weather context
#[derive(Debug, Parser)]
#[command(name = "weatherbot", version, about)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, env = "WEATHERBOT_CONFIG")]
    config: Option<PathBuf>,

    /// Address to listen on
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// JSON model config list
    #[arg(long)]
    model_config: Option<PathBuf>,
}

impl Cli {
    fn apply(self, config: &mut AppConfig) {
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(path) = self.model_config {
            config.agent.model_config_path = path;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match cli.config.clone() {
        Some(path) => AppConfig::load_from_path(Some(path))?,
        None => AppConfig::load()?,
    };
    cli.apply(&mut config);
    config.apply_defaults();

    let _telemetry = telemetry::init(&config.logging)?;

    let orchestrator =
        QueryOrchestrator::from_config(&config).context("Failed to set up the assistant")?;

    web::run(&config.server, orchestrator).await
}
