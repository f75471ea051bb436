//! Coffee Revenue Server
//!
//! Loads the trained revenue model once and serves the prediction form and
//! JSON endpoint.
//!
//! # Usage
//! ```sh
//! MODEL_PATH=models/coffee.pkl cargo run -- --port 5000
//! ```
//!
//! # Environment Variables
//! - `HOST` / `PORT` - Listener address (default: 0.0.0.0:5000)
//! - `DEBUG` - Verbose logging (default: false)
//! - `MODEL_PATH` - Model artifact (default: models/coffee.pkl)
//! - `OBSERVABILITY_ENABLED` - Enable metrics reporting (default: true)
//! - `OBSERVABILITY_INTERVAL` - Interval in seconds between metric outputs (default: 60)

use anyhow::Result;
use clap::Parser;
use coffee_revenue::application::system::Application;
use coffee_revenue::config::Config;
use std::path::PathBuf;
use tracing::{Level, info};
use tracing_subscriber::prelude::*;

/// Command-line overrides; anything not given falls back to the environment.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(long)]
    port: Option<u16>,

    /// Path to the model artifact
    #[arg(long)]
    model_path: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

impl Args {
    fn apply(self, mut config: Config) -> Config {
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(path) = self.model_path {
            config.model.path = path;
        }
        config.server.debug |= self.debug;
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = args.apply(Config::from_env()?);

    let level = if config.server.debug {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false).pretty();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .with(stdout_layer)
        .init();

    info!("Coffee Revenue Server {} starting...", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration loaded: Bind={}, Model={:?}, Debug={}",
        config.server.bind_address(),
        config.model.path,
        config.server.debug
    );

    let app = Application::build(config).await?;
    app.run().await
}
