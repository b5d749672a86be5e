use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};

use screenshot_uploader::api::config::ApiConfig;
use screenshot_uploader::api::{build_service, start_server};
use screenshot_uploader::utils::logger::init_logger;

/// Screenshot web pages and upload them to S3
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Address to bind to (overrides HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Write logs to a timestamped file in this directory instead of stdout
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

#[actix_web::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logger
    init_logger(cli.log_dir.as_deref())?;

    // Configure API
    let mut config = match ApiConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {:#}", e);
            return Err(e);
        }
    };
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }

    let service = build_service(&config).await?;
    let (host, port) = config.bind_address();
    info!("Screenshot API listening at http://{}:{}", host, port);

    // Start server
    start_server(&host, port, service).await?;

    Ok(())
}
