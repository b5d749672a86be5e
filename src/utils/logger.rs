use anyhow::Result;
use std::path::Path;
use std::fs;
use chrono::Local;
use tracing::info;
use tracing_subscriber::{FmtSubscriber, EnvFilter};

/// Installs the global tracing subscriber
///
/// Filtering follows `RUST_LOG` and defaults to `info`. With a log directory
/// the output goes to a timestamped file inside it, otherwise to stdout.
pub fn init_logger(log_dir: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_target(false);

    match log_dir {
        Some(log_dir) => {
            // Create log directory if it doesn't exist
            if !log_dir.exists() {
                fs::create_dir_all(log_dir)?;
            }

            let timestamp = Local::now().format("%Y%m%d_%H%M%S");
            let log_file = log_dir.join(format!("screenshot_uploader_{}.log", timestamp));

            let subscriber = builder
                .with_ansi(false)
                .with_writer(fs::File::create(&log_file)?)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
            info!("Logger initialized, writing to {}", log_file.display());
        }
        None => {
            tracing::subscriber::set_global_default(builder.finish())?;
            info!("Logger initialized");
        }
    }

    Ok(())
}
