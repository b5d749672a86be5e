pub mod config;
pub mod handlers;
pub mod models;
pub mod processor;

use actix_web::{web, App, HttpServer};
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

use crate::api::config::ApiConfig;
use crate::api::handlers::screenshot_handler;
use crate::api::processor::ScreenshotService;
use crate::error::ScreenshotError;
use crate::screenshot::WebDriverRenderer;
use crate::storage::S3Storage;

/// Registers the API routes
///
/// Query strings that cannot be deserialized are answered with the same JSON
/// validation error as any other rejected parameter.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    let query_config = web::QueryConfig::default().error_handler(|err, _req| {
        warn!("Rejected malformed query string: {}", err);
        ScreenshotError::Validation(format!("Invalid query parameters: {}", err)).into()
    });

    cfg.service(
        web::resource("/screenshot")
            .app_data(query_config)
            .route(web::get().to(screenshot_handler)),
    );
}

/// Builds the production service from configuration
///
/// # Arguments
/// * `config` - Loaded API configuration
///
/// # Returns
/// * `Result<ScreenshotService>` - Service wired to WebDriver and S3, or an error
pub async fn build_service(config: &ApiConfig) -> Result<ScreenshotService> {
    debug!(
        "Initializing renderer at {}, headless: {}, navigation timeout: {:?}",
        config.webdriver_url, config.headless, config.navigation_timeout
    );
    let renderer = WebDriverRenderer::new(
        &config.webdriver_url,
        config.headless,
        config.navigation_timeout,
        config.network_idle,
    );

    let storage = match S3Storage::new(&config.storage).await {
        Ok(storage) => storage,
        Err(e) => {
            error!("Failed to initialize S3 storage: {:#}", e);
            return Err(e);
        }
    };

    ScreenshotService::new(
        Arc::new(renderer),
        Arc::new(storage),
        config.storage.public_domain.clone(),
        config.screenshot_dir.clone(),
    )
}

/// Starts the API server
///
/// # Arguments
/// * `host` - Host address to bind to
/// * `port` - Port to listen on
/// * `service` - Screenshot service shared by all workers
///
/// # Returns
/// * `Result<()>` - Success or an error
#[instrument(skip(service))]
pub async fn start_server(host: &str, port: u16, service: ScreenshotService) -> Result<()> {
    info!("Starting screenshot API server on {}:{}", host, port);
    let service_data = web::Data::new(service);

    let server_result = HttpServer::new(move || {
        App::new()
            .app_data(service_data.clone())
            .configure(configure_routes)
    })
    .bind((host, port))
    .map_err(|e| {
        error!("Failed to bind to {}:{}: {}", host, port, e);
        e
    })?
    .run()
    .await;

    if let Err(e) = server_result {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    info!("Server shutdown complete");
    Ok(())
}
