use actix_web::{web, HttpResponse};
use tracing::{info, warn, instrument};

use crate::api::models::{ScreenshotQuery, ScreenshotRequest};
use crate::api::processor::ScreenshotService;
use crate::error::ScreenshotResult;

/// HTTP handler for `GET /screenshot`
///
/// Validates the query, renders and uploads the page, and answers with the
/// public URL of the image.
///
/// # Arguments
/// * `query` - Raw query parameters
/// * `service` - Shared screenshot service
///
/// # Returns
/// * 200 with the uploaded URL, 400 for invalid input, 500 for rendering or upload failures
#[instrument(skip(service))]
pub async fn screenshot_handler(
    query: web::Query<ScreenshotQuery>,
    service: web::Data<ScreenshotService>,
) -> ScreenshotResult<HttpResponse> {
    info!("Received screenshot request for URL: {:?}", query.url);

    let request = match ScreenshotRequest::from_query(query.into_inner()) {
        Ok(request) => request,
        Err(e) => {
            warn!("Rejected screenshot request: {}", e);
            return Err(e);
        }
    };

    let response = service.process(request).await?;
    Ok(HttpResponse::Ok().json(response))
}
