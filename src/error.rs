//! Request-level error type and its HTTP mapping.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

use crate::api::models::ErrorResponse;

/// Ways a screenshot request can fail
#[derive(Debug, thiserror::Error)]
pub enum ScreenshotError {
    /// The caller sent an unusable request
    #[error("{0}")]
    Validation(String),

    /// The page could not be loaded, captured or encoded
    #[error("Error capturing screenshot: {0}")]
    Rendering(String),

    /// The captured image could not be stored
    #[error("Error uploading screenshot: {0}")]
    Upload(String),
}

impl ScreenshotError {
    /// Builds a rendering error keeping the full context chain of `err`
    pub fn rendering(err: anyhow::Error) -> Self {
        ScreenshotError::Rendering(format!("{:#}", err))
    }

    /// Builds an upload error keeping the full context chain of `err`
    pub fn upload(err: anyhow::Error) -> Self {
        ScreenshotError::Upload(format!("{:#}", err))
    }
}

impl ResponseError for ScreenshotError {
    fn status_code(&self) -> StatusCode {
        match self {
            ScreenshotError::Validation(_) => StatusCode::BAD_REQUEST,
            ScreenshotError::Rendering(_) | ScreenshotError::Upload(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ScreenshotError::Validation(message) => ErrorResponse::new(message.clone()),
            ScreenshotError::Rendering(cause) => {
                ErrorResponse::with_cause("Error capturing screenshot", cause.clone())
            }
            ScreenshotError::Upload(cause) => {
                ErrorResponse::with_cause("Error uploading screenshot", cause.clone())
            }
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

pub type ScreenshotResult<T> = Result<T, ScreenshotError>;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_json(err: ScreenshotError) -> serde_json::Value {
        let response = err.error_response();
        let bytes = to_bytes(response.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(ScreenshotError::Validation("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ScreenshotError::Rendering("x".into()).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ScreenshotError::Upload("x".into()).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[actix_web::test]
    async fn test_validation_body_has_no_error_field() {
        let body = body_json(ScreenshotError::Validation("URL is required".into())).await;
        assert_eq!(body["status"], "error");
        assert_eq!(body["message"], "URL is required");
        assert!(body.get("error").is_none());
    }

    #[actix_web::test]
    async fn test_rendering_body_carries_cause() {
        let err = ScreenshotError::rendering(anyhow::anyhow!("net::ERR_NAME_NOT_RESOLVED").context("Failed to navigate"));
        let body = body_json(err).await;
        assert_eq!(body["message"], "Error capturing screenshot");
        assert_eq!(body["error"], "Failed to navigate: net::ERR_NAME_NOT_RESOLVED");
    }
}
