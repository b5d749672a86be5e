use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{ScreenshotError, ScreenshotResult};
use crate::screenshot::{closest_resolution, device_names, find_device, CaptureMode, DeviceProfile, OutputFormat};

pub const DEFAULT_TARGET_WIDTH: u32 = 1920;
pub const DEFAULT_TARGET_HEIGHT: u32 = 1080;

/// Largest accepted `targetWidth` / `targetHeight`
pub const MAX_DIMENSION: u32 = 16384;

/// Raw query string of `GET /screenshot`
///
/// Every field is kept as text so that validation can answer with the
/// API's own error body instead of a framework parse error.
#[derive(Debug, Default, Deserialize, Clone)]
pub struct ScreenshotQuery {
    pub url: Option<String>,

    #[serde(rename = "targetWidth")]
    pub target_width: Option<String>,

    #[serde(rename = "targetHeight")]
    pub target_height: Option<String>,

    pub format: Option<String>,

    pub fullscreen: Option<String>,

    pub device: Option<String>,
}

/// A validated screenshot request
#[derive(Debug, Clone)]
pub struct ScreenshotRequest {
    /// Page to render
    pub url: String,

    /// Requested width in pixels
    pub target_width: u32,

    /// Requested height in pixels
    pub target_height: u32,

    /// Output image format
    pub format: OutputFormat,

    /// Capture the whole scrollable page
    pub fullscreen: bool,

    /// Device profile to emulate
    pub device: Option<&'static DeviceProfile>,
}

impl ScreenshotRequest {
    /// Validates a raw query
    ///
    /// # Returns
    /// * `ScreenshotResult<Self>` - The request, or a validation error for a
    ///   missing URL, a non-positive dimension or an unknown device
    pub fn from_query(query: ScreenshotQuery) -> ScreenshotResult<Self> {
        let format = OutputFormat::parse_lenient(query.format.as_deref());
        trace!("Normalized format {:?} to {}", query.format, format);

        let url = match query.url {
            Some(url) if !url.trim().is_empty() => url,
            _ => return Err(ScreenshotError::Validation("URL is required".to_string())),
        };

        let device = match query.device.as_deref() {
            None => None,
            Some(name) => match find_device(name) {
                Some(profile) => Some(profile),
                None => {
                    debug!("Rejected unknown device '{}'", name);
                    return Err(ScreenshotError::Validation(format!(
                        "Device '{}' is not supported. Supported devices are: {}",
                        name,
                        device_names().join(", ")
                    )));
                }
            },
        };

        let target_width = parse_dimension("targetWidth", query.target_width.as_deref(), DEFAULT_TARGET_WIDTH)?;
        let target_height = parse_dimension("targetHeight", query.target_height.as_deref(), DEFAULT_TARGET_HEIGHT)?;

        let fullscreen = query
            .fullscreen
            .as_deref()
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Ok(Self {
            url,
            target_width,
            target_height,
            format,
            fullscreen,
            device,
        })
    }

    /// Chooses how the viewport is determined
    ///
    /// A device profile wins over full-page mode, which wins over the
    /// aspect-ratio lookup.
    pub fn capture_mode(&self) -> CaptureMode {
        if let Some(device) = self.device {
            CaptureMode::Device(device)
        } else if self.fullscreen {
            CaptureMode::FullPage { width: self.target_width }
        } else {
            CaptureMode::Fixed(closest_resolution(self.target_width, self.target_height))
        }
    }
}

fn parse_dimension(name: &str, value: Option<&str>, default: u32) -> ScreenshotResult<u32> {
    match value {
        None => Ok(default),
        Some(raw) => match raw.trim().parse::<u32>() {
            Ok(parsed) if parsed > MAX_DIMENSION => Err(ScreenshotError::Validation(format!(
                "{} must not exceed {}, got {}",
                name, MAX_DIMENSION, parsed
            ))),
            Ok(parsed) if parsed > 0 => Ok(parsed),
            _ => Err(ScreenshotError::Validation(format!(
                "{} must be a positive integer, got '{}'",
                name, raw
            ))),
        },
    }
}

/// Response for a successful upload
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ScreenshotResponse {
    /// Always "success"
    pub status: String,

    /// Human-readable outcome
    pub message: String,

    /// Public URL of the uploaded image
    pub url: String,
}

impl ScreenshotResponse {
    pub fn uploaded(url: String) -> Self {
        Self {
            status: "success".to_string(),
            message: "Screenshot uploaded successfully!".to_string(),
            url,
        }
    }
}

/// Error response for API endpoints
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ErrorResponse {
    /// Always "error"
    pub status: String,

    /// Error message details
    pub message: String,

    /// Underlying failure, for server-side errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
            error: None,
        }
    }

    pub fn with_cause(message: impl Into<String>, cause: impl Into<String>) -> Self {
        Self {
            error: Some(cause.into()),
            ..Self::new(message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screenshot::ScreenResolution;

    fn query(url: &str) -> ScreenshotQuery {
        ScreenshotQuery {
            url: Some(url.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults() {
        let request = ScreenshotRequest::from_query(query("https://example.com")).unwrap();
        assert_eq!(request.target_width, 1920);
        assert_eq!(request.target_height, 1080);
        assert_eq!(request.format, OutputFormat::Png);
        assert!(!request.fullscreen);
        assert!(request.device.is_none());
    }

    #[test]
    fn test_missing_or_blank_url() {
        for q in [ScreenshotQuery::default(), query(""), query("   ")] {
            match ScreenshotRequest::from_query(q) {
                Err(ScreenshotError::Validation(message)) => assert_eq!(message, "URL is required"),
                other => panic!("expected validation error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_unknown_device_lists_supported_names() {
        let q = ScreenshotQuery {
            device: Some("UnknownDevice123".to_string()),
            ..query("https://example.com")
        };
        match ScreenshotRequest::from_query(q) {
            Err(ScreenshotError::Validation(message)) => {
                assert!(message.starts_with("Device 'UnknownDevice123' is not supported."));
                assert!(message.contains("iPhone X"));
                assert!(message.contains("Pixel 5"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_or_garbage_dimensions_rejected() {
        for (w, h) in [("0", "1080"), ("1920", "0"), ("abc", "1080"), ("1920", "-5")] {
            let q = ScreenshotQuery {
                target_width: Some(w.to_string()),
                target_height: Some(h.to_string()),
                ..query("https://example.com")
            };
            assert!(matches!(ScreenshotRequest::from_query(q), Err(ScreenshotError::Validation(_))));
        }
    }

    #[test]
    fn test_oversized_dimensions_rejected() {
        let q = ScreenshotQuery {
            target_width: Some("4294967295".to_string()),
            fullscreen: Some("true".to_string()),
            ..query("https://example.com")
        };
        match ScreenshotRequest::from_query(q) {
            Err(ScreenshotError::Validation(message)) => {
                assert_eq!(message, "targetWidth must not exceed 16384, got 4294967295");
            }
            other => panic!("expected validation error, got {:?}", other),
        }

        let q = ScreenshotQuery {
            target_height: Some(MAX_DIMENSION.to_string()),
            ..query("https://example.com")
        };
        assert_eq!(ScreenshotRequest::from_query(q).unwrap().target_height, MAX_DIMENSION);
    }

    #[test]
    fn test_fullscreen_is_case_insensitive() {
        let q = ScreenshotQuery {
            fullscreen: Some("TRUE".to_string()),
            ..query("https://example.com")
        };
        assert!(ScreenshotRequest::from_query(q).unwrap().fullscreen);

        let q = ScreenshotQuery {
            fullscreen: Some("yes".to_string()),
            ..query("https://example.com")
        };
        assert!(!ScreenshotRequest::from_query(q).unwrap().fullscreen);
    }

    #[test]
    fn test_capture_mode_precedence() {
        let q = ScreenshotQuery {
            device: Some("iPhone X".to_string()),
            fullscreen: Some("true".to_string()),
            ..query("https://example.com")
        };
        let request = ScreenshotRequest::from_query(q).unwrap();
        assert!(matches!(request.capture_mode(), CaptureMode::Device(d) if d.name == "iPhone X"));

        let q = ScreenshotQuery {
            fullscreen: Some("true".to_string()),
            target_width: Some("1366".to_string()),
            ..query("https://example.com")
        };
        let request = ScreenshotRequest::from_query(q).unwrap();
        assert_eq!(request.capture_mode(), CaptureMode::FullPage { width: 1366 });

        let q = ScreenshotQuery {
            target_width: Some("1000".to_string()),
            target_height: Some("1000".to_string()),
            ..query("https://example.com")
        };
        let request = ScreenshotRequest::from_query(q).unwrap();
        match request.capture_mode() {
            CaptureMode::Fixed(ScreenResolution { width, height, .. }) => assert_eq!((width, height), (1024, 768)),
            other => panic!("expected fixed viewport, got {:?}", other),
        }
    }

    #[test]
    fn test_error_response_serialization() {
        let body = serde_json::to_value(ErrorResponse::new("URL is required")).unwrap();
        assert_eq!(body, serde_json::json!({"status": "error", "message": "URL is required"}));

        let body = serde_json::to_value(ErrorResponse::with_cause("Error capturing screenshot", "boom")).unwrap();
        assert_eq!(body["error"], "boom");
    }
}
