//! Page rendering: viewport selection, device profiles and WebDriver capture.

pub mod client;
pub mod config;
pub mod devices;
pub mod encode;
pub mod model;
pub mod taker;
pub mod viewport;

use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;

pub use devices::{device_names, find_device, DeviceProfile};
pub use model::{CaptureJob, CaptureMode, CapturedImage, OutputFormat, TempScreenshot};
pub use taker::WebDriverRenderer;
pub use viewport::{closest_resolution, ScreenResolution, Viewport};

/// Something that can load a page and write a screenshot of it to disk
#[async_trait]
pub trait PageRenderer: Send + Sync {
    /// Renders `job.url` and writes the encoded image to `output`
    ///
    /// Any browser session opened for the capture must be closed before
    /// this returns, on success and on failure.
    async fn capture(&self, job: &CaptureJob, output: &Path) -> Result<()>;
}
