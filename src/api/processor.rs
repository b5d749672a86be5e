use anyhow::{Context, Result};
use chrono::Local;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, trace};

use crate::api::models::{ScreenshotRequest, ScreenshotResponse};
use crate::error::{ScreenshotError, ScreenshotResult};
use crate::screenshot::{CaptureJob, CaptureMode, CapturedImage, PageRenderer, TempScreenshot};
use crate::storage::{public_url, ObjectStore, StorageKeyBuilder};

/// Orchestrates one screenshot request: render, upload, respond
pub struct ScreenshotService {
    renderer: Arc<dyn PageRenderer>,
    store: Arc<dyn ObjectStore>,
    keys: StorageKeyBuilder,
    public_domain: String,
    scratch_dir: PathBuf,
}

impl fmt::Debug for ScreenshotService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScreenshotService")
            .field("public_domain", &self.public_domain)
            .field("scratch_dir", &self.scratch_dir)
            .finish()
    }
}

impl ScreenshotService {
    /// Creates the service and makes sure the scratch directory exists
    ///
    /// # Arguments
    /// * `renderer` - Page rendering collaborator
    /// * `store` - Object storage collaborator
    /// * `public_domain` - URL prefix under which uploaded objects are served
    /// * `scratch_dir` - Directory for per-request temporary captures
    pub fn new(
        renderer: Arc<dyn PageRenderer>,
        store: Arc<dyn ObjectStore>,
        public_domain: impl Into<String>,
        scratch_dir: impl Into<PathBuf>,
    ) -> Result<Self> {
        let scratch_dir = scratch_dir.into();
        trace!("Ensuring screenshot directory exists: {}", scratch_dir.display());
        std::fs::create_dir_all(&scratch_dir)
            .with_context(|| format!("Failed to create directory: {}", scratch_dir.display()))?;

        Ok(Self {
            renderer,
            store,
            keys: StorageKeyBuilder::new(),
            public_domain: public_domain.into(),
            scratch_dir,
        })
    }

    /// Processes a validated request end to end
    ///
    /// This function performs the following steps:
    /// 1. Picks the capture mode (device, full page or closest standard viewport)
    /// 2. Renders the page into a unique temporary file
    /// 3. Uploads the image under a date-partitioned key
    /// 4. Returns the public URL of the upload
    ///
    /// The temporary file is removed on every exit path.
    #[instrument(skip(self, request), fields(url = %request.url))]
    pub async fn process(&self, request: ScreenshotRequest) -> ScreenshotResult<ScreenshotResponse> {
        let mode = request.capture_mode();
        match &mode {
            CaptureMode::Device(device) => debug!("Emulating device '{}'", device.name),
            CaptureMode::FullPage { width } => debug!("Full page capture at width {}", width),
            CaptureMode::Fixed(resolution) => debug!(
                "Using viewport {}x{} for target {}x{}",
                resolution.width, resolution.height, request.target_width, request.target_height
            ),
        }

        let job = CaptureJob {
            url: request.url,
            format: request.format,
            mode,
        };
        let temp = TempScreenshot::new(&self.scratch_dir, job.format);

        // Step 1: render
        info!("Taking screenshot of URL: {}", job.url);
        let image = match self.render(&job, &temp).await {
            Ok(image) => image,
            Err(e) => {
                error!("Error capturing screenshot of {}: {:#}", job.url, e);
                return Err(ScreenshotError::rendering(e));
            }
        };

        // Step 2: upload
        let key = self.keys.build(&Local::now(), job.format);
        debug!("Uploading {} bytes as {}", image.bytes.len(), key);
        if let Err(e) = self.store.put(&key, image.bytes, image.content_type).await {
            error!("Error uploading screenshot of {}: {:#}", job.url, e);
            return Err(ScreenshotError::upload(e));
        }

        let url = public_url(&self.public_domain, &key);
        info!("Screenshot of {} available at {}", job.url, url);
        Ok(ScreenshotResponse::uploaded(url))
    }

    async fn render(&self, job: &CaptureJob, temp: &TempScreenshot) -> Result<CapturedImage> {
        self.renderer.capture(job, temp.path()).await?;

        let bytes = tokio::fs::read(temp.path()).await
            .with_context(|| format!("Failed to read captured screenshot {}", temp.path().display()))?;
        trace!("Read {} bytes from {}", bytes.len(), temp.path().display());

        Ok(CapturedImage {
            bytes,
            content_type: job.format.content_type(),
        })
    }
}
