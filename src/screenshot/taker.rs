use anyhow::{Context, Result};
use async_trait::async_trait;
use fantoccini::{Client, Locator};
use std::fmt;
use std::path::Path;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::{debug, error, info, instrument, trace, warn};

use crate::screenshot::client::{create_client, set_viewport};
use crate::screenshot::config::{IDLE_POLL_INTERVAL, RELAYOUT_DELAY};
use crate::screenshot::encode::encode_screenshot;
use crate::screenshot::model::{CaptureJob, CaptureMode};
use crate::screenshot::viewport::{full_page_viewport, Viewport};
use crate::screenshot::PageRenderer;

// Returns the document state and the number of finished resource loads.
// Chrome stops recording resource timings after 250 entries unless the
// buffer is enlarged, which would freeze the count on heavy pages.
const NETWORK_PROBE: &str = r#"
    if (!window.__screenshotBufferRaised) {
        performance.setResourceTimingBufferSize(1000000);
        window.__screenshotBufferRaised = true;
    }
    return [document.readyState, performance.getEntriesByType('resource').length];
"#;

const BODY_HEIGHT_PROBE: &str = r#"
    const body = document.body;
    return body ? body.getBoundingClientRect().height : 0;
"#;

/// Renders pages through a WebDriver server, one Chrome session per capture
pub struct WebDriverRenderer {
    webdriver_url: String,
    headless: bool,
    navigation_timeout: Duration,
    network_idle: Duration,
}

impl fmt::Debug for WebDriverRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebDriverRenderer")
            .field("webdriver_url", &self.webdriver_url)
            .field("headless", &self.headless)
            .field("navigation_timeout", &self.navigation_timeout)
            .finish()
    }
}

impl WebDriverRenderer {
    /// Creates a renderer bound to a WebDriver server
    ///
    /// # Arguments
    /// * `webdriver_url` - WebDriver server URL
    /// * `headless` - Whether Chrome runs headless
    /// * `navigation_timeout` - Upper bound on waiting for the network to go quiet
    /// * `network_idle` - How long resource loading must stay flat to count as quiet
    pub fn new(
        webdriver_url: &str,
        headless: bool,
        navigation_timeout: Duration,
        network_idle: Duration,
    ) -> Self {
        debug!("Creating WebDriverRenderer for {}, headless: {}", webdriver_url, headless);
        Self {
            webdriver_url: webdriver_url.to_string(),
            headless,
            navigation_timeout,
            network_idle,
        }
    }

    /// Drives an open session through navigation, sizing and capture
    async fn capture_with_client(&self, client: &Client, job: &CaptureJob, output: &Path) -> Result<()> {
        if let CaptureMode::Fixed(resolution) = job.mode {
            set_viewport(client, Viewport::from(resolution)).await?;
        }

        debug!("Navigating to URL: {}", job.url);
        match client.goto(&job.url).await {
            Ok(_) => trace!("Successfully navigated to {}", job.url),
            Err(e) => {
                error!("Failed to navigate to {}: {}", job.url, e);
                return Err(e).context(format!("Failed to navigate to {}", job.url));
            }
        }
        self.wait_for_network_idle(client).await?;

        if let CaptureMode::FullPage { width } = job.mode {
            // Lay the page out at the requested width before measuring it
            set_viewport(client, Viewport { width, height: 1080 }).await?;
            sleep(RELAYOUT_DELAY).await;
            let body_height = measure_body_height(client).await?;
            let viewport = full_page_viewport(width, body_height);
            debug!("Full page capture: body is {:.1}px tall, viewport {}x{}", body_height, viewport.width, viewport.height);
            set_viewport(client, viewport).await?;
            sleep(RELAYOUT_DELAY).await;
        }

        debug!("Capturing screenshot");
        let png = match client.screenshot().await {
            Ok(data) => {
                trace!("Screenshot captured successfully, {} bytes", data.len());
                data
            }
            Err(e) => {
                error!("Failed to capture screenshot: {}", e);
                return Err(e).context("Failed to capture screenshot");
            }
        };

        let encoded = encode_screenshot(png, job.format)?;
        tokio::fs::write(output, &encoded).await
            .with_context(|| format!("Failed to write screenshot to {}", output.display()))?;
        info!("Screenshot saved to {}", output.display());
        Ok(())
    }

    /// Waits until the document has loaded and no new resources finished
    /// loading for the configured idle window
    async fn wait_for_network_idle(&self, client: &Client) -> Result<()> {
        debug!("Waiting for network to go idle (window {:?})", self.network_idle);
        let deadline = Instant::now() + self.navigation_timeout;
        let mut tracker = IdleTracker::new(self.network_idle, Instant::now());

        loop {
            let probe = client.execute(NETWORK_PROBE, vec![]).await
                .context("Failed to probe page load state")?;
            let ready_state = probe.get(0).and_then(|v| v.as_str()).unwrap_or("loading");
            let resource_count = probe.get(1).and_then(|v| v.as_u64()).unwrap_or(0);

            let now = Instant::now();
            trace!("Page state {}, {} resources loaded", ready_state, resource_count);
            if tracker.observe(ready_state, resource_count, now) {
                debug!("Network idle after {} resources", resource_count);
                return Ok(());
            }

            if now >= deadline {
                warn!("Page did not go idle within {:?}", self.navigation_timeout);
                anyhow::bail!("Navigation timeout of {} ms exceeded", self.navigation_timeout.as_millis());
            }
            sleep(IDLE_POLL_INTERVAL).await;
        }
    }
}

/// Decides when a page counts as quiet: loaded, with a resource count that
/// has not moved for the idle window
#[derive(Debug)]
struct IdleTracker {
    idle_window: Duration,
    last_count: Option<u64>,
    quiet_since: Instant,
}

impl IdleTracker {
    fn new(idle_window: Duration, now: Instant) -> Self {
        Self {
            idle_window,
            last_count: None,
            quiet_since: now,
        }
    }

    /// Records one sample and reports whether the page is idle
    fn observe(&mut self, ready_state: &str, resource_count: u64, now: Instant) -> bool {
        if ready_state != "complete" || self.last_count != Some(resource_count) {
            self.last_count = Some(resource_count);
            self.quiet_since = now;
            return false;
        }
        now.duration_since(self.quiet_since) >= self.idle_window
    }
}

async fn measure_body_height(client: &Client) -> Result<f64> {
    client.wait().at_most(Duration::from_secs(10)).for_element(Locator::Css("body")).await
        .context("Page has no body element")?;
    let height = client.execute(BODY_HEIGHT_PROBE, vec![]).await
        .context("Failed to measure page body")?;
    height.as_f64().context("Body height was not a number")
}

#[async_trait]
impl PageRenderer for WebDriverRenderer {
    #[instrument(skip(self, output), fields(url = %job.url, format = %job.format))]
    async fn capture(&self, job: &CaptureJob, output: &Path) -> Result<()> {
        url::Url::parse(&job.url)
            .with_context(|| format!("Invalid URL: {}", job.url))?;

        let device = match job.mode {
            CaptureMode::Device(profile) => Some(profile),
            _ => None,
        };
        let client = create_client(&self.webdriver_url, self.headless, device).await?;

        let result = self.capture_with_client(&client, job, output).await;

        // The session is closed whether or not the capture succeeded
        match client.close().await {
            Ok(_) => trace!("WebDriver session closed"),
            Err(e) => warn!("Error closing WebDriver session: {}", e),
        }

        if let Err(e) = &result {
            warn!("Failed to take screenshot of {}: {:#}", job.url, e);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(500);

    #[test]
    fn test_idle_after_flat_window() {
        let start = Instant::now();
        let mut tracker = IdleTracker::new(WINDOW, start);
        assert!(!tracker.observe("complete", 12, start));
        assert!(!tracker.observe("complete", 12, start + Duration::from_millis(400)));
        assert!(tracker.observe("complete", 12, start + Duration::from_millis(500)));
    }

    #[test]
    fn test_new_resources_restart_the_window() {
        let start = Instant::now();
        let mut tracker = IdleTracker::new(WINDOW, start);
        tracker.observe("complete", 250, start);
        assert!(!tracker.observe("complete", 251, start + Duration::from_millis(450)));
        assert!(!tracker.observe("complete", 251, start + Duration::from_millis(900)));
        assert!(tracker.observe("complete", 251, start + Duration::from_millis(950)));
    }

    #[test]
    fn test_loading_document_is_never_idle() {
        let start = Instant::now();
        let mut tracker = IdleTracker::new(WINDOW, start);
        for step in 0..20 {
            assert!(!tracker.observe("interactive", 3, start + Duration::from_millis(step * 100)));
        }
    }

    #[test]
    fn test_probe_lifts_resource_timing_limit() {
        let raise = NETWORK_PROBE.find("setResourceTimingBufferSize").unwrap();
        let count = NETWORK_PROBE.find("getEntriesByType('resource')").unwrap();
        assert!(raise < count);
    }
}
