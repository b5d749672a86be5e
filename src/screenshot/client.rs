use anyhow::{Result, Context};
use fantoccini::{Client, ClientBuilder};
use tracing::{error, debug, trace, warn};

use crate::screenshot::config;
use crate::screenshot::devices::DeviceProfile;
use crate::screenshot::viewport::Viewport;

/// Opens a new, isolated WebDriver session
///
/// Every call starts its own Chrome instance; sessions are never shared
/// between requests.
///
/// # Arguments
/// * `webdriver_url` - WebDriver server URL
/// * `headless` - Whether to run in headless mode
/// * `device` - Optional device profile to emulate for the whole session
///
/// # Returns
/// * `Result<Client>` - A connected WebDriver client or an error
pub async fn create_client(
    webdriver_url: &str,
    headless: bool,
    device: Option<&DeviceProfile>,
) -> Result<Client> {
    trace!("Creating new WebDriver client connecting to {}", webdriver_url);
    let caps = config::chrome_capabilities(headless, device);
    if let Some(device) = device {
        debug!("Emulating device '{}' ({}x{} @{}x)", device.name, device.width, device.height, device.device_scale_factor);
    }

    debug!("Connecting to WebDriver at {}", webdriver_url);
    let client = match ClientBuilder::native()
        .capabilities(caps)
        .connect(webdriver_url)
        .await {
            Ok(client) => client,
            Err(e) => {
                error!("Failed to connect to WebDriver at {}: {}", webdriver_url, e);
                return Err(e).context(format!("Failed to connect to WebDriver at {}", webdriver_url));
            }
        };

    trace!("Successfully created WebDriver client");
    Ok(client)
}

/// Sizes the browser window so that the page viewport matches `viewport`
///
/// WebDriver only controls the outer window size, so the difference between
/// outer and inner dimensions is measured and added back.
pub async fn set_viewport(client: &Client, viewport: Viewport) -> Result<()> {
    debug!("Setting viewport size to {}x{}", viewport.width, viewport.height);
    client.set_window_size(viewport.width, viewport.height).await
        .with_context(|| format!("Failed to set window size to {}x{}", viewport.width, viewport.height))?;

    let inner = client
        .execute("return [window.innerWidth, window.innerHeight];", vec![])
        .await
        .context("Failed to read viewport dimensions")?;

    let (inner_width, inner_height) = match inner.as_array().map(|a| a.as_slice()) {
        Some([w, h]) => (w.as_u64().unwrap_or(0) as u32, h.as_u64().unwrap_or(0) as u32),
        _ => {
            warn!("Unexpected viewport dimensions payload: {}", inner);
            return Ok(());
        }
    };

    if inner_width == viewport.width && inner_height == viewport.height {
        trace!("Viewport matches window size");
        return Ok(());
    }

    let (width, height) = compensated_window_size(viewport, inner_width, inner_height);
    debug!("Compensating for window chrome, resizing window to {}x{}", width, height);
    client.set_window_size(width, height).await
        .with_context(|| format!("Failed to set window size to {}x{}", width, height))?;
    Ok(())
}

/// Outer window size that yields `viewport` given the measured inner size
fn compensated_window_size(viewport: Viewport, inner_width: u32, inner_height: u32) -> (u32, u32) {
    (
        viewport.width.saturating_add(viewport.width.saturating_sub(inner_width)),
        viewport.height.saturating_add(viewport.height.saturating_sub(inner_height)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compensation_adds_window_chrome() {
        let viewport = Viewport { width: 1920, height: 1080 };
        assert_eq!(compensated_window_size(viewport, 1905, 960), (1935, 1200));
    }

    #[test]
    fn test_compensation_ignores_larger_inner_size() {
        let viewport = Viewport { width: 800, height: 600 };
        assert_eq!(compensated_window_size(viewport, 1024, 768), (800, 600));
    }

    #[test]
    fn test_compensation_saturates() {
        let viewport = Viewport { width: u32::MAX, height: u32::MAX - 1 };
        assert_eq!(compensated_window_size(viewport, 3840, 2160), (u32::MAX, u32::MAX));
    }
}
