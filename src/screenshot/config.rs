use std::time::Duration;

use crate::screenshot::devices::DeviceProfile;

// Constants for page-load detection
pub const IDLE_POLL_INTERVAL: Duration = Duration::from_millis(100);   // How often network activity is sampled
pub const RELAYOUT_DELAY: Duration = Duration::from_millis(250);       // Pause after resizing for a full-page capture
pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:4444";

// Chrome browser arguments
pub fn chrome_arguments(headless: bool) -> Vec<String> {
    vec![
        "--no-sandbox",
        "--disable-setuid-sandbox",
        "--disable-gpu",
        "--disable-dev-shm-usage",
        "--disable-extensions",
        "--disable-notifications",
        "--disable-infobars",
        "--disable-background-timer-throttling",
        "--disable-backgrounding-occluded-windows",
        "--disable-breakpad",
        "--disable-features=TranslateUI",
        "--disable-renderer-backgrounding",
        "--force-color-profile=srgb",
        "--hide-scrollbars",
        "--mute-audio",
        "--window-size=1920,1080",
        if headless { "--headless=new" } else { "" }
    ].into_iter()
    .filter(|s| !s.is_empty())
    .map(String::from)
    .collect()
}

// Chrome content settings preferences
pub fn chrome_preferences() -> serde_json::Map<String, serde_json::Value> {
    let mut prefs = serde_json::Map::new();
    prefs.insert("profile.default_content_setting_values.images".to_string(), 1.into()); // 1 = allow
    prefs.insert("profile.managed_default_content_settings.javascript".to_string(), 1.into()); // 1 = allow
    prefs.insert("profile.managed_default_content_settings.popups".to_string(), 2.into()); // 2 = block
    prefs.insert("profile.managed_default_content_settings.geolocation".to_string(), 2.into()); // 2 = block
    prefs.insert("profile.managed_default_content_settings.notifications".to_string(), 2.into()); // 2 = block
    prefs
}

/// WebDriver capabilities for a fresh Chrome session, with optional device emulation
pub fn chrome_capabilities(
    headless: bool,
    device: Option<&DeviceProfile>,
) -> serde_json::Map<String, serde_json::Value> {
    let mut chrome_opts = serde_json::Map::new();
    chrome_opts.insert("args".to_string(), serde_json::Value::Array(
        chrome_arguments(headless).into_iter().map(serde_json::Value::String).collect()
    ));
    chrome_opts.insert("prefs".to_string(), serde_json::Value::Object(chrome_preferences()));

    if let Some(device) = device {
        chrome_opts.insert("mobileEmulation".to_string(), device.mobile_emulation());
    }

    let mut caps = serde_json::Map::new();
    caps.insert("browserName".to_string(), "chrome".into());
    caps.insert("goog:chromeOptions".to_string(), serde_json::Value::Object(chrome_opts));
    caps
}
