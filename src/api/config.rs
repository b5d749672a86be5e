use anyhow::{Context, Result};
use config::{Config, Environment, Source};
use secrecy::SecretString;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::screenshot::config::DEFAULT_WEBDRIVER_URL;

/// Object storage settings
#[derive(Debug)]
pub struct StorageSettings {
    /// S3 region
    pub region: String,

    /// Access key id; the default provider chain is used when absent
    pub access_key_id: Option<String>,

    /// Secret access key
    pub secret_access_key: Option<SecretString>,

    /// Bucket screenshots are uploaded to
    pub bucket: String,

    /// Public URL prefix that serves the bucket
    pub public_domain: String,

    /// Custom endpoint for S3-compatible services
    pub endpoint: Option<String>,
}

/// Configuration for the API
#[derive(Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP server to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Scratch directory for in-flight captures
    pub screenshot_dir: PathBuf,

    /// WebDriver server URL
    pub webdriver_url: String,

    /// Whether to run the browser in headless mode
    pub headless: bool,

    /// Upper bound on waiting for a page to go idle
    pub navigation_timeout: Duration,

    /// How long the network must stay quiet before capturing
    pub network_idle: Duration,

    /// Object storage settings
    pub storage: StorageSettings,
}

// Flat view of the environment; keys are the lowercased variable names
#[derive(Debug, Deserialize)]
struct RawSettings {
    host: String,
    port: u16,
    screenshot_dir: PathBuf,
    webdriver_url: String,
    headless: bool,
    navigation_timeout_secs: u64,
    network_idle_ms: u64,
    aws_region: String,
    aws_access_key_id: Option<String>,
    aws_secret_access_key: Option<String>,
    s3_bucket_name: String,
    s3_domain: String,
    s3_endpoint: Option<String>,
}

impl ApiConfig {
    /// Loads configuration from the process environment
    ///
    /// Environment variables:
    /// - `HOST` (default `0.0.0.0`), `PORT` (default `3000`)
    /// - `SCREENSHOT_DIR` (default `screenshots`)
    /// - `WEBDRIVER_URL` (default `http://localhost:4444`), `HEADLESS` (default `true`)
    /// - `NAVIGATION_TIMEOUT_SECS` (default `30`), `NETWORK_IDLE_MS` (default `500`)
    /// - `AWS_REGION`, `S3_BUCKET_NAME`, `S3_DOMAIN` - required
    /// - `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY`, `S3_ENDPOINT` - optional
    pub fn from_env() -> Result<Self> {
        Self::from_source(Environment::default())
    }

    /// Loads configuration from any `config` source layered over the defaults
    pub fn from_source<S>(source: S) -> Result<Self>
    where
        S: Source + Send + Sync + 'static,
    {
        let raw: RawSettings = Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 3000_i64)?
            .set_default("screenshot_dir", "screenshots")?
            .set_default("webdriver_url", DEFAULT_WEBDRIVER_URL)?
            .set_default("headless", true)?
            .set_default("navigation_timeout_secs", 30_i64)?
            .set_default("network_idle_ms", 500_i64)?
            .add_source(source)
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration: AWS_REGION, S3_BUCKET_NAME and S3_DOMAIN must be set")?;

        Ok(Self::from(raw))
    }

    /// Address the HTTP server binds to
    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

impl From<RawSettings> for ApiConfig {
    fn from(raw: RawSettings) -> Self {
        Self {
            host: raw.host,
            port: raw.port,
            screenshot_dir: raw.screenshot_dir,
            webdriver_url: raw.webdriver_url,
            headless: raw.headless,
            navigation_timeout: Duration::from_secs(raw.navigation_timeout_secs),
            network_idle: Duration::from_millis(raw.network_idle_ms),
            storage: StorageSettings {
                region: raw.aws_region,
                access_key_id: raw.aws_access_key_id.filter(|k| !k.is_empty()),
                secret_access_key: raw
                    .aws_secret_access_key
                    .filter(|k| !k.is_empty())
                    .map(SecretString::from),
                bucket: raw.s3_bucket_name,
                public_domain: raw.s3_domain,
                endpoint: raw.s3_endpoint.filter(|e| !e.is_empty()),
            },
        }
    }
}
