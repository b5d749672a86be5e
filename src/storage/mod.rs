//! S3 object storage for uploaded screenshots.

pub mod key;

use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use secrecy::ExposeSecret;
use tracing::{debug, info, instrument};

use crate::api::config::StorageSettings;

pub use key::{public_url, StorageKeyBuilder};

/// Destination for captured images
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Stores `data` under `key` with the given content type
    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<()>;
}

/// S3 storage client wrapper
#[derive(Clone, Debug)]
pub struct S3Storage {
    client: Client,
    bucket: String,
}

impl S3Storage {
    /// Creates an S3 client from configuration
    ///
    /// Static credentials are used when both key id and secret are configured,
    /// otherwise the default AWS provider chain is consulted. A custom endpoint
    /// switches to path-style addressing for S3-compatible services.
    pub async fn new(settings: &StorageSettings) -> Result<Self> {
        let region = Region::new(settings.region.clone());

        let mut s3_config_builder = match (&settings.access_key_id, &settings.secret_access_key) {
            (Some(key_id), Some(secret)) => {
                debug!("Using static S3 credentials");
                let credentials = Credentials::new(
                    key_id,
                    secret.expose_secret(),
                    None,
                    None,
                    "screenshot-uploader",
                );
                aws_sdk_s3::Config::builder()
                    .behavior_version(BehaviorVersion::latest())
                    .credentials_provider(credentials)
            }
            _ => {
                debug!("Loading S3 credentials from the default provider chain");
                let shared = aws_config::defaults(BehaviorVersion::latest()).load().await;
                aws_sdk_s3::config::Builder::from(&shared)
            }
        }
        .region(region);

        if let Some(ref endpoint) = settings.endpoint {
            debug!("Using custom S3 endpoint {}", endpoint);
            s3_config_builder = s3_config_builder.endpoint_url(endpoint).force_path_style(true);
        }

        let client = Client::from_conf(s3_config_builder.build());
        info!("S3 storage initialized: bucket={}, region={}", settings.bucket, settings.region);

        Ok(Self {
            client,
            bucket: settings.bucket.clone(),
        })
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

#[async_trait]
impl ObjectStore for S3Storage {
    #[instrument(skip(self, data), fields(bucket = %self.bucket, size = data.len()))]
    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<()> {
        debug!("Uploading {} to s3://{}/{}", content_type, self.bucket, key);
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(data))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("{}", DisplayErrorContext(e)))
            .with_context(|| format!("Failed to upload {} to bucket {}", key, self.bucket))?;

        info!("Uploaded s3://{}/{}", self.bucket, key);
        Ok(())
    }
}
