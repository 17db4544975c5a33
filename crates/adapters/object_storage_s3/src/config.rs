//! S3 client configuration.

use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Region;

use crate::storage::S3ImageStorage;

/// Configuration for the S3 image storage adapter.
///
/// Credentials are resolved by the default AWS provider chain
/// (environment, profile, instance metadata).
#[derive(Debug, Clone)]
pub struct Config {
    /// Target bucket name.
    pub bucket: String,
    /// AWS region of the bucket.
    pub region: String,
    /// Custom S3 endpoint (MinIO, `LocalStack`, …).
    pub endpoint_url: Option<String>,
    /// Base URL that prefixes object keys in public URLs.
    ///
    /// Defaults to `https://{bucket}.s3.{region}.amazonaws.com`.
    pub public_base_url: Option<String>,
    /// Address buckets as `endpoint/bucket` instead of `bucket.endpoint`.
    pub force_path_style: bool,
    /// Upload objects with the `public-read` canned ACL.
    pub public_read: bool,
}

impl Config {
    /// Public base URL objects are served from, without trailing slash.
    #[must_use]
    pub fn public_base_url(&self) -> String {
        match &self.public_base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://{}.s3.{}.amazonaws.com", self.bucket, self.region),
        }
    }

    /// Build an [`S3ImageStorage`] from this configuration.
    pub async fn build(self) -> S3ImageStorage {
        let shared = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(self.region.clone()))
            .load()
            .await;

        let mut builder =
            aws_sdk_s3::config::Builder::from(&shared).force_path_style(self.force_path_style);
        if let Some(endpoint) = &self.endpoint_url {
            builder = builder.endpoint_url(endpoint);
        }
        let client = aws_sdk_s3::Client::from_conf(builder.build());

        tracing::debug!(bucket = %self.bucket, region = %self.region, "s3 client ready");
        S3ImageStorage::new(client, &self)
    }
}
