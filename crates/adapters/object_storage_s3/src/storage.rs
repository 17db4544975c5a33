//! S3 implementation of [`ImageStorage`].

use std::future::Future;

use aws_sdk_s3::Client;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;

use locus_app::ports::ImageStorage;
use locus_domain::error::LocusError;
use locus_domain::image::ImageUpload;

use crate::config::Config;
use crate::error::ObjectStorageError;

/// Bucket-backed image storage.
#[derive(Clone)]
pub struct S3ImageStorage {
    client: Client,
    bucket: String,
    base_url: String,
    public_read: bool,
}

impl S3ImageStorage {
    /// Wrap an already configured client.
    #[must_use]
    pub fn new(client: Client, config: &Config) -> Self {
        Self {
            client,
            bucket: config.bucket.clone(),
            base_url: config.public_base_url(),
            public_read: config.public_read,
        }
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{key}", self.base_url)
    }

    /// Object key behind `url`, or `None` when the URL is not ours.
    fn key_for_url<'a>(&self, url: &'a str) -> Option<&'a str> {
        let key = url.strip_prefix(&self.base_url)?.strip_prefix('/')?;
        let key = key.split(['?', '#']).next().unwrap_or_default();
        (!key.is_empty()).then_some(key)
    }
}

/// `{folder}/{uuid}.{ext}`
fn object_key(folder: &str, image: &ImageUpload) -> String {
    let folder = folder.trim_matches('/');
    let name = uuid::Uuid::new_v4();
    let ext = image.extension().to_ascii_lowercase();
    if folder.is_empty() {
        format!("{name}.{ext}")
    } else {
        format!("{folder}/{name}.{ext}")
    }
}

impl ImageStorage for S3ImageStorage {
    fn upload(
        &self,
        image: ImageUpload,
        folder: &str,
    ) -> impl Future<Output = Result<String, LocusError>> + Send {
        let client = self.client.clone();
        let bucket = self.bucket.clone();
        let public_read = self.public_read;
        let key = object_key(folder, &image);
        let url = self.public_url(&key);
        async move {
            let content_type = image.content_type().to_string();
            let mut request = client
                .put_object()
                .bucket(bucket)
                .key(&key)
                .content_type(content_type)
                .body(ByteStream::from(image.into_bytes()));
            if public_read {
                request = request.acl(ObjectCannedAcl::PublicRead);
            }

            request
                .send()
                .await
                .map_err(|err| ObjectStorageError::Upload {
                    key: key.clone(),
                    source: Box::new(err),
                })?;

            tracing::debug!(%key, "image uploaded");
            Ok(url)
        }
    }

    fn delete(&self, url: &str) -> impl Future<Output = Result<(), LocusError>> + Send {
        let client = self.client.clone();
        let bucket = self.bucket.clone();
        let key = self.key_for_url(url).map(ToString::to_string);
        if key.is_none() {
            tracing::debug!(url, "not an object of this bucket, skipping delete");
        }
        async move {
            let Some(key) = key else {
                return Ok(());
            };

            client
                .delete_object()
                .bucket(bucket)
                .key(&key)
                .send()
                .await
                .map_err(|err| ObjectStorageError::Delete {
                    key: key.clone(),
                    source: Box::new(err),
                })?;

            tracing::debug!(%key, "image deleted");
            Ok(())
        }
    }
}
