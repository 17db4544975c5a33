//! Object-storage port — where location images live.

use std::future::Future;

use locus_domain::error::LocusError;
use locus_domain::image::ImageUpload;

/// Stores images and hands back publicly reachable URLs.
pub trait ImageStorage {
    /// Store `image` under `folder` and return its public URL.
    fn upload(
        &self,
        image: ImageUpload,
        folder: &str,
    ) -> impl Future<Output = Result<String, LocusError>> + Send;

    /// Remove the object behind `url`.
    ///
    /// URLs that do not point into this storage are ignored.
    fn delete(&self, url: &str) -> impl Future<Output = Result<(), LocusError>> + Send;
}
