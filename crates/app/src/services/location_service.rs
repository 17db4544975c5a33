//! Location service — use-cases for managing locations and their images.

use locus_domain::error::{LocusError, NotFoundError};
use locus_domain::id::LocationId;
use locus_domain::image::{ImageSource, ImageUpload};
use locus_domain::location::{Location, LocationPatch, NewLocation};

use crate::ports::{ImageStorage, LocationRepository};

/// Object-storage folder that receives location images.
pub const IMAGE_FOLDER: &str = "locations";

/// Application service for location CRUD operations.
pub struct LocationService<R, S> {
    repo: R,
    images: S,
}

impl<R: LocationRepository, S: ImageStorage> LocationService<R, S> {
    /// Create a new service backed by the given repository and image storage.
    pub fn new(repo: R, images: S) -> Self {
        Self { repo, images }
    }

    /// Create a new location.
    ///
    /// Input is validated before the image is uploaded. When persisting
    /// fails after an upload, the uploaded image is discarded.
    ///
    /// # Errors
    ///
    /// Returns [`LocusError::Validation`] if invariants fail, or an
    /// infrastructure error from the repository or the image storage.
    #[tracing::instrument(skip(self, new, image), fields(location_name = %new.name))]
    pub async fn create_location(
        &self,
        new: NewLocation,
        image: ImageSource,
    ) -> Result<Location, LocusError> {
        new.validate()?;

        let (image_url, uploaded) = match image {
            ImageSource::Url(url) => (url, false),
            ImageSource::Upload(upload) => (self.images.upload(upload, IMAGE_FOLDER).await?, true),
        };

        let location = match Location::create(new, image_url.clone()) {
            Ok(location) => location,
            Err(err) => {
                if uploaded {
                    self.discard_image(&image_url).await;
                }
                return Err(err.into());
            }
        };

        match self.repo.create(location).await {
            Ok(created) => {
                tracing::info!(location_id = %created.id(), "location created");
                Ok(created)
            }
            Err(err) => {
                if uploaded {
                    self.discard_image(&image_url).await;
                }
                Err(err)
            }
        }
    }

    /// List all locations, newest first.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_locations(&self) -> Result<Vec<Location>, LocusError> {
        self.repo.find_all().await
    }

    /// Look up a location by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`LocusError::NotFound`] when no location with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_location(&self, id: LocationId) -> Result<Location, LocusError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id).into())
    }

    /// Apply a partial update, optionally replacing the image.
    ///
    /// With a new image the previous one is discarded once the update is
    /// stored; if the update fails the new upload is discarded instead.
    ///
    /// # Errors
    ///
    /// Returns [`LocusError::Validation`] if the patch is invalid,
    /// [`LocusError::NotFound`] when no location with `id` exists, or an
    /// infrastructure error.
    #[tracing::instrument(skip(self, patch, image))]
    pub async fn update_location(
        &self,
        id: LocationId,
        mut patch: LocationPatch,
        image: Option<ImageUpload>,
    ) -> Result<Location, LocusError> {
        patch.validate()?;

        let Some(image) = image else {
            return self.repo.update(id, patch).await;
        };

        // Read outside the repository transaction: when two image updates race,
        // only the image this call observed is discarded.
        let previous = self.get_location(id).await?;
        let new_url = self.images.upload(image, IMAGE_FOLDER).await?;
        patch.image_url = Some(new_url.clone());

        match self.repo.update(id, patch).await {
            Ok(updated) => {
                if previous.image_url() != new_url {
                    self.discard_image(previous.image_url()).await;
                }
                Ok(updated)
            }
            Err(err) => {
                self.discard_image(&new_url).await;
                Err(err)
            }
        }
    }

    /// Delete a location and, best-effort, its image.
    ///
    /// # Errors
    ///
    /// Returns [`LocusError::NotFound`] when no location with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_location(&self, id: LocationId) -> Result<(), LocusError> {
        let existing = self.get_location(id).await?;
        self.repo.delete(id).await?;
        self.discard_image(existing.image_url()).await;
        tracing::info!(location_id = %id, "location deleted");
        Ok(())
    }

    async fn discard_image(&self, url: &str) {
        if let Err(err) = self.images.delete(url).await {
            tracing::warn!(error = %err, image_url = url, "failed to delete image");
        }
    }
}

fn not_found(id: LocationId) -> NotFoundError {
    NotFoundError {
        entity: "Location",
        id: id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use locus_domain::error::ValidationError;
    use std::collections::HashMap;
    use std::future::Future;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[derive(Default)]
    struct InMemoryLocationRepo {
        store: Mutex<Vec<Location>>,
        fail_writes: AtomicBool,
    }

    fn io_failure() -> LocusError {
        LocusError::Storage(Box::new(std::io::Error::other("store unavailable")))
    }

    impl LocationRepository for InMemoryLocationRepo {
        fn create(
            &self,
            location: Location,
        ) -> impl Future<Output = Result<Location, LocusError>> + Send {
            let result = if self.fail_writes.load(Ordering::SeqCst) {
                Err(io_failure())
            } else {
                self.store.lock().unwrap().push(location.clone());
                Ok(location)
            };
            async { result }
        }

        fn find_all(&self) -> impl Future<Output = Result<Vec<Location>, LocusError>> + Send {
            let mut result = self.store.lock().unwrap().clone();
            result.reverse();
            async { Ok(result) }
        }

        fn find_by_id(
            &self,
            id: LocationId,
        ) -> impl Future<Output = Result<Option<Location>, LocusError>> + Send {
            let store = self.store.lock().unwrap();
            let result = store.iter().find(|l| l.id() == id).cloned();
            async { Ok(result) }
        }

        fn update(
            &self,
            id: LocationId,
            patch: LocationPatch,
        ) -> impl Future<Output = Result<Location, LocusError>> + Send {
            let result = if self.fail_writes.load(Ordering::SeqCst) {
                Err(io_failure())
            } else {
                let mut store = self.store.lock().unwrap();
                match store.iter_mut().find(|l| l.id() == id) {
                    None => Err(not_found(id).into()),
                    Some(slot) => slot
                        .apply(patch)
                        .map_err(LocusError::from)
                        .map(|next| {
                            *slot = next.clone();
                            next
                        }),
                }
            };
            async { result }
        }

        fn delete(&self, id: LocationId) -> impl Future<Output = Result<(), LocusError>> + Send {
            let mut store = self.store.lock().unwrap();
            let before = store.len();
            store.retain(|l| l.id() != id);
            let result = if store.len() == before {
                Err(not_found(id).into())
            } else {
                Ok(())
            };
            async { result }
        }
    }

    #[derive(Default)]
    struct FakeImageStorage {
        objects: Mutex<HashMap<String, Vec<u8>>>,
        fail_deletes: AtomicBool,
    }

    impl FakeImageStorage {
        fn contains(&self, url: &str) -> bool {
            self.objects.lock().unwrap().contains_key(url)
        }

        fn len(&self) -> usize {
            self.objects.lock().unwrap().len()
        }
    }

    impl ImageStorage for FakeImageStorage {
        fn upload(
            &self,
            image: ImageUpload,
            folder: &str,
        ) -> impl Future<Output = Result<String, LocusError>> + Send {
            let mut objects = self.objects.lock().unwrap();
            let url = format!(
                "https://bucket.test/{folder}/{}.{}",
                objects.len(),
                image.extension()
            );
            objects.insert(url.clone(), image.into_bytes());
            async { Ok(url) }
        }

        fn delete(&self, url: &str) -> impl Future<Output = Result<(), LocusError>> + Send {
            let result = if self.fail_deletes.load(Ordering::SeqCst) {
                Err(LocusError::ObjectStorage(Box::new(std::io::Error::other(
                    "bucket unavailable",
                ))))
            } else {
                self.objects.lock().unwrap().remove(url);
                Ok(())
            };
            async { result }
        }
    }

    type Service = LocationService<InMemoryLocationRepo, FakeImageStorage>;

    fn make_service() -> Service {
        LocationService::new(InMemoryLocationRepo::default(), FakeImageStorage::default())
    }

    fn cristo() -> NewLocation {
        NewLocation {
            name: "Cristo Redentor".to_string(),
            description: "Statue on Corcovado".to_string(),
            latitude: -22.951_916,
            longitude: -43.210_487,
        }
    }

    fn png() -> ImageUpload {
        ImageUpload::new(vec![0x89, 0x50, 0x4e, 0x47], "cristo.png", "image/png").unwrap()
    }

    fn by_url(url: &str) -> ImageSource {
        ImageSource::Url(url.to_string())
    }

    #[tokio::test]
    async fn should_create_location_when_valid() {
        let svc = make_service();

        let created = svc
            .create_location(cristo(), by_url("https://x/img.jpg"))
            .await
            .unwrap();
        assert_eq!(created.name(), "Cristo Redentor");
        assert_eq!(created.image_url(), "https://x/img.jpg");

        let fetched = svc.get_location(created.id()).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn should_upload_image_when_creating_with_upload() {
        let svc = make_service();

        let created = svc
            .create_location(cristo(), ImageSource::Upload(png()))
            .await
            .unwrap();

        assert!(created.image_url().starts_with("https://bucket.test/locations/"));
        assert!(created.image_url().ends_with(".png"));
        assert!(svc.images.contains(created.image_url()));
    }

    #[tokio::test]
    async fn should_reject_short_name_without_uploading() {
        let svc = make_service();
        let mut new = cristo();
        new.name = "Hi".to_string();

        let result = svc.create_location(new, ImageSource::Upload(png())).await;

        assert!(matches!(
            result,
            Err(LocusError::Validation(ValidationError::NameTooShort { .. }))
        ));
        assert_eq!(svc.images.len(), 0);
    }

    #[tokio::test]
    async fn should_discard_upload_when_persisting_fails() {
        let svc = make_service();
        svc.repo.fail_writes.store(true, Ordering::SeqCst);

        let result = svc
            .create_location(cristo(), ImageSource::Upload(png()))
            .await;

        assert!(matches!(result, Err(LocusError::Storage(_))));
        assert_eq!(svc.images.len(), 0);
    }

    #[tokio::test]
    async fn should_return_not_found_when_location_missing() {
        let svc = make_service();
        let result = svc.get_location(LocationId::new()).await;
        assert!(matches!(result, Err(LocusError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_list_locations_newest_first() {
        let svc = make_service();
        assert!(svc.list_locations().await.unwrap().is_empty());

        let first = svc
            .create_location(cristo(), by_url("https://x/1.jpg"))
            .await
            .unwrap();
        let second = svc
            .create_location(cristo(), by_url("https://x/2.jpg"))
            .await
            .unwrap();

        let all = svc.list_locations().await.unwrap();
        let ids: Vec<LocationId> = all.iter().map(Location::id).collect();
        assert_eq!(ids, vec![second.id(), first.id()]);
    }

    #[tokio::test]
    async fn should_update_only_supplied_fields() {
        let svc = make_service();
        let created = svc
            .create_location(cristo(), by_url("https://x/img.jpg"))
            .await
            .unwrap();

        let patch = LocationPatch {
            name: Some("Christ the Redeemer".to_string()),
            ..LocationPatch::default()
        };
        let updated = svc
            .update_location(created.id(), patch, None)
            .await
            .unwrap();

        assert_eq!(updated.name(), "Christ the Redeemer");
        assert_eq!(updated.description(), created.description());
        assert_eq!(updated.image_url(), created.image_url());
    }

    #[tokio::test]
    async fn should_reject_invalid_patch() {
        let svc = make_service();
        let created = svc
            .create_location(cristo(), by_url("https://x/img.jpg"))
            .await
            .unwrap();

        let patch = LocationPatch {
            longitude: Some(181.0),
            ..LocationPatch::default()
        };
        let result = svc.update_location(created.id(), patch, None).await;
        assert!(matches!(
            result,
            Err(LocusError::Validation(ValidationError::InvalidLongitude(_)))
        ));
    }

    #[tokio::test]
    async fn should_return_not_found_when_updating_missing_location() {
        let svc = make_service();
        let result = svc
            .update_location(LocationId::new(), LocationPatch::default(), None)
            .await;
        assert!(matches!(result, Err(LocusError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_not_upload_when_updating_missing_location_with_image() {
        let svc = make_service();
        let result = svc
            .update_location(LocationId::new(), LocationPatch::default(), Some(png()))
            .await;
        assert!(matches!(result, Err(LocusError::NotFound(_))));
        assert_eq!(svc.images.len(), 0);
    }

    #[tokio::test]
    async fn should_replace_image_and_discard_previous_one() {
        let svc = make_service();
        let created = svc
            .create_location(cristo(), ImageSource::Upload(png()))
            .await
            .unwrap();
        let old_url = created.image_url().to_string();

        let updated = svc
            .update_location(created.id(), LocationPatch::default(), Some(png()))
            .await
            .unwrap();

        assert_ne!(updated.image_url(), old_url);
        assert!(svc.images.contains(updated.image_url()));
        assert!(!svc.images.contains(&old_url));
    }

    #[tokio::test]
    async fn should_keep_only_latest_image_after_successive_replacements() {
        let svc = make_service();
        let created = svc
            .create_location(cristo(), ImageSource::Upload(png()))
            .await
            .unwrap();

        svc.update_location(created.id(), LocationPatch::default(), Some(png()))
            .await
            .unwrap();
        let last = svc
            .update_location(created.id(), LocationPatch::default(), Some(png()))
            .await
            .unwrap();

        assert_eq!(svc.images.len(), 1);
        assert!(svc.images.contains(last.image_url()));
    }

    #[tokio::test]
    async fn should_discard_new_image_when_update_fails() {
        let svc = make_service();
        let created = svc
            .create_location(cristo(), ImageSource::Upload(png()))
            .await
            .unwrap();
        svc.repo.fail_writes.store(true, Ordering::SeqCst);

        let result = svc
            .update_location(created.id(), LocationPatch::default(), Some(png()))
            .await;

        assert!(matches!(result, Err(LocusError::Storage(_))));
        assert_eq!(svc.images.len(), 1);
        assert!(svc.images.contains(created.image_url()));
    }

    #[tokio::test]
    async fn should_delete_location_and_its_image() {
        let svc = make_service();
        let created = svc
            .create_location(cristo(), ImageSource::Upload(png()))
            .await
            .unwrap();

        svc.delete_location(created.id()).await.unwrap();

        let result = svc.get_location(created.id()).await;
        assert!(matches!(result, Err(LocusError::NotFound(_))));
        assert_eq!(svc.images.len(), 0);
    }

    #[tokio::test]
    async fn should_return_not_found_when_deleting_missing_location() {
        let svc = make_service();
        let result = svc.delete_location(LocationId::new()).await;
        assert!(matches!(result, Err(LocusError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_succeed_when_image_deletion_fails() {
        let svc = make_service();
        let created = svc
            .create_location(cristo(), ImageSource::Upload(png()))
            .await
            .unwrap();
        svc.images.fail_deletes.store(true, Ordering::SeqCst);

        svc.delete_location(created.id()).await.unwrap();

        assert!(svc.repo.find_by_id(created.id()).await.unwrap().is_none());
    }
}
