//! Image value objects handed to the object-storage port.

use crate::error::ValidationError;

/// Largest accepted image payload (5 MiB).
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Longest file-name extension kept for stored objects.
const MAX_EXTENSION_LEN: usize = 5;

/// Content types accepted for location images.
pub const ACCEPTED_CONTENT_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png", "image/webp"];

/// A validated image payload waiting to be stored.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    bytes: Vec<u8>,
    file_name: String,
    content_type: String,
}

impl ImageUpload {
    /// Validate and wrap an uploaded image.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyImage`] for an empty payload,
    /// [`ValidationError::ImageTooLarge`] above [`MAX_IMAGE_BYTES`], and
    /// [`ValidationError::UnsupportedImageType`] for content types outside
    /// [`ACCEPTED_CONTENT_TYPES`].
    pub fn new(
        bytes: Vec<u8>,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let content_type = content_type.into().to_ascii_lowercase();
        if !ACCEPTED_CONTENT_TYPES.contains(&content_type.as_str()) {
            return Err(ValidationError::UnsupportedImageType(content_type));
        }
        if bytes.is_empty() {
            return Err(ValidationError::EmptyImage);
        }
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(ValidationError::ImageTooLarge {
                size: bytes.len(),
                max: MAX_IMAGE_BYTES,
            });
        }
        Ok(Self {
            bytes,
            file_name: file_name.into(),
            content_type,
        })
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// File extension to use for the stored object.
    ///
    /// Taken from the original file name when it is a short ASCII
    /// alphanumeric suffix, otherwise derived from the content type. The
    /// result is always safe inside an object key and a URL path.
    #[must_use]
    pub fn extension(&self) -> &str {
        match self.file_name.rsplit_once('.') {
            Some((stem, ext))
                if !stem.is_empty()
                    && !ext.is_empty()
                    && ext.len() <= MAX_EXTENSION_LEN
                    && ext.bytes().all(|b| b.is_ascii_alphanumeric()) =>
            {
                ext
            }
            _ => match self.content_type.as_str() {
                "image/png" => "png",
                "image/webp" => "webp",
                _ => "jpg",
            },
        }
    }
}

impl std::fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Where the image of a new location comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// An image already hosted elsewhere.
    Url(String),
    /// Raw bytes to push to object storage.
    Upload(ImageUpload),
}
