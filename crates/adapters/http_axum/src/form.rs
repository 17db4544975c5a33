//! `multipart/form-data` parsing for location create/update requests.

use axum::extract::Multipart;

use crate::error::ApiError;

/// An uploaded file part, not validated yet.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub content_type: String,
}

/// Raw fields of a location form, exactly as sent by the client.
///
/// Coordinates stay textual here; [`crate::validation`] parses them so that
/// every malformed field is reported together.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LocationForm {
    pub name: Option<String>,
    pub description: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub image_url: Option<String>,
    pub image: Option<FilePart>,
}

impl LocationForm {
    /// Drain a multipart body into a form.
    ///
    /// Unknown fields are skipped. An empty file part (what browsers send
    /// when no file was picked) counts as no image.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(ToString::to_string) else {
                continue;
            };

            match name.as_str() {
                "image" => {
                    let file_name = field.file_name().unwrap_or_default().to_string();
                    let content_type = field
                        .content_type()
                        .unwrap_or("application/octet-stream")
                        .to_string();
                    let bytes = field.bytes().await?.to_vec();
                    if bytes.is_empty() && file_name.is_empty() {
                        continue;
                    }
                    form.image = Some(FilePart {
                        bytes,
                        file_name,
                        content_type,
                    });
                }
                "name" => form.name = Some(field.text().await?),
                "description" => form.description = Some(field.text().await?),
                "latitude" => form.latitude = Some(field.text().await?),
                "longitude" => form.longitude = Some(field.text().await?),
                "imageUrl" | "image_url" => form.image_url = Some(field.text().await?),
                other => {
                    tracing::debug!(field = other, "ignoring unknown form field");
                }
            }
        }

        Ok(form)
    }
}
