//! Object-storage error type wrapping S3 SDK errors.

use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::operation::delete_object::DeleteObjectError;
use aws_sdk_s3::operation::put_object::PutObjectError;

use locus_domain::error::LocusError;

/// Errors originating from the S3 object-storage layer.
#[derive(Debug, thiserror::Error)]
pub enum ObjectStorageError {
    /// `PutObject` failed.
    #[error("failed to upload object `{key}`")]
    Upload {
        key: String,
        #[source]
        source: Box<SdkError<PutObjectError>>,
    },

    /// `DeleteObject` failed.
    #[error("failed to delete object `{key}`")]
    Delete {
        key: String,
        #[source]
        source: Box<SdkError<DeleteObjectError>>,
    },
}

impl From<ObjectStorageError> for LocusError {
    fn from(err: ObjectStorageError) -> Self {
        Self::ObjectStorage(Box::new(err))
    }
}
