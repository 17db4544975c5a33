//! # locus-adapter-object-storage-s3
//!
//! Object-storage adapter built on [aws-sdk-s3](https://docs.rs/aws-sdk-s3).
//!
//! ## Responsibilities
//! - Implement the `ImageStorage` port defined in `locus-app::ports::object_storage`
//! - Build an S3 client from the standard AWS provider chain plus overrides
//!   (region, custom endpoint for MinIO-style deployments)
//! - Derive object keys and public URLs, and map URLs back to keys
//!
//! ## Dependency rule
//! Depends on `locus-app` (for port traits) and `locus-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

pub mod config;
pub mod error;
pub mod storage;

pub use config::Config;
pub use storage::S3ImageStorage;
