//! # locus-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a **REST-ish JSON API** for the location catalogue
//!   (`/api/locations`, `/api/locations/{id}`)
//! - Parse `multipart/form-data` bodies (text fields plus an optional image file)
//! - Validate input at the boundary and report every offending field at once
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results and errors into HTTP responses
//!
//! ## Dependency rule
//! Depends on `locus-app` (for port traits and services) and `locus-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod error;
pub mod form;
pub mod router;
pub mod state;
pub mod validation;
