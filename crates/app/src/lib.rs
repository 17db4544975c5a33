//! # locus-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `LocationRepository` — CRUD for locations
//!   - `ImageStorage` — upload and delete location images
//! - Define the **driving/inbound** use cases in `LocationService`
//!   (create, list, get, update, delete)
//! - Orchestrate domain objects without knowing *how* persistence or IO works
//!
//! ## Dependency rule
//! Depends on `locus-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
