//! # locus-domain
//!
//! Pure domain model for the locus location catalogue.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define the **Location** aggregate (a named, described point on the map
//!   with an illustrative image)
//! - Define **image** value objects accepted by the object-storage port
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod image;
pub mod location;
