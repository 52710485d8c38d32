//! # Types
//!
//! Identifiers shared across the suggestion engine.
//!
//! Build-ids and package names are both plain strings underneath. Wrapping
//! them keeps the two suggestion kinds from being mixed up in the store and
//! the cache.

pub mod build_id;
pub mod package;

// Re-export all public types
pub use build_id::BuildId;
pub use package::{PackageMetadata, PackageName};
