//! Content model layer.
//!
//! # Responsibility
//! - Define the backing record a bound surface synchronizes against.
//! - Own the per-model embedded resource namespace.
//!
//! # Invariants
//! - A model carries exactly one `BodyMode` tag at any time.
//! - Resource identifiers are unique within one model's resource set.

pub mod document;
pub mod resource;
