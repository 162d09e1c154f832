//! Model-to-surface materialization.
//!
//! # Responsibility
//! - Prepare renderable content from a content source (resource
//!   resolution, direction hint, mode plan).
//! - Keep preparation separate from application so a teardown landing
//!   between the two discards the load instead of mutating a dead binding.
//!
//! # Invariants
//! - Edit acceptance is armed strictly after materialization completes.
//! - A prepared load applied to a disposed session has no effect.

pub mod pipeline;
