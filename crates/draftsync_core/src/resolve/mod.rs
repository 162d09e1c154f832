//! Embedded resource resolution.
//!
//! # Responsibility
//! - Rewrite document bodies between the stored identifier form and the
//!   renderable inline form.
//! - Register newly discovered inline payloads into the model namespace.
//!
//! # Invariants
//! - Both directions are idempotent; re-resolving a resolved body no-ops.
//! - Failures degrade per-reference; surrounding text is never corrupted.

pub mod resolver;
