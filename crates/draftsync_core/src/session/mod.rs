//! Binding lifecycle coordination.
//!
//! # Responsibility
//! - Associate one surface with one content source for the binding's
//!   lifetime and route events between them.
//! - Own subscription cleanup as an explicit list, run once at teardown.
//!
//! # Invariants
//! - Dispose is idempotent; cleanups run exactly once, in registration
//!   order.
//! - No edit is processed after teardown begins.

pub mod coordinator;
