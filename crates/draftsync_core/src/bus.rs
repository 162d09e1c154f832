//! Engine notification bus types.
//!
//! # Responsibility
//! - Define the events the engine announces to external collaborators
//!   (autosave, composer chrome) and the signals it consumes from them.
//! - Keep cross-component communication explicit: components talk through
//!   return values and this bus, never shared mutable scope.
//!
//! # Invariants
//! - Events carry model identity, never model state; consumers read state
//!   through the session.

use crate::model::document::{BodyMode, DocumentId};

/// Outbound notification announced by a binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// The model body was updated from a surface edit.
    ContentUpdated { document_id: DocumentId },
    /// Initial materialization into the surface completed.
    ContentLoaded {
        /// Absent for string-backed bindings.
        document_id: Option<DocumentId>,
        /// Whether the binding synchronizes a full content model.
        model_backed: bool,
    },
}

/// Inbound signal consumed by a binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineSignal {
    /// The host switched the document's display mode.
    ModeChanged(BodyMode),
}

/// Receiver seam for outbound engine events.
pub trait EventSink {
    fn emit(&mut self, event: EngineEvent);
}

/// Sink that drops every event. Default for hosts without a bus.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: EngineEvent) {}
}
