//! Document content model.
//!
//! # Responsibility
//! - Define the canonical record persisted for one editable document.
//! - Track the representation tag, authorship origin and text direction
//!   that drive load-time mode decisions.
//!
//! # Invariants
//! - `document_id` is stable and never reused for another document.
//! - `mode` holds exactly one representation tag; rich and plain are
//!   mutually exclusive.
//! - `resources` is the only identifier-assignment namespace for bodies of
//!   this model, so independent documents cannot collide.

use crate::model::resource::ResourceSet;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for one document record.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type DocumentId = Uuid;

/// Representation tag for a document body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyMode {
    /// Markup body rendered by the rich surface.
    Rich,
    /// Plain-text body; the rich edit pipeline is bypassed.
    Plain,
}

/// Authorship origin used by the one-shot plaintext conversion policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentOrigin {
    /// Newly authored in this session; body has never been persisted.
    FreshDraft,
    /// Reopened from rest; the stored body is already final.
    Persisted,
}

/// Base text direction hint applied once at load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextDirection {
    Ltr,
    Rtl,
}

/// Canonical record for one synchronized document.
///
/// Owned by the host application; the engine mutates it only for the
/// duration of one serialized operation and never keeps it past a binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentModel {
    /// Stable global ID used for event correlation and auditing.
    pub document_id: DocumentId,
    /// Opaque markup (or plain-text) body at this layer.
    pub body: String,
    /// Representation tag the body is stored as.
    pub mode: BodyMode,
    /// Authorship origin driving the convert-once policy.
    pub origin: DocumentOrigin,
    /// Base direction hint; `Rtl` is applied to the surface on load.
    pub direction: TextDirection,
    /// Embedded resource namespace scoped to this document.
    pub resources: ResourceSet,
}

impl ContentModel {
    /// Creates a freshly authored rich draft with a generated stable ID.
    pub fn new_draft(body: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), body)
    }

    /// Creates a fresh draft with a caller-provided stable ID.
    ///
    /// Used when identity already exists externally (import paths).
    pub fn with_id(document_id: DocumentId, body: impl Into<String>) -> Self {
        Self {
            document_id,
            body: body.into(),
            mode: BodyMode::Rich,
            origin: DocumentOrigin::FreshDraft,
            direction: TextDirection::Ltr,
            resources: ResourceSet::new(),
        }
    }

    /// Creates a record for a document reopened from rest.
    pub fn persisted(document_id: DocumentId, body: impl Into<String>, mode: BodyMode) -> Self {
        Self {
            document_id,
            body: body.into(),
            mode,
            origin: DocumentOrigin::Persisted,
            direction: TextDirection::Ltr,
            resources: ResourceSet::new(),
        }
    }

    /// Replaces the stored body.
    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
    }

    /// Returns whether the representation tag requests plain text.
    pub fn is_plain_tagged(&self) -> bool {
        self.mode == BodyMode::Plain
    }

    /// Returns whether the body is empty after trimming.
    pub fn is_body_blank(&self) -> bool {
        self.body.trim().is_empty()
    }
}
