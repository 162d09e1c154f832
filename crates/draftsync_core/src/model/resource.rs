//! Embedded resource metadata and the per-model resource namespace.
//!
//! # Responsibility
//! - Describe embedded binary resources by stable identifier and payload
//!   metadata, never the payload itself.
//! - Assign content-addressed identifiers with payload-level deduplication.
//!
//! # Invariants
//! - One identifier maps to at most one `ResourceMeta` per set.
//! - Registering identical payload content returns the existing identifier.
//! - Identifier derivation is deterministic across processes.

use crate::capability::ResourceStore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Hex characters of the content digest kept in a derived identifier.
const RESOURCE_ID_DIGEST_CHARS: usize = 16;

/// Stable identifier referencing one embedded resource from body markup.
pub type ResourceId = String;

/// Payload metadata for one embedded resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceMeta {
    /// Stable identifier referenced from body markup.
    pub id: ResourceId,
    /// Original file name, when known.
    pub name: Option<String>,
    /// Payload MIME type, e.g. `image/png`.
    pub mime: String,
    /// Payload size in bytes (estimated for transport-encoded payloads).
    pub byte_len: u64,
    /// Content digest used for payload-level deduplication.
    pub content_key: String,
}

/// Registration request for a newly discovered resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewResource {
    pub name: Option<String>,
    pub mime: String,
    pub byte_len: u64,
    pub content_key: String,
}

/// Identifier-assignment namespace scoped to one content model.
///
/// Keeping the namespace on the model (instead of a shared registry) is
/// what isolates independent bindings from cross-document collisions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSet {
    entries: BTreeMap<ResourceId, ResourceMeta>,
    by_content: BTreeMap<String, ResourceId>,
}

impl ResourceSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts a resource whose identifier was assigned externally, e.g.
    /// when rehydrating a persisted model.
    ///
    /// Replaces any previous entry under the same identifier.
    pub fn insert(&mut self, meta: ResourceMeta) {
        self.by_content
            .insert(meta.content_key.clone(), meta.id.clone());
        self.entries.insert(meta.id.clone(), meta);
    }

    /// Returns sorted identifiers known to this set.
    pub fn ids(&self) -> Vec<ResourceId> {
        self.entries.keys().cloned().collect()
    }

    /// Drops every entry. Used when a binding releases its model state.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.by_content.clear();
    }
}

impl ResourceStore for ResourceSet {
    fn lookup(&self, id: &str) -> Option<&ResourceMeta> {
        self.entries.get(id)
    }

    fn register(&mut self, resource: NewResource) -> ResourceId {
        if let Some(existing) = self.by_content.get(resource.content_key.as_str()) {
            return existing.clone();
        }

        let id = derive_resource_id(resource.content_key.as_str());
        let meta = ResourceMeta {
            id: id.clone(),
            name: resource.name,
            mime: resource.mime,
            byte_len: resource.byte_len,
            content_key: resource.content_key,
        };
        self.insert(meta);
        id
    }
}

/// Computes the content digest for payload bytes.
pub fn content_key(payload: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(payload);
    let digest = hasher.finalize();
    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}

/// Derives a stable identifier from a content digest.
pub fn derive_resource_id(content_key: &str) -> ResourceId {
    let prefix = content_key
        .get(..RESOURCE_ID_DIGEST_CHARS)
        .unwrap_or(content_key);
    format!("res-{prefix}")
}
