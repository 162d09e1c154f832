//! Bidirectional resolver between inline resources and stable identifiers.
//!
//! Stored bodies reference embedded resources as `<img data-id="...">`.
//! Renderable bodies carry a locally servable `src` handle alongside the
//! identifier. `ToIdentifier` additionally captures inline data-URI images
//! into the model's resource set, deduplicated by payload content.

use crate::capability::ResourceStore;
use crate::config::EngineConfig;
use crate::model::resource::{content_key, NewResource, ResourceSet};
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Scheme of the locally servable handle substituted for identifiers.
pub const INLINE_SCHEME: &str = "embedded://";

static IMG_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<img\b[^>]*>").expect("valid img tag regex"));
// Attributes always follow whitespace inside a tag; anchoring on it keeps
// `data-src` or `x-data-id` from matching as `src` / `data-id`.
static DATA_ID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\s+data-id\s*=\s*["']([^"']+)["']"#).expect("valid data-id attr regex")
});
static SRC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\s+src\s*=\s*["']([^"']*)["']"#).expect("valid src attr regex"));
static DATA_URI_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^data:([A-Za-z0-9.+/-]+);base64,([A-Za-z0-9+/=\s]+)$")
        .expect("valid data uri regex")
});

/// Direction of one resolution pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveDirection {
    /// Identifier references become renderable inline handles (load path).
    ToInline,
    /// Inline occurrences become stable identifier references (save path).
    ToIdentifier,
}

/// Outcome of one resolution pass over a body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Rewritten body; equals the input when nothing matched.
    pub body: String,
    /// References rewritten successfully.
    pub resolved: usize,
    /// References left untouched as unresolved placeholders.
    pub unresolved: usize,
    /// Resources newly registered into the model namespace.
    pub registered: usize,
}

impl Resolution {
    fn passthrough(body: &str) -> Self {
        Self {
            body: body.to_string(),
            ..Self::default()
        }
    }
}

/// Rewrites bodies between identifier and inline resource forms.
#[derive(Debug, Clone)]
pub struct ResourceResolver {
    allow_embedded: bool,
    allow_data_uri: bool,
}

impl ResourceResolver {
    pub fn new(allow_embedded: bool, allow_data_uri: bool) -> Self {
        Self {
            allow_embedded,
            allow_data_uri,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.allow_embedded, config.allow_data_uri)
    }

    /// Runs one resolution pass in the requested direction.
    pub fn resolve(
        &self,
        body: &str,
        resources: &mut ResourceSet,
        direction: ResolveDirection,
    ) -> Resolution {
        match direction {
            ResolveDirection::ToInline => self.to_inline(body, resources),
            ResolveDirection::ToIdentifier => self.to_identifier(body, resources),
        }
    }

    /// Rewrites identifier references into renderable inline handles.
    ///
    /// Identifiers missing from the resource set are left in identifier
    /// form so the surface can render a broken-image affordance.
    pub fn to_inline(&self, body: &str, resources: &ResourceSet) -> Resolution {
        if !self.allow_embedded {
            return Resolution::passthrough(body);
        }

        let mut resolved = 0usize;
        let mut unresolved = 0usize;
        let rewritten = IMG_TAG_RE.replace_all(body, |caps: &Captures| {
            let tag = &caps[0];
            if SRC_RE.is_match(tag) {
                // Already inline, or an external image outside our scope.
                return tag.to_string();
            }
            let Some(id_caps) = DATA_ID_RE.captures(tag) else {
                return tag.to_string();
            };
            let id = &id_caps[1];
            if resources.lookup(id).is_none() {
                unresolved += 1;
                return tag.to_string();
            }
            resolved += 1;
            format!("<img src=\"{}{}\"{}", INLINE_SCHEME, id, &tag[4..])
        });

        if unresolved > 0 {
            warn!(
                "event=resolve_missing module=resolve status=error direction=to_inline unresolved={unresolved}"
            );
        }
        Resolution {
            body: rewritten.into_owned(),
            resolved,
            unresolved,
            registered: 0,
        }
    }

    /// Rewrites inline resource occurrences into identifier references,
    /// registering newly discovered data-URI payloads.
    pub fn to_identifier(&self, body: &str, resources: &mut ResourceSet) -> Resolution {
        if !self.allow_embedded {
            return Resolution::passthrough(body);
        }

        let mut resolved = 0usize;
        let mut unresolved = 0usize;
        let mut registered = 0usize;
        let rewritten = IMG_TAG_RE.replace_all(body, |caps: &Captures| {
            let tag = &caps[0];
            let Some(src_caps) = SRC_RE.captures(tag) else {
                // Identifier form already; nothing to rewrite.
                return tag.to_string();
            };
            let src_value = src_caps[1].to_string();

            if let Some(id) = src_value.strip_prefix(INLINE_SCHEME) {
                resolved += 1;
                let stripped = SRC_RE.replace(tag, "").into_owned();
                return ensure_data_id(&stripped, id);
            }

            if src_value.starts_with("data:") {
                if !self.allow_data_uri {
                    return tag.to_string();
                }
                let Some(uri_caps) = DATA_URI_RE.captures(&src_value) else {
                    unresolved += 1;
                    return tag.to_string();
                };
                let mime = uri_caps[1].to_string();
                let payload_chars = uri_caps[2].len() as u64;
                // Identical payloads produce identical URIs, so keying the
                // digest on the URI text deduplicates without decoding.
                let key = content_key(src_value.as_bytes());
                let known_before = resources.len();
                let id = resources.register(NewResource {
                    name: None,
                    mime,
                    byte_len: payload_chars * 3 / 4,
                    content_key: key,
                });
                if resources.len() > known_before {
                    registered += 1;
                }
                resolved += 1;
                let stripped = SRC_RE.replace(tag, "").into_owned();
                return ensure_data_id(&stripped, &id);
            }

            tag.to_string()
        });

        if unresolved > 0 {
            warn!(
                "event=resolve_malformed module=resolve status=error direction=to_identifier unresolved={unresolved}"
            );
        }
        if registered > 0 {
            debug!(
                "event=resource_registered module=resolve status=ok count={registered}"
            );
        }
        Resolution {
            body: rewritten.into_owned(),
            resolved,
            unresolved,
            registered,
        }
    }
}

/// Returns the renderable handle for one identifier.
pub fn inline_handle(id: &str) -> String {
    format!("{INLINE_SCHEME}{id}")
}

fn ensure_data_id(tag: &str, id: &str) -> String {
    if DATA_ID_RE.is_match(tag) {
        return tag.to_string();
    }
    let close_len = if tag.ends_with("/>") { 2 } else { 1 };
    let (head, close) = tag.split_at(tag.len() - close_len);
    format!("{} data-id=\"{}\"{}", head.trim_end(), id, close)
}
