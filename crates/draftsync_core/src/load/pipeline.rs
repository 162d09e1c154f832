//! Load preparation over the two content source variants.

use crate::model::document::{ContentModel, DocumentId, TextDirection};
use crate::resolve::resolver::{Resolution, ResourceResolver};

/// What a binding synchronizes: a full content model, or a bare string
/// (e.g. a signature snippet) with no resource or mode semantics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    ModelBacked(ContentModel),
    StringBacked(String),
}

impl ContentSource {
    pub fn is_model_backed(&self) -> bool {
        matches!(self, Self::ModelBacked(_))
    }

    pub fn document_id(&self) -> Option<DocumentId> {
        match self {
            Self::ModelBacked(model) => Some(model.document_id),
            Self::StringBacked(_) => None,
        }
    }
}

/// Renderable content staged for one materialization.
///
/// Produced by [`prepare`]; consumed by the session's apply step, which
/// checks liveness before touching the surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedLoad {
    pub(crate) body: String,
    pub(crate) rtl_hint: bool,
    pub(crate) model_backed: bool,
    pub(crate) document_id: Option<DocumentId>,
    pub(crate) resolution: Option<Resolution>,
}

impl PreparedLoad {
    /// The renderable body staged for the surface.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Resolution summary of the inline pass, when one ran.
    pub fn resolution(&self) -> Option<&Resolution> {
        self.resolution.as_ref()
    }
}

/// Resolves and stages content for materialization.
///
/// Model-backed sources run the inline resolution pass and carry the
/// text-direction hint; string-backed sources skip both and stage the
/// string directly.
pub fn prepare(source: &ContentSource, resolver: &ResourceResolver) -> PreparedLoad {
    match source {
        ContentSource::ModelBacked(model) => {
            let resolution = resolver.to_inline(&model.body, &model.resources);
            PreparedLoad {
                body: resolution.body.clone(),
                rtl_hint: model.direction == TextDirection::Rtl,
                model_backed: true,
                document_id: Some(model.document_id),
                resolution: Some(resolution),
            }
        }
        ContentSource::StringBacked(value) => PreparedLoad {
            body: value.clone(),
            rtl_hint: false,
            model_backed: false,
            document_id: None,
            resolution: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::{prepare, ContentSource};
    use crate::model::document::{ContentModel, TextDirection};
    use crate::model::resource::{content_key, ResourceMeta};
    use crate::resolve::resolver::ResourceResolver;

    #[test]
    fn model_backed_prepare_resolves_identifiers_inline() {
        let mut model = ContentModel::new_draft("<p><img data-id=\"r1\"></p>");
        model.resources.insert(ResourceMeta {
            id: "r1".to_string(),
            name: None,
            mime: "image/png".to_string(),
            byte_len: 4,
            content_key: content_key(b"r1"),
        });
        let source = ContentSource::ModelBacked(model);
        let prepared = prepare(&source, &ResourceResolver::new(true, false));
        assert!(prepared.body().contains("src=\"embedded://r1\""));
        assert_eq!(prepared.resolution().map(|r| r.resolved), Some(1));
        assert!(prepared.model_backed);
    }

    #[test]
    fn rtl_model_carries_direction_hint() {
        let mut model = ContentModel::new_draft("<p>نص</p>");
        model.direction = TextDirection::Rtl;
        let prepared = prepare(
            &ContentSource::ModelBacked(model),
            &ResourceResolver::new(true, false),
        );
        assert!(prepared.rtl_hint);
    }

    #[test]
    fn string_backed_prepare_skips_resolution() {
        let source = ContentSource::StringBacked("<p><img data-id=\"r1\"></p>".to_string());
        let prepared = prepare(&source, &ResourceResolver::new(true, false));
        assert_eq!(prepared.body(), "<p><img data-id=\"r1\"></p>");
        assert!(prepared.resolution().is_none());
        assert!(!prepared.model_backed);
        assert!(prepared.document_id.is_none());
    }
}
