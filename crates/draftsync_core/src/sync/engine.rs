//! Edit pipeline from raw surface content to a model write.

use crate::bus::{EngineEvent, EventSink};
use crate::capability::MarkupSanitizer;
use crate::model::document::{BodyMode, ContentModel};
use crate::resolve::resolver::ResourceResolver;
use log::debug;
use std::sync::Arc;

/// Per-edit flags forwarded from the surface event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditOptions {
    /// Announce `content.updated` after the write.
    pub announce: bool,
    /// Write even while the display mode is plain text.
    pub force: bool,
}

/// Disposition of one processed edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// Rich-mode write applied.
    Applied {
        /// Whether trimmed content is non-empty after this edit.
        has_value: bool,
        announced: bool,
    },
    /// Plain-mode write applied through the explicit force path.
    ForcedPlainWrite,
    /// Plain mode without force: the edit was discarded.
    SuppressedPlainMode,
    /// The binding is not accepting edits yet; the event was dropped.
    NotArmed,
}

/// Processes surface edits into model writes.
pub struct SyncEngine {
    sanitizer: Arc<dyn MarkupSanitizer>,
    resolver: ResourceResolver,
}

impl SyncEngine {
    pub fn new(sanitizer: Arc<dyn MarkupSanitizer>, resolver: ResourceResolver) -> Self {
        Self {
            sanitizer,
            resolver,
        }
    }

    pub fn resolver(&self) -> &ResourceResolver {
        &self.resolver
    }

    /// Runs one edit through the pipeline.
    ///
    /// The caller holds the model exclusively for the duration, so writes
    /// from one binding can never interleave.
    pub fn on_edit(
        &self,
        model: &mut ContentModel,
        display: BodyMode,
        raw: &str,
        opts: EditOptions,
        sink: &mut dyn EventSink,
    ) -> EditOutcome {
        let safe = self.sanitizer.sanitize(raw);

        if display == BodyMode::Plain {
            if !opts.force {
                return EditOutcome::SuppressedPlainMode;
            }
            model.set_body(safe);
            debug!(
                "event=edit_forced module=sync status=ok document_id={}",
                model.document_id
            );
            return EditOutcome::ForcedPlainWrite;
        }

        let has_value = !safe.trim().is_empty();
        // Unresolved references stay in the body verbatim: an imperfect
        // write beats losing the user's content.
        let resolution = self.resolver.to_identifier(&safe, &mut model.resources);
        model.set_body(resolution.body);

        if opts.announce {
            sink.emit(EngineEvent::ContentUpdated {
                document_id: model.document_id,
            });
        }
        debug!(
            "event=edit_applied module=sync status=ok document_id={} has_value={} resolved={} unresolved={}",
            model.document_id, has_value, resolution.resolved, resolution.unresolved
        );

        EditOutcome::Applied {
            has_value,
            announced: opts.announce,
        }
    }

    /// Runs one edit for a string-backed binding.
    ///
    /// Bare strings carry no resource or mode semantics; the sanitized
    /// content replaces the value directly and nothing is announced.
    pub fn on_string_edit(&self, value: &mut String, raw: &str) -> EditOutcome {
        let safe = self.sanitizer.sanitize(raw);
        let has_value = !safe.trim().is_empty();
        *value = safe;
        EditOutcome::Applied {
            has_value,
            announced: false,
        }
    }
}
