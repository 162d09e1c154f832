//! The editor session: one surface bound to one content source.

use crate::bus::{EngineEvent, EngineSignal, EventSink};
use crate::capability::{EditorSurface, MarkupSanitizer};
use crate::config::EngineConfig;
use crate::load::pipeline::{self, ContentSource, PreparedLoad};
use crate::mode::controller::{ModeController, ModeTransition};
use crate::model::document::{ContentModel, TextDirection};
use crate::resolve::resolver::ResourceResolver;
use crate::sync::engine::{EditOptions, EditOutcome, SyncEngine};
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

/// Stable identifier for one binding instance.
pub type SessionId = Uuid;

/// Teardown callback collected by the session.
pub type Cleanup = Box<dyn FnOnce()>;

/// Lifecycle misuse errors reported to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The session was disposed; operating on it is a caller bug.
    StaleSession(SessionId),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StaleSession(session_id) => {
                write!(f, "session is disposed: {session_id}")
            }
        }
    }
}

impl Error for SessionError {}

/// Disposition of applying a prepared load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadApply {
    /// Content was materialized and the binding armed.
    Applied,
    /// The session was disposed mid-flight; the load was discarded.
    DiscardedStale,
}

/// Transient per-binding state. Never persisted.
#[derive(Debug, Default)]
struct SyncState {
    is_loaded: bool,
    has_value: bool,
    /// Edits are accepted once this instant passes. `None` = not armed.
    armed_at: Option<Instant>,
    disposed: bool,
}

/// One live binding between a surface and a content source.
///
/// Created with [`EditorSession::bind`]; torn down with
/// [`EditorSession::dispose`]. All operations are serialized through the
/// exclusive borrow the host holds.
pub struct EditorSession {
    session_id: SessionId,
    label: String,
    source: ContentSource,
    surface: Box<dyn EditorSurface>,
    sink: Box<dyn EventSink>,
    engine: SyncEngine,
    controller: ModeController,
    config: EngineConfig,
    state: SyncState,
    cleanups: Vec<Cleanup>,
}

impl EditorSession {
    /// Binds a surface to a content source.
    ///
    /// The binding starts unloaded and unarmed: edits are dropped until a
    /// load has been applied.
    pub fn bind(
        source: ContentSource,
        surface: Box<dyn EditorSurface>,
        sanitizer: Arc<dyn MarkupSanitizer>,
        sink: Box<dyn EventSink>,
        config: EngineConfig,
    ) -> Self {
        let session_id = Uuid::new_v4();
        let resolver = ResourceResolver::from_config(&config);
        info!(
            "event=session_bound module=session status=ok session_id={} label={} model_backed={}",
            session_id,
            config.label,
            source.is_model_backed()
        );
        Self {
            session_id,
            label: config.label.clone(),
            source,
            surface,
            sink,
            engine: SyncEngine::new(sanitizer, resolver),
            controller: ModeController::new(),
            config,
            state: SyncState::default(),
            cleanups: Vec::new(),
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_loaded(&self) -> bool {
        self.state.is_loaded
    }

    pub fn is_disposed(&self) -> bool {
        self.state.disposed
    }

    /// Derived indicator: trimmed content is non-empty.
    pub fn has_value(&self) -> bool {
        self.state.has_value
    }

    /// The backing model, for model-backed bindings.
    pub fn model(&self) -> Option<&ContentModel> {
        match &self.source {
            ContentSource::ModelBacked(model) => Some(model),
            ContentSource::StringBacked(_) => None,
        }
    }

    /// The backing value, for string-backed bindings.
    pub fn value(&self) -> Option<&str> {
        match &self.source {
            ContentSource::ModelBacked(_) => None,
            ContentSource::StringBacked(value) => Some(value),
        }
    }

    /// Stages renderable content for this binding.
    ///
    /// May suspend on resolver lookups; the session is not mutated, so a
    /// dispose can land between this and [`Self::apply_load`].
    pub fn prepare_load(&self) -> Result<PreparedLoad, SessionError> {
        if self.state.disposed {
            return Err(SessionError::StaleSession(self.session_id));
        }
        Ok(pipeline::prepare(&self.source, self.engine.resolver()))
    }

    /// Materializes a prepared load into the surface.
    ///
    /// Silently discards the load when the session was disposed after
    /// preparation; that race is expected, not a caller bug.
    pub fn apply_load(&mut self, prepared: PreparedLoad) -> LoadApply {
        if self.state.disposed {
            debug!(
                "event=load_discarded module=session status=ok session_id={} label={}",
                self.session_id, self.label
            );
            return LoadApply::DiscardedStale;
        }

        self.surface.set_content(&prepared.body);
        if prepared.rtl_hint {
            self.surface.set_text_direction(TextDirection::Rtl);
        }

        let mut visible_body = prepared.body;
        if let ContentSource::ModelBacked(model) = &mut self.source {
            let transition = self.controller.evaluate_on_load(model);
            if transition == ModeTransition::ConvertedToPlain {
                self.surface.set_content(&model.body);
                visible_body = model.body.clone();
            }
        }
        self.surface
            .set_tab_stop(!self.controller.restrict_tab_stop());

        self.state.is_loaded = true;
        self.state.has_value = !visible_body.trim().is_empty();
        self.sink.emit(EngineEvent::ContentLoaded {
            document_id: prepared.document_id,
            model_backed: prepared.model_backed,
        });

        // Arm edit acceptance strictly after materialization. String
        // bindings wait out the settle delay so the surface's own
        // initialization event is never mistaken for a user edit.
        self.state.armed_at = Some(if prepared.model_backed {
            Instant::now()
        } else {
            Instant::now() + self.config.settle_delay()
        });

        info!(
            "event=load_applied module=session status=ok session_id={} label={} model_backed={}",
            self.session_id, self.label, prepared.model_backed
        );
        LoadApply::Applied
    }

    /// Prepares and applies in one step, for hosts that cannot interleave
    /// a teardown with the load.
    pub fn load(&mut self) -> Result<LoadApply, SessionError> {
        let prepared = self.prepare_load()?;
        Ok(self.apply_load(prepared))
    }

    /// Processes one surface edit event.
    ///
    /// Events arriving before the binding is armed are dropped; events
    /// after dispose are a caller bug and fail explicitly.
    pub fn handle_edit(
        &mut self,
        raw: &str,
        opts: EditOptions,
    ) -> Result<EditOutcome, SessionError> {
        if self.state.disposed {
            return Err(SessionError::StaleSession(self.session_id));
        }
        if !self.accepting_edits() {
            debug!(
                "event=edit_dropped module=session status=ok reason=not_armed session_id={} label={}",
                self.session_id, self.label
            );
            return Ok(EditOutcome::NotArmed);
        }

        let display = self.controller.display();
        let outcome = match &mut self.source {
            ContentSource::ModelBacked(model) => {
                self.engine
                    .on_edit(model, display, raw, opts, self.sink.as_mut())
            }
            ContentSource::StringBacked(value) => self.engine.on_string_edit(value, raw),
        };
        if let EditOutcome::Applied { has_value, .. } = outcome {
            self.state.has_value = has_value;
        }
        Ok(outcome)
    }

    /// Consumes an inbound bus signal.
    pub fn handle_signal(&mut self, signal: EngineSignal) {
        if self.state.disposed {
            return;
        }
        match signal {
            EngineSignal::ModeChanged(mode) => {
                self.controller.observe_external(mode);
                self.surface
                    .set_tab_stop(!self.controller.restrict_tab_stop());
            }
        }
    }

    /// Explicitly requests the rich display mode.
    pub fn request_rich_mode(&mut self) -> Result<ModeTransition, SessionError> {
        if self.state.disposed {
            return Err(SessionError::StaleSession(self.session_id));
        }
        let ContentSource::ModelBacked(model) = &mut self.source else {
            return Ok(ModeTransition::Rejected);
        };
        let transition = self.controller.request_rich(model);
        if transition == ModeTransition::ConvertedToRich {
            self.surface.set_content(&model.body);
            self.surface.set_tab_stop(true);
        }
        Ok(transition)
    }

    /// Registers a teardown callback, run once at dispose.
    pub fn register_cleanup(
        &mut self,
        cleanup: impl FnOnce() + 'static,
    ) -> Result<(), SessionError> {
        if self.state.disposed {
            return Err(SessionError::StaleSession(self.session_id));
        }
        self.cleanups.push(Box::new(cleanup));
        Ok(())
    }

    /// Tears the binding down.
    ///
    /// Runs every registered cleanup in registration order, releases
    /// controller state, then destroys the surface. Idempotent.
    pub fn dispose(&mut self) {
        if self.state.disposed {
            return;
        }
        self.state.disposed = true;
        self.state.armed_at = None;

        let cleanups: Vec<Cleanup> = self.cleanups.drain(..).collect();
        let cleanup_count = cleanups.len();
        for cleanup in cleanups {
            cleanup();
        }
        self.controller.reset();
        self.surface.destroy();

        info!(
            "event=session_disposed module=session status=ok session_id={} label={} cleanups={}",
            self.session_id, self.label, cleanup_count
        );
    }

    fn accepting_edits(&self) -> bool {
        match self.state.armed_at {
            Some(armed_at) => Instant::now() >= armed_at,
            None => false,
        }
    }
}
