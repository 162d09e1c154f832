//! Core engine for synchronizing an editable rich-document surface with a
//! backing content model.
//!
//! The engine owns three concerns the host composes through capability
//! traits: mode-aware edit propagation (rich ⇄ plain text without data
//! loss), content-addressed embedded resource resolution, and
//! deterministic binding lifecycle.

pub mod bus;
pub mod capability;
pub mod config;
pub mod load;
pub mod logging;
pub mod mode;
pub mod model;
pub mod resolve;
pub mod session;
pub mod sync;

pub use bus::{EngineEvent, EngineSignal, EventSink, NullSink};
pub use capability::{EditorSurface, MarkupSanitizer, PassthroughSanitizer, ResourceStore};
pub use config::EngineConfig;
pub use load::pipeline::{prepare, ContentSource, PreparedLoad};
pub use logging::{default_log_level, init_logging, logging_status};
pub use mode::controller::{ModeController, ModeTransition};
pub use model::document::{
    BodyMode, ContentModel, DocumentId, DocumentOrigin, TextDirection,
};
pub use model::resource::{content_key, NewResource, ResourceId, ResourceMeta, ResourceSet};
pub use resolve::resolver::{
    inline_handle, ResolveDirection, Resolution, ResourceResolver, INLINE_SCHEME,
};
pub use session::coordinator::{
    Cleanup, EditorSession, LoadApply, SessionError, SessionId,
};
pub use sync::engine::{EditOptions, EditOutcome, SyncEngine};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
