//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `draftsync_core` linkage.
//! - Run one bind → load → edit → dispose cycle with stub capabilities
//!   and keep output deterministic for quick local sanity checks.

use std::sync::Arc;

use draftsync_core::{
    ContentModel, ContentSource, EditOptions, EditorSession, EditorSurface, EngineConfig,
    NullSink, PassthroughSanitizer, TextDirection,
};

/// In-memory surface standing in for a real editor widget.
#[derive(Default)]
struct ProbeSurface {
    content: String,
}

impl EditorSurface for ProbeSurface {
    fn set_content(&mut self, body: &str) {
        self.content = body.to_string();
    }

    fn get_content(&self) -> String {
        self.content.clone()
    }

    fn set_text_direction(&mut self, _direction: TextDirection) {}

    fn set_tab_stop(&mut self, _enabled: bool) {}

    fn destroy(&mut self) {
        self.content.clear();
    }
}

fn main() {
    println!("draftsync_core version={}", draftsync_core::core_version());

    let model = ContentModel::new_draft("<p>probe body</p>");
    let mut session = EditorSession::bind(
        ContentSource::ModelBacked(model),
        Box::new(ProbeSurface::default()),
        Arc::new(PassthroughSanitizer),
        Box::new(NullSink),
        EngineConfig::default(),
    );

    let load = session.load().expect("fresh session should load");
    println!("load={load:?} loaded={}", session.is_loaded());

    let edit = session
        .handle_edit("<p>edited body</p>", EditOptions::default())
        .expect("armed session should accept edits");
    println!("edit={edit:?}");

    let body = session
        .model()
        .map(|model| model.body.clone())
        .unwrap_or_default();
    println!("body={body}");

    session.dispose();
    println!("disposed={}", session.is_disposed());
}
