use std::sync::{Arc, Mutex};

use draftsync_core::{
    BodyMode, ContentModel, ContentSource, EditOptions, EditOutcome, EditorSession, EditorSurface,
    EngineConfig, ModeController, ModeTransition, NullSink, PassthroughSanitizer, TextDirection,
};
use uuid::Uuid;

#[derive(Default)]
struct SurfaceState {
    content: String,
    tab_stop: Option<bool>,
}

#[derive(Clone, Default)]
struct MockSurface {
    state: Arc<Mutex<SurfaceState>>,
}

impl EditorSurface for MockSurface {
    fn set_content(&mut self, body: &str) {
        self.state.lock().expect("surface lock").content = body.to_string();
    }

    fn get_content(&self) -> String {
        self.state.lock().expect("surface lock").content.clone()
    }

    fn set_text_direction(&mut self, _direction: TextDirection) {}

    fn set_tab_stop(&mut self, enabled: bool) {
        self.state.lock().expect("surface lock").tab_stop = Some(enabled);
    }

    fn destroy(&mut self) {}
}

fn bind(model: ContentModel) -> (EditorSession, MockSurface) {
    let surface = MockSurface::default();
    let session = EditorSession::bind(
        ContentSource::ModelBacked(model),
        Box::new(surface.clone()),
        Arc::new(PassthroughSanitizer),
        Box::new(NullSink),
        EngineConfig::default(),
    );
    (session, surface)
}

#[test]
fn fresh_plaintext_draft_is_converted_on_load() {
    let mut model = ContentModel::new_draft("<p>Hello <b>world</b></p>");
    model.mode = BodyMode::Plain;
    let (mut session, surface) = bind(model);

    session.load().expect("session should load");
    let model = session.model().expect("model-backed");
    assert_eq!(model.body, "Hello world");
    assert!(!model.body.contains('<'));
    assert_eq!(model.mode, BodyMode::Plain);
    // The surface shows the converted body and restricts tab focus.
    let state = surface.state.lock().expect("surface lock");
    assert_eq!(state.content, "Hello world");
    assert_eq!(state.tab_stop, Some(false));
}

#[test]
fn persisted_plaintext_loads_without_conversion() {
    let body = "line one\nline two";
    let model = ContentModel::persisted(Uuid::new_v4(), body, BodyMode::Plain);
    let (mut session, surface) = bind(model);

    session.load().expect("session should load");
    assert_eq!(session.model().expect("model-backed").body, body);
    assert_eq!(
        surface.state.lock().expect("surface lock").content,
        body
    );
}

#[test]
fn conversion_runs_once_across_a_save_reload_cycle() {
    let mut model = ContentModel::new_draft("<p>draft text</p>");
    model.mode = BodyMode::Plain;

    let mut first = ModeController::new();
    assert_eq!(
        first.evaluate_on_load(&mut model),
        ModeTransition::ConvertedToPlain
    );
    let body_after_first = model.body.clone();

    // A reload binds a fresh controller against the now-final model.
    let mut second = ModeController::new();
    assert_eq!(
        second.evaluate_on_load(&mut model),
        ModeTransition::AdoptedPlain
    );
    assert_eq!(model.body, body_after_first);
    assert_eq!(first.conversion_count() + second.conversion_count(), 1);
}

#[test]
fn plain_display_suppresses_surface_edits_unless_forced() {
    let mut model = ContentModel::new_draft("<p>text</p>");
    model.mode = BodyMode::Plain;
    let (mut session, _surface) = bind(model);
    session.load().expect("session should load");
    let stored = session.model().expect("model-backed").body.clone();

    let suppressed = session
        .handle_edit("surface noise", EditOptions::default())
        .expect("armed session should accept the call");
    assert_eq!(suppressed, EditOutcome::SuppressedPlainMode);
    assert_eq!(session.model().expect("model-backed").body, stored);

    let forced = session
        .handle_edit(
            "replacement text",
            EditOptions {
                force: true,
                announce: false,
            },
        )
        .expect("armed session should accept the call");
    assert_eq!(forced, EditOutcome::ForcedPlainWrite);
    assert_eq!(
        session.model().expect("model-backed").body,
        "replacement text"
    );
}

#[test]
fn explicit_rich_request_converts_back_and_releases_tab_stop() {
    let mut model = ContentModel::new_draft("<p>text</p>");
    model.mode = BodyMode::Plain;
    let (mut session, surface) = bind(model);
    session.load().expect("session should load");

    let transition = session
        .request_rich_mode()
        .expect("live session should accept the request");
    assert_eq!(transition, ModeTransition::ConvertedToRich);
    let model = session.model().expect("model-backed");
    assert_eq!(model.mode, BodyMode::Rich);
    assert_eq!(model.body, "<p>text</p>");
    let state = surface.state.lock().expect("surface lock");
    assert_eq!(state.content, "<p>text</p>");
    assert_eq!(state.tab_stop, Some(true));
}

#[test]
fn rich_request_on_rich_display_is_rejected() {
    let model = ContentModel::new_draft("<p>rich</p>");
    let (mut session, _surface) = bind(model);
    session.load().expect("session should load");

    let transition = session
        .request_rich_mode()
        .expect("live session should accept the request");
    assert_eq!(transition, ModeTransition::Rejected);
    assert_eq!(session.model().expect("model-backed").body, "<p>rich</p>");
}
