//! Display mode state machine.
//!
//! # Responsibility
//! - Track the display mode of one binding and apply the load-time and
//!   user-requested transitions.
//! - Report the tab-stop restriction consumed by the session.
//!
//! # Invariants
//! - Conversion to plain text happens only for a freshly authored draft;
//!   a persisted plaintext body is adopted as-is.
//! - After a conversion the model origin flips to `Persisted`, so a later
//!   load of the same model can never convert again.
//! - Transitions outside the table are rejected with state unchanged.

use crate::mode::convert::{plain_to_rich, rich_to_plain};
use crate::model::document::{BodyMode, ContentModel, DocumentOrigin};
use log::{debug, warn};

/// Result of one mode evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeTransition {
    /// Fresh draft body was converted to plain text.
    ConvertedToPlain,
    /// Persisted plaintext body adopted without conversion.
    AdoptedPlain,
    /// Plain body was converted to minimal rich markup.
    ConvertedToRich,
    /// No trigger matched; state unchanged.
    Unchanged,
    /// Requested transition is not in the table; state unchanged.
    Rejected,
}

/// Owns the display mode of one binding.
#[derive(Debug, Clone)]
pub struct ModeController {
    display: BodyMode,
    conversions: u32,
}

impl Default for ModeController {
    fn default() -> Self {
        Self::new()
    }
}

impl ModeController {
    /// A new binding always starts on the rich surface.
    pub fn new() -> Self {
        Self {
            display: BodyMode::Rich,
            conversions: 0,
        }
    }

    /// Current display mode.
    pub fn display(&self) -> BodyMode {
        self.display
    }

    /// How many plaintext conversions this controller performed.
    pub fn conversion_count(&self) -> u32 {
        self.conversions
    }

    /// Whether tab focus into the surface should be restricted.
    pub fn restrict_tab_stop(&self) -> bool {
        self.display == BodyMode::Plain
    }

    /// Applies the load-time rows of the transition table.
    ///
    /// Converts the body of a freshly authored plaintext-tagged draft
    /// exactly once; a persisted plaintext body is trusted as final.
    pub fn evaluate_on_load(&mut self, model: &mut ContentModel) -> ModeTransition {
        match (self.display, model.mode, model.origin) {
            (BodyMode::Rich, BodyMode::Plain, DocumentOrigin::FreshDraft) => {
                model.body = rich_to_plain(&model.body);
                // The body is final plaintext from here on; a reload must
                // adopt it rather than convert a second time.
                model.origin = DocumentOrigin::Persisted;
                self.display = BodyMode::Plain;
                self.conversions += 1;
                debug!(
                    "event=mode_convert module=mode status=ok direction=to_plain document_id={}",
                    model.document_id
                );
                ModeTransition::ConvertedToPlain
            }
            (BodyMode::Rich, BodyMode::Plain, DocumentOrigin::Persisted) => {
                self.display = BodyMode::Plain;
                debug!(
                    "event=mode_adopt module=mode status=ok document_id={}",
                    model.document_id
                );
                ModeTransition::AdoptedPlain
            }
            _ => ModeTransition::Unchanged,
        }
    }

    /// Applies the explicit request for rich mode.
    pub fn request_rich(&mut self, model: &mut ContentModel) -> ModeTransition {
        if self.display != BodyMode::Plain {
            warn!(
                "event=mode_transition_rejected module=mode status=error requested=rich display=rich document_id={}",
                model.document_id
            );
            return ModeTransition::Rejected;
        }
        model.body = plain_to_rich(&model.body);
        model.mode = BodyMode::Rich;
        self.display = BodyMode::Rich;
        debug!(
            "event=mode_convert module=mode status=ok direction=to_rich document_id={}",
            model.document_id
        );
        ModeTransition::ConvertedToRich
    }

    /// Records a display mode switched by an external collaborator.
    ///
    /// The external toggle owns the body rewrite; this only keeps the
    /// display state (and the tab-stop hook derived from it) in sync.
    pub fn observe_external(&mut self, mode: BodyMode) {
        self.display = mode;
    }

    /// Releases per-binding state at teardown.
    pub fn reset(&mut self) {
        self.display = BodyMode::Rich;
        self.conversions = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::{ModeController, ModeTransition};
    use crate::model::document::{BodyMode, ContentModel, DocumentOrigin};

    fn fresh_plain_tagged(body: &str) -> ContentModel {
        let mut model = ContentModel::new_draft(body);
        model.mode = BodyMode::Plain;
        model
    }

    #[test]
    fn fresh_plaintext_draft_converts_once() {
        let mut controller = ModeController::new();
        let mut model = fresh_plain_tagged("<p>Hello <b>world</b></p>");

        let transition = controller.evaluate_on_load(&mut model);
        assert_eq!(transition, ModeTransition::ConvertedToPlain);
        assert_eq!(model.body, "Hello world");
        assert_eq!(model.origin, DocumentOrigin::Persisted);
        assert_eq!(controller.conversion_count(), 1);
    }

    #[test]
    fn persisted_plaintext_is_adopted_without_conversion() {
        let mut controller = ModeController::new();
        let mut model =
            ContentModel::persisted(uuid::Uuid::new_v4(), "already plain", BodyMode::Plain);

        let transition = controller.evaluate_on_load(&mut model);
        assert_eq!(transition, ModeTransition::AdoptedPlain);
        assert_eq!(model.body, "already plain");
        assert_eq!(controller.conversion_count(), 0);
    }

    #[test]
    fn conversion_count_stays_one_across_two_loads() {
        let mut controller = ModeController::new();
        let mut model = fresh_plain_tagged("<p>draft</p>");

        controller.evaluate_on_load(&mut model);
        // Second load of the now-final body, fresh controller as a new
        // binding would have.
        let mut second = ModeController::new();
        let transition = second.evaluate_on_load(&mut model);
        assert_eq!(transition, ModeTransition::AdoptedPlain);
        assert_eq!(
            controller.conversion_count() + second.conversion_count(),
            1
        );
        assert_eq!(model.body, "draft");
    }

    #[test]
    fn rich_tagged_model_loads_unchanged() {
        let mut controller = ModeController::new();
        let mut model = ContentModel::new_draft("<p>rich</p>");
        assert_eq!(
            controller.evaluate_on_load(&mut model),
            ModeTransition::Unchanged
        );
        assert_eq!(model.body, "<p>rich</p>");
        assert_eq!(controller.display(), BodyMode::Rich);
    }

    #[test]
    fn plain_display_converts_back_to_rich_on_request() {
        let mut controller = ModeController::new();
        let mut model = fresh_plain_tagged("<p>text</p>");
        controller.evaluate_on_load(&mut model);

        let transition = controller.request_rich(&mut model);
        assert_eq!(transition, ModeTransition::ConvertedToRich);
        assert_eq!(model.mode, BodyMode::Rich);
        assert_eq!(model.body, "<p>text</p>");
        assert_eq!(controller.display(), BodyMode::Rich);
    }

    #[test]
    fn rich_request_while_rich_is_rejected_unchanged() {
        let mut controller = ModeController::new();
        let mut model = ContentModel::new_draft("<p>body</p>");
        assert_eq!(controller.request_rich(&mut model), ModeTransition::Rejected);
        assert_eq!(model.body, "<p>body</p>");
        assert_eq!(controller.display(), BodyMode::Rich);
    }

    #[test]
    fn tab_stop_follows_display_mode() {
        let mut controller = ModeController::new();
        assert!(!controller.restrict_tab_stop());
        controller.observe_external(BodyMode::Plain);
        assert!(controller.restrict_tab_stop());
        controller.reset();
        assert!(!controller.restrict_tab_stop());
    }
}
