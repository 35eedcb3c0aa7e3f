//! Application state for the registration TUI.
//!
//! This module owns the top-level state shared across the runtime and the
//! registration component: the flow engine, the per-field text buffers, and
//! the loading/throbber bookkeeping. All validation and step-advance logic
//! lives in the engine; this layer only mirrors it for rendering.

use std::sync::Arc;

use regflow_api::RegistrationApi;
use regflow_engine::{Flow, FlowProgress, FocusTarget};
use regflow_types::SubmitOutcome;

use crate::ui::components::text_input::TextInputState;

/// Animation frames for the in-flight request throbber.
pub const THROBBER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Cross-cutting shared context owned by the App.
///
/// Holds runtime-wide objects so components do not thread references around
/// individually.
pub struct SharedCtx {
    /// The registration service the wizard submits to.
    pub api: Arc<dyn RegistrationApi>,
    /// Global debug flag (from env).
    pub debug_enabled: bool,
}

impl SharedCtx {
    pub fn new(api: Arc<dyn RegistrationApi>) -> Self {
        let debug_enabled = std::env::var("DEBUG")
            .map(|v| !v.is_empty() && v != "0" && v.to_lowercase() != "false")
            .unwrap_or(false);
        Self { api, debug_enabled }
    }
}

/// The main application state for the wizard.
pub struct App {
    /// Shared, cross-cutting context (service handle, config).
    pub ctx: SharedCtx,
    /// The flow engine: active step, field validity, submit gating.
    pub flow: Flow,
    /// One text buffer per field on the active step, parallel to the
    /// engine's field list.
    pub inputs: Vec<TextInputState>,
    /// Whether a submit request is currently in flight.
    pub executing: bool,
    /// Animation frame for the execution throbber.
    pub throbber_idx: usize,
    /// Status line content at the bottom of the screen.
    pub status: String,
}

impl App {
    pub fn new(api: Arc<dyn RegistrationApi>) -> Self {
        let flow = Flow::new();
        let inputs = build_inputs(&flow);
        Self {
            ctx: SharedCtx::new(api),
            flow,
            inputs,
            executing: false,
            throbber_idx: 0,
            status: String::from("Fill in the form and press Enter to continue"),
        }
    }

    /// Index of the focused field, or `None` when the submit button holds
    /// focus.
    pub fn focused_field(&self) -> Option<usize> {
        match self.flow.form().focus() {
            FocusTarget::Field(index) => Some(index),
            FocusTarget::SubmitButton => None,
        }
    }

    /// Push the given text buffer's content into the engine, clearing any
    /// standing error on that field.
    pub fn sync_field(&mut self, index: usize) {
        if let Some(input) = self.inputs.get(index) {
            let text = input.input().to_string();
            self.flow.form_mut().enter(index, text);
        }
    }

    /// Advance the throbber while a request is in flight. Returns whether
    /// anything visible changed.
    pub fn on_tick(&mut self) -> bool {
        if !self.executing {
            return false;
        }
        self.throbber_idx = (self.throbber_idx + 1) % THROBBER_FRAMES.len();
        true
    }

    /// Current throbber frame.
    pub fn throbber_frame(&self) -> &'static str {
        THROBBER_FRAMES[self.throbber_idx % THROBBER_FRAMES.len()]
    }

    /// Apply a completed submit task to the flow and refresh the text
    /// buffers when the wizard moved to a new step.
    pub fn apply_submit_outcome(&mut self, outcome: &SubmitOutcome) {
        self.executing = false;
        self.throbber_idx = 0;
        match self.flow.on_submit_result(outcome.step, outcome.ok) {
            FlowProgress::Advanced(_) | FlowProgress::Completed => {
                self.inputs = build_inputs(&self.flow);
            }
            FlowProgress::Failed => {
                // Field text survives a failed request; only the error label
                // and loading state changed.
            }
        }
        self.status = outcome.log.clone();
    }
}

/// Fresh text buffers for the active step, each capped at its field's
/// maximum character count.
fn build_inputs(flow: &Flow) -> Vec<TextInputState> {
    flow.form()
        .fields()
        .iter()
        .map(|field| TextInputState::with_max_chars(field.kind().max_chars()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use regflow_api::MockApi;
    use regflow_engine::SubmitDecision;
    use regflow_types::Step;
    use std::time::Duration;

    fn test_app() -> App {
        App::new(Arc::new(MockApi::new(Duration::ZERO)))
    }

    fn type_into(app: &mut App, index: usize, text: &str) {
        for c in text.chars() {
            app.inputs[index].insert_char(c);
        }
        app.sync_field(index);
    }

    #[test]
    fn inputs_mirror_the_active_steps_fields() {
        let app = test_app();
        assert_eq!(app.flow.step(), Step::Phone);
        assert_eq!(app.inputs.len(), 1);
    }

    #[test]
    fn advancing_rebuilds_empty_buffers_for_the_next_step() {
        let mut app = test_app();
        type_into(&mut app, 0, "0123456789");
        assert!(matches!(app.flow.request_submit(), SubmitDecision::Submit { .. }));
        app.executing = true;
        app.apply_submit_outcome(&SubmitOutcome {
            step: Step::Phone,
            ok: true,
            log: "Phone verified".into(),
        });
        assert_eq!(app.flow.step(), Step::Email);
        assert_eq!(app.inputs.len(), 1);
        assert!(app.inputs[0].is_empty());
        assert!(!app.executing);
    }

    #[test]
    fn failure_preserves_typed_text() {
        let mut app = test_app();
        type_into(&mut app, 0, "0123456789");
        assert!(matches!(app.flow.request_submit(), SubmitDecision::Submit { .. }));
        app.executing = true;
        app.apply_submit_outcome(&SubmitOutcome {
            step: Step::Phone,
            ok: false,
            log: "Request failed".into(),
        });
        assert_eq!(app.flow.step(), Step::Phone);
        assert_eq!(app.inputs[0].input(), "0123456789");
        assert_eq!(app.flow.form().field(0).unwrap().error(), Some("Wrong Format"));
    }

    #[test]
    fn tick_only_animates_while_executing() {
        let mut app = test_app();
        assert!(!app.on_tick());
        app.executing = true;
        assert!(app.on_tick());
        assert_eq!(app.throbber_idx, 1);
    }

    #[test]
    fn phone_buffer_is_capped_at_ten_characters() {
        let mut app = test_app();
        type_into(&mut app, 0, "01234567890123");
        assert_eq!(app.inputs[0].input(), "0123456789");
    }
}
