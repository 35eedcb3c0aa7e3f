//! Per-step form state: field text, validity, error labels, and the submit
//! gate.
//!
//! A [`StepForm`] owns one [`FieldState`] per field on the active step. The
//! UI writes text into it, asks it whether the submit button should be
//! enabled, and routes every submit attempt (button press or Enter in a
//! field) through [`StepForm::request_submit`], which enforces validation
//! and the single-in-flight rule.

use regflow_types::{FieldKind, Step, WRONG_FORMAT};
use tracing::debug;

/// Which element of the step form currently holds focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    /// A text field, by index into the step's flattened field list.
    Field(usize),
    /// The submit button.
    SubmitButton,
}

/// One text field and its validation state.
#[derive(Debug, Clone)]
pub struct FieldState {
    kind: FieldKind,
    text: String,
    error: Option<&'static str>,
}

impl FieldState {
    fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            text: String::new(),
            error: None,
        }
    }

    /// The field's kind, carrying its placeholder and bounds.
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// The current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The error label to render beneath the field, when set.
    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    /// Whether the character count satisfies the kind's bounds.
    pub fn is_valid(&self) -> bool {
        self.kind.accepts(self.text.chars().count())
    }

    /// Replace the field text. Editing clears any standing error label.
    pub fn set_text<S: Into<String>>(&mut self, text: S) {
        self.text = text.into();
        self.error = None;
    }
}

/// Outcome of a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitDecision {
    /// Every field is valid; the caller should issue the request with these
    /// values, in field order.
    Submit { values: Vec<String> },
    /// At least one field is invalid; its index now carries the error label
    /// and should receive focus.
    Rejected { focus: usize },
    /// A request is already in flight; the attempt is dropped.
    Ignored,
}

/// Form state for the active registration step.
#[derive(Debug, Clone)]
pub struct StepForm {
    step: Step,
    fields: Vec<FieldState>,
    focus: FocusTarget,
    loading: bool,
}

impl StepForm {
    /// Fresh form for a step: empty fields, no errors, focus on the first
    /// field, nothing in flight.
    pub fn new(step: Step) -> Self {
        let fields = step.fields().map(FieldState::new).collect();
        Self {
            step,
            fields,
            focus: FocusTarget::Field(0),
            loading: false,
        }
    }

    /// The step this form belongs to.
    pub fn step(&self) -> Step {
        self.step
    }

    /// All fields in input order.
    pub fn fields(&self) -> &[FieldState] {
        &self.fields
    }

    /// A single field by index.
    pub fn field(&self, index: usize) -> Option<&FieldState> {
        self.fields.get(index)
    }

    /// Current focus target.
    pub fn focus(&self) -> FocusTarget {
        self.focus
    }

    /// Whether a request is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Replace a field's text, clearing its error label.
    pub fn enter<S: Into<String>>(&mut self, index: usize, text: S) {
        if let Some(field) = self.fields.get_mut(index) {
            field.set_text(text);
        }
    }

    /// The submit button is enabled once every field is non-empty. Validity
    /// is only checked when the user actually submits.
    pub fn continue_enabled(&self) -> bool {
        self.fields.iter().all(|field| !field.text().is_empty())
    }

    /// Index of the first field failing its bounds, if any.
    pub fn first_invalid(&self) -> Option<usize> {
        self.fields.iter().position(|field| !field.is_valid())
    }

    /// The submit gate.
    ///
    /// Drops the attempt while a request is in flight. With an invalid field
    /// present, stamps the error label on the first one, moves focus there,
    /// and rejects. Otherwise marks the form loading, dismisses field focus,
    /// and hands back the values to send.
    pub fn request_submit(&mut self) -> SubmitDecision {
        if self.loading {
            debug!(step = ?self.step, "submit ignored, request already in flight");
            return SubmitDecision::Ignored;
        }
        if let Some(index) = self.first_invalid() {
            self.fields[index].error = Some(WRONG_FORMAT);
            self.focus = FocusTarget::Field(index);
            debug!(step = ?self.step, field = index, "submit rejected by validation");
            return SubmitDecision::Rejected { focus: index };
        }
        self.loading = true;
        self.focus = FocusTarget::SubmitButton;
        let values = self.fields.iter().map(|field| field.text().to_string()).collect();
        SubmitDecision::Submit { values }
    }

    /// Service failure: clear the loading state and surface the generic
    /// error on the step's first field.
    pub fn fail_submit(&mut self) {
        self.loading = false;
        if let Some(field) = self.fields.first_mut() {
            field.error = Some(WRONG_FORMAT);
        }
        self.focus = FocusTarget::Field(0);
    }

    /// Move focus to a specific field.
    pub fn focus_field(&mut self, index: usize) {
        if index < self.fields.len() {
            self.focus = FocusTarget::Field(index);
        }
    }

    /// Advance focus through the ring: fields in order, then the submit
    /// button, then back to the first field.
    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            FocusTarget::Field(index) if index + 1 < self.fields.len() => FocusTarget::Field(index + 1),
            FocusTarget::Field(_) => FocusTarget::SubmitButton,
            FocusTarget::SubmitButton => FocusTarget::Field(0),
        };
    }

    /// Move focus backwards through the ring.
    pub fn focus_prev(&mut self) {
        self.focus = match self.focus {
            FocusTarget::Field(0) => FocusTarget::SubmitButton,
            FocusTarget::Field(index) => FocusTarget::Field(index - 1),
            FocusTarget::SubmitButton => FocusTarget::Field(self.fields.len().saturating_sub(1)),
        };
    }
}
