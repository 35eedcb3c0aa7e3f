//! # Regflow Engine
//!
//! The engine holds the registration wizard's flow logic, free of any
//! terminal or network dependency. It answers the questions the UI asks:
//! which fields does the active step show, is the submit button enabled, may
//! a submit proceed, where should focus land, and what happens when the
//! service answers.
//!
//! ## Architecture
//!
//! - **`form`**: per-step form state — field text, error labels, focus
//!   target, the submit gate, and the single-flight loading flag
//! - **`flow`**: the coordinator — the fixed step order, advancing on
//!   success, and restarting after the final step

pub mod flow;
pub mod form;

pub use flow::{Flow, FlowProgress};
pub use form::{FieldState, FocusTarget, StepForm, SubmitDecision};
