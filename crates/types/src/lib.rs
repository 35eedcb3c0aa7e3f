//! Shared vocabulary for the registration wizard.
//!
//! These types are the common language spoken by the engine, the stub
//! service, and the TUI: which step is active, which fields it shows, what
//! the validity bounds are, and which messages and effects flow through the
//! event loop.

use std::{error::Error, str::FromStr};

use serde::{Deserialize, Serialize};

/// Error label shown on a field that failed validation or whose submit
/// request was rejected by the service.
pub const WRONG_FORMAT: &str = "Wrong Format";

/// One text input in a registration form, with its associated validity rule.
///
/// A field is valid when its character count lies within
/// `[min_chars, max_chars]`, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Phone,
    Email,
    Name,
    Surname,
    Password,
    ConfirmPassword,
}

impl FieldKind {
    /// Placeholder text rendered while the field is empty.
    pub fn placeholder(&self) -> &'static str {
        match self {
            FieldKind::Phone => "phone",
            FieldKind::Email => "email",
            FieldKind::Name => "name",
            FieldKind::Surname => "surname",
            FieldKind::Password => "password",
            FieldKind::ConfirmPassword => "confirm password",
        }
    }

    /// Minimum accepted character count.
    pub fn min_chars(&self) -> usize {
        match self {
            FieldKind::Phone => 10,
            FieldKind::Email => 3,
            FieldKind::Password | FieldKind::ConfirmPassword => 5,
            FieldKind::Name | FieldKind::Surname => 1,
        }
    }

    /// Maximum accepted character count. Input beyond this is clamped at the
    /// text-entry layer, not merely flagged afterwards.
    pub fn max_chars(&self) -> usize {
        match self {
            FieldKind::Phone => 10,
            _ => 20,
        }
    }

    /// Bounds check for a character count.
    pub fn accepts(&self, count: usize) -> bool {
        self.min_chars() <= count && count <= self.max_chars()
    }

    /// Whether the field's text should be rendered masked.
    pub fn is_secret(&self) -> bool {
        matches!(self, FieldKind::Password | FieldKind::ConfirmPassword)
    }
}

/// A registration step: which screen of the wizard is active.
///
/// Steps run in a fixed linear order; completing the last one wraps the flow
/// back to the beginning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Phone,
    Email,
    Name,
    Password,
}

impl Step {
    /// All steps in wizard order.
    pub const ALL: [Step; 4] = [Step::Phone, Step::Email, Step::Name, Step::Password];

    /// The step the wizard starts on.
    pub const fn first() -> Step {
        Step::Phone
    }

    /// The following step, or `None` after the last one.
    pub fn next(&self) -> Option<Step> {
        match self {
            Step::Phone => Some(Step::Email),
            Step::Email => Some(Step::Name),
            Step::Name => Some(Step::Password),
            Step::Password => None,
        }
    }

    /// Title rendered above the step's form.
    pub fn title(&self) -> &'static str {
        match self {
            Step::Phone => "Your phone number",
            Step::Email => "Your email address",
            Step::Name => "Your name",
            Step::Password => "Choose a password",
        }
    }

    /// The step's fields grouped into display rows. The name step shows two
    /// fields side by side; the password step stacks its two fields.
    pub fn rows(&self) -> &'static [&'static [FieldKind]] {
        match self {
            Step::Phone => &[&[FieldKind::Phone]],
            Step::Email => &[&[FieldKind::Email]],
            Step::Name => &[&[FieldKind::Name, FieldKind::Surname]],
            Step::Password => &[&[FieldKind::Password], &[FieldKind::ConfirmPassword]],
        }
    }

    /// The step's fields flattened into input order.
    pub fn fields(&self) -> impl Iterator<Item = FieldKind> + 'static {
        self.rows().iter().flat_map(|row| row.iter().copied())
    }

    /// Zero-based position of the step in the wizard, for progress display.
    pub fn position(&self) -> usize {
        Step::ALL.iter().position(|step| step == self).unwrap_or(0)
    }
}

impl FromStr for Step {
    type Err = ParseStepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "phone" => Ok(Step::Phone),
            "email" => Ok(Step::Email),
            "name" => Ok(Step::Name),
            "password" => Ok(Step::Password),
            _ => Err(ParseStepError),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseStepError;

impl std::fmt::Display for ParseStepError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("invalid step; expected 'phone', 'email', 'name', or 'password'")
    }
}

impl Error for ParseStepError {}

/// Result of a background submit task, delivered back into the event loop.
///
/// The service's error carries no payload, so the outcome collapses to a
/// success flag plus a human-readable log line for the status area.
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    /// The step whose values were submitted.
    pub step: Step,
    /// Whether the service accepted the submission.
    pub ok: bool,
    /// Log message describing the outcome.
    pub log: String,
}

/// Messages that can be sent to update the application state.
#[derive(Debug, Clone)]
pub enum Msg {
    /// Periodic UI tick (drives the throbber).
    Tick,
    /// Terminal resized.
    Resize(u16, u16),
    /// Background submit completed with an outcome.
    SubmitCompleted(SubmitOutcome),
}

/// Side effects reported by components for the runtime to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Submit the given step's field values to the registration service.
    SubmitRequested { step: Step, values: Vec<String> },
    /// Exit the application.
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_bounds_match_the_rules() {
        assert_eq!(FieldKind::Phone.min_chars(), 10);
        assert_eq!(FieldKind::Phone.max_chars(), 10);
        assert_eq!(FieldKind::Email.min_chars(), 3);
        assert_eq!(FieldKind::Email.max_chars(), 20);
        assert_eq!(FieldKind::Name.min_chars(), 1);
        assert_eq!(FieldKind::Surname.min_chars(), 1);
        assert_eq!(FieldKind::Password.min_chars(), 5);
        assert_eq!(FieldKind::ConfirmPassword.min_chars(), 5);
    }

    #[test]
    fn accepts_is_inclusive_at_both_ends() {
        assert!(FieldKind::Phone.accepts(10));
        assert!(!FieldKind::Phone.accepts(9));
        assert!(!FieldKind::Phone.accepts(11));
        assert!(FieldKind::Email.accepts(3));
        assert!(FieldKind::Email.accepts(20));
        assert!(!FieldKind::Email.accepts(2));
        assert!(!FieldKind::Email.accepts(21));
    }

    #[test]
    fn steps_run_phone_email_name_password() {
        assert_eq!(Step::first(), Step::Phone);
        assert_eq!(Step::Phone.next(), Some(Step::Email));
        assert_eq!(Step::Email.next(), Some(Step::Name));
        assert_eq!(Step::Name.next(), Some(Step::Password));
        assert_eq!(Step::Password.next(), None);
    }

    #[test]
    fn step_fields_flatten_in_row_order() {
        let name_fields: Vec<FieldKind> = Step::Name.fields().collect();
        assert_eq!(name_fields, vec![FieldKind::Name, FieldKind::Surname]);

        let password_fields: Vec<FieldKind> = Step::Password.fields().collect();
        assert_eq!(password_fields, vec![FieldKind::Password, FieldKind::ConfirmPassword]);

        // Two rows for the password step, one row for the name step.
        assert_eq!(Step::Password.rows().len(), 2);
        assert_eq!(Step::Name.rows().len(), 1);
    }

    #[test]
    fn wire_names_are_snake_case() {
        let step = serde_json::to_string(&Step::Phone).expect("serialize Step");
        assert_eq!(step, "\"phone\"");
        let kind = serde_json::to_string(&FieldKind::ConfirmPassword).expect("serialize FieldKind");
        assert_eq!(kind, "\"confirm_password\"");
        let back: FieldKind = serde_json::from_str("\"confirm_password\"").expect("deserialize FieldKind");
        assert_eq!(back, FieldKind::ConfirmPassword);
    }

    #[test]
    fn step_parses_from_its_lowercase_name() {
        assert_eq!("phone".parse::<Step>(), Ok(Step::Phone));
        assert_eq!("password".parse::<Step>(), Ok(Step::Password));
        assert!("Phone".parse::<Step>().is_err());
        assert!("pin".parse::<Step>().is_err());
    }

    #[test]
    fn secret_fields_are_the_password_pair() {
        assert!(FieldKind::Password.is_secret());
        assert!(FieldKind::ConfirmPassword.is_secret());
        assert!(!FieldKind::Phone.is_secret());
        assert!(!FieldKind::Email.is_secret());
    }
}
