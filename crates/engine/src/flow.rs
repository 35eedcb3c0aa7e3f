//! The coordinator: linear step-to-step navigation.
//!
//! [`Flow`] owns the active [`StepForm`] and the fixed step order. A
//! successful submit advances to a fresh form for the next step; finishing
//! the password step restarts the flow at the phone step, the terminal
//! equivalent of the original navigation stack popping back to its root.

use regflow_types::Step;
use tracing::info;

use crate::form::{StepForm, SubmitDecision};

/// What a submit result did to the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowProgress {
    /// Moved on to the given step with a fresh form.
    Advanced(Step),
    /// The final step succeeded; the flow restarted at the beginning.
    Completed,
    /// The service rejected the request; the form shows the error.
    Failed,
}

/// Wizard state: the active step's form plus a counter of completed runs.
#[derive(Debug, Clone)]
pub struct Flow {
    form: StepForm,
    completed_runs: usize,
}

impl Default for Flow {
    fn default() -> Self {
        Self::new()
    }
}

impl Flow {
    /// Start at the first step with a fresh form.
    pub fn new() -> Self {
        Self {
            form: StepForm::new(Step::first()),
            completed_runs: 0,
        }
    }

    /// The active step.
    pub fn step(&self) -> Step {
        self.form.step()
    }

    /// The active step's form.
    pub fn form(&self) -> &StepForm {
        &self.form
    }

    /// Mutable access for routing user input into the form.
    pub fn form_mut(&mut self) -> &mut StepForm {
        &mut self.form
    }

    /// How many times the whole wizard has been completed.
    pub fn completed_runs(&self) -> usize {
        self.completed_runs
    }

    /// Route a submit attempt through the active form's gate.
    pub fn request_submit(&mut self) -> SubmitDecision {
        self.form.request_submit()
    }

    /// Apply the service's answer to the in-flight submit.
    ///
    /// Success advances the wizard; failure clears the loading state and
    /// leaves the form showing the error. Results for a step other than the
    /// active one are stale and dropped.
    pub fn on_submit_result(&mut self, step: Step, ok: bool) -> FlowProgress {
        if step != self.form.step() {
            // Single-flight submission makes this unreachable in practice.
            return FlowProgress::Failed;
        }
        if !ok {
            self.form.fail_submit();
            return FlowProgress::Failed;
        }
        match self.form.step().next() {
            Some(next) => {
                info!(from = ?step, to = ?next, "advancing registration step");
                self.form = StepForm::new(next);
                FlowProgress::Advanced(next)
            }
            None => {
                self.completed_runs += 1;
                info!(runs = self.completed_runs, "registration completed, restarting flow");
                self.form = StepForm::new(Step::first());
                FlowProgress::Completed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FocusTarget;

    fn submit_valid(flow: &mut Flow) {
        let filler: Vec<String> = flow
            .form()
            .fields()
            .iter()
            .map(|field| "x".repeat(field.kind().min_chars().max(5)))
            .collect();
        for (index, text) in filler.into_iter().enumerate() {
            flow.form_mut().enter(index, text);
        }
        assert!(matches!(flow.request_submit(), SubmitDecision::Submit { .. }));
    }

    #[test]
    fn success_walks_the_fixed_step_order() {
        let mut flow = Flow::new();
        assert_eq!(flow.step(), Step::Phone);

        submit_valid(&mut flow);
        assert_eq!(flow.on_submit_result(Step::Phone, true), FlowProgress::Advanced(Step::Email));

        submit_valid(&mut flow);
        assert_eq!(flow.on_submit_result(Step::Email, true), FlowProgress::Advanced(Step::Name));

        submit_valid(&mut flow);
        assert_eq!(flow.on_submit_result(Step::Name, true), FlowProgress::Advanced(Step::Password));
    }

    #[test]
    fn finishing_the_last_step_restarts_at_phone() {
        let mut flow = Flow::new();
        for _ in 0..3 {
            submit_valid(&mut flow);
            let step = flow.step();
            flow.on_submit_result(step, true);
        }
        assert_eq!(flow.step(), Step::Password);
        submit_valid(&mut flow);
        assert_eq!(flow.on_submit_result(Step::Password, true), FlowProgress::Completed);
        assert_eq!(flow.step(), Step::Phone);
        assert_eq!(flow.completed_runs(), 1);
    }

    #[test]
    fn advancing_hands_out_a_fresh_form() {
        let mut flow = Flow::new();
        submit_valid(&mut flow);
        flow.on_submit_result(Step::Phone, true);
        assert!(flow.form().fields().iter().all(|f| f.text().is_empty()));
        assert!(!flow.form().is_loading());
        assert_eq!(flow.form().focus(), FocusTarget::Field(0));
    }

    #[test]
    fn failure_keeps_the_step_and_shows_the_error() {
        let mut flow = Flow::new();
        submit_valid(&mut flow);
        assert_eq!(flow.on_submit_result(Step::Phone, false), FlowProgress::Failed);
        assert_eq!(flow.step(), Step::Phone);
        assert_eq!(flow.form().field(0).unwrap().error(), Some("Wrong Format"));
        assert!(!flow.form().is_loading());
        // The user's input survives a failed request.
        assert_eq!(flow.form().field(0).unwrap().text(), "xxxxxxxxxx");
    }

    #[test]
    fn stale_results_are_dropped() {
        let mut flow = Flow::new();
        submit_valid(&mut flow);
        assert_eq!(flow.on_submit_result(Step::Email, true), FlowProgress::Failed);
        assert_eq!(flow.step(), Step::Phone);
        assert!(flow.form().is_loading());
    }
}
