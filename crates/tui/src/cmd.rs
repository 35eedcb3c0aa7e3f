//! Background execution of submit requests.
//!
//! The runtime hands an accepted submit to [`spawn_submit`], which issues
//! exactly one service call on a background task and reports a
//! [`SubmitOutcome`] back into the event loop. The confirm-password field is
//! validated client-side only; as in the upstream service contract, the
//! password step submits just the password itself.

use std::sync::Arc;

use regflow_api::{ApiError, RegistrationApi};
use regflow_types::{Step, SubmitOutcome};
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Spawn the one in-flight request for a submitted step.
pub fn spawn_submit(api: Arc<dyn RegistrationApi>, step: Step, values: Vec<String>) -> JoinHandle<SubmitOutcome> {
    tokio::spawn(async move {
        let result = dispatch(api.as_ref(), step, &values).await;
        match result {
            Ok(()) => {
                info!(?step, "registration request accepted");
                SubmitOutcome {
                    step,
                    ok: true,
                    log: success_log(step).to_string(),
                }
            }
            Err(error) => {
                warn!(?step, %error, "registration request failed");
                SubmitOutcome {
                    step,
                    ok: false,
                    log: format!("Request failed: {error}"),
                }
            }
        }
    })
}

/// Route the step's values to the matching service operation.
async fn dispatch(api: &dyn RegistrationApi, step: Step, values: &[String]) -> Result<(), ApiError> {
    let first = values.first().map(String::as_str).unwrap_or_default();
    match step {
        Step::Phone => api.check_phone(first).await.map(|_| ()),
        Step::Email => api.add_email(first).await.map(|_| ()),
        Step::Name => {
            let surname = values.get(1).map(String::as_str).unwrap_or_default();
            api.add_name(first, surname).await.map(|_| ())
        }
        Step::Password => api.add_password(first).await.map(|_| ()),
    }
}

fn success_log(step: Step) -> &'static str {
    match step {
        Step::Phone => "Phone number verified",
        Step::Email => "Email registered",
        Step::Name => "Name registered",
        Step::Password => "Registration complete",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regflow_api::MockApi;
    use std::time::Duration;

    fn instant_api() -> Arc<dyn RegistrationApi> {
        Arc::new(MockApi::new(Duration::ZERO))
    }

    #[tokio::test]
    async fn accepted_submit_reports_success_for_its_step() {
        let handle = spawn_submit(instant_api(), Step::Phone, vec!["0123456789".into()]);
        let outcome = handle.await.expect("task completes");
        assert_eq!(outcome.step, Step::Phone);
        assert!(outcome.ok);
        assert_eq!(outcome.log, "Phone number verified");
    }

    #[tokio::test]
    async fn rejected_submit_reports_failure() {
        let api: Arc<dyn RegistrationApi> = Arc::new(MockApi::new(Duration::ZERO).fail_step(Step::Email));
        let handle = spawn_submit(api, Step::Email, vec!["a@b.c".into()]);
        let outcome = handle.await.expect("task completes");
        assert_eq!(outcome.step, Step::Email);
        assert!(!outcome.ok);
        assert!(outcome.log.starts_with("Request failed"));
    }

    #[tokio::test]
    async fn final_step_success_log_announces_completion() {
        let handle = spawn_submit(instant_api(), Step::Password, vec!["secret".into(), "secret".into()]);
        let outcome = handle.await.expect("task completes");
        assert!(outcome.ok);
        assert_eq!(outcome.log, "Registration complete");
    }
}
