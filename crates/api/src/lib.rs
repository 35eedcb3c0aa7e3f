//! Registration service interface and its mock implementation.
//!
//! This crate defines the boundary the wizard talks to when a step is
//! submitted. It focuses on:
//!
//! - The [`RegistrationApi`] trait: one operation per registration step
//! - Empty response envelopes, since the upstream service returns no payload
//! - A payload-free [`ApiError`] that every failure collapses into
//! - [`MockApi`], the stand-in used by the application: it sleeps for a
//!   configurable delay and then succeeds, or fails for steps listed in its
//!   failure set
//!
//! There is no real wire format behind this interface; the mock exists so the
//! flow's loading, success, and error paths behave exactly as they would
//! against a slow remote service.

use std::collections::HashSet;
use std::env;
use std::time::Duration;

use async_trait::async_trait;
use regflow_types::Step;
use thiserror::Error;
use tokio::time::sleep;
use tracing::debug;

/// Environment variable overriding the mock service delay, in milliseconds.
pub const DELAY_ENV_VAR: &str = "REGFLOW_API_DELAY_MS";

/// Default artificial delay applied to every mock request.
pub const DEFAULT_DELAY: Duration = Duration::from_secs(2);

/// Response to a successful phone check. The service sends no payload.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckPhoneEnvelope {}

/// Response to a successful email registration. The service sends no payload.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddEmailEnvelope {}

/// Response to a successful name registration. The service sends no payload.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddNameEnvelope {}

/// Response to a successful password registration. The service sends no
/// payload.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddPasswordEnvelope {}

/// The single, generic service error. It carries no payload; callers render
/// every failure the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("registration request rejected")]
pub struct ApiError;

/// The remote registration service, one operation per wizard step.
///
/// Implementations perform exactly one request per call and report either an
/// empty envelope or [`ApiError`]. No retries, no timeouts, no cancellation.
#[async_trait]
pub trait RegistrationApi: Send + Sync {
    /// Verify a phone number.
    async fn check_phone(&self, phone: &str) -> Result<CheckPhoneEnvelope, ApiError>;

    /// Register an email address.
    async fn add_email(&self, email: &str) -> Result<AddEmailEnvelope, ApiError>;

    /// Register a first name and surname pair.
    async fn add_name(&self, name: &str, surname: &str) -> Result<AddNameEnvelope, ApiError>;

    /// Register a password.
    async fn add_password(&self, password: &str) -> Result<AddPasswordEnvelope, ApiError>;
}

/// Mock registration service with a fixed artificial delay.
///
/// Every call sleeps for the configured delay and then succeeds, unless the
/// corresponding step is in the failure set. The failure set exists to
/// exercise the error path end to end; the delay makes the loading state
/// observable.
#[derive(Debug, Clone)]
pub struct MockApi {
    delay: Duration,
    failing_steps: HashSet<Step>,
}

impl Default for MockApi {
    fn default() -> Self {
        Self::new(delay_from_env())
    }
}

impl MockApi {
    /// Create a mock with the given per-request delay and no failures.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            failing_steps: HashSet::new(),
        }
    }

    /// Mark a step so that its requests fail.
    pub fn fail_step(mut self, step: Step) -> Self {
        self.failing_steps.insert(step);
        self
    }

    /// The configured per-request delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    async fn respond(&self, step: Step) -> Result<(), ApiError> {
        sleep(self.delay).await;
        if self.failing_steps.contains(&step) {
            debug!(?step, "mock service rejecting request");
            return Err(ApiError);
        }
        debug!(?step, "mock service accepting request");
        Ok(())
    }
}

#[async_trait]
impl RegistrationApi for MockApi {
    async fn check_phone(&self, _phone: &str) -> Result<CheckPhoneEnvelope, ApiError> {
        self.respond(Step::Phone).await.map(|_| CheckPhoneEnvelope::default())
    }

    async fn add_email(&self, _email: &str) -> Result<AddEmailEnvelope, ApiError> {
        self.respond(Step::Email).await.map(|_| AddEmailEnvelope::default())
    }

    async fn add_name(&self, _name: &str, _surname: &str) -> Result<AddNameEnvelope, ApiError> {
        self.respond(Step::Name).await.map(|_| AddNameEnvelope::default())
    }

    async fn add_password(&self, _password: &str) -> Result<AddPasswordEnvelope, ApiError> {
        self.respond(Step::Password).await.map(|_| AddPasswordEnvelope::default())
    }
}

/// Resolve the mock delay from `REGFLOW_API_DELAY_MS`, falling back to the
/// two-second default when unset or unparsable.
pub fn delay_from_env() -> Duration {
    env::var(DELAY_ENV_VAR)
        .ok()
        .and_then(|raw| raw.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_DELAY)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant_mock() -> MockApi {
        MockApi::new(Duration::ZERO)
    }

    #[tokio::test]
    async fn mock_succeeds_with_empty_envelopes() {
        let api = instant_mock();
        assert!(api.check_phone("0123456789").await.is_ok());
        assert!(api.add_email("a@b.c").await.is_ok());
        assert!(api.add_name("Ada", "Lovelace").await.is_ok());
        assert!(api.add_password("secret").await.is_ok());
    }

    #[tokio::test]
    async fn failure_set_rejects_only_marked_steps() {
        let api = instant_mock().fail_step(Step::Email);
        assert!(api.check_phone("0123456789").await.is_ok());
        assert_eq!(api.add_email("a@b.c").await.unwrap_err(), ApiError);
        assert!(api.add_password("secret").await.is_ok());
    }

    #[tokio::test]
    async fn delay_is_applied_before_responding() {
        let api = MockApi::new(Duration::from_millis(30));
        let started = std::time::Instant::now();
        let _ = api.check_phone("0123456789").await;
        assert!(started.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn error_is_payload_free_and_generic() {
        assert_eq!(ApiError.to_string(), "registration request rejected");
    }
}
