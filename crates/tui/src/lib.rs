//! # Regflow TUI Library
//!
//! Terminal user interface for the registration wizard. It renders the
//! active step's form, routes keyboard input through the flow engine, and
//! executes submit requests against the registration service without
//! blocking the event loop.
//!
//! ## Architecture
//!
//! The UI follows a component-based architecture: the registration form is a
//! component that handles events and renders itself, reporting side effects
//! (`Effect`s) back to the runtime. The runtime owns the terminal lifecycle
//! and the single in-flight submit task.

mod app;
mod cmd;
mod theme;
mod ui;

use std::sync::Arc;

use anyhow::Result;
use regflow_api::RegistrationApi;

/// Runs the main TUI application loop.
///
/// Sets up the terminal, wires the registration component to the flow
/// engine, and drives the event loop until the user exits.
///
/// # Errors
///
/// Returns an error for terminal setup failures (raw mode, alternate
/// screen) or event loop runtime errors.
pub async fn run(api: Arc<dyn RegistrationApi>) -> Result<()> {
    ui::runtime::run_app(api).await
}
