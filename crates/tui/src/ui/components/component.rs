//! Component system for the registration TUI.
//!
//! This module defines the Component trait that UI elements implement.
//! Components handle localized events, update their internal state, and
//! render themselves into a provided `Rect`, reporting side effects back to
//! the runtime via `Effect`s instead of mutating global state directly.

use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;
use regflow_types::{Effect, Msg};

use crate::app::App;

/// A trait representing a UI component with its own behavior.
///
/// # Component Lifecycle
///
/// 1. **Initialization**: `init()` is called once when the component is
///    created
/// 2. **Event Handling**: key input arrives through `handle_key_events()`
///    while the component is active
/// 3. **State Updates**: `update()` processes application messages (ticks,
///    completed background work)
/// 4. **Rendering**: `render()` draws the component into the provided area
pub trait Component {
    /// Initialize any internal state.
    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    /// Handle a key event, returning effects for the runtime to execute.
    fn handle_key_events(&mut self, _app: &mut App, _key: KeyEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Update internal state based on an application message.
    fn update(&mut self, _app: &mut App, _msg: &Msg) -> Vec<Effect> {
        Vec::new()
    }

    /// Key hints rendered in the footer while this component is active.
    fn hint_spans(&self, _app: &App) -> Vec<Span<'static>> {
        Vec::new()
    }

    /// Render the component into the given area.
    ///
    /// Implementations should be side-effect free except for frame drawing
    /// and cursor placement; state changes belong in `update` or the event
    /// handlers.
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App);
}
