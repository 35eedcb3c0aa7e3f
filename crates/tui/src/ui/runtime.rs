//! Runtime: terminal lifecycle and the event loop for the wizard.
//!
//! Responsibilities
//! - Own the terminal lifecycle (enter/leave alternate screen, raw mode).
//! - Drive a single event loop that handles input, the throbber tick, and
//!   the completion of the one in-flight submit task.
//! - Route keys to the registration component and execute returned
//!   `Effect`s.
//! - Render only when something visible changed.
//!
//! Input arrives from a dedicated polling task that forwards `crossterm`
//! events over a channel; keeping `poll()` and `read()` together avoids lost
//! or delayed events in some terminals. Ticking is adaptive: fast while a
//! request is in flight (the throbber animates), slow when idle.

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, prelude::*};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::{
    signal,
    sync::mpsc,
    time::{self, MissedTickBehavior},
};

use crate::app::App;
use crate::cmd;
use crate::ui::components::{Component, RegistrationComponent};
use regflow_api::RegistrationApi;
use regflow_types::{Effect, Msg, SubmitOutcome};

/// Spawn a task that polls terminal input and forwards `crossterm` events
/// over a Tokio channel.
async fn spawn_input_task() -> mpsc::Receiver<Event> {
    let (sender, receiver) = mpsc::channel(100);
    tokio::spawn(async move {
        let poll_interval = Duration::from_millis(16);
        loop {
            match event::poll(poll_interval) {
                Ok(true) => match event::read() {
                    Ok(event) => {
                        if sender.send(event).await.is_err() {
                            break;
                        }
                    }
                    Err(error) => {
                        tracing::warn!("failed to read terminal event: {}", error);
                        break;
                    }
                },
                Ok(false) => {
                    // Yield so the runtime can make progress between polls.
                    tokio::task::yield_now().await;
                }
                Err(error) => {
                    tracing::warn!("failed to poll terminal events: {}", error);
                    break;
                }
            }
        }
    });
    receiver
}

/// Put the terminal into raw mode and enter the alternate screen.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal settings and leave the alternate screen.
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Render a frame via the registration component.
fn render(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
    component: &mut RegistrationComponent,
) -> Result<()> {
    terminal.draw(|frame| component.render(frame, frame.area(), app))?;
    Ok(())
}

/// Entry point for the TUI runtime: sets up the terminal, spawns the input
/// task, runs the async event loop, and performs cleanup on exit.
pub async fn run_app(api: Arc<dyn RegistrationApi>) -> Result<()> {
    let mut input_receiver = spawn_input_task().await;
    let mut component = RegistrationComponent::default();
    component.init()?;

    let mut app = App::new(api);
    let mut terminal = setup_terminal()?;

    // The single in-flight submit request. `Effect::SubmitRequested` is only
    // honored while this slot is empty.
    let mut pending_submit: Option<JoinHandle<SubmitOutcome>> = None;
    let mut effects: Vec<Effect> = Vec::new();

    // Ticking strategy: fast while the throbber animates, slow when idle.
    let fast_interval = Duration::from_millis(125);
    let idle_interval = Duration::from_millis(1000);
    let mut current_interval = idle_interval;
    let mut ticker = time::interval(current_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    render(&mut terminal, &mut app, &mut component)?;

    loop {
        let target_interval = if app.executing { fast_interval } else { idle_interval };
        if target_interval != current_interval {
            current_interval = target_interval;
            ticker = time::interval(current_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        }

        let mut needs_render = false;
        tokio::select! {
            maybe_event = input_receiver.recv() => {
                match maybe_event {
                    Some(Event::Key(key_event)) if key_event.kind == KeyEventKind::Press => {
                        if key_event.code == KeyCode::Char('c') && key_event.modifiers.contains(KeyModifiers::CONTROL) {
                            break;
                        }
                        effects.extend(component.handle_key_events(&mut app, key_event));
                        needs_render = true;
                    }
                    Some(Event::Resize(width, height)) => {
                        effects.extend(component.update(&mut app, &Msg::Resize(width, height)));
                        needs_render = true;
                    }
                    Some(_) => {}
                    None => {
                        // Input channel closed; shut down cleanly.
                        break;
                    }
                }
            }

            _ = ticker.tick() => {
                effects.extend(component.update(&mut app, &Msg::Tick));
                needs_render = app.executing;
            }

            maybe_joined = async {
                match pending_submit.as_mut() {
                    Some(handle) => Some(handle.await),
                    None => None,
                }
            }, if pending_submit.is_some() => {
                pending_submit = None;
                if let Some(joined) = maybe_joined {
                    let outcome = joined.unwrap_or_else(|error| SubmitOutcome {
                        step: app.flow.step(),
                        ok: false,
                        log: format!("Submit task failed: {error}"),
                    });
                    effects.extend(component.update(&mut app, &Msg::SubmitCompleted(outcome)));
                    needs_render = true;
                }
            }

            _ = signal::ctrl_c() => { break; }
        }

        let mut quit_requested = false;
        for effect in effects.drain(..) {
            match effect {
                Effect::SubmitRequested { step, values } => {
                    if pending_submit.is_none() {
                        pending_submit = Some(cmd::spawn_submit(app.ctx.api.clone(), step, values));
                    } else {
                        tracing::warn!(?step, "submit requested while another is in flight; dropped");
                    }
                }
                Effect::Quit => quit_requested = true,
            }
        }
        if quit_requested {
            break;
        }

        if needs_render {
            render(&mut terminal, &mut app, &mut component)?;
        }
    }

    cleanup_terminal(&mut terminal)?;
    Ok(())
}
