//! The registration form component.
//!
//! Renders the active step — its title, one bordered text field per form
//! field with an error label beneath, and the submit button — and routes
//! keyboard input into the flow engine. Submit attempts (Enter anywhere, or
//! Enter on the button) all pass through the engine's gate, so validation,
//! focus-on-first-invalid, and the single-in-flight rule behave identically
//! regardless of how the submit was triggered.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Position, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use regflow_engine::{FocusTarget, SubmitDecision};
use regflow_types::{Effect, Msg, Step};
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::theme;
use crate::ui::components::Component;

/// Widest column the form occupies; extra terminal width becomes margin.
const FORM_MAX_WIDTH: u16 = 64;

#[derive(Default)]
pub struct RegistrationComponent {}

impl RegistrationComponent {
    /// Run a submit attempt through the engine's gate.
    ///
    /// Rejection already stamped the error label and moved focus inside the
    /// engine, so only an accepted submit produces an effect.
    fn attempt_submit(&self, app: &mut App) -> Vec<Effect> {
        match app.flow.request_submit() {
            SubmitDecision::Submit { values } => {
                app.executing = true;
                app.throbber_idx = 0;
                app.status = String::from("Submitting…");
                vec![Effect::SubmitRequested {
                    step: app.flow.step(),
                    values,
                }]
            }
            SubmitDecision::Rejected { .. } | SubmitDecision::Ignored => Vec::new(),
        }
    }

    /// Route an editing key into the focused field's text buffer, then push
    /// the buffer into the engine so validity tracks every keystroke.
    fn handle_editing_key(&self, app: &mut App, index: usize, key: KeyEvent) {
        let Some(input) = app.inputs.get_mut(index) else {
            return;
        };
        let changed = match key.code {
            KeyCode::Char(c) => input.insert_char(c),
            KeyCode::Backspace => input.backspace(),
            KeyCode::Left => {
                input.move_left();
                false
            }
            KeyCode::Right => {
                input.move_right();
                false
            }
            KeyCode::Home => {
                input.move_home();
                false
            }
            KeyCode::End => {
                input.move_end();
                false
            }
            _ => false,
        };
        if changed {
            app.sync_field(index);
        }
    }

    fn render_field(&self, frame: &mut Frame, field_rect: Rect, error_rect: Rect, app: &App, index: usize) {
        let form = app.flow.form();
        let Some(field) = form.field(index) else {
            return;
        };
        let focused = !app.executing && app.focused_field() == Some(index);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme::border_style(focused))
            .title(field.kind().placeholder());
        let inner = block.inner(field_rect);
        frame.render_widget(block, field_rect);

        let input = &app.inputs[index];
        if input.is_empty() {
            let placeholder = Paragraph::new(field.kind().placeholder()).style(theme::placeholder_style());
            frame.render_widget(placeholder, inner);
        } else if field.kind().is_secret() {
            let masked = "•".repeat(input.char_count());
            frame.render_widget(Paragraph::new(masked).style(theme::text_style()), inner);
        } else {
            frame.render_widget(Paragraph::new(input.input()).style(theme::text_style()), inner);
        }

        if focused {
            let before_cursor = &input.input()[..input.cursor()];
            let offset = if field.kind().is_secret() {
                before_cursor.chars().count() as u16
            } else {
                before_cursor.width() as u16
            };
            let x = inner.x.saturating_add(offset).min(inner.right().saturating_sub(1));
            frame.set_cursor_position(Position::new(x, inner.y));
        }

        if let Some(message) = field.error() {
            frame.render_widget(Paragraph::new(message).style(theme::error_style()), error_rect);
        }
    }

    fn render_button(&self, frame: &mut Frame, rect: Rect, app: &App) {
        let form = app.flow.form();
        let enabled = form.continue_enabled();
        let focused = form.focus() == FocusTarget::SubmitButton && !app.executing;
        let label = if app.executing {
            format!("{} Submitting…", app.throbber_frame())
        } else {
            String::from("Submit")
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme::border_style(focused));
        let button = Paragraph::new(label)
            .style(theme::button_style(enabled, focused))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(button, rect);
    }
}

impl Component for RegistrationComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        if key.code == KeyCode::Esc {
            return vec![Effect::Quit];
        }
        // A request is in flight: the form is inert until the service
        // answers. Submit attempts would be ignored by the engine anyway.
        if app.executing {
            return Vec::new();
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return Vec::new();
        }
        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                app.flow.form_mut().focus_next();
                Vec::new()
            }
            KeyCode::BackTab | KeyCode::Up => {
                app.flow.form_mut().focus_prev();
                Vec::new()
            }
            KeyCode::Enter => self.attempt_submit(app),
            _ => {
                if let Some(index) = app.focused_field() {
                    self.handle_editing_key(app, index, key);
                }
                Vec::new()
            }
        }
    }

    fn update(&mut self, app: &mut App, msg: &Msg) -> Vec<Effect> {
        match msg {
            Msg::Tick => {
                app.on_tick();
            }
            Msg::SubmitCompleted(outcome) => {
                app.apply_submit_outcome(outcome);
            }
            Msg::Resize(_, _) => {}
        }
        Vec::new()
    }

    fn hint_spans(&self, _app: &App) -> Vec<Span<'static>> {
        let hint = |key: &'static str, action: &'static str| {
            vec![
                Span::styled(key, theme::text_style()),
                Span::styled(action, theme::status_style()),
            ]
        };
        let mut spans = Vec::new();
        spans.extend(hint("Tab/Shift+Tab", " Focus  "));
        spans.extend(hint("Enter", " Submit  "));
        spans.extend(hint("Esc", " Quit"));
        spans
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let column = centered_column(rect, FORM_MAX_WIDTH);
        let step = app.flow.step();
        let rows = step.rows();

        let mut constraints = vec![
            Constraint::Length(1), // Title
            Constraint::Length(1), // Progress
            Constraint::Length(1), // Spacer
        ];
        constraints.extend(rows.iter().map(|_| Constraint::Length(4)));
        constraints.extend([
            Constraint::Length(3), // Submit button
            Constraint::Min(0),    // Filler
            Constraint::Length(1), // Status
            Constraint::Length(1), // Hints
        ]);
        let chunks = Layout::vertical(constraints).split(column);

        let title = Paragraph::new(Line::styled(step.title(), theme::text_style())).alignment(Alignment::Center);
        frame.render_widget(title, chunks[0]);

        let progress = format!("Step {} of {}", step.position() + 1, Step::ALL.len());
        frame.render_widget(
            Paragraph::new(Line::styled(progress, theme::status_style())).alignment(Alignment::Center),
            chunks[1],
        );

        let mut field_index = 0;
        for (row_offset, row) in rows.iter().enumerate() {
            let row_rect = chunks[3 + row_offset];
            let cells = Layout::horizontal(vec![Constraint::Fill(1); row.len()])
                .spacing(2)
                .split(row_rect);
            for cell in cells.iter() {
                let field_rect = Rect { height: 3, ..*cell };
                let error_rect = Rect {
                    y: cell.y + 3,
                    height: 1,
                    ..*cell
                };
                self.render_field(frame, field_rect, error_rect, app, field_index);
                field_index += 1;
            }
        }

        let button_rect = chunks[3 + rows.len()];
        self.render_button(frame, button_rect, app);

        let status_rect = chunks[5 + rows.len()];
        let mut status = app.status.clone();
        if app.flow.completed_runs() > 0 {
            status = format!("{status}  (completed runs: {})", app.flow.completed_runs());
        }
        if app.ctx.debug_enabled {
            status = format!(
                "{status}  [step={:?} first_invalid={:?}]",
                step,
                app.flow.form().first_invalid()
            );
        }
        frame.render_widget(Paragraph::new(Line::styled(status, theme::status_style())), status_rect);

        let hints_rect = chunks[6 + rows.len()];
        frame.render_widget(Paragraph::new(Line::from(self.hint_spans(app))), hints_rect);
    }
}

/// A horizontally centered column no wider than `max_width`.
fn centered_column(area: Rect, max_width: u16) -> Rect {
    let width = area.width.min(max_width);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    Rect { x, width, ..area }
}
