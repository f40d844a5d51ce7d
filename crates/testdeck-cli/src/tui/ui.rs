//! UI rendering for the TUI.

use ratatui::prelude::*;

use super::app::{App, InputMode, InputTarget};
use super::components::{input, log, stats, table};

/// Render the entire UI.
pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();

    // Main layout: stats, content, input, status
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Stats header
            Constraint::Min(8),     // Main content
            Constraint::Length(3),  // Input
            Constraint::Length(1),  // Status bar
        ])
        .split(area);

    // Render stats header
    stats::render(app, frame, chunks[0]);

    // Render main content (test table + activity log)
    render_main_content(app, frame, chunks[1]);

    // Render input
    input::render(app, frame, chunks[2]);

    // Render status bar
    render_status_bar(app, frame, chunks[3]);
}

/// Render the main content area (table and log side by side).
fn render_main_content(app: &App, frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(65),  // Test table
            Constraint::Percentage(35),  // Activity log
        ])
        .split(area);

    // Render test table
    table::render(app, frame, chunks[0]);

    // Render activity log
    log::render(app, frame, chunks[1]);
}

/// Render the status bar.
fn render_status_bar(app: &App, frame: &mut Frame, area: Rect) {
    let hint = match (app.input_mode, app.input_target) {
        (InputMode::Normal, _) => {
            "[r] Run  [a] Run all  [x] Reset  [n] New  [/] Search  [s/o] Filter  [Esc] Clear  [q] Quit"
        }
        (InputMode::Editing, InputTarget::Search) => "[Enter] Apply  [Esc] Cancel",
        (InputMode::Editing, InputTarget::NewTest) => "[Enter] Create  [Esc] Cancel",
    };

    let status_bar = ratatui::widgets::Paragraph::new(hint)
        .style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status_bar, area);
}
