//! Input line: search and the one-line creation form.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::tui::app::{App, InputMode, InputTarget};

/// Render the input line.
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let (title, content, style) = match (app.input_mode, app.input_target) {
        (InputMode::Normal, _) => (
            " Input ",
            app.filter.search.clone(),
            Style::default().fg(Color::DarkGray),
        ),
        (InputMode::Editing, InputTarget::Search) => (
            " Search ",
            format!("/{}", app.input_buffer),
            Style::default().fg(Color::White),
        ),
        (InputMode::Editing, InputTarget::NewTest) => (
            " New test (name; description; owner; category; tags) ",
            app.input_buffer.clone(),
            Style::default().fg(Color::White),
        ),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(match app.input_mode {
            InputMode::Normal => Style::default().fg(Color::DarkGray),
            InputMode::Editing => Style::default().fg(Color::Yellow),
        });

    let paragraph = Paragraph::new(content).style(style).block(block);
    frame.render_widget(paragraph, area);

    if app.input_mode == InputMode::Editing {
        // Place the cursor after the typed text.
        let offset = match app.input_target {
            InputTarget::Search => app.input_buffer.len() as u16 + 2,
            InputTarget::NewTest => app.input_buffer.len() as u16 + 1,
        };
        frame.set_cursor_position((area.x + offset, area.y + 1));
    }
}
