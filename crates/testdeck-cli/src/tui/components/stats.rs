//! Aggregate stats header.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use testdeck_core::format_duration_ms;

use crate::tui::app::App;

/// Render the stats header.
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" testdeck ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray));

    let stats = &app.stats;
    let line = Line::from(vec![
        Span::styled(
            format!(" {} tests ", stats.total),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!(" ● {} passed ", stats.passed),
            Style::default().fg(Color::Green),
        ),
        Span::styled(
            format!(" ✗ {} failed ", stats.failed),
            Style::default().fg(Color::Red),
        ),
        Span::styled(
            format!(" ◐ {} running ", stats.running),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(
            format!(" ○ {} idle ", stats.idle),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!(" {}% pass rate ", stats.pass_rate),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!(" avg {} ", format_duration_ms(stats.average_duration_ms)),
            Style::default().fg(Color::Magenta),
        ),
    ]);

    let paragraph = Paragraph::new(line).block(block);
    frame.render_widget(paragraph, area);
}
