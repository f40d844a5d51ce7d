//! The filtered test table.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Cell, Row, Table},
};

use testdeck_core::{format_duration_ms, OwnerFilter, StatusFilter, TestStatus};

use crate::tui::app::App;

fn status_style(status: TestStatus) -> Style {
    match status {
        TestStatus::Idle => Style::default().fg(Color::DarkGray),
        TestStatus::Running => Style::default().fg(Color::Yellow),
        TestStatus::Passed => Style::default().fg(Color::Green),
        TestStatus::Failed => Style::default().fg(Color::Red),
    }
}

/// Render the test table.
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let title = format!(" Tests {} ", filter_summary(app));
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray));

    let header = Row::new(vec!["", "Name", "Category", "Owner", "Runs", "Avg", "Last run"])
        .style(Style::default().fg(Color::Cyan));

    let rows: Vec<Row> = app
        .tests
        .iter()
        .enumerate()
        .map(|(i, test)| {
            let last_run = test
                .last_run
                .map(|at| at.format("%H:%M:%S").to_string())
                .unwrap_or_else(|| "-".to_string());

            let row = Row::new(vec![
                Cell::from(test.status.icon()).style(status_style(test.status)),
                Cell::from(test.name.clone()),
                Cell::from(test.category.display_name()),
                Cell::from(test.owner.clone()),
                Cell::from(test.run_count.to_string()),
                Cell::from(format_duration_ms(test.average_duration_ms)),
                Cell::from(last_run),
            ]);

            if i == app.selected {
                row.style(Style::default().bg(Color::DarkGray).fg(Color::White))
            } else {
                row
            }
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(2),
            Constraint::Min(20),
            Constraint::Length(13),
            Constraint::Length(12),
            Constraint::Length(5),
            Constraint::Length(6),
            Constraint::Length(9),
        ],
    )
    .header(header)
    .block(block);

    frame.render_widget(table, area);
}

/// Summarize the active filters for the table title.
fn filter_summary(app: &App) -> String {
    let status = match app.filter.status {
        StatusFilter::All => "all".to_string(),
        StatusFilter::Only(s) => s.display_name().to_lowercase(),
    };
    let owner = match &app.filter.owner {
        OwnerFilter::All => "all".to_string(),
        OwnerFilter::Named(o) => o.clone(),
    };
    if app.filter.search.trim().is_empty() {
        format!("[{status} / {owner}]")
    } else {
        format!("[{status} / {owner} / \"{}\"]", app.filter.search.trim())
    }
}
