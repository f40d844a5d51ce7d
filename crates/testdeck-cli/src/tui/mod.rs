//! Terminal dashboard for testdeck.
//!
//! Renders the filtered test table, aggregate stats, and the activity
//! log; forwards run/reset/bulk/create/filter actions into the core.

mod app;
mod components;
mod event;
mod ui;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io::stdout;

use app::App;
use testdeck_core::Dashboard;

/// Run the TUI application.
pub async fn run(dashboard: Dashboard) -> color_eyre::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state
    let mut app = App::new(dashboard).await;

    // Run the main loop
    let result = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}
