//! Application state and main event loop.

use std::io::Stdout;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;

use testdeck_core::{
    Category, Dashboard, DashboardStats, FilterSet, LogEntry, OwnerFilter, StatusFilter, TestCase,
    TestDraft, TestStatus,
};

use super::event::{Event, EventHandler};
use super::ui;

/// Cycle order for the status filter key.
const STATUS_CYCLE: [StatusFilter; 5] = [
    StatusFilter::All,
    StatusFilter::Only(TestStatus::Idle),
    StatusFilter::Only(TestStatus::Running),
    StatusFilter::Only(TestStatus::Passed),
    StatusFilter::Only(TestStatus::Failed),
];

/// Input mode for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// What the input line is currently capturing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputTarget {
    /// Free-text search across name, description, and tags
    #[default]
    Search,
    /// New test: `name; description; owner; category; tag, tag`
    NewTest,
}

/// Main application state.
///
/// The authoritative registry and log live in the core [`Dashboard`];
/// this struct only holds rendering snapshots and UI chrome.
pub struct App {
    /// Handle to the core state and scheduler
    dashboard: Dashboard,
    /// Current input mode
    pub input_mode: InputMode,
    /// What the input line edits
    pub input_target: InputTarget,
    /// Input buffer for user typing
    pub input_buffer: String,
    /// Active list filter
    pub filter: FilterSet,
    /// Position in the status filter cycle
    status_index: usize,
    /// Position in the owner filter cycle (0 = all)
    owner_index: usize,
    /// Snapshot: filtered tests in registry order
    pub tests: Vec<TestCase>,
    /// Snapshot: aggregate stats
    pub stats: DashboardStats,
    /// Snapshot: activity log, newest first
    pub log_entries: Vec<LogEntry>,
    /// Snapshot: distinct owners for the filter cycle
    pub owners: Vec<String>,
    /// Selected row in the test table
    pub selected: usize,
    /// Whether the app should quit
    pub should_quit: bool,
}

impl App {
    /// Create a new app instance with fresh snapshots.
    pub async fn new(dashboard: Dashboard) -> Self {
        let mut app = Self {
            dashboard,
            input_mode: InputMode::Normal,
            input_target: InputTarget::Search,
            input_buffer: String::new(),
            filter: FilterSet::default(),
            status_index: 0,
            owner_index: 0,
            tests: Vec::new(),
            stats: DashboardStats::default(),
            log_entries: Vec::new(),
            owners: Vec::new(),
            selected: 0,
            should_quit: false,
        };
        app.refresh().await;
        app
    }

    /// Run the main event loop.
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> color_eyre::Result<()> {
        let mut events = EventHandler::new(self.dashboard.subscribe());

        loop {
            // Draw UI
            terminal.draw(|frame| ui::render(self, frame))?;

            // Handle events
            if let Some(event) = events.next().await {
                match event {
                    Event::Key(key) => self.handle_key_event(key).await,
                    Event::Refresh => self.refresh().await,
                    Event::Tick => {}
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Pull fresh snapshots from the core.
    async fn refresh(&mut self) {
        self.tests = self.dashboard.tests(&self.filter).await;
        self.stats = self.dashboard.stats().await;
        self.log_entries = self.dashboard.log().await;
        self.owners = self.dashboard.owners().await;
        if self.selected >= self.tests.len() {
            self.selected = self.tests.len().saturating_sub(1);
        }
    }

    /// Id of the currently selected test, if the table is non-empty.
    fn selected_id(&self) -> Option<String> {
        self.tests.get(self.selected).map(|t| t.id.clone())
    }

    /// Handle a key event.
    async fn handle_key_event(&mut self, key: KeyEvent) {
        match self.input_mode {
            InputMode::Normal => self.handle_normal_mode_key(key).await,
            InputMode::Editing => self.handle_editing_mode_key(key).await,
        }
    }

    /// Handle key in normal mode.
    async fn handle_normal_mode_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('j') | KeyCode::Down => {
                if self.selected + 1 < self.tests.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Char('r') | KeyCode::Enter => {
                if let Some(id) = self.selected_id() {
                    self.dashboard.run_test(&id).await;
                    self.refresh().await;
                }
            }
            KeyCode::Char('x') => {
                if let Some(id) = self.selected_id() {
                    self.dashboard.reset_test(&id).await;
                    self.refresh().await;
                }
            }
            KeyCode::Char('a') => {
                self.dashboard.run_all().await;
                self.refresh().await;
            }
            KeyCode::Char('s') => {
                self.status_index = (self.status_index + 1) % STATUS_CYCLE.len();
                self.filter.status = STATUS_CYCLE[self.status_index];
                self.refresh().await;
            }
            KeyCode::Char('o') => {
                self.cycle_owner().await;
            }
            KeyCode::Char('/') => {
                self.input_mode = InputMode::Editing;
                self.input_target = InputTarget::Search;
                self.input_buffer = self.filter.search.clone();
            }
            KeyCode::Char('n') => {
                self.input_mode = InputMode::Editing;
                self.input_target = InputTarget::NewTest;
                self.input_buffer.clear();
            }
            KeyCode::Esc => {
                // Clear all filters.
                self.filter = FilterSet::default();
                self.status_index = 0;
                self.owner_index = 0;
                self.refresh().await;
            }
            _ => {}
        }
    }

    /// Handle key in editing mode.
    async fn handle_editing_mode_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                self.input_buffer.clear();
            }
            KeyCode::Enter => {
                self.submit_input().await;
            }
            KeyCode::Char(c) => {
                self.input_buffer.push(c);
                if self.input_target == InputTarget::Search {
                    self.filter.search = self.input_buffer.clone();
                    self.refresh().await;
                }
            }
            KeyCode::Backspace => {
                self.input_buffer.pop();
                if self.input_target == InputTarget::Search {
                    self.filter.search = self.input_buffer.clone();
                    self.refresh().await;
                }
            }
            _ => {}
        }
    }

    /// Submit the current input.
    async fn submit_input(&mut self) {
        match self.input_target {
            InputTarget::Search => {
                self.filter.search = self.input_buffer.clone();
            }
            InputTarget::NewTest => {
                let draft = parse_draft(&self.input_buffer);
                // Validation failures surface through the activity log.
                self.dashboard.create_test(draft).await;
                self.input_buffer.clear();
            }
        }
        self.input_mode = InputMode::Normal;
        self.refresh().await;
    }

    /// Cycle the owner filter through all / each distinct owner.
    async fn cycle_owner(&mut self) {
        self.owner_index = (self.owner_index + 1) % (self.owners.len() + 1);
        self.filter.owner = if self.owner_index == 0 {
            OwnerFilter::All
        } else {
            OwnerFilter::Named(self.owners[self.owner_index - 1].clone())
        };
        self.refresh().await;
    }
}

/// Parse the one-line creation form:
/// `name; description; owner; category; tag, tag`.
///
/// Category falls back to Unit when missing or unrecognized; required
/// field validation is the core's job.
fn parse_draft(input: &str) -> TestDraft {
    let mut parts = input.splitn(5, ';').map(str::trim);
    let name = parts.next().unwrap_or_default().to_string();
    let description = parts.next().unwrap_or_default().to_string();
    let owner = parts.next().unwrap_or_default().to_string();
    let category = parts
        .next()
        .and_then(|c| c.parse::<Category>().ok())
        .unwrap_or_default();
    let tags = parts
        .next()
        .map(|t| t.split(',').map(|s| s.trim().to_string()).collect())
        .unwrap_or_default();

    TestDraft {
        name,
        description,
        owner,
        category,
        tags,
    }
}
