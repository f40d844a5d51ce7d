pub mod activity;
pub mod config;
pub mod dashboard;
pub mod registry;
pub mod scheduler;
pub mod seed;
pub mod state;
pub mod status;
pub mod test_case;

pub use activity::{ActivityLog, LogEntry, LogLevel, MAX_LOG_ITEMS};
pub use config::SimConfig;
pub use dashboard::Dashboard;
pub use registry::{DashboardStats, FilterSet, OwnerFilter, StatusFilter, TestRegistry};
pub use scheduler::{format_duration_ms, PendingRun, RunScheduler};
pub use seed::seed_tests;
pub use state::DashboardState;
pub use status::{Category, TestStatus};
pub use test_case::{TestCase, TestDraft, TestPatch, ValidationError, DEFAULT_AVERAGE_MS};
