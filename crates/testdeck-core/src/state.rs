use crate::activity::{ActivityLog, LogLevel};
use crate::registry::TestRegistry;
use crate::test_case::{TestCase, TestDraft};

/// The session-scoped application state: registry plus activity log.
///
/// Everything the dashboard shows lives here, and every mutation goes
/// through this object or the scheduler operating on it, so the
/// invariants on run counts and the log bound have a single writer to
/// audit. Nothing is persisted; the state dies with the session.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub registry: TestRegistry,
    pub activity: ActivityLog,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an initial seed snapshot with an empty log.
    pub fn seeded(tests: Vec<TestCase>) -> Self {
        Self {
            registry: TestRegistry::seeded(tests),
            activity: ActivityLog::new(),
        }
    }

    /// Creates a test case, coupling the outcome to the activity log.
    ///
    /// Validation failure leaves the registry unchanged and appends one
    /// error-level entry; success appends an info entry and returns the
    /// new id. This is the only no-op in the system that IS surfaced to
    /// the log.
    pub fn create_test(&mut self, draft: TestDraft) -> Option<String> {
        match self.registry.create(draft) {
            Ok(test) => {
                let id = test.id.clone();
                let name = test.name.clone();
                self.activity
                    .append(LogLevel::Info, format!("Added test \"{name}\"."));
                Some(id)
            }
            Err(_) => {
                self.activity.append(
                    LogLevel::Error,
                    "Name, description, and owner are required.",
                );
                None
            }
        }
    }
}
