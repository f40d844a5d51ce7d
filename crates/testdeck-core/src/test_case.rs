use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::status::{Category, TestStatus};

/// Average duration assigned to a test that has never run.
pub const DEFAULT_AVERAGE_MS: u64 = 500;

/// A tracked test case: its definition plus a summary of its run history.
///
/// The record never stores individual run durations; `average_duration_ms`
/// is a rolling mean folded forward one completed run at a time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCase {
    /// Unique identifier, assigned at creation and never reused
    pub id: String,
    /// Display name
    pub name: String,
    /// What the test covers
    pub description: String,
    /// Responsible team or person
    pub owner: String,
    /// Kind of test
    pub category: Category,
    /// Free-text labels, insertion order preserved
    pub tags: Vec<String>,
    /// Current execution state
    pub status: TestStatus,
    /// Rolling mean of completed-run durations, in milliseconds
    pub average_duration_ms: u64,
    /// Number of completed runs (the in-flight run does not count)
    pub run_count: u64,
    /// Completion time of the most recent run
    pub last_run: Option<DateTime<Utc>>,
}

impl TestCase {
    /// Creates a new test case from a draft.
    ///
    /// Required fields are trimmed; whitespace-only tags are discarded.
    /// The new case starts Idle with no run history.
    pub fn new(draft: TestDraft) -> Result<Self, ValidationError> {
        let name = draft.name.trim().to_string();
        let description = draft.description.trim().to_string();
        let owner = draft.owner.trim().to_string();

        if name.is_empty() || description.is_empty() || owner.is_empty() {
            return Err(ValidationError::MissingFields);
        }

        let tags = draft
            .tags
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name,
            description,
            owner,
            category: draft.category,
            tags,
            status: TestStatus::Idle,
            average_duration_ms: DEFAULT_AVERAGE_MS,
            run_count: 0,
            last_run: None,
        })
    }

    /// Folds one completed run into the record.
    ///
    /// Increments `run_count`, recomputes the rolling mean incrementally
    /// (`(old_avg * old_count + duration) / (old_count + 1)`, rounded),
    /// stamps `last_run`, and sets the terminal status.
    pub fn record_completion(&mut self, duration_ms: u64, passed: bool, at: DateTime<Utc>) {
        let total = self.average_duration_ms * self.run_count + duration_ms;
        self.run_count += 1;
        self.average_duration_ms = ((total as f64) / (self.run_count as f64)).round() as u64;
        self.last_run = Some(at);
        self.status = if passed {
            TestStatus::Passed
        } else {
            TestStatus::Failed
        };
    }

    /// Replaces the fields named in the patch.
    ///
    /// No validation is applied; that is the caller's responsibility.
    pub fn apply(&mut self, patch: TestPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(owner) = patch.owner {
            self.owner = owner;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
    }

    /// Case-insensitive search across name, description, and tags.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&term)
            || self.description.to_lowercase().contains(&term)
            || self.tags.iter().any(|t| t.to_lowercase().contains(&term))
    }
}

/// Input for creating a test case.
#[derive(Debug, Clone, Default)]
pub struct TestDraft {
    pub name: String,
    pub description: String,
    pub owner: String,
    pub category: Category,
    pub tags: Vec<String>,
}

/// Partial update for a test case; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct TestPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub owner: Option<String>,
    pub category: Option<Category>,
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("name, description, and owner are required")]
    MissingFields,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str) -> TestDraft {
        TestDraft {
            name: name.to_string(),
            description: "Covers the happy path".to_string(),
            owner: "platform".to_string(),
            category: Category::Unit,
            tags: vec!["smoke".to_string()],
        }
    }

    #[test]
    fn test_new_trims_and_defaults() {
        let test = TestCase::new(TestDraft {
            name: "  Checkout flow  ".to_string(),
            tags: vec!["  ".to_string(), " cart ".to_string()],
            ..draft("x")
        })
        .unwrap();

        assert_eq!(test.name, "Checkout flow");
        assert_eq!(test.tags, vec!["cart"]);
        assert_eq!(test.status, TestStatus::Idle);
        assert_eq!(test.average_duration_ms, DEFAULT_AVERAGE_MS);
        assert_eq!(test.run_count, 0);
        assert!(test.last_run.is_none());
    }

    #[test]
    fn test_new_rejects_blank_required_fields() {
        assert!(TestCase::new(TestDraft {
            owner: "   ".to_string(),
            ..draft("Login")
        })
        .is_err());
        assert!(TestCase::new(draft("   ")).is_err());
    }

    #[test]
    fn test_record_completion_updates_rolling_mean() {
        let mut test = TestCase::new(draft("Login")).unwrap();

        test.record_completion(700, true, Utc::now());
        assert_eq!(test.run_count, 1);
        // First sample replaces the default entirely.
        assert_eq!(test.average_duration_ms, 700);
        assert_eq!(test.status, TestStatus::Passed);
        assert!(test.last_run.is_some());

        test.record_completion(400, false, Utc::now());
        assert_eq!(test.run_count, 2);
        assert_eq!(test.average_duration_ms, 550);
        assert_eq!(test.status, TestStatus::Failed);
    }

    #[test]
    fn test_matches_search_is_case_insensitive() {
        let test = TestCase::new(draft("Checkout Flow")).unwrap();
        assert!(test.matches_search("checkout"));
        assert!(test.matches_search("SMOKE"));
        assert!(test.matches_search("  "));
        assert!(!test.matches_search("billing"));
    }
}
