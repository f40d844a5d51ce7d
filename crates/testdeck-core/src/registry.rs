use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::status::TestStatus;
use crate::test_case::{TestCase, TestDraft, TestPatch, ValidationError};

/// Status predicate for listing tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(TestStatus),
}

/// Owner predicate for listing tests. Matching is case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OwnerFilter {
    #[default]
    All,
    Named(String),
}

/// Combined list filter: status AND owner AND free-text search.
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    pub status: StatusFilter,
    pub owner: OwnerFilter,
    pub search: String,
}

impl FilterSet {
    fn matches(&self, test: &TestCase) -> bool {
        let status_ok = match self.status {
            StatusFilter::All => true,
            StatusFilter::Only(status) => test.status == status,
        };
        let owner_ok = match &self.owner {
            OwnerFilter::All => true,
            OwnerFilter::Named(owner) => test.owner.eq_ignore_ascii_case(owner),
        };
        status_ok && owner_ok && test.matches_search(&self.search)
    }
}

/// Aggregate numbers across the whole registry, recomputed on demand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total: usize,
    pub idle: usize,
    pub running: usize,
    pub passed: usize,
    pub failed: usize,
    /// `round(100 * passed / total)`; 0 when the registry is empty
    pub pass_rate: u32,
    /// Rounded mean of all records' rolling averages; 0 when empty
    pub average_duration_ms: u64,
}

/// The authoritative in-memory collection of test cases.
///
/// Newest cases sit at the front. Records are destroyed only with the
/// session; there is no delete operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TestRegistry {
    tests: Vec<TestCase>,
}

impl TestRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from an initial seed snapshot, order preserved.
    pub fn seeded(tests: Vec<TestCase>) -> Self {
        Self { tests }
    }

    /// Validates the draft and inserts the new case at the front.
    pub fn create(&mut self, draft: TestDraft) -> Result<&TestCase, ValidationError> {
        let test = TestCase::new(draft)?;
        self.tests.insert(0, test);
        Ok(&self.tests[0])
    }

    /// Replaces the fields named in the patch. Unknown id is a no-op.
    pub fn update(&mut self, id: &str, patch: TestPatch) {
        if let Some(test) = self.find_mut(id) {
            test.apply(patch);
        }
    }

    pub fn find(&self, id: &str) -> Option<&TestCase> {
        self.tests.iter().find(|t| t.id == id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut TestCase> {
        self.tests.iter_mut().find(|t| t.id == id)
    }

    /// All tests in registry order.
    pub fn all(&self) -> &[TestCase] {
        &self.tests
    }

    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    /// The subset satisfying all three filter predicates, in registry order.
    pub fn list_filtered(&self, filter: &FilterSet) -> Vec<&TestCase> {
        self.tests.iter().filter(|t| filter.matches(t)).collect()
    }

    /// Recomputes aggregate statistics from scratch.
    pub fn aggregate_stats(&self) -> DashboardStats {
        let mut stats = DashboardStats {
            total: self.tests.len(),
            ..DashboardStats::default()
        };

        for test in &self.tests {
            match test.status {
                TestStatus::Idle => stats.idle += 1,
                TestStatus::Running => stats.running += 1,
                TestStatus::Passed => stats.passed += 1,
                TestStatus::Failed => stats.failed += 1,
            }
        }

        if stats.total > 0 {
            stats.pass_rate =
                ((stats.passed as f64 / stats.total as f64) * 100.0).round() as u32;
            let sum: u64 = self.tests.iter().map(|t| t.average_duration_ms).sum();
            stats.average_duration_ms =
                ((sum as f64) / (stats.total as f64)).round() as u64;
        }

        stats
    }

    /// Deduplicated owner names, sorted for a stable filter list.
    pub fn distinct_owners(&self) -> Vec<String> {
        self.tests
            .iter()
            .map(|t| t.owner.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
