use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Execution state of a test case.
///
/// Tests move through: Idle → Running → Passed/Failed.
/// A reset returns a finished test to Idle; a re-run takes a finished
/// test straight back to Running. Running is never re-entered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    /// Never run, or reset since the last run
    #[default]
    Idle,
    /// A simulated run is in flight
    Running,
    /// Most recent run succeeded
    Passed,
    /// Most recent run failed
    Failed,
}

impl TestStatus {
    /// Returns true if the test has a completed outcome.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TestStatus::Passed | TestStatus::Failed)
    }

    /// Returns a human-readable name for the status.
    pub fn display_name(&self) -> &'static str {
        match self {
            TestStatus::Idle => "Idle",
            TestStatus::Running => "Running",
            TestStatus::Passed => "Passed",
            TestStatus::Failed => "Failed",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            TestStatus::Idle => "○",
            TestStatus::Running => "◐",
            TestStatus::Passed => "●",
            TestStatus::Failed => "✗",
        }
    }
}

/// Kind of test a case represents. Closed set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Unit,
    Integration,
    E2e,
    Accessibility,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Unit,
        Category::Integration,
        Category::E2e,
        Category::Accessibility,
    ];

    /// Returns a human-readable name for the category.
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Unit => "Unit",
            Category::Integration => "Integration",
            Category::E2e => "E2E",
            Category::Accessibility => "Accessibility",
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown category: {0}")]
pub struct ParseCategoryError(String);

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unit" => Ok(Category::Unit),
            "integration" => Ok(Category::Integration),
            "e2e" => Ok(Category::E2e),
            "accessibility" | "a11y" => Ok(Category::Accessibility),
            other => Err(ParseCategoryError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_statuses() {
        assert!(!TestStatus::Idle.is_terminal());
        assert!(!TestStatus::Running.is_terminal());
        assert!(TestStatus::Passed.is_terminal());
        assert!(TestStatus::Failed.is_terminal());
    }

    #[test]
    fn test_parse_category() {
        assert_eq!("unit".parse::<Category>().unwrap(), Category::Unit);
        assert_eq!(" E2E ".parse::<Category>().unwrap(), Category::E2e);
        assert_eq!("a11y".parse::<Category>().unwrap(), Category::Accessibility);
        assert!("smoke".parse::<Category>().is_err());
    }
}
