//! Seed data: the initial registry snapshot shown at startup.

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::status::{Category, TestStatus};
use crate::test_case::{TestCase, DEFAULT_AVERAGE_MS};

fn seed_case(
    name: &str,
    description: &str,
    owner: &str,
    category: Category,
    tags: &[&str],
) -> TestCase {
    TestCase {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        description: description.to_string(),
        owner: owner.to_string(),
        category,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        status: TestStatus::Idle,
        average_duration_ms: DEFAULT_AVERAGE_MS,
        run_count: 0,
        last_run: None,
    }
}

/// The initial ordered set of test cases.
///
/// A few records carry prior run history so the stats panel and the
/// outcome bias have something to chew on from the first render.
pub fn seed_tests() -> Vec<TestCase> {
    let now = Utc::now();

    let mut tests = vec![
        seed_case(
            "Checkout flow",
            "Full cart-to-confirmation purchase with a saved card.",
            "payments",
            Category::E2e,
            &["critical", "cart"],
        ),
        seed_case(
            "Login with SSO",
            "Redirect round-trip through the identity provider.",
            "identity",
            Category::Integration,
            &["auth"],
        ),
        seed_case(
            "Price formatting",
            "Currency rounding and locale formatting for order totals.",
            "payments",
            Category::Unit,
            &["i18n"],
        ),
        seed_case(
            "Search relevance",
            "Top results for the twenty most common queries.",
            "discovery",
            Category::Integration,
            &["search", "ranking"],
        ),
        seed_case(
            "Keyboard navigation",
            "Every interactive element reachable without a pointer.",
            "web",
            Category::Accessibility,
            &["a11y", "wcag"],
        ),
        seed_case(
            "Inventory sync",
            "Stock counts reconcile after concurrent reservations.",
            "fulfillment",
            Category::Integration,
            &["flaky"],
        ),
    ];

    // Give a few cases a history: means consistent with their run counts.
    tests[1].status = TestStatus::Passed;
    tests[1].run_count = 4;
    tests[1].average_duration_ms = 820;
    tests[1].last_run = Some(now - Duration::minutes(18));

    tests[2].status = TestStatus::Passed;
    tests[2].run_count = 9;
    tests[2].average_duration_ms = 340;
    tests[2].last_run = Some(now - Duration::hours(2));

    tests[5].status = TestStatus::Failed;
    tests[5].run_count = 7;
    tests[5].average_duration_ms = 1650;
    tests[5].last_run = Some(now - Duration::minutes(5));

    tests
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_shape() {
        let tests = seed_tests();
        assert!(!tests.is_empty());
        for test in &tests {
            assert!(!test.id.is_empty());
            assert!(!test.name.is_empty());
            assert!(!test.owner.is_empty());
            // History only on cases that have actually completed runs.
            assert_eq!(test.last_run.is_some(), test.run_count > 0);
            assert_ne!(test.status, TestStatus::Running);
        }
    }
}
