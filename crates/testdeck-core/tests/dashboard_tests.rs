//! Timer-driven behavior of the async dashboard driver, under paused
//! virtual time so durations are deterministic.

use std::time::Duration;

use testdeck_core::{
    Category, Dashboard, FilterSet, LogLevel, SimConfig, TestCase, TestDraft, TestStatus,
};
use tokio::time::sleep;

fn draft(name: &str) -> TestDraft {
    TestDraft {
        name: name.to_string(),
        description: format!("Covers {name}"),
        owner: "web".to_string(),
        category: Category::Unit,
        tags: vec![],
    }
}

fn seed(names: &[&str]) -> Vec<TestCase> {
    names
        .iter()
        .map(|n| TestCase::new(draft(n)).unwrap())
        .collect()
}

/// Zero jitter and a hard clamp make every simulated run take exactly
/// `fixed` milliseconds.
fn fixed_duration_config(fixed: u64) -> SimConfig {
    SimConfig {
        jitter_ms: 0,
        min_run_ms: fixed,
        max_run_ms: fixed,
        ..SimConfig::default()
    }
}

async fn single_test(dashboard: &Dashboard) -> TestCase {
    let tests = dashboard.tests(&FilterSet::default()).await;
    tests.into_iter().next().expect("one test")
}

#[tokio::test(start_paused = true)]
async fn run_completes_after_simulated_duration() {
    let dashboard = Dashboard::seeded(seed(&["Checkout flow"]), fixed_duration_config(800), 1);
    let id = single_test(&dashboard).await.id;

    dashboard.run_test(&id).await;
    assert_eq!(single_test(&dashboard).await.status, TestStatus::Running);

    // Not yet complete mid-flight.
    sleep(Duration::from_millis(700)).await;
    assert_eq!(single_test(&dashboard).await.status, TestStatus::Running);

    sleep(Duration::from_millis(200)).await;
    let test = single_test(&dashboard).await;
    assert!(test.status.is_terminal());
    assert_eq!(test.run_count, 1);
    assert_eq!(test.average_duration_ms, 800);
    assert!(test.last_run.is_some());

    let log = dashboard.log().await;
    assert_eq!(log.len(), 2); // queued + outcome, newest first
    assert_eq!(log[1].message, "Queued \"Checkout flow\" for execution.");
}

#[tokio::test(start_paused = true)]
async fn reset_does_not_cancel_pending_completion() {
    let dashboard = Dashboard::seeded(seed(&["Flaky"]), fixed_duration_config(1000), 3);
    let id = single_test(&dashboard).await.id;

    dashboard.run_test(&id).await;
    sleep(Duration::from_millis(200)).await;
    dashboard.reset_test(&id).await;
    assert_eq!(single_test(&dashboard).await.status, TestStatus::Idle);

    // The completion fires anyway and overwrites the reset.
    sleep(Duration::from_millis(1000)).await;
    let test = single_test(&dashboard).await;
    assert!(test.status.is_terminal());
    assert_eq!(test.run_count, 1);
}

#[tokio::test(start_paused = true)]
async fn bulk_run_logs_summary_before_any_start() {
    let dashboard = Dashboard::seeded(seed(&["a", "b", "c"]), fixed_duration_config(1000), 5);

    dashboard.run_all().await;

    // Summary is synchronous; no start or completion has happened yet.
    let log = dashboard.log().await;
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].level, LogLevel::Info);
    assert_eq!(log[0].message, "Launched 3 test runs.");
}

#[tokio::test(start_paused = true)]
async fn bulk_run_staggers_starts_in_selection_order() {
    let dashboard = Dashboard::seeded(seed(&["a", "b", "c"]), fixed_duration_config(1000), 5);

    dashboard.run_all().await;

    // Starts land at 0ms, 150ms, and 300ms; completions from 1000ms on.
    sleep(Duration::from_millis(500)).await;
    let tests = dashboard.tests(&FilterSet::default()).await;
    assert!(tests.iter().all(|t| t.status == TestStatus::Running));

    let log = dashboard.log().await;
    let queued: Vec<&str> = log
        .iter()
        .rev()
        .filter(|e| e.message.starts_with("Queued"))
        .map(|e| e.message.as_str())
        .collect();
    assert_eq!(
        queued,
        vec![
            "Queued \"a\" for execution.",
            "Queued \"b\" for execution.",
            "Queued \"c\" for execution.",
        ]
    );

    // Let everything finish: one completed run per test.
    sleep(Duration::from_millis(2000)).await;
    let tests = dashboard.tests(&FilterSet::default()).await;
    assert!(tests.iter().all(|t| t.status.is_terminal() && t.run_count == 1));
}

#[tokio::test(start_paused = true)]
async fn bulk_run_skips_running_and_passed_tests() {
    let mut tests = seed(&["green", "red", "idle"]);
    tests[0].status = TestStatus::Passed;
    tests[1].status = TestStatus::Failed;
    let dashboard = Dashboard::seeded(tests, fixed_duration_config(1000), 5);

    dashboard.run_all().await;
    assert_eq!(dashboard.log().await[0].message, "Launched 2 test runs.");

    sleep(Duration::from_millis(500)).await;
    let tests = dashboard.tests(&FilterSet::default()).await;
    let by_name = |name: &str| tests.iter().find(|t| t.name == name).unwrap().status;
    assert_eq!(by_name("green"), TestStatus::Passed);
    assert_eq!(by_name("red"), TestStatus::Running);
    assert_eq!(by_name("idle"), TestStatus::Running);
}

#[tokio::test(start_paused = true)]
async fn run_request_while_running_is_ignored() {
    let dashboard = Dashboard::seeded(seed(&["busy"]), fixed_duration_config(1000), 9);
    let id = single_test(&dashboard).await.id;

    dashboard.run_test(&id).await;
    sleep(Duration::from_millis(100)).await;
    dashboard.run_test(&id).await;

    // Only one queued entry, and only one completion ever lands.
    sleep(Duration::from_millis(3000)).await;
    let test = single_test(&dashboard).await;
    assert_eq!(test.run_count, 1);
    let queued = dashboard
        .log()
        .await
        .iter()
        .filter(|e| e.message.starts_with("Queued"))
        .count();
    assert_eq!(queued, 1);
}

#[tokio::test(start_paused = true)]
async fn watch_revision_changes_on_mutation() {
    let dashboard = Dashboard::seeded(seed(&["watched"]), fixed_duration_config(500), 2);
    let mut rx = dashboard.subscribe();
    let before = *rx.borrow_and_update();

    dashboard.create_test(draft("another")).await;
    rx.changed().await.unwrap();
    assert!(*rx.borrow_and_update() > before);
}

#[tokio::test(start_paused = true)]
async fn create_and_stats_roundtrip() {
    let dashboard = Dashboard::new(Vec::new(), SimConfig::default());

    assert_eq!(dashboard.stats().await.total, 0);
    dashboard.create_test(draft("first")).await;
    dashboard
        .create_test(TestDraft {
            name: String::new(),
            ..draft("bad")
        })
        .await;

    let stats = dashboard.stats().await;
    assert_eq!(stats.total, 1);
    assert_eq!(stats.idle, 1);

    let log = dashboard.log().await;
    assert_eq!(log.len(), 2);
    assert_eq!(log[0].level, LogLevel::Error);
    assert_eq!(log[1].message, "Added test \"first\".");
}
