//! Async driver around the scheduler and state.
//!
//! The original dashboard mutated its state from a single UI event loop;
//! here the same discipline is a mutex around [`DashboardState`] whose
//! only writers are the scheduler transitions and
//! [`DashboardState::create_test`]. Run completions are spawned
//! `tokio::time::sleep` tasks that re-enter through
//! [`RunScheduler::finish`] - deliberately uncancellable, so a reset
//! during a run can be overwritten when the completion lands. A `watch`
//! revision counter tells the UI when to pull fresh snapshots.

use std::sync::Arc;

use chrono::Utc;
use rand::rngs::StdRng;
use tokio::sync::{watch, Mutex};
use tokio::time::{sleep, Duration};
use tracing::debug;

use crate::activity::LogEntry;
use crate::config::SimConfig;
use crate::registry::{DashboardStats, FilterSet};
use crate::scheduler::RunScheduler;
use crate::state::DashboardState;
use crate::test_case::{TestCase, TestDraft, TestPatch};

struct Inner {
    state: DashboardState,
    scheduler: RunScheduler<StdRng>,
}

/// Cloneable handle to the running dashboard.
#[derive(Clone)]
pub struct Dashboard {
    inner: Arc<Mutex<Inner>>,
    revision: Arc<watch::Sender<u64>>,
}

impl Dashboard {
    /// Creates a dashboard over an initial snapshot with an OS-seeded RNG.
    pub fn new(tests: Vec<TestCase>, config: SimConfig) -> Self {
        Self::with_scheduler(tests, RunScheduler::new(config))
    }

    /// Creates a dashboard whose run draws replay from a fixed seed.
    pub fn seeded(tests: Vec<TestCase>, config: SimConfig, seed: u64) -> Self {
        Self::with_scheduler(tests, RunScheduler::seeded(config, seed))
    }

    fn with_scheduler(tests: Vec<TestCase>, scheduler: RunScheduler<StdRng>) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            inner: Arc::new(Mutex::new(Inner {
                state: DashboardState::seeded(tests),
                scheduler,
            })),
            revision: Arc::new(revision),
        }
    }

    /// Receiver that changes whenever dashboard state changed.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    fn bump(&self) {
        self.revision.send_modify(|rev| *rev += 1);
    }

    /// Creates a test case; validation failures surface via the log only.
    pub async fn create_test(&self, draft: TestDraft) -> Option<String> {
        let id = self.inner.lock().await.state.create_test(draft);
        self.bump();
        id
    }

    /// Replaces fields of an existing test. Unknown id is a no-op.
    pub async fn update_test(&self, id: &str, patch: TestPatch) {
        self.inner.lock().await.state.registry.update(id, patch);
        self.bump();
    }

    /// Starts a simulated run and schedules its completion.
    ///
    /// Returns immediately after the test is marked Running; the outcome
    /// lands after the drawn duration. A request against a missing or
    /// already-running test does nothing.
    pub async fn run_test(&self, id: &str) {
        let pending = {
            let mut inner = self.inner.lock().await;
            let Inner { state, scheduler } = &mut *inner;
            scheduler.start(state, id)
        };
        let Some(pending) = pending else { return };
        self.bump();

        let this = self.clone();
        tokio::spawn(async move {
            sleep(Duration::from_millis(pending.duration_ms)).await;
            {
                let mut inner = this.inner.lock().await;
                let Inner { state, scheduler } = &mut *inner;
                scheduler.finish(state, pending, Utc::now());
            }
            this.bump();
        });
    }

    /// Resets a test to idle. Does not cancel an in-flight run.
    pub async fn reset_test(&self, id: &str) {
        {
            let mut inner = self.inner.lock().await;
            let Inner { state, scheduler } = &mut *inner;
            scheduler.reset(state, id);
        }
        self.bump();
    }

    /// Runs every idle or failed test, staggering the starts.
    ///
    /// The summary log entry is appended synchronously before this method
    /// returns; the individual starts fire at `i * stagger_ms`.
    pub async fn run_all(&self) {
        let (ids, stagger_ms) = {
            let mut inner = self.inner.lock().await;
            let Inner { state, scheduler } = &mut *inner;
            (scheduler.start_bulk(state), scheduler.config().stagger_ms)
        };
        self.bump();
        debug!(count = ids.len(), "bulk run launched");

        for (i, id) in ids.into_iter().enumerate() {
            let this = self.clone();
            tokio::spawn(async move {
                sleep(Duration::from_millis(stagger_ms * i as u64)).await;
                this.run_test(&id).await;
            });
        }
    }

    /// Snapshot of the filtered test list, in registry order.
    pub async fn tests(&self, filter: &FilterSet) -> Vec<TestCase> {
        self.inner
            .lock()
            .await
            .state
            .registry
            .list_filtered(filter)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Aggregate statistics, recomputed on demand.
    pub async fn stats(&self) -> DashboardStats {
        self.inner.lock().await.state.registry.aggregate_stats()
    }

    /// Snapshot of the activity log, newest first.
    pub async fn log(&self) -> Vec<LogEntry> {
        self.inner
            .lock()
            .await
            .state
            .activity
            .entries()
            .cloned()
            .collect()
    }

    /// Distinct owner names for the filter dropdown.
    pub async fn owners(&self) -> Vec<String> {
        self.inner.lock().await.state.registry.distinct_owners()
    }
}
