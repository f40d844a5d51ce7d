//! The simulated run scheduler.
//!
//! All transitions here are synchronous and operate on a
//! [`DashboardState`] passed in by the driver; scheduling the delayed
//! completion is the driver's job (see [`crate::dashboard`]). That split
//! keeps the state machine deterministic under a seeded RNG: given the
//! same seed and the same sequence of calls, the same durations and
//! outcomes fall out regardless of timer interleaving.

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::activity::LogLevel;
use crate::config::SimConfig;
use crate::state::DashboardState;
use crate::status::TestStatus;

/// A run that has been started but not yet completed.
///
/// Exactly one completion is owed per `PendingRun`; there is no
/// cancellation path. A reset while the run is in flight does not stop
/// the completion from firing later.
#[derive(Debug, Clone)]
pub struct PendingRun {
    pub test_id: String,
    /// Status the test had before this run started; biases the outcome draw
    pub prior_status: TestStatus,
    /// Simulated duration drawn at start time
    pub duration_ms: u64,
}

/// Orchestrates run requests against the registry.
///
/// Owns the random source so outcome and duration draws can be replayed
/// from a seed.
pub struct RunScheduler<R = StdRng> {
    config: SimConfig,
    rng: R,
}

impl RunScheduler<StdRng> {
    /// Creates a scheduler with an OS-seeded RNG.
    pub fn new(config: SimConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Creates a scheduler whose draws replay deterministically.
    pub fn seeded(config: SimConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RunScheduler<R> {
    pub fn with_rng(config: SimConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Starts a run for the given test.
    ///
    /// Returns `None` (no log entry, registry untouched) if the id is
    /// unknown or the test is already running. Otherwise logs the queue
    /// entry, flips the test to Running, draws a jittered duration around
    /// the rolling average, and returns the pending completion the driver
    /// must deliver to [`finish`](Self::finish) after `duration_ms`.
    pub fn start(&mut self, state: &mut DashboardState, id: &str) -> Option<PendingRun> {
        let (name, prior_status, average_ms) = {
            let test = state.registry.find(id)?;
            if test.status == TestStatus::Running {
                return None;
            }
            (test.name.clone(), test.status, test.average_duration_ms)
        };

        state
            .activity
            .append(LogLevel::Info, format!("Queued \"{name}\" for execution."));
        if let Some(test) = state.registry.find_mut(id) {
            test.status = TestStatus::Running;
        }

        let jitter = self.config.jitter_ms as i64;
        let duration_ms = (average_ms as i64 + self.rng.random_range(-jitter..=jitter))
            .clamp(self.config.min_run_ms as i64, self.config.max_run_ms as i64)
            as u64;

        debug!(test = %name, duration_ms, "run started");
        Some(PendingRun {
            test_id: id.to_string(),
            prior_status,
            duration_ms,
        })
    }

    /// Completes a pending run.
    ///
    /// Draws the outcome with a weighted coin flip: a test that was green
    /// before the run keeps a higher success bias than one that was idle
    /// or red, so flaky tests do not "fix themselves" as easily as passing
    /// tests stay passing. Applies the completion to the record and logs
    /// the result. Runs unconditionally, even if the test was reset while
    /// in flight.
    pub fn finish(&mut self, state: &mut DashboardState, run: PendingRun, now: DateTime<Utc>) {
        let bias = if run.prior_status == TestStatus::Passed {
            self.config.pass_bias_after_pass
        } else {
            self.config.pass_bias_cold
        };

        let Some(test) = state.registry.find_mut(&run.test_id) else {
            return;
        };
        let passed = self.rng.random_bool(bias);
        test.record_completion(run.duration_ms, passed, now);
        let name = test.name.clone();

        debug!(test = %name, passed, duration_ms = run.duration_ms, "run finished");
        if passed {
            state.activity.append(
                LogLevel::Success,
                format!(
                    "\"{name}\" passed in {}.",
                    format_duration_ms(run.duration_ms)
                ),
            );
        } else {
            state
                .activity
                .append(LogLevel::Error, format!("\"{name}\" failed."));
        }
    }

    /// Resets a test to idle, whatever its current status.
    ///
    /// Does not cancel an in-flight completion; a pending run will still
    /// overwrite the status when it fires. Unknown id is a silent no-op.
    pub fn reset(&self, state: &mut DashboardState, id: &str) {
        let name = match state.registry.find_mut(id) {
            Some(test) => {
                test.status = TestStatus::Idle;
                test.name.clone()
            }
            None => return,
        };
        state
            .activity
            .append(LogLevel::Info, format!("Reset \"{name}\" to idle state."));
    }

    /// Selects the bulk-run set: every test neither running nor passed.
    ///
    /// Logs exactly one entry either way - the "nothing to do" notice or a
    /// summary naming the launch count - and returns the selected ids in
    /// registry order. The driver staggers the actual starts by
    /// [`SimConfig::stagger_ms`] per index to keep the log readable.
    pub fn start_bulk(&self, state: &mut DashboardState) -> Vec<String> {
        let ids: Vec<String> = state
            .registry
            .all()
            .iter()
            .filter(|t| t.status != TestStatus::Running && t.status != TestStatus::Passed)
            .map(|t| t.id.clone())
            .collect();

        if ids.is_empty() {
            state
                .activity
                .append(LogLevel::Info, "No tests eligible for a bulk run.");
        } else {
            state
                .activity
                .append(LogLevel::Info, format!("Launched {} test runs.", ids.len()));
        }
        ids
    }
}

/// Formats a millisecond duration for log messages, e.g. "1.2s".
pub fn format_duration_ms(ms: u64) -> String {
    format!("{:.1}s", ms as f64 / 1000.0)
}
