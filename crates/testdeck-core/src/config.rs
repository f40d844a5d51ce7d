//! Simulation tuning knobs.
//!
//! Values are resolved from built-in defaults, with `TESTDECK_*`
//! environment variables taking priority. There is no config file:
//! nothing in this system persists.

use serde::{Deserialize, Serialize};

/// Parameters of the simulated run scheduler.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Uniform jitter applied around a test's rolling average, in ms
    pub jitter_ms: u64,
    /// Lower clamp on a simulated run duration, in ms
    pub min_run_ms: u64,
    /// Upper clamp on a simulated run duration, in ms
    pub max_run_ms: u64,
    /// Delay between successive starts in a bulk run, in ms
    pub stagger_ms: u64,
    /// Success probability for a test whose previous run passed
    pub pass_bias_after_pass: f64,
    /// Success probability for a test that is idle or previously failed
    pub pass_bias_cold: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            jitter_ms: 200,
            min_run_ms: 300,
            max_run_ms: 3000,
            stagger_ms: 150,
            pass_bias_after_pass: 0.72,
            pass_bias_cold: 0.55,
        }
    }
}

impl SimConfig {
    /// Loads defaults with environment variable overrides applied.
    pub fn load() -> Self {
        let mut config = Self::default();
        config.apply_env_overrides();
        config
    }

    /// Apply `TESTDECK_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Some(v) = env_parse("TESTDECK_JITTER_MS") {
            self.jitter_ms = v;
        }
        if let Some(v) = env_parse("TESTDECK_MIN_RUN_MS") {
            self.min_run_ms = v;
        }
        if let Some(v) = env_parse("TESTDECK_MAX_RUN_MS") {
            self.max_run_ms = v;
        }
        if let Some(v) = env_parse("TESTDECK_STAGGER_MS") {
            self.stagger_ms = v;
        }
        if let Some(v) = env_parse::<f64>("TESTDECK_PASS_BIAS_AFTER_PASS") {
            self.pass_bias_after_pass = v;
        }
        if let Some(v) = env_parse::<f64>("TESTDECK_PASS_BIAS_COLD") {
            self.pass_bias_cold = v;
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SimConfig::default();
        assert_eq!(config.min_run_ms, 300);
        assert_eq!(config.max_run_ms, 3000);
        assert_eq!(config.stagger_ms, 150);
        assert!(config.pass_bias_after_pass > config.pass_bias_cold);
    }
}
