use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of entries the activity log retains.
pub const MAX_LOG_ITEMS: usize = 12;

/// Severity of an activity log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Error,
}

impl LogLevel {
    pub fn display_name(&self) -> &'static str {
        match self {
            LogLevel::Info => "info",
            LogLevel::Success => "ok",
            LogLevel::Error => "err",
        }
    }
}

/// One immutable record of a notable event.
///
/// The message is fully formatted at creation time; entries are never
/// mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: String,
    pub level: LogLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Bounded, newest-first audit trail of user and scheduler actions.
///
/// Holds at most [`MAX_LOG_ITEMS`] entries; inserting past the bound
/// evicts the oldest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivityLog {
    entries: VecDeque<LogEntry>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry at the front, evicting the oldest past the bound.
    pub fn append(&mut self, level: LogLevel, message: impl Into<String>) {
        self.entries.push_front(LogEntry {
            id: Uuid::new_v4().to_string(),
            level,
            message: message.into(),
            timestamp: Utc::now(),
        });
        self.entries.truncate(MAX_LOG_ITEMS);
    }

    /// Entries newest-first.
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most recent entry, if any.
    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_is_newest_first() {
        let mut log = ActivityLog::new();
        log.append(LogLevel::Info, "first");
        log.append(LogLevel::Success, "second");

        let messages: Vec<_> = log.entries().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["second", "first"]);
        assert_eq!(log.latest().unwrap().level, LogLevel::Success);
    }

    #[test]
    fn test_bound_evicts_oldest() {
        let mut log = ActivityLog::new();
        for i in 0..MAX_LOG_ITEMS + 1 {
            log.append(LogLevel::Info, format!("entry {i}"));
        }

        assert_eq!(log.len(), MAX_LOG_ITEMS);
        // "entry 0" fell off the back; the most recent 12 remain in order.
        let messages: Vec<_> = log.entries().map(|e| e.message.as_str()).collect();
        assert_eq!(messages[0], "entry 12");
        assert_eq!(messages[MAX_LOG_ITEMS - 1], "entry 1");
    }
}
