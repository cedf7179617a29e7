//! Log domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A log entry emitted by a job
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LogEntry {
    pub time: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
}

impl LogEntry {
    pub fn new(time: DateTime<Utc>, level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            time,
            level,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

/// Merges a page of log entries into an existing log
///
/// Entries already present in `logs` are skipped (overlapping pages), counted
/// per occurrence so that genuinely repeated lines survive. The result is
/// stably sorted by time; nothing is ever dropped from `logs`.
///
/// Returns the number of entries added.
pub fn merge_logs(logs: &mut Vec<LogEntry>, incoming: impl IntoIterator<Item = LogEntry>) -> usize {
    let mut known: HashMap<LogEntry, usize> = HashMap::new();
    for entry in logs.iter() {
        *known.entry(entry.clone()).or_default() += 1;
    }

    let fresh: Vec<LogEntry> = incoming
        .into_iter()
        .filter(|entry| match known.get_mut(entry) {
            Some(count) if *count > 0 => {
                *count -= 1;
                false
            }
            _ => true,
        })
        .collect();

    let added = fresh.len();
    if added > 0 {
        logs.extend(fresh);
        logs.sort_by_key(|entry| entry.time);
    }
    added
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(second: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, second).unwrap()
    }

    fn entry(second: u32, message: &str) -> LogEntry {
        LogEntry::new(at(second), LogLevel::Info, message)
    }

    #[test]
    fn test_merge_overlapping_pages() {
        let mut logs = vec![entry(1, "a"), entry(2, "b"), entry(3, "c")];
        let added = merge_logs(&mut logs, vec![entry(2, "b"), entry(3, "c"), entry(4, "d")]);

        assert_eq!(added, 1);
        let messages: Vec<_> = logs.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_merge_keeps_repeated_lines() {
        let mut logs = vec![entry(1, "retrying")];
        let added = merge_logs(&mut logs, vec![entry(1, "retrying"), entry(1, "retrying")]);

        assert_eq!(added, 1);
        assert_eq!(logs.len(), 2);
    }

    #[test]
    fn test_merge_out_of_order_page() {
        let mut logs = vec![entry(5, "later")];
        merge_logs(&mut logs, vec![entry(3, "middle"), entry(1, "first")]);

        let times: Vec<_> = logs.iter().map(|e| e.time).collect();
        let mut sorted = times.clone();
        sorted.sort();
        assert_eq!(times, sorted);
        assert_eq!(logs.len(), 3);
    }

    #[test]
    fn test_merge_is_stable_for_equal_times() {
        let mut logs = vec![entry(1, "one")];
        merge_logs(&mut logs, vec![entry(1, "two")]);
        assert_eq!(logs[0].message, "one");
        assert_eq!(logs[1].message, "two");
    }

    #[test]
    fn test_level_wire_spelling() {
        let level: LogLevel = serde_json::from_str("\"warn\"").unwrap();
        assert_eq!(level, LogLevel::Warn);
    }
}
