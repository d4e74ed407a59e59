//! Append-only, timestamped text logs
//!
//! Used for soldier histories, team logs and chat, mission events and the
//! global simulator journal. These are audit trails shown in reports; they
//! are never replayed.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Display format for every timestamp in the simulator
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single timestamped entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub at: DateTime<Local>,
    pub text: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.at.format(TIMESTAMP_FORMAT), self.text)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventLog {
    entries: Vec<LogEntry>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry stamped with the current local time
    pub fn push(&mut self, text: impl Into<String>) -> &LogEntry {
        self.entries.push(LogEntry {
            at: Local::now(),
            text: text.into(),
        });
        &self.entries[self.entries.len() - 1]
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// The last `n` entries, oldest first
    pub fn recent(&self, n: usize) -> &[LogEntry] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_recent() {
        let mut log = EventLog::new();
        for i in 0..7 {
            log.push(format!("event {}", i));
        }
        assert_eq!(log.len(), 7);

        let recent: Vec<_> = log.recent(3).iter().map(|e| e.text.as_str()).collect();
        assert_eq!(recent, vec!["event 4", "event 5", "event 6"]);

        // Asking for more than exists returns everything
        assert_eq!(log.recent(50).len(), 7);
    }

    #[test]
    fn test_entry_display_has_timestamp_prefix() {
        let mut log = EventLog::new();
        let rendered = log.push("contact").to_string();
        assert!(rendered.ends_with(": contact"));
        // "YYYY-MM-DD HH:MM:SS" is 19 characters
        assert_eq!(rendered.len(), 19 + ": contact".len());
    }
}
