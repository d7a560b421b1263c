// SPDX-License-Identifier: MIT OR Apache-2.0
//! Editor log: rebuild outcomes and failed edits, for a log display to show.

use std::collections::VecDeque;

/// Log severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Informational
    Info,
    /// Something went wrong, the editor carries on
    Error,
}

/// A log entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Severity
    pub severity: Severity,
    /// Message
    pub message: String,
    /// Number of consecutive identical entries collapsed into this one
    pub count: u32,
}

/// Bounded log of editor events.
///
/// Every entry is also emitted as a `tracing` event.
#[derive(Debug, Clone)]
pub struct EditorLog {
    entries: VecDeque<LogEntry>,
    max_entries: usize,
}

impl EditorLog {
    /// Create a log keeping at most `max_entries` entries
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_entries: max_entries.max(1),
        }
    }

    /// Append an entry, collapsing it into the previous one if identical
    pub fn push(&mut self, severity: Severity, message: impl Into<String>) {
        let message = message.into();
        match severity {
            Severity::Info => tracing::info!("{}", message),
            Severity::Error => tracing::error!("{}", message),
        }

        if let Some(last) = self.entries.back_mut() {
            if last.severity == severity && last.message == message {
                last.count += 1;
                return;
            }
        }

        if self.entries.len() >= self.max_entries {
            self.entries.pop_front();
        }
        self.entries.push_back(LogEntry {
            severity,
            message,
            count: 1,
        });
    }

    /// Append an informational entry
    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Severity::Info, message);
    }

    /// Append an error entry
    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Severity::Error, message);
    }

    /// Entries, oldest first
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// Most recent entry
    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    /// Remove and return all entries
    pub fn drain(&mut self) -> Vec<LogEntry> {
        self.entries.drain(..).collect()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the log is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of error entries
    pub fn error_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.severity == Severity::Error)
            .count()
    }
}

impl Default for EditorLog {
    fn default() -> Self {
        Self::new(1000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_drops_oldest() {
        let mut log = EditorLog::new(2);
        log.info("one");
        log.info("two");
        log.error("three");

        let messages: Vec<&str> = log.entries().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["two", "three"]);
        assert_eq!(log.error_count(), 1);
    }

    #[test]
    fn test_duplicates_collapse() {
        let mut log = EditorLog::default();
        log.error("Material has no output blocks");
        log.error("Material has no output blocks");
        log.info("Material has no output blocks");

        assert_eq!(log.len(), 2);
        let first = log.entries().next().unwrap();
        assert_eq!(first.count, 2);

        let drained = log.drain();
        assert_eq!(drained.len(), 2);
        assert!(log.is_empty());
    }
}
