//! shell::history
//!
//! Bounded command history.

use std::collections::VecDeque;

use chrono::{DateTime, Local};
use serde::Serialize;

/// One recorded line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    /// 1-based sequence number, stable across eviction.
    pub number: usize,
    pub line: String,
    pub at: DateTime<Local>,
}

/// The most recent lines, oldest first.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    limit: usize,
    recorded: usize,
}

impl History {
    /// A history keeping at most `limit` entries. A limit of 0 keeps nothing.
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(limit.min(1024)),
            limit,
            recorded: 0,
        }
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.recorded += 1;
        if self.limit == 0 {
            return;
        }
        if self.entries.len() == self.limit {
            self.entries.pop_front();
        }
        self.entries.push_back(HistoryEntry {
            number: self.recorded,
            line: line.into(),
            at: Local::now(),
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// The last `count` entries, oldest first. A count of 0 means all.
    pub fn recent(&self, count: usize) -> impl Iterator<Item = &HistoryEntry> {
        let skip = match count {
            0 => 0,
            n => self.entries.len().saturating_sub(n),
        };
        self.entries.iter().skip(skip)
    }

    /// The most recent line.
    pub fn last(&self) -> Option<&str> {
        self.entries.back().map(|e| e.line.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines<'a>(entries: impl Iterator<Item = &'a HistoryEntry>) -> Vec<&'a str> {
        entries.map(|e| e.line.as_str()).collect()
    }

    #[test]
    fn evicts_oldest() {
        let mut history = History::new(2);
        history.push("a");
        history.push("b");
        history.push("c");
        assert_eq!(lines(history.iter()), vec!["b", "c"]);
        assert_eq!(history.last(), Some("c"));

        let numbers: Vec<_> = history.iter().map(|e| e.number).collect();
        assert_eq!(numbers, vec![2, 3]);
    }

    #[test]
    fn recent_slices_from_the_end() {
        let mut history = History::new(10);
        for line in ["a", "b", "c"] {
            history.push(line);
        }
        assert_eq!(lines(history.recent(2)), vec!["b", "c"]);
        assert_eq!(lines(history.recent(0)), vec!["a", "b", "c"]);
        assert_eq!(lines(history.recent(9)), vec!["a", "b", "c"]);
    }

    #[test]
    fn zero_limit_keeps_nothing() {
        let mut history = History::new(0);
        history.push("a");
        assert!(history.is_empty());
        assert_eq!(history.last(), None);
    }
}
