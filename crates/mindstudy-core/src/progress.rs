//! Achievement log: self-recorded study results.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressEntry {
    pub id: Uuid,
    pub subject: String,
    pub date: NaiveDate,
    /// Free-form result, e.g. "9.5" or "passed".
    pub score: String,
}

/// Session-owned achievement log.
#[derive(Debug, Default)]
pub struct ProgressLog {
    entries: Vec<ProgressEntry>,
}

impl ProgressLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(
        &mut self,
        subject: impl Into<String>,
        date: NaiveDate,
        score: impl Into<String>,
    ) -> Uuid {
        let id = Uuid::new_v4();
        self.entries.push(ProgressEntry {
            id,
            subject: subject.into(),
            date,
            score: score.into(),
        });
        id
    }

    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Entries newest-first; ties keep insertion order.
    pub fn recent(&self) -> Vec<&ProgressEntry> {
        let mut entries: Vec<&ProgressEntry> = self.entries.iter().collect();
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    #[test]
    fn recent_sorts_newest_first() {
        let mut log = ProgressLog::new();
        log.add("math", day(1), "8.0");
        log.add("physics", day(20), "9.5");
        log.add("literature", day(10), "7.5");

        let subjects: Vec<&str> = log.recent().iter().map(|e| e.subject.as_str()).collect();
        assert_eq!(subjects, vec!["physics", "literature", "math"]);
    }

    #[test]
    fn remove_by_id() {
        let mut log = ProgressLog::new();
        let id = log.add("math", day(1), "8.0");
        assert!(log.remove(id));
        assert!(log.is_empty());
    }
}
