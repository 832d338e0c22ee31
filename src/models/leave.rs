//! Leave and unavailability.
//!
//! # Date Model
//! Leave is kept in whole calendar days. An interval covers both its start
//! and end date. An interval whose end precedes its start covers nothing;
//! rejecting such intervals is the record store's job, not the engine's.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// A period during which a sailor is unavailable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveInterval {
    /// Last name of the sailor on leave.
    pub sailor: String,
    /// First unavailable day (inclusive).
    pub start_date: NaiveDate,
    /// Last unavailable day (inclusive).
    pub end_date: NaiveDate,
    /// Free-form category ("Leave", "TAD", "Medical", ...).
    #[serde(default)]
    pub leave_type: String,
    /// Free-form notes.
    #[serde(default)]
    pub notes: String,
}

impl LeaveInterval {
    /// Creates a leave interval with empty type and notes.
    pub fn new(sailor: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            sailor: sailor.into(),
            start_date,
            end_date,
            leave_type: String::new(),
            notes: String::new(),
        }
    }

    /// Sets the leave type.
    pub fn with_type(mut self, leave_type: impl Into<String>) -> Self {
        self.leave_type = leave_type.into();
        self
    }

    /// Sets the notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Whether `date` falls inside `[start_date, end_date]`.
    #[inline]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Whether the end date precedes the start date.
    pub fn is_inverted(&self) -> bool {
        self.end_date < self.start_date
    }

    /// Number of days covered (0 for an inverted interval).
    pub fn days(&self) -> i64 {
        if self.is_inverted() {
            0
        } else {
            (self.end_date - self.start_date).num_days() + 1
        }
    }
}

/// Leave intervals grouped by sailor.
#[derive(Debug, Clone, Default)]
pub struct LeaveIndex {
    by_sailor: HashMap<String, Vec<LeaveInterval>>,
}

impl LeaveIndex {
    /// Indexes a slice of leave intervals.
    pub fn new(leaves: &[LeaveInterval]) -> Self {
        let mut by_sailor: HashMap<String, Vec<LeaveInterval>> = HashMap::new();
        for leave in leaves {
            by_sailor
                .entry(leave.sailor.clone())
                .or_default()
                .push(leave.clone());
        }
        Self { by_sailor }
    }

    /// Whether the sailor has any interval containing `date`.
    pub fn is_on_leave(&self, last_name: &str, date: NaiveDate) -> bool {
        self.by_sailor
            .get(last_name)
            .is_some_and(|intervals| intervals.iter().any(|l| l.contains(date)))
    }

    /// Last names of every sailor unavailable on `date`.
    pub fn on_leave(&self, date: NaiveDate) -> HashSet<&str> {
        self.by_sailor
            .iter()
            .filter(|(_, intervals)| intervals.iter().any(|l| l.contains(date)))
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Intervals recorded for one sailor.
    pub fn intervals_for(&self, last_name: &str) -> &[LeaveInterval] {
        self.by_sailor
            .get(last_name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of sailors with at least one interval.
    pub fn sailor_count(&self) -> usize {
        self.by_sailor.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_contains_inclusive() {
        let l = LeaveInterval::new("Jones", d(2024, 5, 1), d(2024, 5, 3));
        assert!(l.contains(d(2024, 5, 1))); // inclusive start
        assert!(l.contains(d(2024, 5, 2)));
        assert!(l.contains(d(2024, 5, 3))); // inclusive end
        assert!(!l.contains(d(2024, 4, 30)));
        assert!(!l.contains(d(2024, 5, 4)));
        assert_eq!(l.days(), 3);
    }

    #[test]
    fn test_inverted_interval_contains_nothing() {
        let l = LeaveInterval::new("Jones", d(2024, 5, 3), d(2024, 5, 1));
        assert!(l.is_inverted());
        assert!(!l.contains(d(2024, 5, 2)));
        assert!(!l.contains(d(2024, 5, 1)));
        assert!(!l.contains(d(2024, 5, 3)));
        assert_eq!(l.days(), 0);
    }

    #[test]
    fn test_leave_index() {
        let leaves = vec![
            LeaveInterval::new("Jones", d(2024, 5, 1), d(2024, 5, 3)).with_type("Leave"),
            LeaveInterval::new("Jones", d(2024, 6, 1), d(2024, 6, 2)),
            LeaveInterval::new("Smith", d(2024, 5, 2), d(2024, 5, 9)).with_notes("TAD"),
        ];
        let idx = LeaveIndex::new(&leaves);

        assert_eq!(idx.sailor_count(), 2);
        assert_eq!(idx.intervals_for("Jones").len(), 2);
        assert!(idx.intervals_for("Brown").is_empty());

        assert!(idx.is_on_leave("Jones", d(2024, 6, 2)));
        assert!(!idx.is_on_leave("Jones", d(2024, 5, 20)));
        assert!(!idx.is_on_leave("Brown", d(2024, 5, 2)));

        let away = idx.on_leave(d(2024, 5, 2));
        assert!(away.contains("Jones"));
        assert!(away.contains("Smith"));
        assert_eq!(idx.on_leave(d(2024, 5, 5)).len(), 1);
    }

    #[test]
    fn test_serde_date_format() {
        let l = LeaveInterval::new("Jones", d(2024, 5, 1), d(2024, 5, 3));
        let json = serde_json::to_string(&l).unwrap();
        assert!(json.contains("\"2024-05-01\""));
        let back: LeaveInterval = serde_json::from_str(&json).unwrap();
        assert_eq!(back, l);
    }
}
