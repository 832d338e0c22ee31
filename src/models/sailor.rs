//! Sailor model.
//!
//! A sailor is the person filling a watch: a rank, a last name that is
//! unique across the roster, and the set of qualifications held.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::engine::is_qualified;

/// A sailor on the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sailor {
    /// Rank or rate (e.g., "LT", "PO2").
    pub rank: String,
    /// Last name. Unique key within a roster.
    pub last_name: String,
    /// Qualification names held.
    #[serde(default)]
    pub qualifications: BTreeSet<String>,
}

impl Sailor {
    /// Creates a sailor with no qualifications.
    pub fn new(rank: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            rank: rank.into(),
            last_name: last_name.into(),
            qualifications: BTreeSet::new(),
        }
    }

    /// Adds a qualification.
    pub fn with_qualification(mut self, name: impl Into<String>) -> Self {
        self.qualifications.insert(name.into());
        self
    }

    /// Adds several qualifications.
    pub fn with_qualifications<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.qualifications.extend(names.into_iter().map(Into::into));
        self
    }

    /// `"{rank} {last_name}"`, the text placed in a watchbill cell.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.rank, self.last_name)
    }

    /// Whether this sailor holds a given qualification (exact name).
    pub fn has_qualification(&self, name: &str) -> bool {
        self.qualifications.contains(name)
    }

    /// Whether any held qualification matches the station name.
    ///
    /// See [`is_qualified`] for the matching rule.
    pub fn is_qualified_for(&self, station: &str) -> bool {
        is_qualified(station, &self.qualifications)
    }
}
