//! Catalog entries: qualifications, watch stations, and watch times.
//!
//! Qualifications and stations carry an explicit `display_order`; the
//! engine walks stations in ascending order. Watch times have no order
//! field and are used in the order supplied.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named credential a sailor can hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Qualification {
    /// Unique name (e.g., "Helm", "OOD").
    pub name: String,
    /// Position in the qualification list.
    pub display_order: usize,
}

/// A watch station that must be manned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchStation {
    /// Unique name. May be a qualification name plus a numeric suffix ("Helm1").
    pub name: String,
    /// Position in the station list.
    pub display_order: usize,
}

/// A time block within the watch day.
///
/// Times are opaque strings ("08:00"); the engine never parses them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WatchTime {
    /// Block start.
    pub start: String,
    /// Block end.
    pub end: String,
}

/// How a station is filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StationRole {
    /// One sailor per block, never the same sailor twice in a day.
    OfficerOfTheDeck,
    /// One sailor per block, repeats allowed, OOD exclusion ignored.
    InternalRover,
    /// One sailor for the whole day, drawn from sailors not already OOD.
    Standard,
}

impl Qualification {
    /// Creates a qualification.
    pub fn new(name: impl Into<String>, display_order: usize) -> Self {
        Self {
            name: name.into(),
            display_order,
        }
    }
}

impl WatchStation {
    /// Creates a station.
    pub fn new(name: impl Into<String>, display_order: usize) -> Self {
        Self {
            name: name.into(),
            display_order,
        }
    }

    /// Builds stations from names, numbering them in the given order.
    pub fn ordered<I, S>(names: I) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names
            .into_iter()
            .enumerate()
            .map(|(i, name)| Self::new(name, i))
            .collect()
    }
}

impl WatchTime {
    /// Creates a time block.
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// `"{start} - {end}"`, the column heading for this block.
    pub fn label(&self) -> String {
        format!("{} - {}", self.start, self.end)
    }
}

impl fmt::Display for WatchTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watch_time_label() {
        let t = WatchTime::new("08:00", "12:00");
        assert_eq!(t.label(), "08:00 - 12:00");
        assert_eq!(t.to_string(), t.label());
    }

    #[test]
    fn test_ordered_stations() {
        let stations = WatchStation::ordered(["OOD", "Helm1", "Lookout"]);
        assert_eq!(stations.len(), 3);
        assert_eq!(stations[0].display_order, 0);
        assert_eq!(stations[2].name, "Lookout");
        assert_eq!(stations[2].display_order, 2);
    }
}
