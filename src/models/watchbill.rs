//! Watchbill (generated roster) model.
//!
//! A watchbill is a grid with one row per station (in display order) and
//! one column per time block. Every cell holds either an assigned sailor's
//! display name or the unassigned sentinel. It is never persisted; the
//! operator may override cells in memory after generation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::WatchTime;
use crate::error::{WatchbillError, WatchbillResult};

/// Literal marker shown for a cell that needs manual assignment.
pub const UNASSIGNED_MARKER: &str = "CLICK TO ASSIGN";

/// Contents of one station/time cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellValue {
    /// Sailor display name (`"{rank} {last_name}"`).
    Assigned(String),
    /// No qualified, available candidate.
    Unassigned,
}

impl CellValue {
    /// Whether a sailor fills this cell.
    pub fn is_assigned(&self) -> bool {
        matches!(self, Self::Assigned(_))
    }

    /// The assigned display name, if any.
    pub fn assignee(&self) -> Option<&str> {
        match self {
            Self::Assigned(name) => Some(name),
            Self::Unassigned => None,
        }
    }

    /// Text to render, substituting `marker` for unassigned cells.
    pub fn display<'a>(&'a self, marker: &'a str) -> &'a str {
        self.assignee().unwrap_or(marker)
    }
}

/// A generated daily watchbill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawWatchbill")]
pub struct Watchbill {
    /// Day the watchbill covers.
    pub date: NaiveDate,
    /// Station names, in display order.
    stations: Vec<String>,
    /// Time blocks, in column order.
    times: Vec<WatchTime>,
    /// `cells[station][time]`.
    cells: Vec<Vec<CellValue>>,
    /// Rendered for unassigned cells.
    unassigned_marker: String,
}

/// Wire form of [`Watchbill`], checked for grid shape on the way in.
#[derive(Deserialize)]
struct RawWatchbill {
    date: NaiveDate,
    stations: Vec<String>,
    times: Vec<WatchTime>,
    cells: Vec<Vec<CellValue>>,
    unassigned_marker: String,
}

impl TryFrom<RawWatchbill> for Watchbill {
    type Error = WatchbillError;

    fn try_from(raw: RawWatchbill) -> WatchbillResult<Self> {
        let well_formed = raw.cells.len() == raw.stations.len()
            && raw.cells.iter().all(|row| row.len() == raw.times.len());
        if !well_formed {
            return Err(WatchbillError::GridShape {
                stations: raw.stations.len(),
                times: raw.times.len(),
            });
        }
        Ok(Self {
            date: raw.date,
            stations: raw.stations,
            times: raw.times,
            cells: raw.cells,
            unassigned_marker: raw.unassigned_marker,
        })
    }
}

impl Watchbill {
    /// Creates a watchbill with every cell unassigned.
    pub fn new(
        date: NaiveDate,
        stations: Vec<String>,
        times: Vec<WatchTime>,
        unassigned_marker: impl Into<String>,
    ) -> Self {
        let cells = vec![vec![CellValue::Unassigned; times.len()]; stations.len()];
        Self {
            date,
            stations,
            times,
            cells,
            unassigned_marker: unassigned_marker.into(),
        }
    }

    /// Station names in display order.
    pub fn stations(&self) -> &[String] {
        &self.stations
    }

    /// Time blocks in column order.
    pub fn times(&self) -> &[WatchTime] {
        &self.times
    }

    /// Marker rendered for unassigned cells.
    pub fn unassigned_marker(&self) -> &str {
        &self.unassigned_marker
    }

    /// Number of cells (`stations × times`).
    pub fn cell_count(&self) -> usize {
        self.stations.len() * self.times.len()
    }

    pub(crate) fn set(&mut self, station_idx: usize, time_idx: usize, value: CellValue) {
        self.cells[station_idx][time_idx] = value;
    }

    fn position(&self, station: &str, time: &WatchTime) -> Option<(usize, usize)> {
        let s = self.stations.iter().position(|n| n == station)?;
        let t = self.times.iter().position(|w| w == time)?;
        Some((s, t))
    }

    /// The cell for a station/time pair.
    pub fn get(&self, station: &str, time: &WatchTime) -> Option<&CellValue> {
        self.position(station, time)
            .map(|(s, t)| &self.cells[s][t])
    }

    /// All cells of one station, in time order.
    pub fn row(&self, station: &str) -> Option<&[CellValue]> {
        let s = self.stations.iter().position(|n| n == station)?;
        Some(&self.cells[s])
    }

    /// Rows in display order.
    pub fn rows(&self) -> impl Iterator<Item = (&str, &[CellValue])> {
        self.stations
            .iter()
            .zip(&self.cells)
            .map(|(name, row)| (name.as_str(), row.as_slice()))
    }

    /// Every `(station, time, cell)` triple, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &WatchTime, &CellValue)> {
        self.rows().flat_map(move |(station, row)| {
            self.times
                .iter()
                .zip(row)
                .map(move |(time, cell)| (station, time, cell))
        })
    }

    /// Replaces a cell with a manually chosen sailor.
    ///
    /// The choice is not checked against qualifications or leave; the
    /// caller is trusted to pick from
    /// [`override_candidates`](crate::engine::override_candidates).
    pub fn override_cell(
        &mut self,
        station: &str,
        time: &WatchTime,
        display_name: impl Into<String>,
    ) -> WatchbillResult<()> {
        let (s, t) = self
            .position(station, time)
            .ok_or_else(|| WatchbillError::UnknownCell {
                station: station.to_string(),
                time: time.label(),
            })?;
        self.cells[s][t] = CellValue::Assigned(display_name.into());
        Ok(())
    }

    /// Clears a cell back to unassigned.
    pub fn clear_cell(&mut self, station: &str, time: &WatchTime) -> WatchbillResult<()> {
        let (s, t) = self
            .position(station, time)
            .ok_or_else(|| WatchbillError::UnknownCell {
                station: station.to_string(),
                time: time.label(),
            })?;
        self.cells[s][t] = CellValue::Unassigned;
        Ok(())
    }

    /// Station/time pairs still needing manual assignment.
    pub fn unassigned_cells(&self) -> Vec<(&str, &WatchTime)> {
        self.iter()
            .filter(|(_, _, cell)| !cell.is_assigned())
            .map(|(station, time, _)| (station, time))
            .collect()
    }

    /// Every station/time pair a sailor (by display name) stands.
    pub fn watches_for(&self, display_name: &str) -> Vec<(&str, &WatchTime)> {
        self.iter()
            .filter(|(_, _, cell)| cell.assignee() == Some(display_name))
            .map(|(station, time, _)| (station, time))
            .collect()
    }

    /// Whether every cell is filled.
    pub fn is_complete(&self) -> bool {
        self.cells.iter().flatten().all(CellValue::is_assigned)
    }
}

impl fmt::Display for Watchbill {
    /// Plain-text table: a `Watch Station` column plus one column per block.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const STATION_HEADING: &str = "Watch Station";

        let labels: Vec<String> = self.times.iter().map(WatchTime::label).collect();

        let station_width = self
            .stations
            .iter()
            .map(|s| s.chars().count())
            .chain(std::iter::once(STATION_HEADING.len()))
            .max()
            .unwrap_or(0);

        let widths: Vec<usize> = labels
            .iter()
            .enumerate()
            .map(|(t, label)| {
                self.cells
                    .iter()
                    .map(|row| row[t].display(&self.unassigned_marker).chars().count())
                    .chain(std::iter::once(label.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        writeln!(f, "Watchbill - {}", self.date.format("%Y-%m-%d"))?;
        write!(f, "{STATION_HEADING:<station_width$}")?;
        for (label, &width) in labels.iter().zip(&widths) {
            write!(f, " | {label:<width$}")?;
        }
        writeln!(f)?;

        for (station, row) in self.rows() {
            write!(f, "{station:<station_width$}")?;
            for (cell, &width) in row.iter().zip(&widths) {
                write!(f, " | {:<width$}", cell.display(&self.unassigned_marker))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
