//! Watchbill coverage metrics.
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Filled cells | Cells with an assigned sailor |
//! | Unassigned cells | Cells needing manual assignment |
//! | Fill rate | filled / total |
//! | Watches per sailor | Cells held by each display name |

use std::collections::HashMap;

use crate::models::Watchbill;

/// Coverage of a generated (or hand-edited) watchbill.
#[derive(Debug, Clone)]
pub struct WatchbillSummary {
    /// `stations × times`.
    pub total_cells: usize,
    /// Cells with a sailor.
    pub filled_cells: usize,
    /// Cells still showing the unassigned marker.
    pub unassigned_cells: usize,
    /// filled / total (0.0..1.0). 0.0 for an empty watchbill.
    pub fill_rate: f64,
    /// Cells held per sailor display name.
    pub watches_by_sailor: HashMap<String, usize>,
    /// Stations with no sailor in any block.
    pub empty_stations: Vec<String>,
}

impl WatchbillSummary {
    /// Computes coverage metrics.
    pub fn calculate(watchbill: &Watchbill) -> Self {
        let total_cells = watchbill.cell_count();
        let mut filled_cells = 0;
        let mut watches_by_sailor: HashMap<String, usize> = HashMap::new();

        for (_, _, cell) in watchbill.iter() {
            if let Some(name) = cell.assignee() {
                filled_cells += 1;
                *watches_by_sailor.entry(name.to_string()).or_insert(0) += 1;
            }
        }

        let empty_stations = watchbill
            .rows()
            .filter(|(_, row)| row.iter().all(|c| !c.is_assigned()))
            .map(|(station, _)| station.to_string())
            .collect();

        let fill_rate = if total_cells > 0 {
            filled_cells as f64 / total_cells as f64
        } else {
            0.0
        };

        Self {
            total_cells,
            filled_cells,
            unassigned_cells: total_cells - filled_cells,
            fill_rate,
            watches_by_sailor,
            empty_stations,
        }
    }

    /// Number of distinct sailors on the watchbill.
    pub fn sailors_on_watch(&self) -> usize {
        self.watches_by_sailor.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{WatchTime, UNASSIGNED_MARKER};
    use chrono::NaiveDate;

    fn sample() -> Watchbill {
        let times = vec![WatchTime::new("08:00", "12:00"), WatchTime::new("12:00", "16:00")];
        let mut wb = Watchbill::new(
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            vec!["OOD".into(), "Helm1".into(), "Lookout".into()],
            times.clone(),
            UNASSIGNED_MARKER,
        );
        wb.override_cell("OOD", &times[0], "LT Smith").unwrap();
        wb.override_cell("Helm1", &times[0], "PO2 Jones").unwrap();
        wb.override_cell("Helm1", &times[1], "PO2 Jones").unwrap();
        wb
    }

    #[test]
    fn test_summary() {
        let s = WatchbillSummary::calculate(&sample());
        assert_eq!(s.total_cells, 6);
        assert_eq!(s.filled_cells, 3);
        assert_eq!(s.unassigned_cells, 3);
        assert!((s.fill_rate - 0.5).abs() < 1e-10);
        assert_eq!(s.sailors_on_watch(), 2);
        assert_eq!(s.watches_by_sailor["PO2 Jones"], 2);
        assert_eq!(s.empty_stations, vec!["Lookout".to_string()]);
    }

    #[test]
    fn test_summary_empty_grid() {
        let wb = Watchbill::new(
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            Vec::new(),
            Vec::new(),
            UNASSIGNED_MARKER,
        );
        let s = WatchbillSummary::calculate(&wb);
        assert_eq!(s.total_cells, 0);
        assert_eq!(s.fill_rate, 0.0);
        assert!(s.empty_stations.is_empty());
    }
}
