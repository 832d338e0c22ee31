//! Watchbill generator.
//!
//! # Algorithm
//!
//! 1. Fail with `MissingConfiguration` if there are no stations or no times.
//! 2. Drop sailors with a leave interval containing the date.
//! 3. Walk stations by ascending `display_order` (ties keep input order).
//!    For each, collect the sailors qualified for the station name, then:
//!    - **OOD**: per time block, choose from qualified sailors not yet OOD
//!      today; record the choice.
//!    - **Internal Rover**: per time block, choose from all qualified sailors.
//!    - **Standard**: choose once from qualified sailors not yet OOD, and
//!      put that sailor in every block.
//! 4. An empty pool leaves the cell(s) unassigned.
//!
//! The OOD set lives on the stack of a single run. A standard station only
//! excludes sailors already chosen as OOD by stations walked earlier.
//!
//! # Complexity
//! O(s * t * n) where s=stations, t=time blocks, n=sailors.

use std::collections::HashSet;
use std::fmt::Debug;

use chrono::NaiveDate;
use log::{debug, info, warn};
use rand::rngs::SmallRng;
use rand::Rng;

use super::selector::{CandidateSelector, RandomSelector};
use crate::config::GeneratorConfig;
use crate::error::{WatchbillError, WatchbillResult};
use crate::models::{
    CellValue, LeaveIndex, LeaveInterval, Sailor, StationRole, WatchStation, WatchTime, Watchbill,
};

/// Everything needed to generate one day's watchbill.
#[derive(Debug, Clone)]
pub struct WatchbillRequest {
    /// Day to generate for.
    pub date: NaiveDate,
    /// Stations to man.
    pub stations: Vec<WatchStation>,
    /// Time blocks, in column order.
    pub times: Vec<WatchTime>,
    /// Full roster.
    pub sailors: Vec<Sailor>,
    /// All known leave.
    pub leaves: Vec<LeaveInterval>,
}

impl WatchbillRequest {
    /// Creates an empty request for a date.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            stations: Vec::new(),
            times: Vec::new(),
            sailors: Vec::new(),
            leaves: Vec::new(),
        }
    }

    /// Sets the stations.
    pub fn with_stations(mut self, stations: Vec<WatchStation>) -> Self {
        self.stations = stations;
        self
    }

    /// Sets the time blocks.
    pub fn with_times(mut self, times: Vec<WatchTime>) -> Self {
        self.times = times;
        self
    }

    /// Sets the roster.
    pub fn with_sailors(mut self, sailors: Vec<Sailor>) -> Self {
        self.sailors = sailors;
        self
    }

    /// Sets the leave list.
    pub fn with_leaves(mut self, leaves: Vec<LeaveInterval>) -> Self {
        self.leaves = leaves;
        self
    }
}

/// Assigns sailors to every station/time cell of a day.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use watchbill::config::GeneratorConfig;
/// use watchbill::engine::{WatchbillGenerator, WatchbillRequest};
/// use watchbill::models::{CellValue, Sailor, WatchStation, WatchTime};
///
/// let request = WatchbillRequest::new(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())
///     .with_stations(WatchStation::ordered(["OOD", "Helm1"]))
///     .with_times(vec![WatchTime::new("08:00", "12:00"), WatchTime::new("12:00", "16:00")])
///     .with_sailors(vec![
///         Sailor::new("LT", "Smith").with_qualification("OOD"),
///         Sailor::new("PO2", "Jones").with_qualification("Helm"),
///     ]);
///
/// let mut generator = WatchbillGenerator::new(GeneratorConfig::default().with_seed(1));
/// let watchbill = generator.generate(&request).unwrap();
///
/// let afternoon = WatchTime::new("12:00", "16:00");
/// assert_eq!(watchbill.get("OOD", &afternoon), Some(&CellValue::Unassigned));
/// assert_eq!(
///     watchbill.get("Helm1", &afternoon),
///     Some(&CellValue::Assigned("PO2 Jones".into()))
/// );
/// ```
#[derive(Debug, Clone)]
pub struct WatchbillGenerator<S = RandomSelector<SmallRng>> {
    config: GeneratorConfig,
    selector: S,
}

impl WatchbillGenerator {
    /// Creates a generator choosing at random.
    ///
    /// Uses `config.seed` when set, otherwise fresh entropy.
    pub fn new(config: GeneratorConfig) -> Self {
        let selector = match config.seed {
            Some(seed) => RandomSelector::seeded(seed),
            None => RandomSelector::from_entropy(),
        };
        Self { config, selector }
    }
}

impl Default for WatchbillGenerator {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

impl<S: CandidateSelector> WatchbillGenerator<S> {
    /// Creates a generator with a custom selection policy.
    pub fn with_selector(config: GeneratorConfig, selector: S) -> Self {
        Self { config, selector }
    }

    /// The active configuration.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates the watchbill described by `request`.
    pub fn generate(&mut self, request: &WatchbillRequest) -> WatchbillResult<Watchbill> {
        self.generate_for(
            request.date,
            &request.stations,
            &request.times,
            &request.sailors,
            &request.leaves,
        )
    }

    /// Generates a watchbill from borrowed inputs.
    ///
    /// # Errors
    /// `MissingConfiguration` if `stations` or `times` is empty. No other
    /// input causes an error; cells without candidates are unassigned.
    pub fn generate_for(
        &mut self,
        date: NaiveDate,
        stations: &[WatchStation],
        times: &[WatchTime],
        sailors: &[Sailor],
        leaves: &[LeaveInterval],
    ) -> WatchbillResult<Watchbill> {
        if stations.is_empty() || times.is_empty() {
            return Err(WatchbillError::MissingConfiguration {
                stations: stations.len(),
                times: times.len(),
            });
        }

        let leave_index = LeaveIndex::new(leaves);
        let available: Vec<&Sailor> = sailors
            .iter()
            .filter(|s| !leave_index.is_on_leave(&s.last_name, date))
            .collect();
        debug!(
            "{date}: {} of {} sailors available",
            available.len(),
            sailors.len()
        );

        let mut ordered: Vec<&WatchStation> = stations.iter().collect();
        ordered.sort_by_key(|s| s.display_order);

        let mut watchbill = Watchbill::new(
            date,
            ordered.iter().map(|s| s.name.clone()).collect(),
            times.to_vec(),
            self.config.unassigned_marker.clone(),
        );

        // Sailors already chosen as OOD in this run.
        let mut assigned_ood: HashSet<&str> = HashSet::new();

        for (s_idx, station) in ordered.iter().enumerate() {
            let name = station.name.as_str();
            let qualified: Vec<&Sailor> = available
                .iter()
                .copied()
                .filter(|s| s.is_qualified_for(name))
                .collect();

            match self.config.role_of(name) {
                StationRole::OfficerOfTheDeck => {
                    for (t_idx, time) in times.iter().enumerate() {
                        let pool: Vec<&Sailor> = qualified
                            .iter()
                            .copied()
                            .filter(|s| !assigned_ood.contains(s.last_name.as_str()))
                            .collect();
                        if let Some(sailor) = self.choose(name, &pool) {
                            assigned_ood.insert(sailor.last_name.as_str());
                            debug!("{name} {time}: {}", sailor.display_name());
                            watchbill.set(s_idx, t_idx, CellValue::Assigned(sailor.display_name()));
                        } else {
                            warn!("{name} {time}: no OOD candidate left, needs manual assignment");
                        }
                    }
                }
                StationRole::InternalRover => {
                    for (t_idx, time) in times.iter().enumerate() {
                        if let Some(sailor) = self.choose(name, &qualified) {
                            debug!("{name} {time}: {}", sailor.display_name());
                            watchbill.set(s_idx, t_idx, CellValue::Assigned(sailor.display_name()));
                        } else {
                            warn!("{name} {time}: no qualified sailor, needs manual assignment");
                        }
                    }
                }
                StationRole::Standard => {
                    let pool: Vec<&Sailor> = qualified
                        .iter()
                        .copied()
                        .filter(|s| !assigned_ood.contains(s.last_name.as_str()))
                        .collect();
                    if let Some(sailor) = self.choose(name, &pool) {
                        let display = sailor.display_name();
                        debug!("{name}: {display} for all {} blocks", times.len());
                        for t_idx in 0..times.len() {
                            watchbill.set(s_idx, t_idx, CellValue::Assigned(display.clone()));
                        }
                    } else {
                        warn!("{name}: no qualified sailor, needs manual assignment");
                    }
                }
            }
        }

        info!(
            "generated watchbill for {date}: {} cells, {} unassigned",
            watchbill.cell_count(),
            watchbill.unassigned_cells().len()
        );
        Ok(watchbill)
    }

    fn choose<'a>(&mut self, station: &str, pool: &[&'a Sailor]) -> Option<&'a Sailor> {
        if pool.is_empty() {
            None
        } else {
            self.selector.select(station, pool)
        }
    }
}

/// Generates a watchbill with default role names and a caller-supplied RNG.
pub fn generate<R: Rng + Debug>(
    date: NaiveDate,
    stations: &[WatchStation],
    times: &[WatchTime],
    sailors: &[Sailor],
    leaves: &[LeaveInterval],
    rng: &mut R,
) -> WatchbillResult<Watchbill> {
    WatchbillGenerator::with_selector(GeneratorConfig::default(), RandomSelector::new(rng))
        .generate_for(date, stations, times, sailors, leaves)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::FirstCandidate;
    use rand::SeedableRng;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    fn two_blocks() -> Vec<WatchTime> {
        vec![
            WatchTime::new("08:00", "12:00"),
            WatchTime::new("12:00", "16:00"),
        ]
    }

    fn smith_and_jones() -> Vec<Sailor> {
        vec![
            Sailor::new("LT", "Smith").with_qualification("OOD"),
            Sailor::new("PO2", "Jones").with_qualification("Helm"),
        ]
    }

    fn seeded() -> WatchbillGenerator {
        WatchbillGenerator::new(GeneratorConfig::default().with_seed(42))
    }

    /// Always picks the last candidate.
    #[derive(Debug)]
    struct LastCandidate;

    impl CandidateSelector for LastCandidate {
        fn select<'a>(&mut self, _station: &str, candidates: &[&'a Sailor]) -> Option<&'a Sailor> {
            candidates.last().copied()
        }
    }

    #[test]
    fn test_ood_and_numbered_station() {
        let stations = WatchStation::ordered(["OOD", "Helm1"]);
        let times = two_blocks();
        let wb = seeded()
            .generate_for(date(), &stations, &times, &smith_and_jones(), &[])
            .unwrap();

        assert_eq!(
            wb.get("OOD", &times[0]),
            Some(&CellValue::Assigned("LT Smith".into()))
        );
        assert_eq!(wb.get("OOD", &times[1]), Some(&CellValue::Unassigned));
        for t in &times {
            assert_eq!(
                wb.get("Helm1", t),
                Some(&CellValue::Assigned("PO2 Jones".into()))
            );
        }
    }

    #[test]
    fn test_standard_station_sailor_on_leave() {
        let stations = WatchStation::ordered(["OOD", "Helm1"]);
        let times = two_blocks();
        let leaves = vec![LeaveInterval::new(
            "Jones",
            NaiveDate::from_ymd_opt(2024, 4, 28).unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        )];
        let wb = seeded()
            .generate_for(date(), &stations, &times, &smith_and_jones(), &leaves)
            .unwrap();

        assert_eq!(wb.row("Helm1").unwrap(), &[CellValue::Unassigned, CellValue::Unassigned]);
    }

    #[test]
    fn test_missing_stations() {
        let err = seeded()
            .generate_for(date(), &[], &two_blocks(), &smith_and_jones(), &[])
            .unwrap_err();
        assert_eq!(err, WatchbillError::MissingConfiguration { stations: 0, times: 2 });
    }

    #[test]
    fn test_missing_times() {
        let stations = WatchStation::ordered(["OOD"]);
        let err = seeded()
            .generate_for(date(), &stations, &[], &smith_and_jones(), &[])
            .unwrap_err();
        assert!(matches!(err, WatchbillError::MissingConfiguration { .. }));
    }

    #[test]
    fn test_no_sailors_all_unassigned() {
        let stations = WatchStation::ordered(["OOD", "Internal Rover", "Lookout"]);
        let wb = seeded()
            .generate_for(date(), &stations, &two_blocks(), &[], &[])
            .unwrap();
        assert_eq!(wb.cell_count(), 6);
        assert_eq!(wb.unassigned_cells().len(), 6);
    }

    #[test]
    fn test_ood_rotation_no_repeats() {
        let sailors: Vec<Sailor> = ["Able", "Baker", "Charlie"]
            .iter()
            .map(|n| Sailor::new("LT", *n).with_qualification("OOD"))
            .collect();
        let times = vec![
            WatchTime::new("00:00", "04:00"),
            WatchTime::new("04:00", "08:00"),
            WatchTime::new("08:00", "12:00"),
            WatchTime::new("12:00", "16:00"),
        ];
        let stations = WatchStation::ordered(["OOD"]);

        for seed in 0..20 {
            let mut generator = WatchbillGenerator::new(GeneratorConfig::default().with_seed(seed));
            let wb = generator.generate_for(date(), &stations, &times, &sailors, &[]).unwrap();
            let row = wb.row("OOD").unwrap();
            let assigned: Vec<&str> = row.iter().filter_map(CellValue::assignee).collect();
            let distinct: HashSet<&str> = assigned.iter().copied().collect();
            assert_eq!(assigned.len(), 3);
            assert_eq!(distinct.len(), 3);
            assert_eq!(row[3], CellValue::Unassigned);
        }
    }

    #[test]
    fn test_rover_reuse_allowed() {
        // Single rover-qualified sailor fills every block.
        let sailors = vec![Sailor::new("SN", "Doe").with_qualification("Internal Rover")];
        let stations = WatchStation::ordered(["Internal Rover"]);
        let times = two_blocks();
        let wb = seeded()
            .generate_for(date(), &stations, &times, &sailors, &[])
            .unwrap();
        assert!(wb.is_complete());
        assert_eq!(wb.watches_for("SN Doe").len(), 2);
    }

    #[test]
    fn test_rover_ignores_ood_exclusion() {
        let sailors = vec![Sailor::new("LT", "Smith").with_qualifications(["OOD", "Internal Rover"])];
        let stations = WatchStation::ordered(["OOD", "Internal Rover"]);
        let times = two_blocks();
        let wb = seeded()
            .generate_for(date(), &stations, &times, &sailors, &[])
            .unwrap();

        assert_eq!(wb.row("Internal Rover").unwrap().iter().filter(|c| c.is_assigned()).count(), 2);
    }

    #[test]
    fn test_standard_station_excludes_ood() {
        let sailors = vec![Sailor::new("LT", "Smith").with_qualifications(["OOD", "Lookout"])];
        let stations = WatchStation::ordered(["OOD", "Lookout"]);
        let wb = seeded()
            .generate_for(date(), &stations, &two_blocks(), &sailors, &[])
            .unwrap();

        assert!(wb.row("Lookout").unwrap().iter().all(|c| !c.is_assigned()));
    }

    #[test]
    fn test_standard_before_ood_not_excluded() {
        // Lookout is walked first, so Smith is not yet OOD when it is filled.
        let sailors = vec![Sailor::new("LT", "Smith").with_qualifications(["OOD", "Lookout"])];
        let stations = vec![WatchStation::new("OOD", 5), WatchStation::new("Lookout", 1)];
        let wb = seeded()
            .generate_for(date(), &stations, &two_blocks(), &sailors, &[])
            .unwrap();

        assert_eq!(wb.stations(), &["Lookout".to_string(), "OOD".to_string()]);
        assert!(wb.row("Lookout").unwrap().iter().all(CellValue::is_assigned));
        assert!(wb.row("OOD").unwrap()[0].is_assigned());
    }

    #[test]
    fn test_stations_sorted_by_display_order() {
        let stations = vec![
            WatchStation::new("Lookout", 2),
            WatchStation::new("OOD", 0),
            WatchStation::new("Helm1", 1),
            WatchStation::new("Messenger", 1),
        ];
        let wb = seeded()
            .generate_for(date(), &stations, &two_blocks(), &[], &[])
            .unwrap();
        assert_eq!(wb.stations(), &["OOD", "Helm1", "Messenger", "Lookout"]);
    }

    #[test]
    fn test_times_keep_input_order() {
        let times = vec![
            WatchTime::new("16:00", "20:00"),
            WatchTime::new("08:00", "12:00"),
        ];
        let stations = WatchStation::ordered(["OOD"]);
        let wb = seeded()
            .generate_for(date(), &stations, &times, &[], &[])
            .unwrap();
        assert_eq!(wb.times(), times.as_slice());
    }

    #[test]
    fn test_custom_selector() {
        let sailors = vec![
            Sailor::new("PO2", "Jones").with_qualification("Helm"),
            Sailor::new("PO3", "Brown").with_qualification("Helm"),
        ];
        let stations = WatchStation::ordered(["Helm1"]);
        let times = two_blocks();

        let mut first = WatchbillGenerator::with_selector(GeneratorConfig::default(), FirstCandidate);
        let wb = first.generate_for(date(), &stations, &times, &sailors, &[]).unwrap();
        assert_eq!(wb.watches_for("PO2 Jones").len(), 2);

        let mut last = WatchbillGenerator::with_selector(GeneratorConfig::default(), LastCandidate);
        let wb = last.generate_for(date(), &stations, &times, &sailors, &[]).unwrap();
        assert_eq!(wb.watches_for("PO3 Brown").len(), 2);
    }

    #[test]
    fn test_selector_declines() {
        #[derive(Debug)]
        struct Never;
        impl CandidateSelector for Never {
            fn select<'a>(&mut self, _: &str, _: &[&'a Sailor]) -> Option<&'a Sailor> {
                None
            }
        }

        let stations = WatchStation::ordered(["OOD", "Helm1"]);
        let mut generator = WatchbillGenerator::with_selector(GeneratorConfig::default(), Never);
        let wb = generator
            .generate_for(date(), &stations, &two_blocks(), &smith_and_jones(), &[])
            .unwrap();
        assert_eq!(wb.unassigned_cells().len(), 4);
    }

    #[test]
    fn test_custom_role_names() {
        let config = GeneratorConfig::default()
            .with_ood_station("Duty Officer")
            .with_rover_station("Roving Patrol")
            .with_seed(3);
        let sailors = vec![
            Sailor::new("LT", "Smith").with_qualification("Duty Officer"),
            Sailor::new("SN", "Doe").with_qualification("Roving Patrol"),
        ];
        let stations = WatchStation::ordered(["Duty Officer", "Roving Patrol"]);
        let times = two_blocks();
        let wb = WatchbillGenerator::new(config)
            .generate_for(date(), &stations, &times, &sailors, &[])
            .unwrap();

        assert_eq!(wb.row("Duty Officer").unwrap()[1], CellValue::Unassigned);
        assert!(wb.row("Roving Patrol").unwrap().iter().all(CellValue::is_assigned));
    }

    #[test]
    fn test_same_seed_same_watchbill() {
        let sailors: Vec<Sailor> = (0..10)
            .map(|i| Sailor::new("SN", format!("S{i}")).with_qualifications(["OOD", "Helm", "Lookout"]))
            .collect();
        let request = WatchbillRequest::new(date())
            .with_stations(WatchStation::ordered(["OOD", "Helm1", "Helm2", "Lookout"]))
            .with_times(two_blocks())
            .with_sailors(sailors);

        let a = WatchbillGenerator::new(GeneratorConfig::default().with_seed(9))
            .generate(&request)
            .unwrap();
        let b = WatchbillGenerator::new(GeneratorConfig::default().with_seed(9))
            .generate(&request)
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_runs_are_independent() {
        // A second run on the same generator starts with an empty OOD set.
        let stations = WatchStation::ordered(["OOD"]);
        let times = vec![WatchTime::new("08:00", "12:00")];
        let sailors = vec![Sailor::new("LT", "Smith").with_qualification("OOD")];
        let mut generator = seeded();

        for _ in 0..3 {
            let wb = generator.generate_for(date(), &stations, &times, &sailors, &[]).unwrap();
            assert!(wb.is_complete());
        }
    }

    #[test]
    fn test_free_function_with_rng() {
        let mut rng = SmallRng::seed_from_u64(5);
        let stations = WatchStation::ordered(["OOD", "Helm1"]);
        let wb = generate(date(), &stations, &two_blocks(), &smith_and_jones(), &[], &mut rng)
            .unwrap();
        assert_eq!(wb.cell_count(), 4);
        assert_eq!(wb.unassigned_cells().len(), 1);
    }

    #[test]
    fn test_inverted_leave_is_ignored() {
        let leaves = vec![LeaveInterval::new(
            "Jones",
            NaiveDate::from_ymd_opt(2024, 5, 3).unwrap(),
            NaiveDate::from_ymd_opt(2024, 4, 28).unwrap(),
        )];
        let stations = WatchStation::ordered(["Helm1"]);
        let wb = seeded()
            .generate_for(date(), &stations, &two_blocks(), &smith_and_jones(), &leaves)
            .unwrap();
        assert!(wb.is_complete());
    }

    #[test]
    fn test_custom_unassigned_marker() {
        let config = GeneratorConfig::default().with_unassigned_marker("TBD").with_seed(1);
        let stations = WatchStation::ordered(["Lookout"]);
        let wb = WatchbillGenerator::new(config)
            .generate_for(date(), &stations, &two_blocks(), &[], &[])
            .unwrap();
        assert_eq!(wb.unassigned_marker(), "TBD");
        assert!(wb.to_string().contains("TBD"));
    }
}
