//! Assignment engine.
//!
//! Turns a roster, the station and time catalogs, and leave into a
//! [`Watchbill`](crate::models::Watchbill) for one date.
//!
//! # Rules
//!
//! - A sailor fills a station only if a qualification matches the station
//!   name exactly or as a prefix followed by digits ([`is_qualified`]).
//! - Sailors on leave that day are never chosen.
//! - The OOD never repeats within a day; the Internal Rover may; every other
//!   station gets one sailor for the whole day.
//! - Ties are broken by a [`CandidateSelector`], uniformly at random by default.
//!
//! # Usage
//!
//! ```
//! use chrono::NaiveDate;
//! use rand::SeedableRng;
//! use rand::rngs::SmallRng;
//! use watchbill::engine::generate;
//! use watchbill::models::{Sailor, WatchStation, WatchTime};
//!
//! let mut rng = SmallRng::seed_from_u64(0);
//! let watchbill = generate(
//!     NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
//!     &WatchStation::ordered(["Lookout"]),
//!     &[WatchTime::new("00:00", "04:00")],
//!     &[Sailor::new("SN", "Doe").with_qualification("Lookout")],
//!     &[],
//!     &mut rng,
//! )
//! .unwrap();
//! assert!(watchbill.is_complete());
//! ```

mod generator;
mod matching;
mod selector;
mod summary;

pub use generator::{generate, WatchbillGenerator, WatchbillRequest};
pub use matching::{is_qualified, matches_qualification, override_candidates};
pub use selector::{CandidateSelector, FirstCandidate, RandomSelector};
pub use summary::WatchbillSummary;
