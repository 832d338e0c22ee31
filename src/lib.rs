//! Daily watchbill generation.
//!
//! Assigns sailors to watch stations across the time blocks of one day,
//! honouring qualifications, leave, and the Officer of the Deck rotation.
//! Cells with no eligible sailor are left for manual assignment rather than
//! failing the run.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Sailor`, `Qualification`, `WatchStation`,
//!   `WatchTime`, `LeaveInterval`, `Watchbill`
//! - **`engine`**: The assignment engine, qualification matching, candidate
//!   selection, and coverage summary
//! - **`store`**: In-memory record store with ordering and JSON snapshots
//! - **`validation`**: Input integrity checks (duplicate keys, bad leave)
//! - **`config`**: Generator settings loaded from TOML
//! - **`error`**: Error types
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use watchbill::config::GeneratorConfig;
//! use watchbill::engine::WatchbillGenerator;
//! use watchbill::store::RecordStore;
//!
//! let mut store = RecordStore::new();
//! store.add_qualification("OOD").unwrap();
//! store.add_sailor("LT", "Smith").unwrap();
//! store.set_sailor_qualifications("Smith", ["OOD"]).unwrap();
//! store.add_station("OOD").unwrap();
//! store.add_time("08:00", "12:00").unwrap();
//!
//! let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
//! let mut generator = WatchbillGenerator::new(GeneratorConfig::default());
//! let watchbill = generator.generate(&store.request_for(date)).unwrap();
//! assert!(watchbill.is_complete());
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod store;
pub mod validation;

pub use config::GeneratorConfig;
pub use engine::{generate, WatchbillGenerator, WatchbillRequest};
pub use error::{ConfigError, StoreError, WatchbillError};
pub use models::{CellValue, Watchbill, UNASSIGNED_MARKER};
