//! Watchbill domain models.
//!
//! Inputs read by the engine (sailors, catalogs, leave) and the generated
//! watchbill grid.
//!
//! # Domain Mappings
//!
//! | watchbill | General scheduling |
//! |-----------|--------------------|
//! | Sailor | Human resource |
//! | Qualification | Skill |
//! | WatchStation | Post / position |
//! | WatchTime | Shift |
//! | LeaveInterval | Blocked period |
//! | Watchbill | Roster |

mod catalog;
mod leave;
mod sailor;
mod watchbill;

pub use catalog::{Qualification, StationRole, WatchStation, WatchTime};
pub use leave::{LeaveIndex, LeaveInterval};
pub use sailor::Sailor;
pub use watchbill::{CellValue, Watchbill, UNASSIGNED_MARKER};
