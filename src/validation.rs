//! Input validation for watchbill generation.
//!
//! Checks roster and catalog integrity before generating. Detects:
//! - Duplicate sailor last names, qualification names, station names,
//!   and watch-time pairs
//! - Leave for sailors not on the roster
//! - Leave whose end date precedes its start date
//! - Sailors holding qualifications missing from the catalog
//! - Stations no catalog qualification can ever cover
//!
//! The engine does not run these checks itself; an inverted leave interval
//! simply never matches there.

use crate::engine::matches_qualification;
use crate::models::{LeaveInterval, Qualification, Sailor, WatchStation, WatchTime};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same key.
    DuplicateId,
    /// A leave record names a sailor who is not on the roster.
    UnknownSailor,
    /// A leave record ends before it starts.
    InvertedLeave,
    /// A sailor holds a qualification that is not in the catalog.
    UnknownQualification,
    /// No catalog qualification matches the station name.
    UncoveredStation,
}

/// Roster and catalogs to validate together.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationInput<'a> {
    pub sailors: &'a [Sailor],
    pub qualifications: &'a [Qualification],
    pub stations: &'a [WatchStation],
    pub times: &'a [WatchTime],
    pub leaves: &'a [LeaveInterval],
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the inputs of a watchbill run.
///
/// Checks:
/// 1. No duplicate sailor last names
/// 2. No duplicate qualification names
/// 3. No duplicate station names
/// 4. No duplicate watch-time pairs
/// 5. Every leave record references a known sailor
/// 6. No leave record ends before it starts
/// 7. Every sailor qualification exists in the catalog
/// 8. Every station is matched by at least one catalog qualification
///
/// Checks 7 and 8 are skipped when the qualification catalog is empty.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(input: ValidationInput<'_>) -> ValidationResult {
    let mut errors = Vec::new();

    let mut sailor_names = HashSet::new();
    for s in input.sailors {
        if !sailor_names.insert(s.last_name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate sailor last name: {}", s.last_name),
            ));
        }
    }

    let mut qual_names = HashSet::new();
    for q in input.qualifications {
        if !qual_names.insert(q.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate qualification: {}", q.name),
            ));
        }
    }

    let mut station_names = HashSet::new();
    for st in input.stations {
        if !station_names.insert(st.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate watch station: {}", st.name),
            ));
        }
    }

    let mut time_pairs = HashSet::new();
    for t in input.times {
        if !time_pairs.insert(t) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate watch time: {t}"),
            ));
        }
    }

    for leave in input.leaves {
        if !sailor_names.contains(leave.sailor.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownSailor,
                format!("Leave references unknown sailor '{}'", leave.sailor),
            ));
        }
        if leave.is_inverted() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvertedLeave,
                format!(
                    "Leave for '{}' ends ({}) before it starts ({})",
                    leave.sailor, leave.end_date, leave.start_date
                ),
            ));
        }
    }

    if !qual_names.is_empty() {
        for s in input.sailors {
            for q in &s.qualifications {
                if !qual_names.contains(q.as_str()) {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::UnknownQualification,
                        format!("Sailor '{}' holds unknown qualification '{q}'", s.last_name),
                    ));
                }
            }
        }

        for st in input.stations {
            if !qual_names
                .iter()
                .any(|q| matches_qualification(&st.name, q))
            {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UncoveredStation,
                    format!("No qualification covers station '{}'", st.name),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
