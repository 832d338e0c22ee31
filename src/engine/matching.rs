//! Qualification-to-station matching.
//!
//! A qualification matches a station when the names are equal, or when the
//! station name is the qualification name followed by one or more ASCII
//! digits. "Helm" therefore covers "Helm", "Helm1", "Helm12", but not
//! "Helmsman" or "Helm 1". Matching is case-sensitive.

use crate::models::Sailor;

/// Whether a single qualification name matches a station name.
pub fn matches_qualification(station: &str, qualification: &str) -> bool {
    if qualification.is_empty() {
        return false;
    }
    if station == qualification {
        return true;
    }
    match station.strip_prefix(qualification) {
        Some(suffix) => !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}

/// Whether any of `qualifications` matches `station`.
pub fn is_qualified<I>(station: &str, qualifications: I) -> bool
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    qualifications
        .into_iter()
        .any(|q| matches_qualification(station, q.as_ref()))
}

/// Sailors offered when an operator overrides a cell by hand.
///
/// Every sailor qualified for the station, in roster order. Leave is not
/// applied here; the operator may knowingly pick someone listed as away.
pub fn override_candidates<'a>(station: &str, sailors: &'a [Sailor]) -> Vec<&'a Sailor> {
    sailors
        .iter()
        .filter(|s| s.is_qualified_for(station))
        .collect()
}
