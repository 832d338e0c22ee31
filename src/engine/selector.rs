//! Candidate selection.
//!
//! The engine hands each non-empty candidate pool to a [`CandidateSelector`].
//! Production runs pick uniformly at random so repeated generation spreads
//! watches around; tests can seed the RNG or plug in a fixed policy.

use rand::prelude::IndexedRandom;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fmt::Debug;

use crate::models::Sailor;

/// Picks one sailor from a pool of qualified, available candidates.
pub trait CandidateSelector: Debug {
    /// Chooses from `candidates` for `station`.
    ///
    /// `candidates` is never empty when called by the engine. Returning
    /// `None` leaves the cell(s) unassigned.
    fn select<'a>(&mut self, station: &str, candidates: &[&'a Sailor]) -> Option<&'a Sailor>;
}

impl<S: CandidateSelector + ?Sized> CandidateSelector for &mut S {
    fn select<'a>(&mut self, station: &str, candidates: &[&'a Sailor]) -> Option<&'a Sailor> {
        (**self).select(station, candidates)
    }
}

/// Uniform random choice.
#[derive(Debug, Clone)]
pub struct RandomSelector<R> {
    rng: R,
}

impl<R: Rng> RandomSelector<R> {
    /// Wraps an RNG.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomSelector<SmallRng> {
    /// Reproducible selector: same seed, same choices.
    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }

    /// Selector seeded from the thread-local generator.
    pub fn from_entropy() -> Self {
        Self::new(SmallRng::from_rng(&mut rand::rng()))
    }
}

impl<R: Rng + Debug> CandidateSelector for RandomSelector<R> {
    fn select<'a>(&mut self, _station: &str, candidates: &[&'a Sailor]) -> Option<&'a Sailor> {
        candidates.choose(&mut self.rng).copied()
    }
}

/// Always takes the first candidate in roster order.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstCandidate;

impl CandidateSelector for FirstCandidate {
    fn select<'a>(&mut self, _station: &str, candidates: &[&'a Sailor]) -> Option<&'a Sailor> {
        candidates.first().copied()
    }
}
