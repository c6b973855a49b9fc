//! Spatial de-duplication of scanner hits.
//!
//! Adjacent columns crossing the same mark produce a burst of nearly
//! identical candidates. The first hit wins; any later hit within
//! `min_separation` of an accepted one is dropped. Nothing is revisited
//! after insertion.

use tracing::{debug, trace};

use crate::models::FinderCandidate;

/// Outcome of offering a candidate to a [`FinderSet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Offer {
    /// Stored as a new mark
    Accepted,
    /// Too close to an already-accepted mark
    Duplicate,
    /// The set had already reached its cap
    Full,
}

/// Accepted finder locations, pairwise at least `min_separation` apart and
/// never more than `capacity` of them.
#[derive(Debug, Clone)]
pub struct FinderSet {
    accepted: Vec<FinderCandidate>,
    min_separation: f64,
    capacity: usize,
}

impl FinderSet {
    /// Empty set
    pub fn new(min_separation: f64, capacity: usize) -> Self {
        Self {
            accepted: Vec::with_capacity(capacity),
            min_separation,
            capacity,
        }
    }

    /// Offer one candidate
    pub fn offer(&mut self, candidate: FinderCandidate) -> Offer {
        if self.is_full() {
            return Offer::Full;
        }
        if self
            .accepted
            .iter()
            .any(|p| p.distance(&candidate) < self.min_separation)
        {
            trace!(x = candidate.x, y = candidate.y, "duplicate finder pattern");
            return Offer::Duplicate;
        }
        debug!(x = candidate.x, y = candidate.y, "accepted finder pattern");
        self.accepted.push(candidate);
        Offer::Accepted
    }

    /// Pull candidates until the source runs dry or the set is full.
    /// Returns how many candidates were pulled.
    pub fn fill_from<I>(&mut self, candidates: I) -> usize
    where
        I: IntoIterator<Item = FinderCandidate>,
    {
        let mut pulled = 0usize;
        if self.is_full() {
            return pulled;
        }
        for candidate in candidates {
            pulled += 1;
            self.offer(candidate);
            if self.is_full() {
                break;
            }
        }
        pulled
    }

    /// The cap has been reached
    pub fn is_full(&self) -> bool {
        self.accepted.len() >= self.capacity
    }

    /// Number of accepted marks
    pub fn len(&self) -> usize {
        self.accepted.len()
    }

    /// No marks accepted
    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty()
    }

    /// Accepted marks in insertion order
    pub fn as_slice(&self) -> &[FinderCandidate] {
        &self.accepted
    }

    /// Consume the set
    pub fn into_vec(self) -> Vec<FinderCandidate> {
        self.accepted
    }
}

impl Default for FinderSet {
    fn default() -> Self {
        Self::new(crate::MIN_SEPARATION, crate::MAX_FINDERS)
    }
}
