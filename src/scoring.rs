//! Bounded per-destination scores.
//!
//! Destination `d` is track `d`, and particles of kind `d` belong there.

use heapless::Vec;

use crate::particle::KindId;
use crate::topology::TrackId;

/// Most destinations (and particle kinds) a configuration may declare.
pub const MAX_KINDS: usize = 8;

/// Effect of one arrival on the scoreboard.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub enum ScoreChange {
    /// Right kind, destination below max.
    Increment,
    /// Wrong kind, destination above zero.
    Decrement,
    /// Saturated, empty, or not a destination.
    Unchanged,
}

/// Score counters, one per destination, each in `0..=max`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Scoreboard {
    scores: Vec<u8, MAX_KINDS>,
    max: u8,
}

impl Scoreboard {
    /// All `destinations` counters at zero. Counts past [`MAX_KINDS`] are
    /// truncated; configuration validation rejects them first.
    #[must_use]
    pub fn new(destinations: usize, max: u8) -> Self {
        let mut scores = Vec::new();
        for _ in 0..destinations.min(MAX_KINDS) {
            // Cannot fail: bounded by MAX_KINDS above.
            let _ = scores.push(0);
        }
        Self { scores, max }
    }

    /// Score an arrival of a `kind` particle at the end of `track`.
    ///
    /// Correct arrivals count up, wrong ones count down, and neither leaves
    /// `0..=max`.
    pub fn record(&mut self, kind: KindId, track: TrackId) -> ScoreChange {
        let max = self.max;
        let Some(score) = self.scores.get_mut(track as usize) else {
            return ScoreChange::Unchanged;
        };
        if kind == track {
            if *score < max {
                *score += 1;
                return ScoreChange::Increment;
            }
        } else if *score > 0 {
            *score -= 1;
            return ScoreChange::Decrement;
        }
        ScoreChange::Unchanged
    }

    /// Score of `track`, or `None` if it is not a destination.
    #[must_use]
    pub fn get(&self, track: TrackId) -> Option<u8> {
        self.scores.get(track as usize).copied()
    }

    /// Per-destination scores in track order.
    #[must_use]
    pub fn scores(&self) -> &[u8] {
        &self.scores
    }

    /// Upper bound of every counter.
    #[must_use]
    pub const fn max(&self) -> u8 {
        self.max
    }

    /// Sum of all counters.
    #[must_use]
    pub fn total(&self) -> u16 {
        self.scores.iter().map(|score| u16::from(*score)).sum()
    }

    /// Total at which the run is solved: `max × destinations`.
    #[must_use]
    pub fn target(&self) -> u16 {
        u16::from(self.max) * self.scores.len() as u16
    }

    /// Returns `true` once every destination is at max.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.total() == self.target()
    }

    #[cfg(test)]
    pub(crate) fn set(&mut self, track: TrackId, score: u8) {
        self.scores[track as usize] = score.min(self.max);
    }
}
