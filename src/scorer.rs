//! Round pot and team score ledger
//!
//! This module manages scoring for a game session: points from revealed
//! answers accumulate in a per-question "round pot", and the pot is
//! committed to one of the two teams' cumulative totals only on an
//! explicit assignment. The pot and the ledger are the sole mutation
//! paths for scores, which keeps the conservation invariants easy to
//! check.

use enum_map::{Enum, EnumMap};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the two competing teams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum, Serialize, Deserialize)]
pub enum Team {
    /// The first team
    One,
    /// The second team
    Two,
}

/// Errors that can occur when committing the round pot
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Assignment was attempted with no points in the pot
    #[error("no revealed points to assign")]
    EmptyPot,
}

/// Accumulates the round pot and owns the cumulative team scores
///
/// The pot is scoped to the current question: it is zeroed when a
/// question loads and when an assignment succeeds, and at no other time.
/// Team totals only ever grow, and only through [`assign`](Self::assign).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoundScorer {
    /// Points revealed in the current question, not yet committed
    pot: u64,
    /// Cumulative score per team across the whole session
    totals: EnumMap<Team, u64>,
}

impl RoundScorer {
    /// Returns the current accumulated round pot
    pub fn pot(&self) -> u64 {
        self.pot
    }

    /// Adds the points of a freshly revealed answer into the pot
    ///
    /// # Arguments
    ///
    /// * `points` - The revealed answer's point value
    pub fn accumulate(&mut self, points: u64) {
        self.pot += points;
    }

    /// Zeroes the pot without committing it
    ///
    /// Called exactly when a question loads; committed pots are zeroed by
    /// [`assign`](Self::assign) itself.
    pub fn reset_pot(&mut self) {
        self.pot = 0;
    }

    /// Commits the round pot to a team's cumulative total
    ///
    /// # Arguments
    ///
    /// * `team` - The team receiving the pot
    ///
    /// # Returns
    ///
    /// The committed amount; the pot is zero afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyPot`] when the pot is 0. No score changes in
    /// that case; the caller surfaces it as a notice, not a failure.
    pub fn assign(&mut self, team: Team) -> Result<u64, Error> {
        if self.pot == 0 {
            return Err(Error::EmptyPot);
        }
        let committed = std::mem::take(&mut self.pot);
        self.totals[team] += committed;
        Ok(committed)
    }

    /// Returns a team's cumulative score
    pub fn total(&self, team: Team) -> u64 {
        self.totals[team]
    }

    /// Returns the cumulative scores of both teams
    pub fn totals(&self) -> EnumMap<Team, u64> {
        self.totals
    }
}
