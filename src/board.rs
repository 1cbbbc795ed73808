//! Answer board and match resolution
//!
//! This module implements the board of face-down answer cards for the
//! current question. Submissions are normalized and scanned against the
//! board in rank order; a successful match flips exactly one card, and a
//! card never flips back until the next question is loaded.

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{config::Question, normalize::normalize};

/// A single card on the active board
///
/// Carries the answer content together with its reveal state. The
/// normalized text is computed once at load time so every submission is
/// a plain string comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct AnswerCard {
    /// The answer text as configured
    text: String,
    /// Canonical form of the text, precomputed for matching
    normalized: String,
    /// Points awarded into the round pot when this card is revealed
    points: u64,
    /// Whether this card has been revealed; never reverts within a question
    revealed: bool,
}

/// Update messages announcing board-level changes
#[derive(Debug, Serialize, Clone)]
pub enum UpdateMessage {
    /// A card was flipped and its points moved into the round pot
    AnswerRevealed {
        /// Index of the revealed card in rank order
        index: usize,
        /// The answer text on the card
        text: String,
        /// Points the reveal is worth
        points: u64,
        /// The round pot after the reveal
        pot: u64,
    },
    /// The guess matched a card that was already face up
    AnswerAlreadyRevealed {
        /// Index of the matching revealed card
        index: usize,
    },
    /// The guess matched nothing on the board
    NoMatch,
}

/// Outcome of submitting a guess against the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchResult {
    /// The guess matched an unrevealed answer, which is now revealed
    Correct {
        /// Index of the revealed answer in rank order
        index: usize,
        /// Points the reveal is worth
        points: u64,
    },
    /// The guess matched only answers that were already revealed
    AlreadyRevealed {
        /// Index of the first matching revealed answer
        index: usize,
    },
    /// The guess matched no answer on the board
    NoMatch,
}

/// The board of answer cards for the currently loaded question
///
/// An empty board (before the first [`load`](AnswerBoard::load)) rejects
/// every submission with [`MatchResult::NoMatch`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnswerBoard {
    /// Cards in rank order; rebuilt on every load
    cards: Vec<AnswerCard>,
}

impl AnswerBoard {
    /// Loads a question onto the board
    ///
    /// All cards start unrevealed. Duplicate answer texts are kept as
    /// distinct cards, each independently matchable.
    ///
    /// # Arguments
    ///
    /// * `question` - The question whose answers populate the board
    pub fn load(&mut self, question: &Question) {
        self.cards = question
            .answers
            .iter()
            .map(|answer| AnswerCard {
                text: answer.text.clone(),
                normalized: normalize(&answer.text),
                points: answer.points,
                revealed: false,
            })
            .collect_vec();
    }

    /// Resolves a guess against the board
    ///
    /// The guess is normalized first; a guess that normalizes to the
    /// empty string is [`MatchResult::NoMatch`] without scanning (the
    /// caller treats it as a no-op, not a wrong answer). Otherwise cards
    /// are scanned in rank order, continuing past revealed matches, and
    /// the first unrevealed match is flipped. At most one card flips per
    /// call, so a guess matching several duplicate cards reveals them one
    /// submission at a time.
    ///
    /// # Arguments
    ///
    /// * `raw_text` - The guess exactly as the player typed it
    ///
    /// # Returns
    ///
    /// The [`MatchResult`] describing what the guess hit
    pub fn submit(&mut self, raw_text: &str) -> MatchResult {
        let guess = normalize(raw_text);
        if guess.is_empty() {
            return MatchResult::NoMatch;
        }

        let mut first_revealed_match = None;
        for (index, card) in self.cards.iter_mut().enumerate() {
            if card.normalized != guess {
                continue;
            }
            if card.revealed {
                first_revealed_match.get_or_insert(index);
            } else {
                card.revealed = true;
                return MatchResult::Correct {
                    index,
                    points: card.points,
                };
            }
        }

        match first_revealed_match {
            Some(index) => MatchResult::AlreadyRevealed { index },
            None => MatchResult::NoMatch,
        }
    }

    /// Checks whether every card on the board has been revealed
    ///
    /// Informational only; the board never advances the game by itself.
    /// An empty board counts as finished.
    pub fn is_finished(&self) -> bool {
        self.cards.iter().all(|card| card.revealed)
    }

    /// Returns the number of cards on the board
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Checks if the board has no cards loaded
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Checks whether the card at the given index is revealed
    ///
    /// Out-of-range indices report as unrevealed.
    pub fn revealed(&self, index: usize) -> bool {
        self.cards.get(index).is_some_and(|card| card.revealed)
    }

    /// Returns the indices of all revealed cards in rank order
    pub fn revealed_indices(&self) -> Vec<usize> {
        self.cards
            .iter()
            .enumerate()
            .filter(|(_, card)| card.revealed)
            .map(|(index, _)| index)
            .collect_vec()
    }
}
