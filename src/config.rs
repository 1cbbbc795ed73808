//! Question data model and loading
//!
//! This module defines the structures describing a full game's worth of
//! questions, exactly mirroring the external JSON format the data source
//! uses. Loading is a one-shot gate: question data is parsed and
//! validated before any game session can be built, and a failure here is
//! terminal for the session.

use garde::Validate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading question data
#[derive(Debug, Error)]
pub enum Error {
    /// The question data could not be parsed as JSON
    #[error("question data is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    /// The question data parsed but violates the configured limits
    #[error("question data is invalid: {0}")]
    Invalid(#[from] garde::Report),
}

/// A single revealable answer on a question's board
///
/// Answers are immutable once loaded. Their rank is implicit in their
/// position within the question's answer list; their point value is
/// independent of that position.
#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
pub struct Answer {
    /// The answer text shown when the card is revealed
    #[garde(length(chars, max = crate::constants::answer_text::MAX_LENGTH))]
    pub text: String,
    /// Points awarded into the round pot when this answer is revealed
    #[garde(range(min = 1))]
    pub points: u64,
}

/// A single question with its ranked answer board
#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
pub struct Question {
    /// The question prompt read out by the moderator
    #[garde(length(chars, max = crate::constants::question::MAX_PROMPT_LENGTH))]
    pub question: String,
    /// The ranked answers, in display order
    #[garde(
        length(
            min = crate::constants::question::MIN_ANSWER_COUNT,
            max = crate::constants::question::MAX_ANSWER_COUNT
        ),
        dive
    )]
    pub answers: Vec<Answer>,
}

/// A complete, validated sequence of questions for one session
///
/// This is the external interface to the question data source: an ordered
/// list of questions consumed once at session start.
#[derive(Debug, Serialize, Deserialize, Clone, Default, Validate)]
#[serde(transparent)]
pub struct QuestionSet {
    /// The questions in play order
    #[garde(length(max = crate::constants::question_set::MAX_QUESTION_COUNT), dive)]
    questions: Vec<Question>,
}

impl QuestionSet {
    /// Parses and validates question data from its JSON wire format
    ///
    /// This is the one-shot load gate: the engine stays inert until this
    /// succeeds, and a failure is terminal for the session (the caller
    /// surfaces it as an error screen and must reload).
    ///
    /// # Arguments
    ///
    /// * `data` - JSON text containing an array of question records
    ///
    /// # Errors
    ///
    /// Returns [`Error::Malformed`] if the text is not valid JSON for the
    /// expected shape, or [`Error::Invalid`] if it violates the limits in
    /// [`crate::constants`].
    pub fn from_json(data: &str) -> Result<Self, Error> {
        let set: Self = serde_json::from_str(data)?;
        set.validate()?;
        Ok(set)
    }

    /// Creates a question set from already-built questions
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] if the questions violate the limits in
    /// [`crate::constants`].
    pub fn new(questions: Vec<Question>) -> Result<Self, Error> {
        let set = Self { questions };
        set.validate()?;
        Ok(set)
    }

    /// Returns the number of questions in this set
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Checks if this set contains any questions
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Returns the question at the given index, if it exists
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }
}
