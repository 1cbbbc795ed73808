//! Configuration constants for the Kashef game system
//!
//! This module contains the validation limits applied to question data
//! when it is loaded, keeping the boundaries for every component in one
//! place.

/// Question set configuration constants
pub mod question_set {
    /// Maximum number of questions allowed in a single question set
    pub const MAX_QUESTION_COUNT: usize = 100;
}

/// Individual question configuration constants
pub mod question {
    /// Maximum length of a question prompt in characters
    pub const MAX_PROMPT_LENGTH: usize = 200;
    /// Minimum number of answers on a question's board
    pub const MIN_ANSWER_COUNT: usize = 1;
    /// Maximum number of answers on a question's board
    pub const MAX_ANSWER_COUNT: usize = 10;
}

/// Answer text configuration constants
pub mod answer_text {
    /// Maximum length of answer text in characters
    pub const MAX_LENGTH: usize = 200;
}

/// Team configuration constants
pub mod team {
    /// Maximum length of a team display label in characters
    pub const MAX_LABEL_LENGTH: usize = 50;
    /// Fallback label for team one when the provided label is blank
    pub const DEFAULT_TEAM1_LABEL: &str = "Team 1";
    /// Fallback label for team two when the provided label is blank
    pub const DEFAULT_TEAM2_LABEL: &str = "Team 2";
}
