//! Game session orchestration
//!
//! This module contains the session struct that drives a full
//! play-through: it owns the question set, the answer board, and the
//! scorer, sequences them across questions, and announces every state
//! change to the attached presentation listener. All score and
//! progression state lives here behind methods, so a session is fully
//! testable without any rendering context.

use enum_map::EnumMap;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use thiserror::Error;

use crate::{
    board::{AnswerBoard, MatchResult},
    config::QuestionSet,
    constants::team::{DEFAULT_TEAM1_LABEL, DEFAULT_TEAM2_LABEL, MAX_LABEL_LENGTH},
    listener::Listener,
    normalize::normalize,
    scorer::{self, RoundScorer, Team},
};

/// Represents the current phase of a game session
///
/// A session starts inert, moves through the questions one at a time,
/// and ends in a terminal finished state once the questions run out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum State {
    /// No game has been started yet; the engine is inert
    NotStarted,
    /// Playing the question at the contained index
    Active(usize),
    /// All questions are exhausted; only a fresh start leaves this state
    Finished,
}

/// Errors that can occur when starting a session
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The question set is empty, so there is nothing to play
    #[error("question set contains no questions")]
    NoQuestions,
}

/// Update messages announcing session-level changes
#[derive(Debug, Serialize, Clone)]
pub enum UpdateMessage {
    /// A question was loaded and its board laid out face down
    QuestionLoaded {
        /// Index of the question (0-indexed)
        index: usize,
        /// Total count of questions in the session
        count: usize,
        /// The question prompt
        question: String,
        /// Number of face-down cards on the board
        answer_count: usize,
    },
    /// The round pot was committed to a team
    PotAssigned {
        /// The team that received the pot
        team: Team,
        /// Points transferred out of the pot
        amount: u64,
        /// The team's new cumulative total
        total: u64,
    },
    /// Assignment was attempted with nothing in the pot
    PotEmpty,
    /// The session ran out of questions and is over
    SessionFinished {
        /// Final cumulative score per team
        scores: EnumMap<Team, u64>,
    },
}

/// A revealed card as included in a state snapshot
#[derive(Debug, Serialize, Clone)]
pub struct RevealedCard {
    /// Index of the card in rank order
    pub index: usize,
    /// The answer text on the card
    pub text: String,
    /// The card's point value
    pub points: u64,
}

/// Snapshot of the question currently in play
#[derive(Debug, Serialize, Clone)]
pub struct QuestionSnapshot {
    /// Index of the question (0-indexed)
    pub index: usize,
    /// Total count of questions in the session
    pub count: usize,
    /// The question prompt
    pub question: String,
    /// Number of cards on the board
    pub answer_count: usize,
    /// The cards revealed so far, in rank order
    pub revealed: Vec<RevealedCard>,
}

/// Full state snapshot for a listener with no preexisting state
///
/// Sent when a renderer attaches mid-session; contains everything needed
/// to draw the current screen from scratch.
#[skip_serializing_none]
#[derive(Debug, Serialize, Clone)]
pub struct SyncMessage {
    /// Current phase of the session
    pub state: State,
    /// The question in play, absent unless the session is active
    pub question: Option<QuestionSnapshot>,
    /// Uncommitted round pot
    pub pot: u64,
    /// Cumulative score per team
    pub scores: EnumMap<Team, u64>,
    /// Display label per team
    pub labels: EnumMap<Team, String>,
}

/// Substitutes the default label when the provided one is blank,
/// truncating overlong labels to the configured limit.
fn clean_label(label: &str, fallback: &str) -> String {
    let label = label.trim();
    if label.is_empty() {
        fallback.to_string()
    } else {
        label.chars().take(MAX_LABEL_LENGTH).collect()
    }
}

/// The main game session struct
///
/// Owns the question set for its whole lifetime, the active board, the
/// scorer, and the session phase. Every mutating operation takes the
/// presentation listener to announce its outcome to.
#[derive(Debug, Serialize, Deserialize)]
pub struct GameSession {
    /// The questions for this session, immutable once loaded
    questions: QuestionSet,
    /// The answer board for the question currently in play
    board: AnswerBoard,
    /// Round pot and team score ledger
    scorer: RoundScorer,
    /// Current phase of the session
    state: State,
    /// Cosmetic display label per team
    labels: EnumMap<Team, String>,
}

impl GameSession {
    /// Creates a new, not-yet-started session over a question set
    ///
    /// # Arguments
    ///
    /// * `questions` - The validated question data for this session
    pub fn new(questions: QuestionSet) -> Self {
        Self {
            questions,
            board: AnswerBoard::default(),
            scorer: RoundScorer::default(),
            state: State::NotStarted,
            labels: EnumMap::from_fn(|team| match team {
                Team::One => DEFAULT_TEAM1_LABEL.to_string(),
                Team::Two => DEFAULT_TEAM2_LABEL.to_string(),
            }),
        }
    }

    /// Starts (or restarts) the session from the first question
    ///
    /// Team labels are cosmetic; blank labels fall back to the defaults.
    /// Starting an already-running or finished session behaves as a fresh
    /// session: the index, board, pot, and both team totals reset.
    ///
    /// # Arguments
    ///
    /// * `team1_label` - Display label for team one
    /// * `team2_label` - Display label for team two
    /// * `listener` - The presentation sink to announce to
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoQuestions`] when the question set is empty; the
    /// session transitions straight to [`State::Finished`] and announces
    /// it, so the caller shows the end screen immediately.
    pub fn start<L: Listener>(
        &mut self,
        team1_label: &str,
        team2_label: &str,
        listener: &L,
    ) -> Result<(), Error> {
        self.labels[Team::One] = clean_label(team1_label, DEFAULT_TEAM1_LABEL);
        self.labels[Team::Two] = clean_label(team2_label, DEFAULT_TEAM2_LABEL);
        self.scorer = RoundScorer::default();
        self.board = AnswerBoard::default();

        if self.questions.is_empty() {
            self.finish(listener);
            return Err(Error::NoQuestions);
        }

        self.load_question(0, listener);
        Ok(())
    }

    /// Advances to the next question
    ///
    /// In bounds, the next question loads with a fresh board and pot; out
    /// of bounds, the session finishes. Does nothing unless the session
    /// is active.
    ///
    /// # Arguments
    ///
    /// * `listener` - The presentation sink to announce to
    pub fn next<L: Listener>(&mut self, listener: &L) {
        let State::Active(index) = self.state else {
            return;
        };

        let next = index + 1;
        if next < self.questions.len() {
            self.load_question(next, listener);
        } else {
            self.finish(listener);
        }
    }

    /// Resolves a guess against the active board
    ///
    /// A correct guess flips its card, moves the card's points into the
    /// round pot, and announces the reveal. Guesses that normalize to the
    /// empty string are silent no-ops, matching how an empty input field
    /// is neither right nor wrong. When the session is not active the
    /// guess is ignored and reported as [`MatchResult::NoMatch`].
    ///
    /// # Arguments
    ///
    /// * `raw_text` - The guess exactly as the player typed it
    /// * `listener` - The presentation sink to announce to
    ///
    /// # Returns
    ///
    /// The [`MatchResult`] describing what the guess hit
    pub fn submit<L: Listener>(&mut self, raw_text: &str, listener: &L) -> MatchResult {
        let State::Active(question_index) = self.state else {
            return MatchResult::NoMatch;
        };
        if normalize(raw_text).is_empty() {
            return MatchResult::NoMatch;
        }

        let result = self.board.submit(raw_text);
        match result {
            MatchResult::Correct { index, points } => {
                self.scorer.accumulate(points);
                let text = self
                    .questions
                    .get(question_index)
                    .map(|question| question.answers[index].text.clone())
                    .unwrap_or_default();
                listener.send_message(
                    &crate::board::UpdateMessage::AnswerRevealed {
                        index,
                        text,
                        points,
                        pot: self.scorer.pot(),
                    }
                    .into(),
                );
            }
            MatchResult::AlreadyRevealed { index } => {
                listener
                    .send_message(&crate::board::UpdateMessage::AnswerAlreadyRevealed { index }.into());
            }
            MatchResult::NoMatch => {
                listener.send_message(&crate::board::UpdateMessage::NoMatch.into());
            }
        }
        result
    }

    /// Commits the round pot to a team
    ///
    /// On success the pot transfers to the team's total and resets to
    /// zero. An empty pot is announced as a notice. When the session is
    /// not active nothing is announced and the call reports an empty pot.
    ///
    /// # Arguments
    ///
    /// * `team` - The team receiving the pot
    /// * `listener` - The presentation sink to announce to
    ///
    /// # Returns
    ///
    /// The committed amount on success
    ///
    /// # Errors
    ///
    /// Returns [`scorer::Error::EmptyPot`] when there is nothing to
    /// assign. No score changes in that case.
    pub fn assign<L: Listener>(
        &mut self,
        team: Team,
        listener: &L,
    ) -> Result<u64, scorer::Error> {
        if !matches!(self.state, State::Active(_)) {
            return Err(scorer::Error::EmptyPot);
        }

        match self.scorer.assign(team) {
            Ok(amount) => {
                listener.send_message(
                    &UpdateMessage::PotAssigned {
                        team,
                        amount,
                        total: self.scorer.total(team),
                    }
                    .into(),
                );
                Ok(amount)
            }
            Err(err) => {
                listener.send_message(&UpdateMessage::PotEmpty.into());
                Err(err)
            }
        }
    }

    /// Sends a full state snapshot to the given listener
    ///
    /// # Arguments
    ///
    /// * `listener` - The listener to synchronize
    pub fn sync<L: Listener>(&self, listener: &L) {
        listener.send_state(&self.state_message().into());
    }

    /// Builds a full snapshot of the current session state
    pub fn state_message(&self) -> SyncMessage {
        let question = match self.state {
            State::Active(index) => self.questions.get(index).map(|question| QuestionSnapshot {
                index,
                count: self.questions.len(),
                question: question.question.clone(),
                answer_count: question.answers.len(),
                revealed: self
                    .board
                    .revealed_indices()
                    .into_iter()
                    .map(|card_index| RevealedCard {
                        index: card_index,
                        text: question.answers[card_index].text.clone(),
                        points: question.answers[card_index].points,
                    })
                    .collect(),
            }),
            State::NotStarted | State::Finished => None,
        };

        SyncMessage {
            state: self.state,
            question,
            pot: self.scorer.pot(),
            scores: self.scorer.totals(),
            labels: self.labels.clone(),
        }
    }

    /// Returns the current phase of the session
    pub fn state(&self) -> State {
        self.state
    }

    /// Returns the uncommitted round pot
    pub fn pot(&self) -> u64 {
        self.scorer.pot()
    }

    /// Returns the cumulative scores of both teams
    pub fn scores(&self) -> EnumMap<Team, u64> {
        self.scorer.totals()
    }

    /// Returns the board for the question currently in play
    pub fn board(&self) -> &AnswerBoard {
        &self.board
    }

    /// Checks whether the session has reached its terminal state
    pub fn is_finished(&self) -> bool {
        self.state == State::Finished
    }

    /// Loads the question at `index` with a fresh board and pot
    fn load_question<L: Listener>(&mut self, index: usize, listener: &L) {
        let Some(question) = self.questions.get(index) else {
            self.finish(listener);
            return;
        };

        self.board.load(question);
        self.scorer.reset_pot();
        self.state = State::Active(index);
        listener.send_message(
            &UpdateMessage::QuestionLoaded {
                index,
                count: self.questions.len(),
                question: question.question.clone(),
                answer_count: question.answers.len(),
            }
            .into(),
        );
    }

    /// Transitions to the terminal finished state and announces it
    fn finish<L: Listener>(&mut self, listener: &L) {
        self.state = State::Finished;
        listener.send_message(
            &UpdateMessage::SessionFinished {
                scores: self.scorer.totals(),
            }
            .into(),
        );
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::config::{Answer, Question};

    /// Listener that records every message for later inspection
    #[derive(Debug, Default)]
    struct RecordingListener {
        messages: RefCell<Vec<crate::UpdateMessage>>,
        states: RefCell<Vec<crate::SyncMessage>>,
    }

    impl Listener for RecordingListener {
        fn send_message(&self, message: &crate::UpdateMessage) {
            self.messages.borrow_mut().push(message.clone());
        }

        fn send_state(&self, state: &crate::SyncMessage) {
            self.states.borrow_mut().push(state.clone());
        }
    }

    impl RecordingListener {
        fn last_json(&self) -> String {
            self.messages
                .borrow()
                .last()
                .map(crate::UpdateMessage::to_message)
                .unwrap_or_default()
        }

        fn message_count(&self) -> usize {
            self.messages.borrow().len()
        }
    }

    fn question(prompt: &str, answers: &[(&str, u64)]) -> Question {
        Question {
            question: prompt.to_string(),
            answers: answers
                .iter()
                .map(|(text, points)| Answer {
                    text: (*text).to_string(),
                    points: *points,
                })
                .collect(),
        }
    }

    fn pets_session() -> GameSession {
        let questions =
            QuestionSet::new(vec![question("Q", &[("قطة", 50), ("كلب", 30)])]).unwrap();
        GameSession::new(questions)
    }

    #[test]
    fn test_new_session_is_inert() {
        let mut session = pets_session();
        let listener = RecordingListener::default();

        assert_eq!(session.state(), State::NotStarted);
        assert_eq!(session.submit("قطة", &listener), MatchResult::NoMatch);
        assert_eq!(
            session.assign(Team::One, &listener),
            Err(scorer::Error::EmptyPot)
        );
        session.next(&listener);
        assert_eq!(session.state(), State::NotStarted);
        assert_eq!(listener.message_count(), 0);
    }

    #[test]
    fn test_start_loads_first_question() {
        let mut session = pets_session();
        let listener = RecordingListener::default();

        session.start("الصقور", "النمور", &listener).unwrap();

        assert_eq!(session.state(), State::Active(0));
        assert_eq!(session.pot(), 0);
        let json = listener.last_json();
        assert!(json.contains("QuestionLoaded"));
        assert!(json.contains("\"Q\""));
    }

    #[test]
    fn test_start_with_no_questions_is_terminal() {
        let mut session = GameSession::new(QuestionSet::default());
        let listener = RecordingListener::default();

        assert_eq!(
            session.start("", "", &listener),
            Err(Error::NoQuestions)
        );
        assert!(session.is_finished());
        assert!(listener.last_json().contains("SessionFinished"));
    }

    #[test]
    fn test_blank_labels_fall_back_to_defaults() {
        let mut session = pets_session();
        let listener = RecordingListener::default();
        session.start("  ", "النمور", &listener).unwrap();

        let snapshot = session.state_message();
        assert_eq!(snapshot.labels[Team::One], DEFAULT_TEAM1_LABEL);
        assert_eq!(snapshot.labels[Team::Two], "النمور");
    }

    #[test]
    fn test_correct_submit_accumulates_pot() {
        let mut session = pets_session();
        let listener = RecordingListener::default();
        session.start("a", "b", &listener).unwrap();

        assert_eq!(
            session.submit("قطه", &listener),
            MatchResult::Correct {
                index: 0,
                points: 50
            }
        );
        assert_eq!(session.pot(), 50);
        let json = listener.last_json();
        assert!(json.contains("AnswerRevealed"));
        assert!(json.contains("قطة"));
    }

    #[test]
    fn test_already_revealed_does_not_reaccumulate() {
        let mut session = pets_session();
        let listener = RecordingListener::default();
        session.start("a", "b", &listener).unwrap();

        session.submit("قطة", &listener);
        assert_eq!(
            session.submit("قطة", &listener),
            MatchResult::AlreadyRevealed { index: 0 }
        );
        assert_eq!(session.pot(), 50);
        assert!(listener.last_json().contains("AnswerAlreadyRevealed"));
    }

    #[test]
    fn test_wrong_submit_announces_no_match() {
        let mut session = pets_session();
        let listener = RecordingListener::default();
        session.start("a", "b", &listener).unwrap();

        assert_eq!(session.submit("فيل", &listener), MatchResult::NoMatch);
        assert_eq!(session.pot(), 0);
        assert!(listener.last_json().contains("NoMatch"));
    }

    #[test]
    fn test_blank_submit_is_silent() {
        let mut session = pets_session();
        let listener = RecordingListener::default();
        session.start("a", "b", &listener).unwrap();
        let before = listener.message_count();

        assert_eq!(session.submit("   ", &listener), MatchResult::NoMatch);
        assert_eq!(listener.message_count(), before);
    }

    #[test]
    fn test_assign_commits_pot_to_team() {
        let mut session = pets_session();
        let listener = RecordingListener::default();
        session.start("a", "b", &listener).unwrap();
        session.submit("قطة", &listener);

        assert_eq!(session.assign(Team::One, &listener), Ok(50));
        assert_eq!(session.pot(), 0);
        assert_eq!(session.scores()[Team::One], 50);
        let json = listener.last_json();
        assert!(json.contains("PotAssigned"));
        assert!(json.contains("\"amount\":50"));
    }

    #[test]
    fn test_assign_empty_pot_announces_notice() {
        let mut session = pets_session();
        let listener = RecordingListener::default();
        session.start("a", "b", &listener).unwrap();

        assert_eq!(
            session.assign(Team::Two, &listener),
            Err(scorer::Error::EmptyPot)
        );
        assert_eq!(session.scores()[Team::Two], 0);
        assert!(listener.last_json().contains("PotEmpty"));
    }

    #[test]
    fn test_next_resets_board_and_pot() {
        let questions = QuestionSet::new(vec![
            question("Q1", &[("قطة", 50)]),
            question("Q2", &[("قطة", 70)]),
        ])
        .unwrap();
        let mut session = GameSession::new(questions);
        let listener = RecordingListener::default();
        session.start("a", "b", &listener).unwrap();

        session.submit("قطة", &listener);
        assert_eq!(session.pot(), 50);

        // the uncommitted pot is discarded on advance
        session.next(&listener);
        assert_eq!(session.state(), State::Active(1));
        assert_eq!(session.pot(), 0);
        assert!(!session.board().revealed(0));

        // the same answer is matchable again at its new value
        assert_eq!(
            session.submit("قطة", &listener),
            MatchResult::Correct {
                index: 0,
                points: 70
            }
        );
    }

    #[test]
    fn test_next_past_last_question_finishes() {
        let mut session = pets_session();
        let listener = RecordingListener::default();
        session.start("a", "b", &listener).unwrap();

        session.next(&listener);
        assert!(session.is_finished());
        assert!(listener.last_json().contains("SessionFinished"));

        // terminal: no further operations are meaningful
        let before = listener.message_count();
        assert_eq!(session.submit("قطة", &listener), MatchResult::NoMatch);
        assert_eq!(
            session.assign(Team::One, &listener),
            Err(scorer::Error::EmptyPot)
        );
        session.next(&listener);
        assert!(session.is_finished());
        assert_eq!(listener.message_count(), before);
    }

    #[test]
    fn test_restart_resets_scores_and_index() {
        let mut session = pets_session();
        let listener = RecordingListener::default();
        session.start("a", "b", &listener).unwrap();
        session.submit("قطة", &listener);
        session.assign(Team::One, &listener).unwrap();
        session.next(&listener);
        assert!(session.is_finished());

        session.start("c", "d", &listener).unwrap();
        assert_eq!(session.state(), State::Active(0));
        assert_eq!(session.scores()[Team::One], 0);
        assert_eq!(session.pot(), 0);
        assert!(!session.board().revealed(0));
    }

    #[test]
    fn test_pot_conservation_within_question() {
        let questions = QuestionSet::new(vec![question(
            "Q",
            &[("fridge", 40), ("oven", 25), ("sink", 15)],
        )])
        .unwrap();
        let mut session = GameSession::new(questions);
        let listener = RecordingListener::default();
        session.start("a", "b", &listener).unwrap();

        session.submit("fridge", &listener);
        session.submit("oven", &listener);
        let first = session.assign(Team::One, &listener).unwrap();
        session.submit("sink", &listener);
        let second = session.assign(Team::Two, &listener).unwrap();

        // every revealed point was committed exactly once
        assert_eq!(first + second, 40 + 25 + 15);
        assert_eq!(
            session.scores()[Team::One] + session.scores()[Team::Two],
            80
        );
        assert!(session.board().is_finished());
    }

    #[test]
    fn test_sync_snapshot_reflects_mid_question_state() {
        let mut session = pets_session();
        let listener = RecordingListener::default();
        session.start("الصقور", "النمور", &listener).unwrap();
        session.submit("قطة", &listener);

        session.sync(&listener);
        let states = listener.states.borrow();
        let json = states[0].to_message();
        assert!(json.contains("قطة"));
        assert!(json.contains("الصقور"));

        let question = session.state_message().question.unwrap();
        assert_eq!(question.index, 0);
        assert_eq!(question.count, 1);
        assert_eq!(question.answer_count, 2);
        assert_eq!(question.revealed.len(), 1);
        assert_eq!(question.revealed[0].points, 50);
        assert_eq!(session.state_message().pot, 50);
    }

    #[test]
    fn test_sync_snapshot_when_finished_has_no_question() {
        let mut session = pets_session();
        let listener = RecordingListener::default();
        session.start("a", "b", &listener).unwrap();
        session.next(&listener);

        let snapshot = session.state_message();
        assert_eq!(snapshot.state, State::Finished);
        assert!(snapshot.question.is_none());
        // skip_serializing_none drops the absent question entirely
        let json = crate::SyncMessage::from(snapshot).to_message();
        assert!(!json.contains("question"));
    }

    #[test]
    fn test_runs_headless_with_null_listener() {
        let mut session = pets_session();
        let listener = crate::listener::NullListener;

        session.start("a", "b", &listener).unwrap();
        session.submit("قطة", &listener);
        session.assign(Team::One, &listener).unwrap();
        session.sync(&listener);
        session.next(&listener);

        assert!(session.is_finished());
        assert_eq!(session.scores()[Team::One], 50);
    }

    #[test]
    fn test_end_to_end_round() {
        let mut session = pets_session();
        let listener = RecordingListener::default();
        session.start("a", "b", &listener).unwrap();

        assert_eq!(
            session.submit("قطه", &listener),
            MatchResult::Correct {
                index: 0,
                points: 50
            }
        );
        assert_eq!(session.pot(), 50);

        assert_eq!(
            session.submit("قطة", &listener),
            MatchResult::AlreadyRevealed { index: 0 }
        );
        assert_eq!(session.pot(), 50);

        assert_eq!(session.assign(Team::One, &listener), Ok(50));
        assert_eq!(session.scores()[Team::One], 50);
        assert_eq!(session.pot(), 0);

        assert_eq!(
            session.submit("كلب", &listener),
            MatchResult::Correct {
                index: 1,
                points: 30
            }
        );
        assert_eq!(session.pot(), 30);

        assert_eq!(session.assign(Team::Two, &listener), Ok(30));
        assert_eq!(session.scores()[Team::Two], 30);
        assert_eq!(session.pot(), 0);

        session.next(&listener);
        assert!(session.is_finished());
        assert_eq!(session.submit("كلب", &listener), MatchResult::NoMatch);
        assert_eq!(
            session.assign(Team::One, &listener),
            Err(scorer::Error::EmptyPot)
        );
        assert_eq!(session.scores()[Team::One], 50);
        assert_eq!(session.scores()[Team::Two], 30);
    }
}
