//! # Kashef Game Library
//!
//! This library provides the core engine for Kashef, a two-team
//! "reveal the hidden answers" trivia game: a moderator reads a question,
//! teams guess answers from a ranked board of face-down cards, correct
//! guesses flip a card and pay its points into a round pot, and the pot
//! is committed to a team's total on command. The engine owns matching,
//! scoring, and question progression; rendering and audio are external
//! listeners driven by the messages it emits.

#![cfg_attr(all(coverage_nightly, test), feature(coverage_attribute))]
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]

use serde::Serialize;

pub mod constants;

pub mod board;
pub mod config;
pub mod listener;
pub mod normalize;
pub mod scorer;
pub mod session;

/// Messages sent to listeners to update their pre-existing view
///
/// This enum gathers every event the engine can announce, so a listener
/// handles a single message type regardless of which component the event
/// originated from.
#[derive(Debug, Serialize, Clone, derive_more::From)]
pub enum UpdateMessage {
    /// Session-level events: question progression and pot assignment
    Game(session::UpdateMessage),
    /// Board-level events: reveals and match outcomes
    Board(board::UpdateMessage),
}

impl UpdateMessage {
    /// Converts the update message to a JSON string for transmission
    ///
    /// # Panics
    ///
    /// This method panics if serialization fails, which should never happen
    /// with the default JSON serializer for well-formed data.
    pub fn to_message(&self) -> String {
        serde_json::to_string(self).expect("default serializer cannot fail")
    }
}

/// Messages sent to listeners that lack preexisting state
///
/// A renderer that attaches mid-session receives one of these to draw
/// the current screen from scratch.
#[derive(Debug, Serialize, Clone, derive_more::From)]
pub enum SyncMessage {
    /// Full session state snapshot
    Game(session::SyncMessage),
}

impl SyncMessage {
    /// Converts the sync message to a JSON string for transmission
    ///
    /// # Panics
    ///
    /// This method panics if serialization fails, which should never happen
    /// with the default JSON serializer for well-formed data.
    pub fn to_message(&self) -> String {
        serde_json::to_string(self).expect("default serializer cannot fail")
    }
}
