//! Presentation sink abstraction
//!
//! This module defines the trait through which the game engine announces
//! what happened to a rendering layer. The engine never touches
//! presentation state itself; card flips, score displays, and audio cues
//! are all reactions to the messages sent here, and a listener that drops
//! a cosmetic effect (a failed sound, say) never affects scoring.

use super::{SyncMessage, UpdateMessage};

/// Trait for receiving game events from the engine
///
/// Implementations translate engine events into whatever the display
/// medium needs. A listener must not call back into the engine while
/// handling a message; all operations run to completion before the next
/// event is processed.
pub trait Listener {
    /// Receives an update message about a change in game state
    ///
    /// # Arguments
    ///
    /// * `message` - The update message to react to
    fn send_message(&self, message: &UpdateMessage);

    /// Receives a full state snapshot
    ///
    /// Sent to synchronize a view that has no prior state, typically when
    /// a renderer attaches mid-session.
    ///
    /// # Arguments
    ///
    /// * `state` - The synchronization message describing current state
    fn send_state(&self, state: &SyncMessage);
}

/// A listener that discards every message
///
/// Useful for driving the engine headless, in tests or scripted replays.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullListener;

impl Listener for NullListener {
    fn send_message(&self, _message: &UpdateMessage) {}

    fn send_state(&self, _state: &SyncMessage) {}
}
