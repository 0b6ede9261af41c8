//! Chat transcript and session state types.
//!
//! A [`Transcript`] is the user-visible, append-only message history of a
//! session. Priming turns never appear in it.

use serde::{Deserialize, Serialize};

use std::fmt;

// Re-export the message types from the llm module (shared by chat and provider code).
pub use crate::llm::{Message, MessageRole};

/// Text appended as the assistant reply whenever a turn fails.
pub const FALLBACK_REPLY: &str = "Sorry, I encountered an error. Please try again.";

/// Ordered, append-only message history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message and return its index.
    pub fn push(&mut self, message: Message) -> usize {
        self.messages.push(message);
        self.messages.len() - 1
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn get(&self, index: usize) -> Option<&Message> {
        self.messages.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }

    pub fn as_slice(&self) -> &[Message] {
        &self.messages
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

/// Whether the persona priming turn has been established.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Readiness {
    /// `start()` has not completed yet.
    Pending,
    /// The priming turn succeeded.
    Ready,
    /// The priming turn failed; the session still accepts turns but the
    /// persona may not be in effect.
    Degraded,
}

impl fmt::Display for Readiness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Readiness::Pending => write!(f, "pending"),
            Readiness::Ready => write!(f, "ready"),
            Readiness::Degraded => write!(f, "degraded"),
        }
    }
}

/// Why a submission was dropped without touching the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    EmptyInput,
    InFlight,
    Disposed,
}

/// Result of a single `submit` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnOutcome {
    /// The remote client replied; its text was appended.
    Replied,
    /// The turn failed and the fallback reply was appended.
    Fallback,
    /// Nothing was appended.
    Rejected(RejectReason),
}

impl TurnOutcome {
    /// True if the submission produced a user + assistant pair.
    pub fn is_accepted(&self) -> bool {
        !matches!(self, TurnOutcome::Rejected(_))
    }
}

/// Change notifications published by a chat session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    MessageAppended { index: usize, message: Message },
    InFlightChanged { in_flight: bool },
    ReadinessChanged { readiness: Readiness },
}
