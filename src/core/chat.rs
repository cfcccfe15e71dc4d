//! Assistant chat messages and request lifecycle tracking.

use chrono::{DateTime, Utc};
use std::fmt;

/// Who wrote a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    /// The person using the inventory
    User,
    /// The remote model
    Model,
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => f.write_str("user"),
            Self::Model => f.write_str("model"),
        }
    }
}

/// One message in the assistant conversation. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// Author
    pub role: ChatRole,
    /// Message text
    pub text: String,
    /// When the message was appended
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// A message from the user, stamped now.
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    /// A message from the model, stamped now.
    #[must_use]
    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Model,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Lifecycle of one kind of asynchronous request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestState {
    /// Nothing has been requested yet
    #[default]
    Idle,
    /// A request is outstanding
    Pending,
    /// The last request completed and its result was applied
    Succeeded,
    /// The last request completed but its result could not be applied
    Failed,
}

impl RequestState {
    /// True while a request is outstanding.
    #[must_use]
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }
}

/// Suggested prompts shown while the conversation is empty.
pub const EXAMPLE_QUESTIONS: [&str; 2] = [
    "Which items are low on stock?",
    "What is the total value of Electronics?",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_constructors() {
        let question = ChatMessage::user("How many chairs?");
        let answer = ChatMessage::model("Three.");
        assert_eq!(question.role, ChatRole::User);
        assert_eq!(answer.role, ChatRole::Model);
        assert!(answer.timestamp >= question.timestamp);
    }

    #[test]
    fn test_request_state_default_is_idle() {
        assert_eq!(RequestState::default(), RequestState::Idle);
        assert!(RequestState::Pending.is_pending());
        assert!(!RequestState::Failed.is_pending());
    }
}
