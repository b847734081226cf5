use std::fmt;

use uuid::Uuid;

use crate::storage::StorageError;

/// Why a participant could not join a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinRejected {
    /// No session uses this join code.
    UnknownCode(String),
    /// The session exists but is no longer accepting participants.
    NotWaiting(String),
}

impl fmt::Display for JoinRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinRejected::UnknownCode(code) => write!(f, "no quiz found with code {}", code),
            JoinRejected::NotWaiting(code) => {
                write!(f, "quiz {} has already started", code)
            }
        }
    }
}

/// Error type for engine operations.
#[derive(Debug)]
pub enum EngineError {
    SessionNotFound(Uuid),
    /// No session uses this join code.
    UnknownJoinCode(String),
    ParticipantNotFound(Uuid),
    QuestionNotFound(u32),
    PaperNotFound(Uuid),
    Join(JoinRejected),
    /// Submitted answer does not have the shape the question expects.
    AnswerShape {
        question_id: u32,
        expected: &'static str,
        got: &'static str,
    },
    /// A precondition on caller input was violated.
    InvalidInput(&'static str),
    Storage(StorageError),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::SessionNotFound(id) => write!(f, "session not found: {}", id),
            EngineError::UnknownJoinCode(code) => {
                write!(f, "no quiz session with join code {}", code)
            }
            EngineError::ParticipantNotFound(id) => write!(f, "participant not found: {}", id),
            EngineError::QuestionNotFound(id) => write!(f, "question not found: {}", id),
            EngineError::PaperNotFound(id) => write!(f, "question paper not found: {}", id),
            EngineError::Join(reason) => write!(f, "unable to join quiz: {}", reason),
            EngineError::AnswerShape {
                question_id,
                expected,
                got,
            } => write!(
                f,
                "question {} is {}, cannot accept a {} answer",
                question_id, expected, got
            ),
            EngineError::InvalidInput(msg) => f.write_str(msg),
            EngineError::Storage(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Storage(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StorageError> for EngineError {
    fn from(err: StorageError) -> Self {
        EngineError::Storage(err)
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::Storage(StorageError::Serde(err))
    }
}

impl From<JoinRejected> for EngineError {
    fn from(reason: JoinRejected) -> Self {
        EngineError::Join(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_and_join_failures_read_differently() {
        let lookup = EngineError::UnknownJoinCode("ABC123".into());
        assert_eq!(lookup.to_string(), "no quiz session with join code ABC123");

        let join = EngineError::from(JoinRejected::UnknownCode("ABC123".into()));
        assert_eq!(join.to_string(), "unable to join quiz: no quiz found with code ABC123");
    }
}
