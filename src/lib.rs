//! # quiz-engine
//!
//! Quiz sessions with join codes, participants and live scoring.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use quiz_engine::{Answer, Question, QuizEngine, ScoringMode};
//! use quiz_engine::storage::MemoryStore;
//!
//! fn main() -> Result<(), quiz_engine::QuizError> {
//!     let mut engine = QuizEngine::open(MemoryStore::new(), ScoringMode::Recompute)?;
//!
//!     let question = Question::multiple_choice(1, "2 + 2?", 10, &["3", "4"], "4");
//!     let session = engine.create_session("Warm-up", vec![question])?;
//!
//!     let alice = engine.join_session(&session.join_code, "Alice")?;
//!     engine.start_session(session.id)?;
//!     let score = engine.submit_answer(alice.id, 1, Answer::Choice("4".into()))?;
//!     assert_eq!(score, 10.0);
//!
//!     Ok(())
//! }
//! ```

pub mod config;
mod data;
pub mod engine;
pub mod execution;
pub mod host;
pub mod logging;
mod models;
pub mod papers;
pub mod storage;
pub mod terminal;

use std::io;

pub use data::{load_questions_from_json, parse_questions, LoadError};
pub use engine::{EngineError, JoinRejected, QuizEngine, ScoringMode};
pub use models::{
    split_match_token, Answer, MatchingPair, Participant, ProgrammingLanguage, Question,
    QuestionKind, QuestionPaper, QuizSession, SessionStatus, TestCase,
};

/// Error type for quiz operations.
#[derive(Debug)]
pub enum QuizError {
    /// Error loading questions from file.
    Load(LoadError),
    /// Engine rejected an operation.
    Engine(EngineError),
    /// IO error while driving the terminal.
    Io(io::Error),
}

impl std::fmt::Display for QuizError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuizError::Load(e) => write!(f, "Failed to load questions: {}", e),
            QuizError::Engine(e) => write!(f, "{}", e),
            QuizError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for QuizError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QuizError::Load(e) => Some(e),
            QuizError::Engine(e) => Some(e),
            QuizError::Io(e) => Some(e),
        }
    }
}

impl From<LoadError> for QuizError {
    fn from(err: LoadError) -> Self {
        QuizError::Load(err)
    }
}

impl From<EngineError> for QuizError {
    fn from(err: EngineError) -> Self {
        QuizError::Engine(err)
    }
}

impl From<io::Error> for QuizError {
    fn from(err: io::Error) -> Self {
        QuizError::Io(err)
    }
}
