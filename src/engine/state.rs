//! Persisted engine state.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Participant, Question, QuizSession};

/// Everything the engine owns, serialized as one snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineState {
    pub sessions: Vec<QuizSession>,
    pub participants: Vec<Participant>,
    /// Host-authored question bank.
    pub custom_questions: Vec<Question>,
}

impl EngineState {
    pub fn session(&self, id: Uuid) -> Option<&QuizSession> {
        self.sessions.iter().find(|s| s.id == id)
    }

    pub fn session_mut(&mut self, id: Uuid) -> Option<&mut QuizSession> {
        self.sessions.iter_mut().find(|s| s.id == id)
    }

    pub fn session_by_code(&self, join_code: &str) -> Option<&QuizSession> {
        self.sessions.iter().find(|s| s.join_code == join_code)
    }

    pub fn is_code_taken(&self, join_code: &str) -> bool {
        self.session_by_code(join_code).is_some()
    }

    pub fn participant(&self, id: Uuid) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    pub fn participant_mut(&mut self, id: Uuid) -> Option<&mut Participant> {
        self.participants.iter_mut().find(|p| p.id == id)
    }

    /// Participants of one session, in join order.
    pub fn participants_of(&self, session_id: Uuid) -> Vec<&Participant> {
        self.participants
            .iter()
            .filter(|p| p.session_id == session_id)
            .collect()
    }

    /// Next free id in the custom question bank.
    pub fn next_question_id(&self) -> u32 {
        self.custom_questions
            .iter()
            .map(|q| q.id)
            .max()
            .map_or(1, |max| max + 1)
    }
}
