use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::answer::Answer;
use super::question::{ProgrammingLanguage, Question};

/// Lifecycle status of a quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// Accepting participants, host has not started yet.
    Waiting,
    /// Quiz is in progress.
    Active,
    /// Host has ended the quiz.
    Completed,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Waiting => "waiting",
            Self::Active => "active",
            Self::Completed => "completed",
        })
    }
}

/// One running instance of a quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizSession {
    pub id: Uuid,
    pub join_code: String,
    pub name: String,
    /// Snapshot taken at creation; later edits to the source questions do
    /// not reach a running session.
    pub questions: Vec<Question>,
    pub status: SessionStatus,
    pub created_at: DateTime<Utc>,
}

impl QuizSession {
    pub fn question(&self, question_id: u32) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == question_id)
    }

    pub fn total_points(&self) -> u32 {
        self.questions.iter().map(|q| q.points).sum()
    }

    pub fn is_waiting(&self) -> bool {
        self.status == SessionStatus::Waiting
    }
}

/// A person taking part in exactly one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: Uuid,
    pub name: String,
    pub session_id: Uuid,
    pub score: f64,
    #[serde(default)]
    pub answers: BTreeMap<u32, Answer>,
    #[serde(default)]
    pub selected_language: Option<ProgrammingLanguage>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Participant {
    pub fn new(name: String, session_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            session_id,
            score: 0.0,
            answers: BTreeMap::new(),
            selected_language: Some(ProgrammingLanguage::default()),
            completed_at: None,
        }
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    pub fn is_finished(&self) -> bool {
        self.completed_at.is_some()
    }
}
