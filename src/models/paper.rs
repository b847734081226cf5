use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::question::Question;

/// A saved, reusable list of questions that can start many sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionPaper {
    pub id: Uuid,
    pub title: String,
    pub questions: Vec<Question>,
    pub created_at: DateTime<Utc>,
}
