//! Quiz session engine.
//!
//! [`QuizEngine`] owns every session, participant and custom question, and
//! enforces the session lifecycle (`waiting` → `active` → `completed`) and
//! the scoring rules. Each mutating operation writes a fresh snapshot through
//! the engine's [`StoragePort`].

mod error;
pub mod join_code;
mod scoring;
mod state;

use std::cmp::Ordering;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::models::{
    Answer, Participant, ProgrammingLanguage, Question, QuizSession, SessionStatus,
};
use crate::storage::StoragePort;

pub use error::{EngineError, JoinRejected};
pub use scoring::{score_answer, score_answers, ScoringMode};
pub use state::EngineState;

pub struct QuizEngine<S> {
    state: EngineState,
    storage: S,
    scoring: ScoringMode,
}

impl<S: StoragePort> QuizEngine<S> {
    /// Open the engine, restoring the last snapshot held by `storage`.
    pub fn open(storage: S, scoring: ScoringMode) -> Result<Self, EngineError> {
        let state = read_state(&storage)?;
        debug!(
            sessions = state.sessions.len(),
            participants = state.participants.len(),
            "restored quiz store"
        );
        Ok(Self {
            state,
            storage,
            scoring,
        })
    }

    /// Re-read the snapshot, picking up writes made by other processes.
    pub fn reload(&mut self) -> Result<(), EngineError> {
        self.state = read_state(&self.storage)?;
        Ok(())
    }

    pub fn scoring(&self) -> ScoringMode {
        self.scoring
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    /// Apply `change` to a copy of the state and keep the copy only once
    /// its snapshot has been written. A failed change or write leaves the
    /// engine as it was.
    fn update<T>(
        &mut self,
        change: impl FnOnce(&mut EngineState) -> Result<T, EngineError>,
    ) -> Result<T, EngineError> {
        let mut next = self.state.clone();
        let out = change(&mut next)?;
        let snapshot = serde_json::to_string(&next)?;
        self.storage.write(&snapshot).inspect_err(|e| {
            warn!(error = %e, "failed to persist quiz store");
        })?;
        self.state = next;
        Ok(out)
    }

    /// Create a new session in the `waiting` state.
    pub fn create_session(
        &mut self,
        name: &str,
        questions: Vec<Question>,
    ) -> Result<QuizSession, EngineError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EngineError::InvalidInput("quiz name must not be empty"));
        }
        if questions.is_empty() {
            return Err(EngineError::InvalidInput(
                "a quiz needs at least one question",
            ));
        }

        let session = QuizSession {
            id: Uuid::new_v4(),
            join_code: self.fresh_join_code(),
            name: name.to_string(),
            questions,
            status: SessionStatus::Waiting,
            created_at: Utc::now(),
        };
        self.update(|state| {
            state.sessions.push(session.clone());
            Ok(())
        })?;

        info!(
            session = %session.id,
            join_code = %session.join_code,
            questions = session.questions.len(),
            "created quiz session"
        );
        Ok(session)
    }

    fn fresh_join_code(&self) -> String {
        let mut rng = rand::thread_rng();
        loop {
            let code = join_code::generate(&mut rng);
            if !self.state.is_code_taken(&code) {
                return code;
            }
            debug!(code = %code, "join code collision, regenerating");
        }
    }

    /// Look up a session by its exact (already upper-cased) join code.
    pub fn get_session(&self, join_code: &str) -> Option<&QuizSession> {
        self.state.session_by_code(join_code)
    }

    /// Like [`get_session`](Self::get_session), but a missing code is an error.
    pub fn find_session(&self, join_code: &str) -> Result<&QuizSession, EngineError> {
        self.get_session(join_code)
            .ok_or_else(|| EngineError::UnknownJoinCode(join_code.to_string()))
    }

    pub fn get_session_by_id(&self, session_id: Uuid) -> Option<&QuizSession> {
        self.state.session(session_id)
    }

    pub fn sessions(&self) -> &[QuizSession] {
        &self.state.sessions
    }

    /// Move a session from `waiting` to `active`.
    ///
    /// Returns `false` without touching the session when it is not waiting.
    pub fn start_session(&mut self, session_id: Uuid) -> Result<bool, EngineError> {
        let session = self
            .state
            .session(session_id)
            .ok_or(EngineError::SessionNotFound(session_id))?;

        if session.status != SessionStatus::Waiting {
            debug!(session = %session_id, status = %session.status, "start ignored");
            return Ok(false);
        }

        self.update(|state| set_status(state, session_id, SessionStatus::Active))?;
        info!(session = %session_id, "quiz session started");
        Ok(true)
    }

    /// Mark a session completed, whatever its current state.
    pub fn end_session(&mut self, session_id: Uuid) -> Result<(), EngineError> {
        self.update(|state| set_status(state, session_id, SessionStatus::Completed))?;
        info!(session = %session_id, "quiz session ended");
        Ok(())
    }

    /// Add a participant to the session with this join code.
    ///
    /// Only sessions still `waiting` accept participants.
    pub fn join_session(
        &mut self,
        join_code: &str,
        participant_name: &str,
    ) -> Result<Participant, EngineError> {
        let name = participant_name.trim();
        if name.is_empty() {
            return Err(EngineError::InvalidInput("participant name must not be empty"));
        }

        let session = self
            .state
            .session_by_code(join_code)
            .ok_or_else(|| JoinRejected::UnknownCode(join_code.to_string()))?;
        if !session.is_waiting() {
            return Err(JoinRejected::NotWaiting(join_code.to_string()).into());
        }

        let participant = Participant::new(name.to_string(), session.id);
        self.update(|state| {
            state.participants.push(participant.clone());
            Ok(())
        })?;

        info!(
            participant = %participant.id,
            session = %participant.session_id,
            name,
            "participant joined"
        );
        Ok(participant)
    }

    /// Record an answer and update the participant's score.
    ///
    /// An answer for a question outside the participant's session is ignored
    /// and the current score is returned unchanged.
    pub fn submit_answer(
        &mut self,
        participant_id: Uuid,
        question_id: u32,
        answer: Answer,
    ) -> Result<f64, EngineError> {
        let participant = self
            .state
            .participant(participant_id)
            .ok_or(EngineError::ParticipantNotFound(participant_id))?;
        let current = participant.score;

        let Some(session) = self.state.session(participant.session_id) else {
            warn!(participant = %participant_id, session = %participant.session_id, "participant has no session");
            return Ok(current);
        };
        let Some(question) = session.question(question_id) else {
            debug!(participant = %participant_id, question_id, "ignoring answer for unknown question");
            return Ok(current);
        };
        if !answer.fits(&question.kind) {
            return Err(EngineError::AnswerShape {
                question_id,
                expected: question.kind.label(),
                got: answer.shape(),
            });
        }

        let scoring = self.scoring;
        let credit = score_answer(question, &answer, scoring);
        let score = self.update(|state| {
            let EngineState {
                sessions,
                participants,
                ..
            } = state;
            let participant = participants
                .iter_mut()
                .find(|p| p.id == participant_id)
                .ok_or(EngineError::ParticipantNotFound(participant_id))?;
            participant.answers.insert(question_id, answer);
            participant.score = match scoring {
                ScoringMode::Recompute => {
                    let questions = sessions
                        .iter()
                        .find(|s| s.id == participant.session_id)
                        .map(|s| s.questions.as_slice())
                        .unwrap_or_default();
                    score_answers(questions, &participant.answers, scoring)
                }
                ScoringMode::Accumulate => participant.score + credit,
            };
            Ok(participant.score)
        })?;

        debug!(participant = %participant_id, question_id, credit, score, "answer recorded");
        Ok(score)
    }

    /// Participants of a session, in join order.
    pub fn list_participants(&self, session_id: Uuid) -> Vec<&Participant> {
        self.state.participants_of(session_id)
    }

    pub fn participants(&self) -> &[Participant] {
        &self.state.participants
    }

    pub fn get_participant(&self, participant_id: Uuid) -> Option<&Participant> {
        self.state.participant(participant_id)
    }

    pub fn set_participant_language(
        &mut self,
        participant_id: Uuid,
        language: ProgrammingLanguage,
    ) -> Result<(), EngineError> {
        self.update(|state| {
            let participant = state
                .participant_mut(participant_id)
                .ok_or(EngineError::ParticipantNotFound(participant_id))?;
            participant.selected_language = Some(language);
            Ok(())
        })
    }

    /// Stamp the participant's completion time. The first stamp is kept.
    pub fn finish_participant(&mut self, participant_id: Uuid) -> Result<(), EngineError> {
        let participant = self
            .state
            .participant(participant_id)
            .ok_or(EngineError::ParticipantNotFound(participant_id))?;
        if participant.completed_at.is_some() {
            return Ok(());
        }
        self.update(|state| {
            if let Some(participant) = state.participant_mut(participant_id) {
                participant.completed_at = Some(Utc::now());
            }
            Ok(())
        })
    }

    /// Participants ranked by score, then by who finished first.
    pub fn leaderboard(&self, session_id: Uuid) -> Result<Vec<&Participant>, EngineError> {
        if self.state.session(session_id).is_none() {
            return Err(EngineError::SessionNotFound(session_id));
        }

        let mut ranked = self.state.participants_of(session_id);
        ranked.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| match (a.completed_at, b.completed_at) {
                    (Some(a), Some(b)) => a.cmp(&b),
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                })
        });
        Ok(ranked)
    }

    pub fn custom_questions(&self) -> &[Question] {
        &self.state.custom_questions
    }

    /// Add a question to the custom bank under a freshly allocated id.
    pub fn add_question(&mut self, mut question: Question) -> Result<Question, EngineError> {
        question.id = self.state.next_question_id();
        self.update(|state| {
            state.custom_questions.push(question.clone());
            Ok(())
        })?;
        Ok(question)
    }

    /// Replace the custom question with the same id.
    pub fn edit_question(&mut self, question: Question) -> Result<(), EngineError> {
        self.update(|state| {
            let slot = state
                .custom_questions
                .iter_mut()
                .find(|q| q.id == question.id)
                .ok_or(EngineError::QuestionNotFound(question.id))?;
            *slot = question;
            Ok(())
        })
    }

    pub fn delete_question(&mut self, question_id: u32) -> Result<bool, EngineError> {
        if !self.state.custom_questions.iter().any(|q| q.id == question_id) {
            return Ok(false);
        }
        self.update(|state| {
            state.custom_questions.retain(|q| q.id != question_id);
            Ok(())
        })?;
        Ok(true)
    }

    /// Drop every session and participant. The custom question bank is kept.
    pub fn clear(&mut self) -> Result<(), EngineError> {
        self.update(|state| {
            state.sessions.clear();
            state.participants.clear();
            Ok(())
        })?;
        info!("cleared all quiz sessions");
        Ok(())
    }
}

fn set_status(
    state: &mut EngineState,
    session_id: Uuid,
    status: SessionStatus,
) -> Result<(), EngineError> {
    let session = state
        .session_mut(session_id)
        .ok_or(EngineError::SessionNotFound(session_id))?;
    session.status = status;
    Ok(())
}

fn read_state<S: StoragePort>(storage: &S) -> Result<EngineState, EngineError> {
    match storage.read()? {
        Some(snapshot) => Ok(serde_json::from_str(&snapshot)?),
        None => Ok(EngineState::default()),
    }
}
