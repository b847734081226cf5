//! Saved question papers.

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::engine::EngineError;
use crate::models::{Question, QuestionPaper};
use crate::storage::StoragePort;

/// Library of question papers kept in its own store.
pub struct PaperLibrary<S> {
    papers: Vec<QuestionPaper>,
    storage: S,
}

impl<S: StoragePort> PaperLibrary<S> {
    pub fn open(storage: S) -> Result<Self, EngineError> {
        let papers = match storage.read()? {
            Some(snapshot) => serde_json::from_str(&snapshot)?,
            None => Vec::new(),
        };
        Ok(Self { papers, storage })
    }

    /// Write `papers` and adopt them once the write succeeds.
    fn replace(&mut self, papers: Vec<QuestionPaper>) -> Result<(), EngineError> {
        let snapshot = serde_json::to_string(&papers)?;
        self.storage.write(&snapshot)?;
        self.papers = papers;
        Ok(())
    }

    pub fn papers(&self) -> &[QuestionPaper] {
        &self.papers
    }

    /// Save a new paper and return its id.
    pub fn add_paper(&mut self, title: &str, questions: Vec<Question>) -> Result<Uuid, EngineError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(EngineError::InvalidInput("paper title must not be empty"));
        }
        if questions.is_empty() {
            return Err(EngineError::InvalidInput(
                "a paper needs at least one question",
            ));
        }

        let paper = QuestionPaper {
            id: Uuid::new_v4(),
            title: title.to_string(),
            questions,
            created_at: Utc::now(),
        };
        let id = paper.id;
        let count = paper.questions.len();
        let mut papers = self.papers.clone();
        papers.push(paper);
        self.replace(papers)?;
        info!(paper = %id, title, questions = count, "saved question paper");
        Ok(id)
    }

    pub fn get_paper(&self, id: Uuid) -> Option<&QuestionPaper> {
        self.papers.iter().find(|p| p.id == id)
    }

    /// Remove a paper. Returns `false` if it did not exist.
    pub fn delete_paper(&mut self, id: Uuid) -> Result<bool, EngineError> {
        if self.get_paper(id).is_none() {
            return Ok(false);
        }
        let papers = self.papers.iter().filter(|p| p.id != id).cloned().collect();
        self.replace(papers)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{QuizEngine, ScoringMode};
    use crate::storage::{MemoryStore, StorageError};

    /// Store that already holds one snapshot and refuses further writes.
    struct FrozenStore(String);

    impl StoragePort for FrozenStore {
        fn read(&self) -> Result<Option<String>, StorageError> {
            Ok(Some(self.0.clone()))
        }

        fn write(&mut self, _snapshot: &str) -> Result<(), StorageError> {
            Err(std::io::Error::other("read-only store").into())
        }
    }

    fn questions() -> Vec<Question> {
        vec![Question::multiple_choice(1, "Pick", 5, &["a", "b"], "b")]
    }

    #[test]
    fn test_add_get_delete() {
        let store = MemoryStore::new();
        let mut library = PaperLibrary::open(store.clone()).unwrap();
        let id = library.add_paper("Week 1", questions()).unwrap();

        let reopened = PaperLibrary::open(store).unwrap();
        assert_eq!(reopened.get_paper(id).unwrap().title, "Week 1");

        assert!(library.delete_paper(id).unwrap());
        assert!(!library.delete_paper(id).unwrap());
        assert!(library.get_paper(id).is_none());
    }

    #[test]
    fn test_rejects_empty_paper() {
        let mut library = PaperLibrary::open(MemoryStore::new()).unwrap();
        assert!(library.add_paper("", questions()).is_err());
        assert!(library.add_paper("Empty", vec![]).is_err());
        assert!(library.papers().is_empty());
    }

    #[test]
    fn test_one_paper_starts_many_sessions() {
        let mut library = PaperLibrary::open(MemoryStore::new()).unwrap();
        let id = library.add_paper("Week 1", questions()).unwrap();
        let mut engine = QuizEngine::open(MemoryStore::new(), ScoringMode::Recompute).unwrap();

        let paper = library.get_paper(id).unwrap();
        let morning = engine.create_session("Morning", paper.questions.clone()).unwrap();
        let evening = engine.create_session("Evening", paper.questions.clone()).unwrap();
        assert_ne!(morning.join_code, evening.join_code);
        assert_eq!(morning.questions, evening.questions);
    }

    #[test]
    fn test_failed_write_keeps_papers() {
        let store = MemoryStore::new();
        let id = PaperLibrary::open(store.clone())
            .unwrap()
            .add_paper("Week 1", questions())
            .unwrap();
        let snapshot = store.read().unwrap().unwrap();

        let mut library = PaperLibrary::open(FrozenStore(snapshot)).unwrap();
        assert!(library.add_paper("Week 2", questions()).is_err());
        assert!(library.delete_paper(id).is_err());
        assert_eq!(library.papers().len(), 1);
        assert!(library.get_paper(id).is_some());
    }
}
