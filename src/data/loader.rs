use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::models::Question;

/// Error returned when a question file cannot be used.
#[derive(Debug)]
pub enum LoadError {
    /// File could not be read.
    Io { path: PathBuf, source: io::Error },
    /// File is not a valid question list.
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// File parsed but holds no questions.
    Empty { path: PathBuf },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
            LoadError::Parse { path, source } => {
                write!(f, "failed to parse {}: {}", path.display(), source)
            }
            LoadError::Empty { path } => {
                write!(f, "{} must contain at least one question", path.display())
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
            LoadError::Parse { source, .. } => Some(source),
            LoadError::Empty { .. } => None,
        }
    }
}

/// Load a non-empty question list from a JSON file.
pub fn load_questions_from_json<P: AsRef<Path>>(path: P) -> Result<Vec<Question>, LoadError> {
    let path = path.as_ref();

    let json_content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let questions = parse_questions(&json_content).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    if questions.is_empty() {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }

    tracing::debug!(path = %path.display(), count = questions.len(), "loaded questions");
    Ok(questions)
}

/// Parse a question list from JSON text.
pub fn parse_questions(json: &str) -> Result<Vec<Question>, serde_json::Error> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("{}-{}.json", name, uuid::Uuid::new_v4()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_mixed_question_file() {
        let path = temp_file(
            "questions",
            r#"[
                { "id": 1, "text": "typeof typeof 1?", "points": 10, "type": "multiple_choice",
                  "options": ["number", "string"], "correct_answer": "string" },
                { "id": 2, "text": "Capital of France is ___", "points": 4, "type": "fill_in_blank",
                  "blanks": ["capital"], "blank_answers": ["Paris"] },
                { "id": 3, "text": "Match", "points": 3, "type": "matching",
                  "pairs": [{ "left": "A", "right": "1" }] }
            ]"#,
        );
        let questions = load_questions_from_json(&path).unwrap();
        assert_eq!(questions.len(), 3);
        assert_eq!(questions[1].kind.label(), "fill-in-blank");
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_empty_file_is_rejected() {
        let path = temp_file("empty", "[]");
        assert!(matches!(
            load_questions_from_json(&path),
            Err(LoadError::Empty { .. })
        ));
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_questions_from_json("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("failed to read"));
    }
}
