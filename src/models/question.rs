//! Question definitions.
//!
//! A question is a shared header (id, prompt, points) plus a [`QuestionKind`]
//! carrying only the fields that make sense for its type.

use std::collections::BTreeMap;
use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Languages a participant can pick for programming questions.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ProgrammingLanguage {
    C,
    Cpp,
    Java,
    Python,
    #[default]
    Javascript,
    Html,
}

impl fmt::Display for ProgrammingLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::C => "c",
            Self::Cpp => "cpp",
            Self::Java => "java",
            Self::Python => "python",
            Self::Javascript => "javascript",
            Self::Html => "html",
        })
    }
}

/// A single input/expected-output check for a programming question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    pub input: String,
    pub expected_output: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One left/right pair of a matching question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingPair {
    pub left: String,
    pub right: String,
}

impl MatchingPair {
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }
}

/// Type-specific payload of a question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionKind {
    MultipleChoice {
        options: Vec<String>,
        correct_answer: String,
    },
    Programming {
        #[serde(default)]
        initial_code: BTreeMap<ProgrammingLanguage, String>,
        #[serde(default)]
        test_cases: Vec<TestCase>,
    },
    FillInBlank {
        blanks: Vec<String>,
        blank_answers: Vec<String>,
    },
    Matching {
        pairs: Vec<MatchingPair>,
    },
}

impl QuestionKind {
    /// Short label used in listings.
    pub fn label(&self) -> &'static str {
        match self {
            Self::MultipleChoice { .. } => "multiple-choice",
            Self::Programming { .. } => "programming",
            Self::FillInBlank { .. } => "fill-in-blank",
            Self::Matching { .. } => "matching",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: u32,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub points: u32,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

impl Question {
    pub fn multiple_choice(
        id: u32,
        text: impl Into<String>,
        points: u32,
        options: &[&str],
        correct_answer: impl Into<String>,
    ) -> Self {
        Self {
            id,
            text: text.into(),
            image_url: None,
            points,
            kind: QuestionKind::MultipleChoice {
                options: options.iter().map(|o| o.to_string()).collect(),
                correct_answer: correct_answer.into(),
            },
        }
    }

    pub fn fill_in_blank(
        id: u32,
        text: impl Into<String>,
        points: u32,
        blanks: &[&str],
        blank_answers: &[&str],
    ) -> Self {
        Self {
            id,
            text: text.into(),
            image_url: None,
            points,
            kind: QuestionKind::FillInBlank {
                blanks: blanks.iter().map(|b| b.to_string()).collect(),
                blank_answers: blank_answers.iter().map(|a| a.to_string()).collect(),
            },
        }
    }

    pub fn matching(id: u32, text: impl Into<String>, points: u32, pairs: &[(&str, &str)]) -> Self {
        Self {
            id,
            text: text.into(),
            image_url: None,
            points,
            kind: QuestionKind::Matching {
                pairs: pairs
                    .iter()
                    .map(|(left, right)| MatchingPair::new(*left, *right))
                    .collect(),
            },
        }
    }

    pub fn programming(
        id: u32,
        text: impl Into<String>,
        points: u32,
        test_cases: Vec<TestCase>,
    ) -> Self {
        Self {
            id,
            text: text.into(),
            image_url: None,
            points,
            kind: QuestionKind::Programming {
                initial_code: BTreeMap::new(),
                test_cases,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_json_uses_type_tag() {
        let q = Question::multiple_choice(1, "Pick one", 10, &["X", "Y"], "Y");
        let json = serde_json::to_string(&q).unwrap();
        assert!(json.contains("\"type\":\"multiple_choice\""));
        assert!(json.contains("\"correct_answer\":\"Y\""));
        assert!(!json.contains("image_url"));
    }

    #[test]
    fn test_programming_question_parses_starter_code() {
        let json = r#"{
            "id": 2,
            "text": "Write factorial",
            "points": 20,
            "type": "programming",
            "initial_code": { "python": "def f(n):\n    pass", "javascript": "function f(n) {}" },
            "test_cases": [{ "input": "5", "expected_output": "120" }]
        }"#;
        let q: Question = serde_json::from_str(json).unwrap();
        let QuestionKind::Programming {
            initial_code,
            test_cases,
        } = &q.kind
        else {
            panic!("expected a programming question");
        };
        assert_eq!(initial_code.len(), 2);
        assert!(initial_code.contains_key(&ProgrammingLanguage::Python));
        assert_eq!(test_cases[0].description, None);
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let json = r#"{ "id": 1, "text": "?", "points": 1, "type": "essay" }"#;
        assert!(serde_json::from_str::<Question>(json).is_err());
    }
}
