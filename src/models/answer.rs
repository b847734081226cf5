use serde::{Deserialize, Serialize};

use super::question::QuestionKind;

/// A participant's submission for one question.
///
/// The variant must line up with the question it answers: `Choice` for
/// multiple-choice, `Code` for programming, `Blanks` for fill-in-blank
/// and `Matches` for matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Answer {
    Choice(String),
    Code(String),
    /// One entry per blank, in blank order.
    Blanks(Vec<String>),
    /// `left:right` tokens.
    Matches(Vec<String>),
}

impl Answer {
    /// Whether this answer has the shape the given question kind expects.
    pub fn fits(&self, kind: &QuestionKind) -> bool {
        matches!(
            (self, kind),
            (Answer::Choice(_), QuestionKind::MultipleChoice { .. })
                | (Answer::Code(_), QuestionKind::Programming { .. })
                | (Answer::Blanks(_), QuestionKind::FillInBlank { .. })
                | (Answer::Matches(_), QuestionKind::Matching { .. })
        )
    }

    /// Name of the variant, for error messages.
    pub fn shape(&self) -> &'static str {
        match self {
            Answer::Choice(_) => "choice",
            Answer::Code(_) => "code",
            Answer::Blanks(_) => "blanks",
            Answer::Matches(_) => "matches",
        }
    }

    /// Builds an answer of the shape `kind` expects from raw text.
    ///
    /// List shapes are comma separated, e.g. `paris,rome` for blanks or
    /// `A:1,B:2` for matches.
    pub fn parse_for(kind: &QuestionKind, raw: &str) -> Self {
        let list = || {
            raw.split(',')
                .map(|part| part.trim().to_string())
                .filter(|part| !part.is_empty())
                .collect()
        };
        match kind {
            QuestionKind::MultipleChoice { .. } => Answer::Choice(raw.to_string()),
            QuestionKind::Programming { .. } => Answer::Code(raw.to_string()),
            QuestionKind::FillInBlank { .. } => Answer::Blanks(list()),
            QuestionKind::Matching { .. } => Answer::Matches(list()),
        }
    }
}

/// Left and right side of a `left:right` matching token.
///
/// Anything after a second `:` is dropped.
pub fn split_match_token(token: &str) -> Option<(&str, &str)> {
    let mut parts = token.split(':');
    let left = parts.next()?;
    let right = parts.next()?;
    Some((left, right))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Question;

    #[test]
    fn test_answer_fits_only_its_kind() {
        let mcq = Question::multiple_choice(1, "q", 1, &["a"], "a");
        let blanks = Question::fill_in_blank(2, "q", 1, &["_"], &["a"]);
        assert!(Answer::Choice("a".into()).fits(&mcq.kind));
        assert!(!Answer::Blanks(vec!["a".into()]).fits(&mcq.kind));
        assert!(Answer::Blanks(vec!["a".into()]).fits(&blanks.kind));
        assert!(!Answer::Matches(vec![]).fits(&blanks.kind));
    }

    #[test]
    fn test_parse_for_splits_lists() {
        let matching = Question::matching(1, "q", 3, &[("A", "1")]);
        assert_eq!(
            Answer::parse_for(&matching.kind, "A:1, B:2,"),
            Answer::Matches(vec!["A:1".into(), "B:2".into()])
        );
        let mcq = Question::multiple_choice(2, "q", 1, &["a, b"], "a, b");
        assert_eq!(
            Answer::parse_for(&mcq.kind, "a, b"),
            Answer::Choice("a, b".into())
        );
    }

    #[test]
    fn test_split_match_token() {
        assert_eq!(split_match_token("A:1"), Some(("A", "1")));
        assert_eq!(split_match_token("A:1:extra"), Some(("A", "1")));
        assert_eq!(split_match_token("no-colon"), None);
    }
}
