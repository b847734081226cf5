//! Answer scoring.
//!
//! Multiple-choice answers earn all or nothing. Fill-in-blank and matching
//! answers earn fractional credit proportional to the correct sub-answers.
//! Programming answers are not auto-graded and earn nothing here.

use std::collections::{BTreeMap, HashSet};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::models::{split_match_token, Answer, Question, QuestionKind};

/// How a participant's score reacts to a new submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ScoringMode {
    /// Score is recomputed from the full answer map, so resubmitting the
    /// same answer leaves it unchanged.
    #[default]
    Recompute,
    /// Each submission adds its own credit to the running score, even when
    /// it replaces an earlier answer to the same question. Repeated matching
    /// tokens each earn credit.
    Accumulate,
}

/// Credit earned by `answer` for `question`.
///
/// Mismatched shapes earn nothing. Under [`ScoringMode::Recompute`] a
/// matching pair counts once however often it is repeated.
pub fn score_answer(question: &Question, answer: &Answer, mode: ScoringMode) -> f64 {
    let points = f64::from(question.points);

    match (&question.kind, answer) {
        (QuestionKind::MultipleChoice { correct_answer, .. }, Answer::Choice(choice)) => {
            if choice == correct_answer {
                points
            } else {
                0.0
            }
        }
        (QuestionKind::FillInBlank { blank_answers, .. }, Answer::Blanks(given)) => {
            if blank_answers.is_empty() {
                return 0.0;
            }
            let correct = given
                .iter()
                .zip(blank_answers)
                .filter(|(given, expected)| given.to_lowercase() == expected.to_lowercase())
                .count();
            points * (correct as f64 / blank_answers.len() as f64)
        }
        (QuestionKind::Matching { pairs }, Answer::Matches(tokens)) => {
            if pairs.is_empty() {
                return 0.0;
            }
            let correct = tokens
                .iter()
                .filter_map(|token| split_match_token(token))
                .filter(|(left, right)| {
                    pairs
                        .iter()
                        .any(|pair| pair.left == *left && pair.right == *right)
                });
            let count = match mode {
                ScoringMode::Recompute => correct.collect::<HashSet<_>>().len(),
                ScoringMode::Accumulate => correct.count(),
            };
            points * (count as f64 / pairs.len() as f64)
        }
        _ => 0.0,
    }
}

/// Total credit for every answer whose question is in `questions`.
pub fn score_answers(
    questions: &[Question],
    answers: &BTreeMap<u32, Answer>,
    mode: ScoringMode,
) -> f64 {
    answers
        .iter()
        .filter_map(|(id, answer)| {
            let question = questions.iter().find(|q| q.id == *id)?;
            Some(score_answer(question, answer, mode))
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECOMPUTE: ScoringMode = ScoringMode::Recompute;

    fn blanks(values: &[&str]) -> Answer {
        Answer::Blanks(values.iter().map(|v| v.to_string()).collect())
    }

    fn matches(values: &[&str]) -> Answer {
        Answer::Matches(values.iter().map(|v| v.to_string()).collect())
    }

    #[test]
    fn test_mcq_is_exact_and_case_sensitive() {
        let q = Question::multiple_choice(1, "Pick", 10, &["X", "Y", "Z"], "Y");
        assert_eq!(score_answer(&q, &Answer::Choice("Y".into()), RECOMPUTE), 10.0);
        assert_eq!(score_answer(&q, &Answer::Choice("y".into()), RECOMPUTE), 0.0);
        assert_eq!(score_answer(&q, &Answer::Choice("X".into()), RECOMPUTE), 0.0);
    }

    #[test]
    fn test_fill_in_blank_gives_fractional_credit() {
        let q = Question::fill_in_blank(
            2,
            "Fill",
            8,
            &["a", "b", "c", "d"],
            &["Red", "Green", "Blue", "Black"],
        );
        let score = score_answer(&q, &blanks(&["red", "GREEN", "blue", "white"]), RECOMPUTE);
        assert_eq!(score, 8.0 * 3.0 / 4.0);
    }

    #[test]
    fn test_fill_in_blank_ignores_extra_entries() {
        let q = Question::fill_in_blank(2, "Fill", 2, &["a", "b"], &["x", "y"]);
        assert_eq!(score_answer(&q, &blanks(&["x", "y", "z"]), RECOMPUTE), 2.0);
        assert_eq!(score_answer(&q, &blanks(&["x"]), RECOMPUTE), 1.0);
    }

    #[test]
    fn test_fractional_credit_is_not_rounded() {
        let q = Question::matching(3, "Match", 10, &[("A", "1"), ("B", "2"), ("C", "3")]);
        let score = score_answer(&q, &matches(&["A:1", "B:2"]), RECOMPUTE);
        assert_eq!(score, 10.0 * (2.0 / 3.0));
        assert!(score.fract() != 0.0);
    }

    #[test]
    fn test_matching_is_order_independent_and_counts_duplicates_once() {
        let q = Question::matching(3, "Match", 6, &[("A", "1"), ("B", "2"), ("C", "3")]);
        assert_eq!(score_answer(&q, &matches(&["C:3", "A:1", "B:2"]), RECOMPUTE), 6.0);
        assert_eq!(score_answer(&q, &matches(&["A:1", "A:1", "A:1"]), RECOMPUTE), 2.0);
        assert_eq!(score_answer(&q, &matches(&["A:2", "garbage"]), RECOMPUTE), 0.0);
    }

    #[test]
    fn test_accumulate_credits_every_matching_token() {
        let q = Question::matching(3, "Match", 9, &[("A", "1"), ("B", "2"), ("C", "3")]);
        let repeated = matches(&["A:1", "A:1"]);
        assert_eq!(score_answer(&q, &repeated, RECOMPUTE), 3.0);
        assert_eq!(score_answer(&q, &repeated, ScoringMode::Accumulate), 6.0);
        assert_eq!(score_answer(&q, &matches(&["A:1:x"]), ScoringMode::Accumulate), 3.0);
    }

    #[test]
    fn test_empty_keys_and_wrong_shapes_score_zero() {
        let q = Question::matching(4, "Match", 6, &[]);
        assert_eq!(score_answer(&q, &matches(&["A:1"]), RECOMPUTE), 0.0);

        let mcq = Question::multiple_choice(5, "Pick", 5, &["a"], "a");
        assert_eq!(score_answer(&mcq, &blanks(&["a"]), RECOMPUTE), 0.0);

        let code = Question::programming(6, "Write", 20, vec![]);
        assert_eq!(score_answer(&code, &Answer::Code("return 1".into()), RECOMPUTE), 0.0);
    }

    #[test]
    fn test_score_answers_skips_unknown_questions() {
        let questions = vec![
            Question::multiple_choice(1, "Pick", 10, &["X", "Y"], "Y"),
            Question::fill_in_blank(2, "Fill", 4, &["a", "b"], &["x", "y"]),
        ];
        let mut answers = BTreeMap::new();
        answers.insert(1, Answer::Choice("Y".into()));
        answers.insert(2, blanks(&["x", "n"]));
        answers.insert(99, Answer::Choice("Y".into()));
        assert_eq!(score_answers(&questions, &answers, RECOMPUTE), 12.0);
    }
}
