mod answer;
mod paper;
mod question;
mod session;

pub use answer::{split_match_token, Answer};
pub use paper::QuestionPaper;
pub use question::{MatchingPair, ProgrammingLanguage, Question, QuestionKind, TestCase};
pub use session::{Participant, QuizSession, SessionStatus};
