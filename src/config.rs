//! Runtime configuration.
//!
//! Every setting is a global CLI flag with an environment fallback, so a
//! `.env` file next to the store works as well as explicit flags.

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;

use crate::engine::ScoringMode;
use crate::storage::{JsonFileStore, PAPER_STORE_NAME, QUIZ_STORE_NAME};

/// Default polling period of the host dashboard, in seconds.
pub const DEFAULT_REFRESH_SECS: u64 = 2;

#[derive(Args, Debug, Clone)]
pub struct Config {
    /// Directory holding the quiz and question-paper stores
    #[arg(long, global = true, env = "QUIZ_STORE_DIR", default_value = ".quiz")]
    pub store_dir: PathBuf,

    /// How resubmitted answers affect a participant's score
    #[arg(long, global = true, env = "QUIZ_SCORING", value_enum, default_value_t = ScoringMode::Recompute)]
    pub scoring: ScoringMode,

    /// Seconds between dashboard refreshes
    #[arg(long, global = true, env = "QUIZ_REFRESH_SECS", default_value_t = DEFAULT_REFRESH_SECS)]
    pub refresh_secs: u64,

    /// Directory for the dashboard's log files
    #[arg(long, global = true, env = "QUIZ_LOG_DIR", default_value = ".quiz/logs")]
    pub log_dir: PathBuf,
}

impl Config {
    pub fn quiz_store(&self) -> JsonFileStore {
        JsonFileStore::new(&self.store_dir, QUIZ_STORE_NAME)
    }

    pub fn paper_store(&self) -> JsonFileStore {
        JsonFileStore::new(&self.store_dir, PAPER_STORE_NAME)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        config: Config,
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = TestCli::parse_from([
            "quiz-engine",
            "--store-dir",
            "/tmp/quiz",
            "--scoring",
            "accumulate",
            "--refresh-secs",
            "0",
        ]);
        assert_eq!(cli.config.scoring, ScoringMode::Accumulate);
        assert!(cli.config.quiz_store().path().ends_with("quiz/quiz-store.json"));
        assert!(cli.config.paper_store().path().ends_with("quiz/question-papers.json"));
        assert_eq!(cli.config.refresh_interval(), Duration::from_secs(1));
    }
}
