//! Checking programming answers against test cases.
//!
//! Only the contract lives here. Running untrusted code needs an isolated
//! runner with time and memory limits, which this crate does not provide;
//! callers plug one in through [`CodeRunner`].

use serde::{Deserialize, Serialize};

use crate::models::TestCase;

/// Executes submitted source against one input.
pub trait CodeRunner {
    /// Returns the program's output, or a description of the failure.
    fn run(&self, source: &str, input: &str) -> Result<String, String>;
}

/// Outcome of one test case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub success: bool,
    pub output: Option<String>,
    pub expected: String,
    pub error: Option<String>,
}

/// Run `source` on `test_case` and compare trimmed output.
///
/// Runner failures come back in `error`; this never fails itself.
pub fn evaluate<R: CodeRunner + ?Sized>(
    runner: &R,
    source: &str,
    test_case: &TestCase,
) -> ExecutionResult {
    let expected = test_case.expected_output.trim().to_string();

    match runner.run(source, &test_case.input) {
        Ok(output) => {
            let output = output.trim().to_string();
            ExecutionResult {
                success: output == expected,
                output: Some(output),
                expected,
                error: None,
            }
        }
        Err(error) => {
            tracing::debug!(%error, "code runner failed");
            ExecutionResult {
                success: false,
                output: None,
                expected,
                error: Some(error),
            }
        }
    }
}
