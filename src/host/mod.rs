//! Host dashboard.
//!
//! A terminal view of one session's participants with a command line for
//! starting and ending the quiz.

pub mod commands;
mod dashboard;
mod state;
mod ui;

pub use dashboard::run;
pub use state::{HostState, HostView};
