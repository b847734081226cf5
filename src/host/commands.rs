//! Host command parser and executor.
//!
//! Handles dashboard commands like `start`, `end`, `view`, etc.

use crate::engine::QuizEngine;
use crate::models::SessionStatus;
use crate::storage::StoragePort;

use super::state::{HostState, HostView};

/// Result of executing a command.
#[derive(Debug, PartialEq)]
pub enum CommandResult {
    /// Command executed successfully with optional message.
    Ok(Option<String>),
    /// Command failed with an error message.
    Error(String),
    /// Dashboard should quit.
    Quit,
}

/// Parse and execute a command.
pub fn execute_command<S: StoragePort>(
    engine: &mut QuizEngine<S>,
    host: &mut HostState,
    input: &str,
) -> CommandResult {
    let input = input.trim();
    if input.is_empty() {
        return CommandResult::Ok(None);
    }

    let parts: Vec<&str> = input.split_whitespace().collect();
    let command = parts[0].to_lowercase();
    let args = &parts[1..];

    match command.as_str() {
        "start" => cmd_start(engine, host),
        "end" | "stop" => cmd_end(engine, host),
        "quit" | "exit" => cmd_quit(host),
        "view" => cmd_view(engine, host, args),
        "board" => cmd_board(host),
        "list" => cmd_list(engine, host),
        "help" | "?" => cmd_help(host),
        _ => CommandResult::Error(format!(
            "Unknown command: {}. Type 'help' for available commands.",
            command
        )),
    }
}

/// Pick up writes from other processes before changing the store, so they
/// are not overwritten by a stale snapshot.
fn refresh<S: StoragePort>(engine: &mut QuizEngine<S>) -> Option<CommandResult> {
    engine
        .reload()
        .err()
        .map(|e| CommandResult::Error(format!("Could not refresh quiz store: {}", e)))
}

/// Start the quiz.
fn cmd_start<S: StoragePort>(engine: &mut QuizEngine<S>, host: &HostState) -> CommandResult {
    if let Some(failed) = refresh(engine) {
        return failed;
    }
    match engine.start_session(host.session_id) {
        Ok(true) => {
            let joined = engine.list_participants(host.session_id).len();
            CommandResult::Ok(Some(format!("Quiz started with {} participants!", joined)))
        }
        Ok(false) => CommandResult::Error("Quiz has already started.".to_string()),
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

/// End the quiz.
fn cmd_end<S: StoragePort>(engine: &mut QuizEngine<S>, host: &mut HostState) -> CommandResult {
    if let Some(failed) = refresh(engine) {
        return failed;
    }
    let already_done = engine
        .get_session_by_id(host.session_id)
        .is_some_and(|s| s.status == SessionStatus::Completed);
    if already_done {
        return CommandResult::Error("Quiz has already ended.".to_string());
    }

    match engine.end_session(host.session_id) {
        Ok(()) => {
            host.current_view = HostView::Leaderboard;
            CommandResult::Ok(Some("Quiz ended. Showing final standings.".to_string()))
        }
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

/// Quit the dashboard. The session itself is left as is.
fn cmd_quit(host: &mut HostState) -> CommandResult {
    host.should_quit = true;
    CommandResult::Quit
}

/// View a specific participant or everyone.
fn cmd_view<S: StoragePort>(
    engine: &QuizEngine<S>,
    host: &mut HostState,
    args: &[&str],
) -> CommandResult {
    if args.is_empty() || args[0].to_lowercase() == "all" {
        host.current_view = HostView::Participants;
        return CommandResult::Ok(Some("Viewing all participants.".to_string()));
    }

    let name = args.join(" ");
    let known = engine
        .list_participants(host.session_id)
        .iter()
        .any(|p| p.name == name);
    if known {
        host.current_view = HostView::ParticipantDetail(name.clone());
        CommandResult::Ok(Some(format!("Viewing participant: {}", name)))
    } else {
        CommandResult::Error(format!("Participant not found: {}", name))
    }
}

fn cmd_board(host: &mut HostState) -> CommandResult {
    host.current_view = HostView::Leaderboard;
    CommandResult::Ok(None)
}

/// List participants with their scores.
fn cmd_list<S: StoragePort>(engine: &QuizEngine<S>, host: &HostState) -> CommandResult {
    let participants: Vec<String> = engine
        .list_participants(host.session_id)
        .iter()
        .map(|p| {
            let status = if p.is_finished() { "done" } else { "playing" };
            format!("{} ({}, {:.1})", p.name, status, p.score)
        })
        .collect();

    if participants.is_empty() {
        CommandResult::Ok(Some("No participants yet.".to_string()))
    } else {
        CommandResult::Ok(Some(format!("Participants: {}", participants.join(", "))))
    }
}

fn cmd_help(host: &mut HostState) -> CommandResult {
    host.show_help();
    CommandResult::Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ScoringMode;
    use crate::models::{Answer, Question};
    use crate::storage::MemoryStore;

    fn setup() -> (QuizEngine<MemoryStore>, HostState, String) {
        let mut engine = QuizEngine::open(MemoryStore::new(), ScoringMode::Recompute).unwrap();
        let session = engine
            .create_session(
                "Friday Quiz",
                vec![Question::multiple_choice(1, "Pick", 10, &["X", "Y"], "Y")],
            )
            .unwrap();
        let host = HostState::new(session.id);
        (engine, host, session.join_code)
    }

    #[test]
    fn test_start_twice() {
        let (mut engine, mut host, code) = setup();
        engine.join_session(&code, "Alice").unwrap();

        assert_eq!(
            execute_command(&mut engine, &mut host, "start"),
            CommandResult::Ok(Some("Quiz started with 1 participants!".to_string()))
        );
        assert!(matches!(
            execute_command(&mut engine, &mut host, "START"),
            CommandResult::Error(_)
        ));
    }

    #[test]
    fn test_start_and_end_keep_other_writers_changes() {
        let store = MemoryStore::new();
        let mut engine = QuizEngine::open(store.clone(), ScoringMode::Recompute).unwrap();
        let questions = vec![Question::multiple_choice(1, "Pick", 10, &["X", "Y"], "Y")];
        let session = engine.create_session("Quiz", questions).unwrap();
        let mut host = HostState::new(session.id);

        let mut player = QuizEngine::open(store.clone(), ScoringMode::Recompute).unwrap();
        let alice = player.join_session(&session.join_code, "Alice").unwrap();

        assert_eq!(
            execute_command(&mut engine, &mut host, "start"),
            CommandResult::Ok(Some("Quiz started with 1 participants!".to_string()))
        );

        player.reload().unwrap();
        player.submit_answer(alice.id, 1, Answer::Choice("Y".into())).unwrap();
        execute_command(&mut engine, &mut host, "end");

        let saved = QuizEngine::open(store, ScoringMode::Recompute).unwrap();
        assert_eq!(saved.list_participants(session.id).len(), 1);
        assert_eq!(saved.get_participant(alice.id).unwrap().score, 10.0);
        assert_eq!(
            saved.get_session_by_id(session.id).unwrap().status,
            SessionStatus::Completed
        );
    }

    #[test]
    fn test_end_switches_to_leaderboard() {
        let (mut engine, mut host, _) = setup();
        execute_command(&mut engine, &mut host, "start");
        assert!(matches!(
            execute_command(&mut engine, &mut host, "end"),
            CommandResult::Ok(Some(_))
        ));
        assert_eq!(host.current_view, HostView::Leaderboard);
        assert!(matches!(
            execute_command(&mut engine, &mut host, "stop"),
            CommandResult::Error(_)
        ));
    }

    #[test]
    fn test_view_by_name_with_spaces() {
        let (mut engine, mut host, code) = setup();
        engine.join_session(&code, "Mary Ann").unwrap();

        execute_command(&mut engine, &mut host, "view Mary Ann");
        assert_eq!(
            host.current_view,
            HostView::ParticipantDetail("Mary Ann".to_string())
        );
        assert!(matches!(
            execute_command(&mut engine, &mut host, "view Bob"),
            CommandResult::Error(_)
        ));
        execute_command(&mut engine, &mut host, "view all");
        assert_eq!(host.current_view, HostView::Participants);
    }

    #[test]
    fn test_list_shows_scores() {
        let (mut engine, mut host, code) = setup();
        assert_eq!(
            execute_command(&mut engine, &mut host, "list"),
            CommandResult::Ok(Some("No participants yet.".to_string()))
        );

        let alice = engine.join_session(&code, "Alice").unwrap();
        engine
            .submit_answer(alice.id, 1, Answer::Choice("Y".into()))
            .unwrap();
        assert_eq!(
            execute_command(&mut engine, &mut host, "list"),
            CommandResult::Ok(Some("Participants: Alice (playing, 10.0)".to_string()))
        );
    }

    #[test]
    fn test_quit_and_unknown() {
        let (mut engine, mut host, _) = setup();
        assert_eq!(execute_command(&mut engine, &mut host, "   "), CommandResult::Ok(None));
        assert!(matches!(
            execute_command(&mut engine, &mut host, "kick bob"),
            CommandResult::Error(_)
        ));
        assert_eq!(execute_command(&mut engine, &mut host, "exit"), CommandResult::Quit);
        assert!(host.should_quit);
    }

    #[test]
    fn test_help_opens_help_view() {
        let (mut engine, mut host, _) = setup();
        execute_command(&mut engine, &mut host, "?");
        assert_eq!(host.current_view, HostView::Help);
    }
}
