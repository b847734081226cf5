//! Host dashboard event loop.
//!
//! The dashboard does not receive pushes from participants. It re-reads the
//! quiz store on a fixed tick so answers written by other processes show up.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::engine::{join_code, QuizEngine};
use crate::storage::StoragePort;
use crate::terminal;
use crate::QuizError;

use super::commands::{execute_command, CommandResult};
use super::state::{HostState, HostView};
use super::ui;

const INPUT_POLL: Duration = Duration::from_millis(100);

/// Run the dashboard for the session with this join code.
pub async fn run<S: StoragePort>(
    mut engine: QuizEngine<S>,
    code: &str,
    refresh_every: Duration,
) -> Result<(), QuizError> {
    let code = join_code::normalize(code);
    let session_id = engine.find_session(&code)?.id;

    info!(session = %session_id, join_code = %code, "host dashboard opened");
    let mut host = HostState::new(session_id);

    let mut term = terminal::init()?;
    let result = event_loop(&mut term, &mut engine, &mut host, refresh_every).await;
    terminal::restore()?;
    result
}

async fn event_loop<S: StoragePort>(
    term: &mut terminal::AppTerminal,
    engine: &mut QuizEngine<S>,
    host: &mut HostState,
    refresh_every: Duration,
) -> Result<(), QuizError> {
    let mut keys = spawn_key_reader();
    let mut refresh = tokio::time::interval(refresh_every);

    loop {
        term.draw(|frame| ui::render(frame, &*engine, &*host))?;

        tokio::select! {
            _ = refresh.tick() => {
                if let Err(e) = engine.reload() {
                    warn!(error = %e, "failed to refresh quiz store");
                    host.add_to_history(format!("Error: {}", e));
                }
            }
            key = keys.recv() => {
                let Some(key) = key else { break };
                if handle_input(engine, host, key) {
                    break;
                }
            }
        }
    }

    info!(session = %host.session_id, "host dashboard closed");
    Ok(())
}

/// Forward key presses from a blocking reader to the async loop.
fn spawn_key_reader() -> mpsc::UnboundedReceiver<KeyCode> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::task::spawn_blocking(move || {
        loop {
            match event::poll(INPUT_POLL) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                        if tx.send(key.code).is_err() {
                            break;
                        }
                    }
                    Ok(_) => {}
                    Err(e) => {
                        warn!(error = %e, "failed to read terminal event");
                        break;
                    }
                },
                Ok(false) if tx.is_closed() => break,
                Ok(false) => {}
                Err(e) => {
                    warn!(error = %e, "failed to poll terminal events");
                    break;
                }
            }
        }
    });

    rx
}

/// Handle one key press. Returns true if the dashboard should exit.
fn handle_input<S: StoragePort>(
    engine: &mut QuizEngine<S>,
    host: &mut HostState,
    key: KeyCode,
) -> bool {
    if host.current_view == HostView::Help {
        if matches!(key, KeyCode::Esc | KeyCode::Enter) {
            host.close_help();
        }
        return false;
    }

    match key {
        KeyCode::Char(c) => {
            host.command_input.push(c);
        }
        KeyCode::Backspace => {
            host.command_input.pop();
        }
        KeyCode::Enter => {
            let input = std::mem::take(&mut host.command_input);
            match execute_command(engine, host, &input) {
                CommandResult::Ok(Some(msg)) => host.add_to_history(msg),
                CommandResult::Ok(None) => {}
                CommandResult::Error(msg) => host.add_to_history(format!("Error: {}", msg)),
                CommandResult::Quit => return true,
            }
        }
        KeyCode::Esc => {
            host.command_input.clear();
        }
        KeyCode::Tab => {
            host.current_view = match host.current_view {
                HostView::Participants => HostView::Leaderboard,
                _ => HostView::Participants,
            };
        }
        _ => {}
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ScoringMode;
    use crate::models::Question;
    use crate::storage::MemoryStore;

    fn setup() -> (QuizEngine<MemoryStore>, HostState) {
        let mut engine = QuizEngine::open(MemoryStore::new(), ScoringMode::Recompute).unwrap();
        let session = engine
            .create_session("Quiz", vec![Question::multiple_choice(1, "q", 1, &["a"], "a")])
            .unwrap();
        (engine, HostState::new(session.id))
    }

    fn type_line<S: StoragePort>(engine: &mut QuizEngine<S>, host: &mut HostState, line: &str) -> bool {
        for c in line.chars() {
            handle_input(engine, host, KeyCode::Char(c));
        }
        handle_input(engine, host, KeyCode::Enter)
    }

    #[test]
    fn test_typed_command_runs_on_enter() {
        let (mut engine, mut host) = setup();
        assert!(!type_line(&mut engine, &mut host, "startx"));
        assert!(host.last_message().starts_with("Error: Unknown command"));

        handle_input(&mut engine, &mut host, KeyCode::Char('s'));
        handle_input(&mut engine, &mut host, KeyCode::Backspace);
        assert!(host.command_input.is_empty());

        type_line(&mut engine, &mut host, "start");
        assert_eq!(host.last_message(), "Quiz started with 0 participants!");
    }

    #[test]
    fn test_quit_and_tab() {
        let (mut engine, mut host) = setup();
        handle_input(&mut engine, &mut host, KeyCode::Tab);
        assert_eq!(host.current_view, HostView::Leaderboard);
        handle_input(&mut engine, &mut host, KeyCode::Tab);
        assert_eq!(host.current_view, HostView::Participants);
        assert!(type_line(&mut engine, &mut host, "quit"));
    }

    #[test]
    fn test_help_swallows_keys_until_closed() {
        let (mut engine, mut host) = setup();
        type_line(&mut engine, &mut host, "help");
        assert_eq!(host.current_view, HostView::Help);

        handle_input(&mut engine, &mut host, KeyCode::Char('x'));
        assert!(host.command_input.is_empty());
        handle_input(&mut engine, &mut host, KeyCode::Esc);
        assert_eq!(host.current_view, HostView::Participants);
    }
}
