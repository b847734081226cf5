//! Main dashboard renderer.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::engine::QuizEngine;
use crate::host::state::{HostState, HostView};
use crate::models::{QuizSession, SessionStatus};
use crate::storage::StoragePort;

use super::{help, leaderboard, participant_view, participants};

/// Render the dashboard based on current state.
pub fn render<S: StoragePort>(frame: &mut Frame, engine: &QuizEngine<S>, host: &HostState) {
    let area = frame.area();

    let chunks = Layout::vertical([
        Constraint::Length(3), // Header
        Constraint::Min(10),   // Main content
        Constraint::Length(3), // Last message
        Constraint::Length(3), // Command input
    ])
    .split(area);

    let Some(session) = engine.get_session_by_id(host.session_id) else {
        let missing = Paragraph::new("Quiz session not found")
            .style(Style::default().fg(Color::Red).bold())
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(missing, chunks[1]);
        render_command_input(frame, chunks[3], host);
        return;
    };

    render_header(frame, chunks[0], engine, session);
    render_main_content(frame, chunks[1], engine, session, host);
    render_command_history(frame, chunks[2], host);
    render_command_input(frame, chunks[3], host);
}

/// Render the header with session info.
fn render_header<S: StoragePort>(
    frame: &mut Frame,
    area: Rect,
    engine: &QuizEngine<S>,
    session: &QuizSession,
) {
    let status_color = match session.status {
        SessionStatus::Waiting => Color::Yellow,
        SessionStatus::Active => Color::Green,
        SessionStatus::Completed => Color::Cyan,
    };

    let participants = engine.list_participants(session.id);
    let finished = participants.iter().filter(|p| p.is_finished()).count();

    let header_text = format!(
        " Join Code: {}  |  Status: {}  |  Questions: {}  |  Participants: {}  |  Finished: {}",
        session.join_code,
        session.status,
        session.questions.len(),
        participants.len(),
        finished
    );

    let header = Paragraph::new(header_text)
        .style(Style::default().fg(status_color).bold())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", session.name))
                .title_style(Style::default().fg(Color::Cyan).bold()),
        );

    frame.render_widget(header, area);
}

fn render_main_content<S: StoragePort>(
    frame: &mut Frame,
    area: Rect,
    engine: &QuizEngine<S>,
    session: &QuizSession,
    host: &HostState,
) {
    match &host.current_view {
        HostView::Participants => participants::render(frame, area, engine, session),
        HostView::Leaderboard => leaderboard::render(frame, area, engine, session),
        HostView::ParticipantDetail(name) => {
            participant_view::render(frame, area, engine, session, name)
        }
        HostView::Help => help::render(frame, area),
    }
}

fn render_command_history(frame: &mut Frame, area: Rect, host: &HostState) {
    let history = Paragraph::new(host.last_message())
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::TOP));

    frame.render_widget(history, area);
}

fn render_command_input(frame: &mut Frame, area: Rect, host: &HostState) {
    let input_text = format!("> {}", host.command_input);

    let input = Paragraph::new(input_text)
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(input, area);

    let cursor_x = area.x + 3 + host.command_input.chars().count() as u16;
    let cursor_y = area.y + 1;
    frame.set_cursor_position(Position::new(cursor_x, cursor_y));
}
