//! Live progress of every participant.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph};

use crate::engine::QuizEngine;
use crate::models::{QuizSession, SessionStatus};
use crate::storage::StoragePort;

const BAR_WIDTH: usize = 15;

pub fn render<S: StoragePort>(
    frame: &mut Frame,
    area: Rect,
    engine: &QuizEngine<S>,
    session: &QuizSession,
) {
    let chunks = Layout::vertical([
        Constraint::Min(5),    // Participant list
        Constraint::Length(1), // Instructions
    ])
    .margin(1)
    .split(area);

    render_progress(frame, chunks[0], engine, session);
    render_instructions(frame, chunks[1], engine, session);
}

fn render_progress<S: StoragePort>(
    frame: &mut Frame,
    area: Rect,
    engine: &QuizEngine<S>,
    session: &QuizSession,
) {
    let total_questions = session.questions.len();
    let total_points = session.total_points();
    let mut lines: Vec<Line> = Vec::new();

    for participant in engine.list_participants(session.id) {
        let answered = participant.answered_count().min(total_questions);
        let pct = if total_questions > 0 {
            answered as f64 / total_questions as f64
        } else {
            0.0
        };
        let filled = (pct * BAR_WIDTH as f64) as usize;
        let bar = format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled));

        let (marker, color) = if participant.is_finished() {
            ("  + ", Color::Green)
        } else {
            ("  * ", Color::Yellow)
        };

        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(color)),
            Span::styled(
                format!("{:<16}", participant.name),
                Style::default().fg(Color::White),
            ),
            Span::styled(
                format!("[{:>2}/{}] ", answered, total_questions),
                Style::default().fg(color),
            ),
            Span::styled(bar, Style::default().fg(color)),
            Span::styled(
                format!("  {:.1}/{} pts", participant.score, total_points),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    }

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No participants yet...",
            Style::default().fg(Color::DarkGray).italic(),
        )));
    }

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Participants ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );

    frame.render_widget(widget, area);
}

fn render_instructions<S: StoragePort>(
    frame: &mut Frame,
    area: Rect,
    engine: &QuizEngine<S>,
    session: &QuizSession,
) {
    let text = match session.status {
        SessionStatus::Waiting if engine.list_participants(session.id).is_empty() => {
            "Waiting for participants to join...  |  'help' for commands"
        }
        SessionStatus::Waiting => "Type 'start' to begin the quiz  |  'help' for commands",
        SessionStatus::Active => "Type 'end' to finish the quiz  |  Tab for leaderboard",
        SessionStatus::Completed => "Quiz finished  |  'quit' to leave",
    };

    let instructions = Paragraph::new(text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);

    frame.render_widget(instructions, area);
}
