//! Detail view of one participant.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph};

use crate::engine::{score_answer, QuizEngine, ScoringMode};
use crate::models::{Participant, QuizSession};
use crate::storage::StoragePort;

/// Render the participant detail view.
pub fn render<S: StoragePort>(
    frame: &mut Frame,
    area: Rect,
    engine: &QuizEngine<S>,
    session: &QuizSession,
    name: &str,
) {
    let participants = engine.list_participants(session.id);
    let Some(participant) = participants.iter().find(|p| p.name == name) else {
        let not_found = Paragraph::new(format!("Participant '{}' not found", name))
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(" Participant "));
        frame.render_widget(not_found, area);
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(5), // Header
        Constraint::Min(5),    // Per-question credit
        Constraint::Length(3), // Stats
    ])
    .margin(1)
    .split(area);

    render_header(frame, chunks[0], participant);
    render_answers(frame, chunks[1], session, participant, engine.scoring());
    render_stats(frame, chunks[2], session, participant);
}

fn render_header(frame: &mut Frame, area: Rect, participant: &Participant) {
    let (status, color) = match participant.completed_at {
        Some(at) => (format!("Finished at {}", at.format("%H:%M:%S")), Color::Cyan),
        None => ("Answering".to_string(), Color::Green),
    };
    let language = participant
        .selected_language
        .map(|l| l.to_string())
        .unwrap_or_else(|| "-".to_string());

    let header_text = vec![
        Line::from(vec![
            Span::styled("  Name:     ", Style::default().fg(Color::DarkGray)),
            Span::styled(participant.name.clone(), Style::default().fg(Color::White).bold()),
        ]),
        Line::from(vec![
            Span::styled("  Language: ", Style::default().fg(Color::DarkGray)),
            Span::styled(language, Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(vec![
            Span::styled("  Status:   ", Style::default().fg(Color::DarkGray)),
            Span::styled(status, Style::default().fg(color)),
        ]),
    ];

    let header = Paragraph::new(header_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" Viewing: {} ", participant.name))
            .title_style(Style::default().fg(Color::Cyan)),
    );

    frame.render_widget(header, area);
}

fn render_answers(
    frame: &mut Frame,
    area: Rect,
    session: &QuizSession,
    participant: &Participant,
    mode: ScoringMode,
) {
    let lines: Vec<Line> = session
        .questions
        .iter()
        .map(|question| {
            let (credit, color) = match participant.answers.get(&question.id) {
                Some(answer) => {
                    let credit = score_answer(question, answer, mode);
                    let color = if credit >= f64::from(question.points) {
                        Color::Green
                    } else if credit > 0.0 {
                        Color::Yellow
                    } else {
                        Color::Red
                    };
                    (format!("{:.1}/{}", credit, question.points), color)
                }
                None => ("---".to_string(), Color::DarkGray),
            };

            Line::from(vec![
                Span::styled(
                    format!("  Q{:<3}", question.id),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("{:<16}", question.kind.label()),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(credit, Style::default().fg(color)),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Answers ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );

    frame.render_widget(widget, area);
}

fn render_stats(frame: &mut Frame, area: Rect, session: &QuizSession, participant: &Participant) {
    let total_points = session.total_points();
    let pct = if total_points > 0 {
        (participant.score / f64::from(total_points)) * 100.0
    } else {
        0.0
    };

    let stats_text = format!(
        "  Answered: {}/{}  |  Score: {:.1}/{}  ({:.0}%)",
        participant.answered_count(),
        session.questions.len(),
        participant.score,
        total_points,
        pct
    );

    let color = match pct as u32 {
        90.. => Color::Green,
        70..=89 => Color::Cyan,
        50..=69 => Color::Yellow,
        _ => Color::Red,
    };

    let stats = Paragraph::new(stats_text)
        .style(Style::default().fg(color))
        .block(Block::default().borders(Borders::TOP));

    frame.render_widget(stats, area);
}
