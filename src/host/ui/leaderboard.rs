use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph};

use crate::engine::QuizEngine;
use crate::models::QuizSession;
use crate::storage::StoragePort;

pub fn render<S: StoragePort>(
    frame: &mut Frame,
    area: Rect,
    engine: &QuizEngine<S>,
    session: &QuizSession,
) {
    let total_points = session.total_points();
    let ranked = engine.leaderboard(session.id).unwrap_or_default();

    let mut lines: Vec<Line> = ranked
        .iter()
        .enumerate()
        .map(|(i, participant)| {
            let rank_color = match i {
                0 => Color::Yellow,
                1 => Color::White,
                2 => Color::LightRed,
                _ => Color::DarkGray,
            };
            let finished = if participant.is_finished() { "done" } else { "" };

            Line::from(vec![
                Span::styled(format!("  #{:<3}", i + 1), Style::default().fg(rank_color).bold()),
                Span::styled(
                    format!("{:<16}", participant.name),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    format!("{:>7.1}/{:<5}", participant.score, total_points),
                    Style::default().fg(Color::Green),
                ),
                Span::styled(finished, Style::default().fg(Color::Cyan)),
            ])
        })
        .collect();

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "  Nobody to rank yet...",
            Style::default().fg(Color::DarkGray).italic(),
        )));
    }

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Leaderboard ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );

    frame.render_widget(widget, area);
}
