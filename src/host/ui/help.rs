//! Help view for the dashboard.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph};

const COMMANDS: [(&str, &str); 8] = [
    ("start", "Start the quiz (waiting only)"),
    ("end / stop", "End the quiz and show standings"),
    ("list", "List participants with scores"),
    ("view <name>", "Per-question breakdown of a participant"),
    ("view all", "Show everyone's progress"),
    ("board", "Show the leaderboard"),
    ("help / ?", "Show this help"),
    ("quit / exit", "Leave the dashboard"),
];

/// Render the help view.
pub fn render(frame: &mut Frame, area: Rect) {
    let mut help_text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "AVAILABLE COMMANDS",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
    ];

    help_text.extend(COMMANDS.iter().map(|(command, description)| {
        Line::from(vec![
            Span::styled(format!("  {:<15}", command), Style::default().fg(Color::Yellow)),
            Span::raw(*description),
        ])
    }));

    help_text.push(Line::from(""));
    help_text.push(Line::from(Span::styled(
        "Tab switches between progress and leaderboard. Press Esc or Enter to close.",
        Style::default().fg(Color::DarkGray),
    )));

    let widget = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Help ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(2)),
    );

    frame.render_widget(widget, area);
}
