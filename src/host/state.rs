//! Dashboard state that is not part of the quiz store.

use uuid::Uuid;

const HISTORY_LIMIT: usize = 100;

/// What the host is currently looking at.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HostView {
    /// Progress of every participant.
    #[default]
    Participants,
    /// Participants ranked by score.
    Leaderboard,
    /// Per-question breakdown for one participant.
    ParticipantDetail(String),
    Help,
}

pub struct HostState {
    /// Session this dashboard is hosting.
    pub session_id: Uuid,
    pub current_view: HostView,
    /// View to return to when leaving Help.
    pub previous_view: Option<HostView>,
    pub command_input: String,
    pub command_history: Vec<String>,
    pub should_quit: bool,
}

impl HostState {
    pub fn new(session_id: Uuid) -> Self {
        Self {
            session_id,
            current_view: HostView::default(),
            previous_view: None,
            command_input: String::new(),
            command_history: Vec::new(),
            should_quit: false,
        }
    }

    pub fn show_help(&mut self) {
        if self.current_view != HostView::Help {
            self.previous_view = Some(std::mem::replace(&mut self.current_view, HostView::Help));
        }
    }

    pub fn close_help(&mut self) {
        self.current_view = self.previous_view.take().unwrap_or_default();
    }

    pub fn add_to_history(&mut self, msg: String) {
        self.command_history.push(msg);
        if self.command_history.len() > HISTORY_LIMIT {
            self.command_history.remove(0);
        }
    }

    pub fn last_message(&self) -> &str {
        self.command_history.last().map(String::as_str).unwrap_or("")
    }
}
