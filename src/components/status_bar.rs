use ratatui::{prelude::*, widgets::*};
use thousands::Separable;

use crate::core::state::{AppState, LoadState};

/// Status bar component
///
/// Renders two lines at the bottom of the screen: column position and item
/// counts, then the current status or error message.
#[derive(Debug, Clone)]
pub struct StatusBar;

impl StatusBar {
    pub fn new() -> Self {
        Self
    }

    /// Left side of the info line: column position and counts.
    pub fn info_line(state: &AppState) -> String {
        let Some(column) = state.active_column() else {
            return "No columns configured".to_string();
        };
        let (total, unread) = state
            .subscription(&column.id)
            .map(|data| (data.items.len(), data.items.unread_count()))
            .unwrap_or((0, 0));
        let visible = state.active_feed_len();

        let mut line = format!(
            "{} [{}/{}]  {} shown / {} fetched, {} unread",
            column.title,
            state.ui.active_column + 1,
            state.columns.len(),
            visible.separate_with_commas(),
            total.separate_with_commas(),
            unread.separate_with_commas(),
        );
        if state.user.has_private_access {
            line.push_str("  (private access)");
        }
        line
    }

    /// The message line: errors win over transient status messages.
    pub fn message_line(state: &AppState) -> String {
        let error = state
            .active_column()
            .and_then(|column| state.subscription(&column.id))
            .and_then(|data| data.error_message.clone());
        if let Some(error) = error {
            return error;
        }
        if let Some(message) = &state.system.status_message {
            return message.clone();
        }
        match state
            .active_column()
            .and_then(|column| state.subscription(&column.id))
            .map(|data| data.load_state)
        {
            Some(LoadState::Loading) => "Loading...".to_string(),
            Some(LoadState::LoadingMore) => "Loading more...".to_string(),
            _ => String::new(),
        }
    }

    pub fn view(&self, state: &AppState, frame: &mut Frame<'_>, area: Rect) {
        let layout = Layout::new(
            Direction::Vertical,
            [
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(1),
            ],
        )
        .split(area);
        frame.render_widget(Clear, layout[1]);
        frame.render_widget(Clear, layout[2]);

        let info = Span::styled(
            Self::info_line(state),
            Style::default().fg(Color::Gray).italic(),
        );
        frame.render_widget(
            Paragraph::new(info).style(Style::default().bg(Color::Black)),
            layout[1],
        );

        let has_error = state
            .active_column()
            .and_then(|column| state.subscription(&column.id))
            .is_some_and(|data| data.error_message.is_some());
        let message_style = if has_error {
            Style::default().fg(Color::Red)
        } else {
            Style::default()
        };
        frame.render_widget(
            Paragraph::new(Self::message_line(state)).style(message_style),
            layout[2],
        );
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}
