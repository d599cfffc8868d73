//! Feed column component
//!
//! Displays the active column's filtered notification feed.

use ratatui::{prelude::*, widgets::*};
use tui_widget_list::{ListBuilder, ListView};

use crate::core::state::{AppState, LoadState};
use crate::domain::notification::Notification;
use crate::widgets::NotificationRow;

/// Feed column component
///
/// A stateless view over the active column: the filtered notification list
/// plus a one-line footer describing whether older data can still be loaded.
/// List virtualization is delegated to `tui_widget_list`.
#[derive(Debug, Clone)]
pub struct FeedColumn;

impl FeedColumn {
    /// Create a new feed column component
    pub fn new() -> Self {
        Self
    }

    /// Render the active column's feed
    pub fn view(&self, state: &AppState, frame: &mut Frame<'_>, area: Rect) {
        let Some(column) = state.active_column() else {
            return;
        };
        let (Some(feed), Some(data)) = (
            state.feeds.get(&column.id),
            state.subscription(&column.id),
        ) else {
            return;
        };
        let view = feed.view(data);

        let padding = Padding::new(1, 1, 1, 0);
        let layout = Layout::new(
            Direction::Vertical,
            [Constraint::Min(0), Constraint::Length(1)],
        )
        .split(area);

        let block = Block::default()
            .title(column.title.clone())
            .padding(padding);

        if view.notifications.is_empty() {
            let message = if view.load_state.is_fetching() {
                "Loading..."
            } else {
                "No notifications to display"
            };
            let inner = block.inner(layout[0]);
            frame.render_widget(block, layout[0]);
            frame.render_widget(
                Paragraph::new(message)
                    .style(Style::default().fg(Color::DarkGray))
                    .alignment(Alignment::Center),
                inner,
            );
        } else {
            let rows: Vec<NotificationRow> = view
                .notifications
                .iter()
                .map(|notification| NotificationRow::new(notification.clone(), padding))
                .collect();
            let item_count = rows.len();

            let builder = ListBuilder::new(move |context| {
                let mut row = rows[context.index].clone();
                row.highlight = context.is_selected;
                let height = row.calculate_height();
                (row, height)
            });

            let mut list_state = tui_widget_list::ListState::default();
            list_state.select(state.ui.selected_index);

            let list = ListView::new(builder, item_count)
                .block(block)
                .style(Style::default().fg(Color::White));

            frame.render_stateful_widget(list, layout[0], &mut list_state);
        }

        // The load-more affordance is shown only while eligible
        let footer = if view.load_state == LoadState::LoadingMore {
            "Loading more..."
        } else if view.can_fetch_next_page {
            "— scroll past the end to load older —"
        } else if view.notifications.is_empty() {
            ""
        } else {
            "— end of feed —"
        };
        frame.render_widget(
            Paragraph::new(footer)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            layout[1],
        );
    }

    /// Number of visible notifications in the active column
    pub fn notification_count(state: &AppState) -> usize {
        state.active_feed_len()
    }

    /// The currently selected notification, if any
    pub fn selected_notification(state: &AppState) -> Option<&Notification> {
        let column = state.active_column()?;
        let feed = state.feeds.get(&column.id)?;
        feed.filtered().get(state.ui.selected_index?)
    }

    /// Whether the active column can still load older data
    pub fn can_load_more(state: &AppState) -> bool {
        state
            .active_column()
            .and_then(|column| state.feeds.get(&column.id))
            .map(|feed| feed.fetch_eligible())
            .unwrap_or(false)
    }
}

impl Default for FeedColumn {
    fn default() -> Self {
        Self::new()
    }
}
