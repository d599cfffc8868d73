use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::config::Config;
use crate::core::feed::FeedController;
use crate::domain::collections::NotificationSet;
use crate::domain::filters::NotificationFilters;

/// Identifier of a column (one logical feed instance).
pub type ColumnId = String;

/// Load state of one subscription, driven by the fetch collaborator and only
/// read here. Exactly one value at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    #[default]
    NotLoaded,
    Loading,
    Loaded,
    LoadingMore,
    Error,
}

impl LoadState {
    /// Whether a fetch is currently in flight for this subscription.
    pub fn is_fetching(&self) -> bool {
        matches!(self, LoadState::Loading | LoadState::LoadingMore)
    }
}

/// Everything observed about one subscription: the raw item collection plus
/// the fetch collaborator's status flags.
///
/// Mutated only by the update function in response to fetch-lifecycle
/// messages; the feed controller holds a read-only view per cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubscriptionData {
    pub items: NotificationSet,
    pub error_message: Option<String>,
    pub load_state: LoadState,
    pub can_fetch_more: bool,
}

/// One configured column: a feed bound to a filter configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    pub filters: NotificationFilters,
}

/// UI-related state
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub active_column: usize,
    pub selected_index: Option<usize>,
}

/// User-related state
#[derive(Debug, Clone, Default)]
pub struct UserState {
    pub has_private_access: bool,
}

/// System-related state
#[derive(Debug, Clone, Default)]
pub struct SystemState {
    pub should_quit: bool,
    pub should_suspend: bool,
    pub status_message: Option<String>,
}

/// Unified application state
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub columns: Vec<Column>,
    pub subscriptions: HashMap<ColumnId, SubscriptionData>,
    pub feeds: HashMap<ColumnId, FeedController>,
    pub ui: UiState,
    pub user: UserState,
    pub system: SystemState,
}

impl AppState {
    /// Initialize AppState from configuration: one subscription and one feed
    /// controller per configured column.
    pub fn new(config: &Config) -> Self {
        let columns: Vec<Column> = config
            .columns
            .iter()
            .map(|column| Column {
                id: column.id.clone(),
                title: column.title.clone(),
                filters: column.filters.clone(),
            })
            .collect();

        let subscriptions = columns
            .iter()
            .map(|column| (column.id.clone(), SubscriptionData::default()))
            .collect();

        let feeds = columns
            .iter()
            .map(|column| {
                (
                    column.id.clone(),
                    FeedController::with_page_size(column.id.clone(), config.per_page),
                )
            })
            .collect();

        let mut state = Self {
            columns,
            subscriptions,
            feeds,
            ui: UiState::default(),
            user: UserState {
                has_private_access: config.has_private_access,
            },
            system: SystemState::default(),
        };

        // Derive initial views once so the first read is already consistent
        let ids: Vec<ColumnId> = state.columns.iter().map(|c| c.id.clone()).collect();
        for id in &ids {
            state.sync_feed(id);
        }
        state
    }

    pub fn column(&self, column_id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == column_id)
    }

    pub fn column_mut(&mut self, column_id: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.id == column_id)
    }

    pub fn subscription(&self, column_id: &str) -> Option<&SubscriptionData> {
        self.subscriptions.get(column_id)
    }

    /// Re-derives one column's filtered view and fetch eligibility from
    /// current inputs. Filtering runs strictly before the eligibility read,
    /// so a stale filtered view is never observable within a cycle.
    pub fn sync_feed(&mut self, column_id: &str) {
        let Some(column) = self.columns.iter().find(|c| c.id == column_id) else {
            return;
        };
        let Some(data) = self.subscriptions.get(column_id) else {
            return;
        };
        if let Some(feed) = self.feeds.get_mut(column_id) {
            feed.sync(data, &column.filters, self.user.has_private_access);
        }
    }

    /// Re-derives every column, e.g. after an access-level change.
    pub fn sync_all_feeds(&mut self) {
        let ids: Vec<ColumnId> = self.columns.iter().map(|c| c.id.clone()).collect();
        for id in &ids {
            self.sync_feed(id);
        }
    }

    /// The currently focused column, if any are configured.
    pub fn active_column(&self) -> Option<&Column> {
        self.columns.get(self.ui.active_column)
    }

    /// Number of items visible in the active column's filtered view.
    pub fn active_feed_len(&self) -> usize {
        self.active_column()
            .and_then(|column| self.feeds.get(&column.id))
            .map(|feed| feed.filtered().len())
            .unwrap_or(0)
    }
}
