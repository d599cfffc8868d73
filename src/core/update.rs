use crate::core::cmd::Cmd;
use crate::core::msg::Msg;
use crate::core::state::{AppState, LoadState};

/// Elm-like update function.
/// Returns new state and list of commands from current state and message.
///
/// Any message that touches a subscription's items, a column's filters, or
/// the access level re-syncs the affected feed controller before returning,
/// so filtered views and fetch eligibility are consistent by the time the
/// next render reads them.
pub fn update(msg: Msg, mut state: AppState) -> (AppState, Vec<Cmd>) {
    match msg {
        // Fetch lifecycle
        Msg::FetchStarted { column_id, page } => {
            if let Some(data) = state.subscriptions.get_mut(&column_id) {
                data.load_state = if page <= 1 {
                    LoadState::Loading
                } else {
                    LoadState::LoadingMore
                };
            }
            (state, vec![])
        }

        Msg::FetchCompleted {
            column_id,
            page,
            items,
            can_fetch_more,
        } => {
            let added = if let Some(data) = state.subscriptions.get_mut(&column_id) {
                let added = data.items.merge(items);
                data.can_fetch_more = can_fetch_more;
                data.error_message = None;
                data.load_state = LoadState::Loaded;
                added
            } else {
                0
            };
            state.sync_feed(&column_id);
            (
                state,
                vec![Cmd::LogInfo {
                    message: format!("column {column_id}: page {page} merged, {added} new items"),
                }],
            )
        }

        Msg::FetchFailed { column_id, message } => {
            if let Some(data) = state.subscriptions.get_mut(&column_id) {
                // Keep the items already shown; only the status changes
                data.error_message = Some(message.clone());
                data.load_state = LoadState::Error;
            }
            state.sync_feed(&column_id);
            (state, vec![Cmd::LogError { message }])
        }

        // Fetch triggers
        Msg::Refresh { column_id } => {
            let cmd = state.feeds.get(&column_id).map(|feed| feed.refresh());
            (state, cmd.into_iter().collect())
        }

        Msg::FetchNextPage {
            column_id,
            per_page,
        } => {
            let cmd = state
                .feeds
                .get(&column_id)
                .zip(state.subscriptions.get(&column_id))
                .and_then(|(feed, data)| feed.fetch_next_page(data, per_page));
            (state, cmd.into_iter().collect())
        }

        // Filter configuration
        Msg::SetFilters { column_id, filters } => {
            if let Some(column) = state.column_mut(&column_id) {
                column.filters = filters;
            }
            state.ui.selected_index = None;
            state.sync_feed(&column_id);
            (state, vec![])
        }

        Msg::ClearColumn { column_id } => {
            // The watermark lands on the newest item currently held, so every
            // item in the feed falls at or behind it
            let newest = state
                .subscriptions
                .get(&column_id)
                .and_then(|data| data.items.newest_date());
            let Some(cleared_at) = newest else {
                return (state, vec![]);
            };
            let title = if let Some(column) = state.column_mut(&column_id) {
                column.filters.cleared_at = Some(cleared_at);
                column.title.clone()
            } else {
                return (state, vec![]);
            };
            state.ui.selected_index = None;
            state.system.status_message = Some(format!("[Cleared] {title}"));
            state.sync_feed(&column_id);
            (state, vec![])
        }

        Msg::SetPrivateAccess(has_private_access) => {
            state.user.has_private_access = has_private_access;
            state.sync_all_feeds();
            (state, vec![])
        }

        // Column navigation
        Msg::NextColumn => {
            if !state.columns.is_empty() {
                state.ui.active_column = (state.ui.active_column + 1) % state.columns.len();
                state.ui.selected_index = None;
            }
            (state, vec![])
        }

        Msg::PrevColumn => {
            if !state.columns.is_empty() {
                let count = state.columns.len();
                state.ui.active_column = (state.ui.active_column + count - 1) % count;
                state.ui.selected_index = None;
            }
            (state, vec![])
        }

        // List navigation
        Msg::ScrollUp => {
            if state.active_feed_len() > 0 {
                let new_index = match state.ui.selected_index {
                    Some(i) if i > 0 => Some(i - 1),
                    Some(_) => Some(0),
                    None => Some(0),
                };
                state.ui.selected_index = new_index;
            }
            (state, vec![])
        }

        Msg::ScrollDown => {
            let len = state.active_feed_len();
            if len == 0 {
                return (state, vec![]);
            }
            let max_index = len.saturating_sub(1);
            match state.ui.selected_index {
                Some(i) if i < max_index => {
                    state.ui.selected_index = Some(i + 1);
                    (state, vec![])
                }
                Some(_) => {
                    // Already at the end of the list: ask for older data.
                    // The controller ignores the request when ineligible.
                    let cmd = state.active_column().map(|c| c.id.clone()).and_then(|id| {
                        state
                            .feeds
                            .get(&id)
                            .zip(state.subscriptions.get(&id))
                            .and_then(|(feed, data)| feed.fetch_next_page(data, None))
                    });
                    (state, cmd.into_iter().collect())
                }
                None => {
                    state.ui.selected_index = Some(0);
                    (state, vec![])
                }
            }
        }

        Msg::ScrollToTop => {
            if state.active_feed_len() > 0 {
                state.ui.selected_index = Some(0);
            }
            (state, vec![])
        }

        Msg::ScrollToBottom => {
            let len = state.active_feed_len();
            if len > 0 {
                state.ui.selected_index = Some(len - 1);
            }
            (state, vec![])
        }

        Msg::Select(index) => {
            state.ui.selected_index = index;
            (state, vec![])
        }

        // System
        Msg::Quit => {
            state.system.should_quit = true;
            (state, vec![])
        }

        Msg::Suspend => {
            state.system.should_suspend = true;
            (state, vec![])
        }

        Msg::Resume => {
            state.system.should_suspend = false;
            (state, vec![])
        }

        Msg::UpdateStatusMessage(message) => {
            state.system.status_message = Some(message);
            (state, vec![])
        }

        Msg::ClearStatusMessage => {
            state.system.status_message = None;
            (state, vec![])
        }

        Msg::Error(error) => {
            state.system.status_message = Some(format!("Error: {error}"));
            (state, vec![])
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::config::{ColumnConfig, Config};
    use crate::domain::filters::NotificationFilters;
    use crate::domain::notification::{
        Notification, NotificationId, Reason, Repository, Subject, SubjectKind,
    };

    fn create_test_state() -> AppState {
        let config = Config {
            per_page: 10,
            columns: vec![
                ColumnConfig {
                    id: "inbox".to_string(),
                    title: "Inbox".to_string(),
                    filters: NotificationFilters::default(),
                },
                ColumnConfig {
                    id: "mentions".to_string(),
                    title: "Mentions".to_string(),
                    filters: NotificationFilters {
                        reasons: [Reason::Mention].into_iter().collect(),
                        ..Default::default()
                    },
                },
            ],
            ..Default::default()
        };
        AppState::new(&config)
    }

    fn notification(day: u32, reason: Reason) -> Notification {
        Notification::new(
            NotificationId::new(format!("thread-{day}")),
            Utc.with_ymd_and_hms(2026, 3, day, 9, 0, 0).unwrap(),
            true,
            reason,
            Subject::new(format!("Issue #{day}"), SubjectKind::Issue),
            Repository::new("acme", "widgets", false),
        )
    }

    fn completed(column_id: &str, days: std::ops::RangeInclusive<u32>, can_fetch_more: bool) -> Msg {
        Msg::FetchCompleted {
            column_id: column_id.to_string(),
            page: 1,
            items: days.rev().map(|day| notification(day, Reason::Subscribed)).collect(),
            can_fetch_more,
        }
    }

    #[test]
    fn test_update_quit() {
        let state = create_test_state();
        let (new_state, cmds) = update(Msg::Quit, state);

        assert!(new_state.system.should_quit);
        assert!(cmds.is_empty());
    }

    #[test]
    fn test_fetch_started_sets_load_state_by_page() {
        let state = create_test_state();

        let (state, _) = update(
            Msg::FetchStarted {
                column_id: "inbox".to_string(),
                page: 1,
            },
            state,
        );
        assert_eq!(state.subscription("inbox").unwrap().load_state, LoadState::Loading);

        let (state, _) = update(
            Msg::FetchStarted {
                column_id: "inbox".to_string(),
                page: 3,
            },
            state,
        );
        assert_eq!(
            state.subscription("inbox").unwrap().load_state,
            LoadState::LoadingMore
        );
    }

    #[test]
    fn test_fetch_completed_merges_and_resyncs_feed() {
        let state = create_test_state();
        let (state, cmds) = update(completed("inbox", 1..=10, true), state);

        let data = state.subscription("inbox").unwrap();
        assert_eq!(data.items.len(), 10);
        assert_eq!(data.load_state, LoadState::Loaded);
        assert!(data.can_fetch_more);

        // The feed controller saw the new items within the same cycle
        assert_eq!(state.feeds["inbox"].filtered().len(), 10);
        assert!(state.feeds["inbox"].fetch_eligible());
        assert_eq!(cmds.len(), 1);
    }

    #[test]
    fn test_fetch_failed_keeps_items_and_surfaces_message() {
        let state = create_test_state();
        let (state, _) = update(completed("inbox", 1..=10, true), state);

        let (state, cmds) = update(
            Msg::FetchFailed {
                column_id: "inbox".to_string(),
                message: "HTTP 502".to_string(),
            },
            state,
        );

        let data = state.subscription("inbox").unwrap();
        assert_eq!(data.load_state, LoadState::Error);
        assert_eq!(data.error_message.as_deref(), Some("HTTP 502"));
        // No data loss on a failed fetch
        assert_eq!(data.items.len(), 10);
        assert_eq!(state.feeds["inbox"].filtered().len(), 10);
        assert_eq!(cmds, vec![Cmd::LogError { message: "HTTP 502".to_string() }]);
    }

    #[test]
    fn test_refresh_is_unconditional_and_identical_across_calls() {
        let state = create_test_state();
        let msg = Msg::Refresh {
            column_id: "inbox".to_string(),
        };

        let (state, first) = update(msg.clone(), state);
        let (state, second) = update(msg, state);

        let expected = Cmd::FetchPage {
            column_id: "inbox".to_string(),
            page: 1,
            per_page: 10,
        };
        assert_eq!(first, vec![expected.clone()]);
        assert_eq!(second, vec![expected]);
        drop(state);
    }

    #[test]
    fn test_fetch_next_page_no_op_when_ineligible() {
        let state = create_test_state();
        // Upstream says nothing more to fetch
        let (state, _) = update(completed("inbox", 1..=10, false), state);

        let (_, cmds) = update(
            Msg::FetchNextPage {
                column_id: "inbox".to_string(),
                per_page: Some(10),
            },
            state,
        );
        assert!(cmds.is_empty());
    }

    #[test]
    fn test_fetch_next_page_emits_computed_page() {
        let state = create_test_state();
        let (state, _) = update(completed("inbox", 1..=23, true), state);

        let (_, cmds) = update(
            Msg::FetchNextPage {
                column_id: "inbox".to_string(),
                per_page: Some(10),
            },
            state,
        );
        assert_eq!(
            cmds,
            vec![Cmd::FetchPage {
                column_id: "inbox".to_string(),
                page: 4,
                per_page: 10,
            }]
        );
    }

    #[test]
    fn test_clear_column_sets_watermark_and_disables_fetch_more() {
        let state = create_test_state();
        let (state, _) = update(completed("inbox", 1..=10, true), state);
        assert!(state.feeds["inbox"].fetch_eligible());

        let (state, _) = update(
            Msg::ClearColumn {
                column_id: "inbox".to_string(),
            },
            state,
        );

        let column = state.column("inbox").unwrap();
        assert_eq!(
            column.filters.cleared_at,
            Some(Utc.with_ymd_and_hms(2026, 3, 10, 9, 0, 0).unwrap())
        );
        // Everything held is now behind the watermark
        assert!(state.feeds["inbox"].filtered().is_empty());
        assert!(!state.feeds["inbox"].fetch_eligible());
        assert!(state.system.status_message.as_deref().unwrap().contains("Inbox"));
    }

    #[test]
    fn test_clear_column_without_items_is_a_no_op() {
        let state = create_test_state();
        let (state, cmds) = update(
            Msg::ClearColumn {
                column_id: "inbox".to_string(),
            },
            state,
        );

        assert!(cmds.is_empty());
        assert_eq!(state.column("inbox").unwrap().filters.cleared_at, None);
    }

    #[test]
    fn test_set_filters_resyncs_filtered_view() {
        let state = create_test_state();
        let (state, _) = update(completed("inbox", 1..=10, true), state);

        let (state, _) = update(
            Msg::SetFilters {
                column_id: "inbox".to_string(),
                filters: NotificationFilters {
                    search: Some("Issue #7".to_string()),
                    ..Default::default()
                },
            },
            state,
        );

        assert_eq!(state.feeds["inbox"].filtered().len(), 1);
        assert_eq!(state.ui.selected_index, None);
    }

    #[test]
    fn test_set_private_access_resyncs_all_feeds() {
        let state = create_test_state();
        let mut private = notification(5, Reason::Subscribed);
        private.repo.private = true;
        let (state, _) = update(
            Msg::FetchCompleted {
                column_id: "inbox".to_string(),
                page: 1,
                items: vec![private],
                can_fetch_more: false,
            },
            state,
        );
        assert_eq!(state.feeds["inbox"].filtered().len(), 0);

        let (state, _) = update(Msg::SetPrivateAccess(true), state);
        assert_eq!(state.feeds["inbox"].filtered().len(), 1);
    }

    #[test]
    fn test_scroll_on_empty_feed_changes_nothing() {
        let state = create_test_state();
        let (state, cmds) = update(Msg::ScrollDown, state);

        assert_eq!(state.ui.selected_index, None);
        assert!(cmds.is_empty());
    }

    #[test]
    fn test_scroll_down_past_end_requests_older_page() {
        let state = create_test_state();
        let (state, _) = update(completed("inbox", 1..=10, true), state);
        let (state, _) = update(Msg::ScrollToBottom, state);
        assert_eq!(state.ui.selected_index, Some(9));

        let (state, cmds) = update(Msg::ScrollDown, state);
        assert_eq!(state.ui.selected_index, Some(9));
        assert_eq!(
            cmds,
            vec![Cmd::FetchPage {
                column_id: "inbox".to_string(),
                page: 2,
                per_page: 10,
            }]
        );
    }

    #[test]
    fn test_scroll_down_past_end_is_silent_when_ineligible() {
        let state = create_test_state();
        let (state, _) = update(completed("inbox", 1..=10, false), state);
        let (state, _) = update(Msg::ScrollToBottom, state);

        let (_, cmds) = update(Msg::ScrollDown, state);
        assert!(cmds.is_empty());
    }

    #[test]
    fn test_column_cycling_wraps_and_resets_selection() {
        let state = create_test_state();
        let (state, _) = update(completed("inbox", 1..=3, false), state);
        let (state, _) = update(Msg::Select(Some(1)), state);

        let (state, _) = update(Msg::NextColumn, state);
        assert_eq!(state.ui.active_column, 1);
        assert_eq!(state.ui.selected_index, None);

        let (state, _) = update(Msg::NextColumn, state);
        assert_eq!(state.ui.active_column, 0);

        let (state, _) = update(Msg::PrevColumn, state);
        assert_eq!(state.ui.active_column, 1);
    }

    #[test]
    fn test_status_messages() {
        let state = create_test_state();
        let (state, _) = update(Msg::UpdateStatusMessage("synced".to_string()), state);
        assert_eq!(state.system.status_message.as_deref(), Some("synced"));

        let (state, _) = update(Msg::ClearStatusMessage, state);
        assert_eq!(state.system.status_message, None);

        let (state, _) = update(Msg::Error("boom".to_string()), state);
        assert_eq!(state.system.status_message.as_deref(), Some("Error: boom"));
    }
}
