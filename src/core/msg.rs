use serde::{Deserialize, Serialize};

use crate::core::state::ColumnId;
use crate::domain::filters::NotificationFilters;
use crate::domain::notification::Notification;

/// Domain messages representing application intent and fetch outcomes.
/// These are processed by the update function; side effects come back out as
/// commands, never performed inline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Msg {
    // Fetch lifecycle, reported by the fetch collaborator
    FetchStarted {
        column_id: ColumnId,
        page: usize,
    },
    FetchCompleted {
        column_id: ColumnId,
        page: usize,
        items: Vec<Notification>,
        can_fetch_more: bool,
    },
    FetchFailed {
        column_id: ColumnId,
        message: String,
    },

    // Fetch triggers
    Refresh {
        column_id: ColumnId,
    },
    FetchNextPage {
        column_id: ColumnId,
        per_page: Option<usize>,
    },

    // Filter configuration
    SetFilters {
        column_id: ColumnId,
        filters: NotificationFilters,
    },
    ClearColumn {
        column_id: ColumnId,
    },
    SetPrivateAccess(bool),

    // Column and list navigation
    NextColumn,
    PrevColumn,
    ScrollUp,
    ScrollDown,
    ScrollToTop,
    ScrollToBottom,
    Select(Option<usize>),

    // System
    Quit,
    Suspend,
    Resume,
    UpdateStatusMessage(String),
    ClearStatusMessage,
    Error(String),
}

impl Msg {
    /// Helper to exclude high-volume messages from debug logging
    pub fn is_frequent(&self) -> bool {
        matches!(self, Msg::ScrollUp | Msg::ScrollDown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_msg_frequent_detection() {
        assert!(Msg::ScrollUp.is_frequent());
        assert!(Msg::ScrollDown.is_frequent());
        assert!(!Msg::Quit.is_frequent());
        assert!(!Msg::Refresh {
            column_id: "inbox".to_string()
        }
        .is_frequent());
    }

    #[test]
    fn test_msg_equality() {
        assert_eq!(Msg::Quit, Msg::Quit);
        assert_ne!(Msg::ScrollUp, Msg::ScrollDown);
        assert_eq!(
            Msg::Refresh {
                column_id: "inbox".to_string()
            },
            Msg::Refresh {
                column_id: "inbox".to_string()
            }
        );
    }

    #[test]
    fn test_msg_serialization() {
        let msg = Msg::FetchNextPage {
            column_id: "inbox".to_string(),
            per_page: Some(25),
        };
        let serialized = serde_json::to_string(&msg).unwrap();
        let deserialized: Msg = serde_json::from_str(&serialized).unwrap();
        assert_eq!(msg, deserialized);
    }
}
