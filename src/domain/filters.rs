use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::collections::NotificationSet;
use crate::domain::notification::{Notification, Reason};

/// User-configured filter rules for one column.
///
/// Every field is optional-by-emptiness: an empty rule passes everything, so
/// a default value is the identity filter. `cleared_at` is the watermark —
/// items updated at or before it are considered dismissed and excluded from
/// both display and further fetching.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationFilters {
    #[serde(default)]
    pub cleared_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub unread_only: bool,
    #[serde(default)]
    pub reasons: HashSet<Reason>,
    /// Repository allowlist in `owner/name` form, compared case-insensitively.
    #[serde(default)]
    pub repos: HashSet<String>,
    #[serde(default)]
    pub search: Option<String>,
}

impl NotificationFilters {
    /// Whether a notification passes the user predicates (AND-composed).
    ///
    /// The visibility rule and the cleared-at exclusion are applied by
    /// [`filter_notifications`], not here.
    pub fn passes(&self, notification: &Notification) -> bool {
        self.matches_state(notification)
            && self.matches_reason(notification)
            && self.matches_repo(notification)
            && self.matches_search(notification)
    }

    fn matches_state(&self, notification: &Notification) -> bool {
        !self.unread_only || notification.unread
    }

    fn matches_reason(&self, notification: &Notification) -> bool {
        self.reasons.is_empty() || self.reasons.contains(&notification.reason)
    }

    fn matches_repo(&self, notification: &Notification) -> bool {
        if self.repos.is_empty() {
            return true;
        }
        let full_name = notification.repo.full_name().to_lowercase();
        self.repos.iter().any(|repo| repo.to_lowercase() == full_name)
    }

    fn matches_search(&self, notification: &Notification) -> bool {
        let Some(query) = self.search.as_deref() else {
            return true;
        };
        let query = query.trim().to_lowercase();
        // A blank query is treated as "match everything" rather than an error
        if query.is_empty() {
            return true;
        }
        notification.subject.title.to_lowercase().contains(&query)
            || notification.repo.full_name().to_lowercase().contains(&query)
    }

    /// Whether a notification falls at or behind the cleared-at watermark.
    pub fn is_cleared(&self, notification: &Notification) -> bool {
        match self.cleared_at {
            Some(cleared_at) => notification.updated_at <= cleared_at,
            None => false,
        }
    }
}

/// Filters a raw item collection down to the visible feed.
///
/// Applies, in order: the visibility rule (private-repo items are dropped
/// without private access), the user predicates, and the cleared-at
/// exclusion. Pure and total: input ordering is preserved, the output is a
/// subsequence of the input, and empty input yields empty output.
pub fn filter_notifications(
    items: &NotificationSet,
    filters: &NotificationFilters,
    has_private_access: bool,
) -> NotificationSet {
    items
        .iter()
        .filter(|n| has_private_access || !n.requires_private_access())
        .filter(|n| filters.passes(n))
        .filter(|n| !filters.is_cleared(n))
        .cloned()
        .collect()
}
