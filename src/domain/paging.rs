use crate::domain::collections::NotificationSet;
use crate::domain::filters::NotificationFilters;

/// Page size used when a fetch trigger does not supply one.
pub const DEFAULT_PER_PAGE: usize = 10;

/// Next page number to request for a page-numbered (cursor-less) API.
///
/// The current page is estimated from how many items have been consumed so
/// far: `ceil(count / per_page)`, clamped to 1 for an empty feed. Minor
/// overlap between pages is acceptable; the collection deduplicates by id.
/// Total: a zero `per_page` falls back to [`DEFAULT_PER_PAGE`].
pub fn next_page(current_item_count: usize, per_page: usize) -> usize {
    let per_page = if per_page == 0 { DEFAULT_PER_PAGE } else { per_page };
    let current_page = current_item_count.div_ceil(per_page).max(1);
    current_page + 1
}

/// Whether fetching older history is still meaningful.
///
/// When a cleared-at watermark is set and sits at or after the oldest item
/// currently held, everything not yet fetched lies at or behind the clear
/// boundary, so fetching more is pointless even if the upstream reports more
/// data. Otherwise the upstream flag is passed through unchanged.
///
/// Evaluated against current inputs on every call; callers must not cache
/// the result across item, watermark, or upstream-flag changes.
pub fn can_fetch_older(
    filters: &NotificationFilters,
    items: &NotificationSet,
    upstream_can_fetch_more: bool,
) -> bool {
    if let (Some(cleared_at), Some(oldest)) = (filters.cleared_at, items.oldest_date()) {
        if cleared_at >= oldest {
            return false;
        }
    }
    upstream_can_fetch_more
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::domain::notification::{
        Notification, NotificationId, Reason, Repository, Subject, SubjectKind,
    };

    fn items_with_days(days: std::ops::RangeInclusive<u32>) -> NotificationSet {
        days.map(|day| {
            Notification::new(
                NotificationId::new(format!("thread-{day}")),
                Utc.with_ymd_and_hms(2026, 3, day, 9, 0, 0).unwrap(),
                true,
                Reason::Subscribed,
                Subject::new(format!("Issue #{day}"), SubjectKind::Issue),
                Repository::new("acme", "widgets", false),
            )
        })
        .collect()
    }

    #[rstest]
    #[case(0, 10, 2)]
    #[case(10, 10, 2)]
    #[case(11, 10, 3)]
    #[case(25, 10, 4)]
    #[case(23, 10, 4)]
    #[case(5, 50, 2)]
    fn test_next_page(#[case] count: usize, #[case] per_page: usize, #[case] expected: usize) {
        assert_eq!(next_page(count, per_page), expected);
    }

    #[test]
    fn test_next_page_zero_per_page_uses_default() {
        assert_eq!(next_page(25, 0), next_page(25, DEFAULT_PER_PAGE));
    }

    #[test]
    fn test_next_page_not_memoized_across_page_sizes() {
        // The same item count yields different pages for different sizes;
        // the caller-supplied size must win every time
        assert_eq!(next_page(30, 10), 4);
        assert_eq!(next_page(30, 30), 2);
    }

    #[test]
    fn test_can_fetch_older_passes_upstream_flag_without_watermark() {
        let items = items_with_days(1..=5);
        let filters = NotificationFilters::default();

        assert!(can_fetch_older(&filters, &items, true));
        assert!(!can_fetch_older(&filters, &items, false));
    }

    #[test]
    fn test_can_fetch_older_false_when_watermark_at_or_after_oldest() {
        let items = items_with_days(1..=5);
        let mut filters = NotificationFilters::default();

        // Watermark after the oldest item: history behind it is all cleared
        filters.cleared_at = Some(Utc.with_ymd_and_hms(2026, 3, 5, 0, 0, 0).unwrap());
        assert!(!can_fetch_older(&filters, &items, true));

        // Watermark exactly at the oldest item's timestamp
        filters.cleared_at = items.oldest_date();
        assert!(!can_fetch_older(&filters, &items, true));
    }

    #[test]
    fn test_can_fetch_older_true_when_watermark_before_oldest() {
        let items = items_with_days(3..=8);
        let filters = NotificationFilters {
            cleared_at: Some(Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap()),
            ..Default::default()
        };

        assert!(can_fetch_older(&filters, &items, true));
        assert!(!can_fetch_older(&filters, &items, false));
    }

    #[test]
    fn test_can_fetch_older_with_empty_items_defers_to_upstream() {
        let filters = NotificationFilters {
            cleared_at: Some(Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap()),
            ..Default::default()
        };

        // No oldest date to compare against yet
        assert!(can_fetch_older(&filters, &NotificationSet::new(), true));
    }
}
