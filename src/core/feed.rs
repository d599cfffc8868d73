use crate::core::cmd::Cmd;
use crate::core::state::{ColumnId, LoadState, SubscriptionData};
use crate::domain::collections::NotificationSet;
use crate::domain::filters::{filter_notifications, NotificationFilters};
use crate::domain::paging::{can_fetch_older, next_page, DEFAULT_PER_PAGE};

/// Inputs the filtered view was last derived from, kept for value-equality
/// change detection.
#[derive(Debug, Clone, PartialEq)]
struct FeedInputs {
    items: NotificationSet,
    filters: NotificationFilters,
    has_private_access: bool,
}

/// Per-column feed controller.
///
/// Owns the derived state of one column: the filtered view of the raw
/// subscription items and the fetch-eligibility flag. [`FeedController::sync`]
/// re-derives both whenever any input changed, in dependency order; the fetch
/// triggers ([`FeedController::refresh`], [`FeedController::fetch_next_page`])
/// turn user intent into at most one fetch-request command each.
///
/// The controller never mutates [`SubscriptionData`] and never retries; fetch
/// outcomes flow back in as new subscription state, and errors are surfaced
/// verbatim through [`FeedView::error_message`].
#[derive(Debug, Clone, PartialEq)]
pub struct FeedController {
    column_id: ColumnId,
    per_page: usize,
    filtered: NotificationSet,
    fetch_eligible: bool,
    last_inputs: Option<FeedInputs>,
}

/// Read-only surface handed to the render layer each cycle.
///
/// `can_fetch_next_page` gates the load-more affordance: when false, the
/// render layer hides it and [`FeedController::fetch_next_page`] is a no-op.
#[derive(Debug, Clone, Copy)]
pub struct FeedView<'a> {
    pub error_message: &'a str,
    pub load_state: LoadState,
    pub notifications: &'a NotificationSet,
    pub can_fetch_next_page: bool,
}

impl FeedController {
    pub fn new(column_id: ColumnId) -> Self {
        Self::with_page_size(column_id, DEFAULT_PER_PAGE)
    }

    /// A controller whose default page size comes from configuration.
    pub fn with_page_size(column_id: ColumnId, per_page: usize) -> Self {
        Self {
            column_id,
            per_page: if per_page == 0 { DEFAULT_PER_PAGE } else { per_page },
            filtered: NotificationSet::new(),
            fetch_eligible: false,
            last_inputs: None,
        }
    }

    pub fn column_id(&self) -> &str {
        &self.column_id
    }

    /// The current filtered view, an order-preserving subsequence of the raw
    /// items it was derived from.
    pub fn filtered(&self) -> &NotificationSet {
        &self.filtered
    }

    /// Whether requesting older data is currently meaningful.
    pub fn fetch_eligible(&self) -> bool {
        self.fetch_eligible
    }

    /// Re-derives the filtered view and the fetch-eligibility flag.
    ///
    /// Filtering (recompute #1) runs first and is skipped only when items,
    /// filters, and access level are all value-equal to the previous cycle.
    /// Eligibility (recompute #2) is then evaluated unconditionally from the
    /// fresh inputs, so it can never read a stale filtered view or a cached
    /// flag from an earlier cycle.
    pub fn sync(
        &mut self,
        data: &SubscriptionData,
        filters: &NotificationFilters,
        has_private_access: bool,
    ) {
        let inputs_changed = self.last_inputs.as_ref().is_none_or(|prev| {
            prev.items != data.items
                || prev.filters != *filters
                || prev.has_private_access != has_private_access
        });

        if inputs_changed {
            self.filtered = filter_notifications(&data.items, filters, has_private_access);
            self.last_inputs = Some(FeedInputs {
                items: data.items.clone(),
                filters: filters.clone(),
                has_private_access,
            });
        }

        // Page semantics are defined over the server's unfiltered ordering,
        // so the watermark compares against the raw items
        self.fetch_eligible = can_fetch_older(filters, &data.items, data.can_fetch_more);
    }

    /// Requests the newest page, unconditionally.
    ///
    /// A refresh always targets page 1 regardless of the historical
    /// watermark, so it is never gated on fetch eligibility.
    pub fn refresh(&self) -> Cmd {
        Cmd::FetchPage {
            column_id: self.column_id.clone(),
            page: 1,
            per_page: self.per_page,
        }
    }

    /// Requests the next page of older data, if fetching more is eligible.
    ///
    /// Returns `None` (and emits nothing) when ineligible. The page number is
    /// computed from the raw item count on every call, never from a count
    /// cached under an earlier filter configuration or page size.
    pub fn fetch_next_page(
        &self,
        data: &SubscriptionData,
        per_page: Option<usize>,
    ) -> Option<Cmd> {
        if !self.fetch_eligible {
            return None;
        }
        let per_page = per_page.unwrap_or(self.per_page);
        Some(Cmd::FetchPage {
            column_id: self.column_id.clone(),
            page: next_page(data.items.len(), per_page),
            per_page,
        })
    }

    /// The render surface for this column, combining derived state with the
    /// subscription's status flags.
    pub fn view<'a>(&'a self, data: &'a SubscriptionData) -> FeedView<'a> {
        FeedView {
            error_message: data.error_message.as_deref().unwrap_or(""),
            load_state: data.load_state,
            notifications: &self.filtered,
            can_fetch_next_page: self.fetch_eligible,
        }
    }
}
