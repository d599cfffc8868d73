use std::collections::HashSet;
use std::fmt;
use std::ops::{Deref, Index};
use std::slice::Iter;
use std::vec::IntoIter;

use chrono::{DateTime, Utc};

use crate::domain::notification::{Notification, NotificationId};

/// An ordered collection of notifications with automatic deduplication.
///
/// Items are kept newest-first by `updated_at` (ties broken by id), the order
/// the upstream source delivers pages in, so merging an overlapping or
/// out-of-order page preserves the feed ordering. Duplicate checking is O(1)
/// on [`NotificationId`]; a re-fetched id is ignored, since items are
/// immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NotificationSet {
    items: Vec<Notification>,
    ids: HashSet<NotificationId>,
}

fn sort_key(notification: &Notification) -> (DateTime<Utc>, &NotificationId) {
    (notification.updated_at, &notification.id)
}

impl NotificationSet {
    /// Creates a new empty set
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            ids: HashSet::new(),
        }
    }

    /// Creates a new set with the specified capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            ids: HashSet::with_capacity(capacity),
        }
    }

    /// Inserts a notification at its reverse-chronological position.
    /// Returns: true if it was actually inserted, false if the id was already present
    pub fn insert(&mut self, notification: Notification) -> bool {
        if !self.ids.insert(notification.id.clone()) {
            return false;
        }
        let position = self
            .items
            .partition_point(|existing| sort_key(existing) > sort_key(&notification));
        self.items.insert(position, notification);
        true
    }

    /// Merges a fetched page into the set, skipping already-known ids.
    /// Returns: how many items were actually added
    pub fn merge(&mut self, page: impl IntoIterator<Item = Notification>) -> usize {
        page.into_iter()
            .filter(|notification| self.insert(notification.clone()))
            .count()
    }

    /// Checks if a NotificationId is contained in the set
    pub fn contains(&self, id: &NotificationId) -> bool {
        self.ids.contains(id)
    }

    /// Gets a notification by index
    pub fn get(&self, index: usize) -> Option<&Notification> {
        self.items.get(index)
    }

    /// Gets the newest notification
    pub fn first(&self) -> Option<&Notification> {
        self.items.first()
    }

    /// Gets the oldest notification
    pub fn last(&self) -> Option<&Notification> {
        self.items.last()
    }

    /// Timestamp of the oldest item held, if any.
    ///
    /// This is the watermark the fetch-eligibility policy compares the
    /// cleared-at boundary against.
    pub fn oldest_date(&self) -> Option<DateTime<Utc>> {
        self.items.last().map(|notification| notification.updated_at)
    }

    /// Timestamp of the newest item held, if any.
    pub fn newest_date(&self) -> Option<DateTime<Utc>> {
        self.items.first().map(|notification| notification.updated_at)
    }

    /// Number of unread items.
    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|n| n.unread).count()
    }

    /// Returns a reference to the internal Vec (read-only)
    pub fn as_slice(&self) -> &[Notification] {
        &self.items
    }

    /// Retains notifications matching a predicate
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&Notification) -> bool,
    {
        let ids = &mut self.ids;
        self.items.retain(|notification| {
            let keep = f(notification);
            if !keep {
                ids.remove(&notification.id);
            }
            keep
        });
        debug_assert_eq!(self.items.len(), self.ids.len());
    }

    /// Clears all notifications
    pub fn clear(&mut self) {
        self.items.clear();
        self.ids.clear();
    }
}

// === Standard library trait implementations ===

impl Deref for NotificationSet {
    type Target = [Notification];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl Index<usize> for NotificationSet {
    type Output = Notification;

    fn index(&self, index: usize) -> &Self::Output {
        &self.items[index]
    }
}

impl AsRef<[Notification]> for NotificationSet {
    fn as_ref(&self) -> &[Notification] {
        &self.items
    }
}

impl IntoIterator for NotificationSet {
    type Item = Notification;
    type IntoIter = IntoIter<Notification>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a NotificationSet {
    type Item = &'a Notification;
    type IntoIter = Iter<'a, Notification>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl FromIterator<Notification> for NotificationSet {
    fn from_iter<T: IntoIterator<Item = Notification>>(iter: T) -> Self {
        let mut set = Self::new();
        for notification in iter {
            set.insert(notification);
        }
        set
    }
}

impl Extend<Notification> for NotificationSet {
    fn extend<T: IntoIterator<Item = Notification>>(&mut self, iter: T) {
        for notification in iter {
            self.insert(notification);
        }
    }
}

impl fmt::Display for NotificationSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NotificationSet[{} notifications]", self.len())
    }
}
