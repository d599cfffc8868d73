use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumString};

/// Identity of a notification thread, assigned by the upstream service.
///
/// Two fetched records with the same id describe the same thread; collections
/// deduplicate on it. The inner string is opaque to this crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NotificationId(String);

impl NotificationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NotificationId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Why the upstream service delivered a notification.
///
/// `Other` absorbs values this crate does not know about, so a new upstream
/// reason never fails deserialization or filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Reason {
    Assign,
    Author,
    Comment,
    Invitation,
    Manual,
    Mention,
    ReviewRequested,
    SecurityAlert,
    StateChange,
    Subscribed,
    TeamMention,
    Other,
}

impl<'de> Deserialize<'de> for Reason {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        // Unknown labels fall back to Other instead of failing the feed
        Ok(label.parse().unwrap_or(Reason::Other))
    }
}

/// What kind of thing a notification points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SubjectKind {
    Issue,
    PullRequest,
    Commit,
    Release,
    Discussion,
    CheckSuite,
    Other,
}

impl<'de> Deserialize<'de> for SubjectKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        Ok(label.parse().unwrap_or(SubjectKind::Other))
    }
}

/// The thing a notification is about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub title: String,
    pub kind: SubjectKind,
}

impl Subject {
    pub fn new(title: impl Into<String>, kind: SubjectKind) -> Self {
        Self {
            title: title.into(),
            kind,
        }
    }
}

/// The repository a notification belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub owner: String,
    pub name: String,
    pub private: bool,
}

impl Repository {
    pub fn new(owner: impl Into<String>, name: impl Into<String>, private: bool) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            private,
        }
    }

    /// `owner/name` form used for display and repo filtering.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

/// A single feed item: an identifiable, timestamped notification record.
///
/// Immutable once fetched. Identity is [`NotificationId`]; `updated_at` is
/// the timestamp the feed is ordered and cleared by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub updated_at: DateTime<Utc>,
    pub unread: bool,
    pub reason: Reason,
    pub subject: Subject,
    pub repo: Repository,
}

impl Notification {
    pub fn new(
        id: NotificationId,
        updated_at: DateTime<Utc>,
        unread: bool,
        reason: Reason,
        subject: Subject,
        repo: Repository,
    ) -> Self {
        Self {
            id,
            updated_at,
            unread,
            reason,
            subject,
            repo,
        }
    }

    /// Whether this item requires private-repository access to be shown.
    pub fn requires_private_access(&self) -> bool {
        self.repo.private
    }
}
