//! The paged-fetch seam and the command executor.
//!
//! The actual network client is an external collaborator: anything that can
//! serve numbered pages of notifications implements [`NotificationSource`].
//! [`CmdExecutor`] bridges commands coming out of the update function to that
//! source, reporting outcomes back as fetch lifecycle messages.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use tokio::sync::mpsc::UnboundedSender;

use crate::core::cmd::{Cmd, CmdResult};
use crate::core::msg::Msg;
use crate::core::state::ColumnId;
use crate::domain::notification::{
    Notification, NotificationId, Reason, Repository, Subject, SubjectKind,
};

/// One page of notifications as delivered by a source, newest first.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedPage {
    pub items: Vec<Notification>,
    pub can_fetch_more: bool,
}

/// A collaborator that serves numbered pages of a column's notifications.
///
/// Requests are fire-and-forget from the controller's point of view; errors
/// are reported as strings and travel back to the UI as data, not panics.
pub trait NotificationSource: Send + Sync {
    #[allow(clippy::type_complexity)]
    fn fetch_page(
        &self,
        column_id: &ColumnId,
        page: usize,
        per_page: usize,
    ) -> Pin<Box<dyn Future<Output = Result<FetchedPage, String>> + Send + '_>>;
}

/// Command executor bridging Elm commands to the fetch collaborator.
///
/// Fetches run on their own tokio task; their lifecycle messages
/// (started, completed, failed) are delivered through the message channel
/// and drained by the application loop.
#[derive(Clone)]
pub struct CmdExecutor {
    source: Arc<dyn NotificationSource>,
    msg_sender: UnboundedSender<Msg>,
}

impl CmdExecutor {
    pub fn new(source: Arc<dyn NotificationSource>, msg_sender: UnboundedSender<Msg>) -> Self {
        Self { source, msg_sender }
    }

    /// Execute a single command
    pub fn execute(&self, cmd: Cmd) -> CmdResult {
        match cmd {
            Cmd::FetchPage {
                column_id,
                page,
                per_page,
            } => {
                let source = Arc::clone(&self.source);
                let sender = self.msg_sender.clone();
                tokio::spawn(async move {
                    let _ = sender.send(Msg::FetchStarted {
                        column_id: column_id.clone(),
                        page,
                    });
                    match source.fetch_page(&column_id, page, per_page).await {
                        Ok(fetched) => {
                            let _ = sender.send(Msg::FetchCompleted {
                                column_id,
                                page,
                                items: fetched.items,
                                can_fetch_more: fetched.can_fetch_more,
                            });
                        }
                        Err(message) => {
                            let _ = sender.send(Msg::FetchFailed { column_id, message });
                        }
                    }
                });
                CmdResult::Pending
            }

            Cmd::LogError { message } => {
                tracing::error!("command error: {message}");
                CmdResult::Success(vec![])
            }

            Cmd::LogInfo { message } => {
                tracing::info!("{message}");
                CmdResult::Success(vec![])
            }

            Cmd::Batch(commands) => {
                for cmd in commands {
                    self.execute(cmd);
                }
                CmdResult::Success(vec![])
            }

            Cmd::None => CmdResult::Success(vec![]),
        }
    }

    /// Execute multiple commands
    pub fn execute_all(&self, commands: Vec<Cmd>) {
        for cmd in commands {
            self.execute(cmd);
        }
    }
}

/// A deterministic in-memory source backing the offline binary and tests.
///
/// Each column holds a fixed pool of generated notifications, newest first;
/// `fetch_page` slices the pool the way a page-numbered remote API would.
#[derive(Debug, Clone)]
pub struct SampleSource {
    pool_size: usize,
}

impl SampleSource {
    pub fn new(pool_size: usize) -> Self {
        Self { pool_size }
    }

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 31, 12, 0, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    fn sample_notification(column_id: &str, index: usize) -> Notification {
        const REASONS: [Reason; 4] = [
            Reason::Mention,
            Reason::ReviewRequested,
            Reason::Subscribed,
            Reason::Comment,
        ];
        const KINDS: [SubjectKind; 3] =
            [SubjectKind::Issue, SubjectKind::PullRequest, SubjectKind::Release];
        const REPOS: [(&str, &str, bool); 3] = [
            ("acme", "widgets", false),
            ("acme", "gadgets", false),
            ("acme", "internal", true),
        ];

        let (owner, name, private) = REPOS[index % REPOS.len()];
        let kind = KINDS[index % KINDS.len()];
        Notification::new(
            NotificationId::new(format!("{column_id}-{index}")),
            Self::base_time() - Duration::hours(index as i64),
            index % 3 != 0,
            REASONS[index % REASONS.len()],
            Subject::new(format!("{kind} update #{index}"), kind),
            Repository::new(owner, name, private),
        )
    }

    /// The full pool for one column, newest first.
    pub fn pool(&self, column_id: &str) -> Vec<Notification> {
        (0..self.pool_size)
            .map(|index| Self::sample_notification(column_id, index))
            .collect()
    }
}

impl Default for SampleSource {
    fn default() -> Self {
        Self::new(33)
    }
}

impl NotificationSource for SampleSource {
    fn fetch_page(
        &self,
        column_id: &ColumnId,
        page: usize,
        per_page: usize,
    ) -> Pin<Box<dyn Future<Output = Result<FetchedPage, String>> + Send + '_>> {
        let pool = self.pool(column_id);
        Box::pin(async move {
            let page = page.max(1);
            let start = (page - 1).saturating_mul(per_page).min(pool.len());
            let end = start.saturating_add(per_page).min(pool.len());
            Ok(FetchedPage {
                items: pool[start..end].to_vec(),
                can_fetch_more: end < pool.len(),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn test_sample_source_pages_are_disjoint_and_ordered() {
        let source = SampleSource::new(25);
        let column = "inbox".to_string();

        let page1 = source.fetch_page(&column, 1, 10).await.unwrap();
        let page2 = source.fetch_page(&column, 2, 10).await.unwrap();
        let page3 = source.fetch_page(&column, 3, 10).await.unwrap();

        assert_eq!(page1.items.len(), 10);
        assert_eq!(page2.items.len(), 10);
        assert_eq!(page3.items.len(), 5);
        assert!(page1.can_fetch_more);
        assert!(page2.can_fetch_more);
        assert!(!page3.can_fetch_more);

        // Newest first across page boundaries
        assert!(page1.items.last().unwrap().updated_at > page2.items[0].updated_at);
    }

    #[tokio::test]
    async fn test_sample_source_past_the_end_is_empty() {
        let source = SampleSource::new(5);
        let column = "inbox".to_string();

        let page = source.fetch_page(&column, 9, 10).await.unwrap();
        assert!(page.items.is_empty());
        assert!(!page.can_fetch_more);
    }

    #[tokio::test]
    async fn test_executor_reports_fetch_lifecycle() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let executor = CmdExecutor::new(Arc::new(SampleSource::new(12)), tx);

        executor.execute(Cmd::FetchPage {
            column_id: "inbox".to_string(),
            page: 1,
            per_page: 10,
        });

        let started = rx.recv().await.unwrap();
        assert_eq!(
            started,
            Msg::FetchStarted {
                column_id: "inbox".to_string(),
                page: 1,
            }
        );

        match rx.recv().await.unwrap() {
            Msg::FetchCompleted {
                column_id,
                page,
                items,
                can_fetch_more,
            } => {
                assert_eq!(column_id, "inbox");
                assert_eq!(page, 1);
                assert_eq!(items.len(), 10);
                assert!(can_fetch_more);
            }
            other => panic!("Expected FetchCompleted, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_executor_batch_and_none() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let executor = CmdExecutor::new(Arc::new(SampleSource::default()), tx);

        executor.execute(Cmd::None);
        executor.execute(Cmd::Batch(vec![Cmd::FetchPage {
            column_id: "inbox".to_string(),
            page: 1,
            per_page: 5,
        }]));

        let started = rx.recv().await.unwrap();
        assert!(matches!(started, Msg::FetchStarted { .. }));
    }
}
