use async_trait::async_trait;
use graph::CommitNode;

use crate::error::FinderError;

/// One page of branch history, newest first
#[derive(Debug, Clone)]
pub struct HistoryPage {
    /// Commits in the remote's native order (newest to oldest)
    pub commits: Vec<CommitNode>,
    /// Whether more pages exist beyond this one
    pub has_more: bool,
    /// Opaque pagination token for the next page; set when `has_more` is true
    pub end_cursor: Option<String>,
}

/// Boundary to the remote commit history source.
///
/// The core drives this one page at a time: `cursor` is `None` for the
/// first call and the previous page's `end_cursor` afterwards. Any error
/// aborts the enclosing branch build immediately.
#[async_trait]
pub trait HistoryFetcher: Send + Sync {
    async fn fetch_page(
        &self,
        branch: &str,
        cursor: Option<&str>,
    ) -> Result<HistoryPage, FinderError>;
}
