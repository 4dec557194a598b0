use graph::Dag;
use tracing::{debug, warn};

use crate::cache::CommitCache;
use crate::error::FinderError;
use crate::fetcher::HistoryFetcher;

/// Default ceiling on commits walked per branch
pub const DEFAULT_MAX_COMMITS: usize = 1000;

/// Ancestry of one branch, possibly cut short by the commit ceiling
#[derive(Debug)]
pub struct BranchAncestry {
    pub dag: Dag,
    /// True when the walk stopped at the ceiling with history remaining
    pub truncated: bool,
}

/// Walk `branch` back from its tip one page at a time, accumulating nodes
/// into a fresh graph and the shared cache.
///
/// Reaching `max_commits` is not an error: the result is a truncated prefix
/// of the true ancestry, flagged via [`BranchAncestry::truncated`], and a
/// common-ancestor computation over it may be incomplete. A fetch error
/// discards the partial graph and fails the build; an empty first page
/// yields an empty graph (an empty branch).
pub async fn build_ancestry<F>(
    fetcher: &F,
    cache: &CommitCache,
    branch: &str,
    max_commits: usize,
) -> Result<BranchAncestry, FinderError>
where
    F: HistoryFetcher + ?Sized,
{
    let mut dag = Dag::new();
    let mut cursor: Option<String> = None;
    let mut fetched = 0usize;
    let mut truncated = false;

    loop {
        let page = fetcher.fetch_page(branch, cursor.as_deref()).await?;
        debug!(
            branch,
            commits = page.commits.len(),
            has_more = page.has_more,
            "fetched history page"
        );

        if page.commits.is_empty() {
            break;
        }

        let mut ceiling_hit_mid_page = false;
        for commit in page.commits {
            if fetched >= max_commits {
                ceiling_hit_mid_page = true;
                break;
            }
            let node = cache.intern(commit);
            dag.add_node(node);
            fetched += 1;
        }

        if fetched >= max_commits && (ceiling_hit_mid_page || page.has_more) {
            truncated = true;
            warn!(
                branch,
                max_commits, "ancestry truncated at commit ceiling, result may be incomplete"
            );
            break;
        }

        if !page.has_more {
            break;
        }
        cursor = match page.end_cursor {
            Some(next) => Some(next),
            None => {
                return Err(FinderError::MalformedPage(format!(
                    "page for '{}' claims more history but carries no cursor",
                    branch
                )))
            }
        };
    }

    Ok(BranchAncestry { dag, truncated })
}
