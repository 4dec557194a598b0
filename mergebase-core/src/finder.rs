use std::collections::HashSet;
use std::sync::Arc;

use graph::last_common_commits;
use tracing::debug;

use crate::builder::{build_ancestry, DEFAULT_MAX_COMMITS};
use crate::cache::CommitCache;
use crate::error::FinderError;
use crate::fetcher::HistoryFetcher;
use crate::github::{GithubConfig, GithubFetcher};

/// Finds the most recent commits shared by two branches of one repository.
///
/// The finder keeps a commit cache for its whole lifetime, so repeated
/// queries against branches with shared history reuse already resolved
/// nodes. The cache is never evicted; construct a fresh finder when that
/// growth matters.
pub struct LastCommonCommitsFinder<F> {
    fetcher: F,
    cache: Arc<CommitCache>,
    max_commits: usize,
}

impl LastCommonCommitsFinder<GithubFetcher> {
    /// Finder for a repository hosted on GitHub
    pub fn github(config: GithubConfig) -> Self {
        Self::with_fetcher(GithubFetcher::new(config))
    }
}

impl<F: HistoryFetcher> LastCommonCommitsFinder<F> {
    /// Finder over any history source
    pub fn with_fetcher(fetcher: F) -> Self {
        Self {
            fetcher,
            cache: Arc::new(CommitCache::new()),
            max_commits: DEFAULT_MAX_COMMITS,
        }
    }

    /// Override the per-branch commit ceiling (default 1000)
    pub fn max_commits(mut self, max_commits: usize) -> Self {
        self.max_commits = max_commits;
        self
    }

    /// Commits reachable from both branches that no other commit reachable
    /// from both descends from.
    ///
    /// Both ancestries are walked concurrently; they share the cache but
    /// have no data dependency on each other until the reduction. Ancestry
    /// deeper than the commit ceiling is not walked, so a common ancestor
    /// older than the ceiling on either branch will be missing from the
    /// result. Fetch errors propagate unmodified.
    pub async fn find_last_common_commits(
        &self,
        branch_a: &str,
        branch_b: &str,
    ) -> Result<HashSet<String>, FinderError> {
        let (ancestry_a, ancestry_b) = tokio::try_join!(
            build_ancestry(&self.fetcher, &self.cache, branch_a, self.max_commits),
            build_ancestry(&self.fetcher, &self.cache, branch_b, self.max_commits),
        )?;

        debug!(
            branch_a,
            branch_b,
            commits_a = ancestry_a.dag.node_count(),
            commits_b = ancestry_b.dag.node_count(),
            truncated = ancestry_a.truncated || ancestry_b.truncated,
            "reducing ancestries to common frontier"
        );

        Ok(last_common_commits(&ancestry_a.dag, &ancestry_b.dag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::fixtures::{node, FailingFetcher, FixtureFetcher};

    fn set(ids: &[&str]) -> HashSet<String> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    #[tokio::test]
    async fn diverged_branches_meet_at_their_fork_point() {
        // main: a1 <- a2 <- a3, dev: a1 <- a2 <- b3
        let fetcher = FixtureFetcher::new()
            .branch(
                "main",
                vec![vec![node("a3", &["a2"]), node("a2", &["a1"]), node("a1", &[])]],
            )
            .branch(
                "dev",
                vec![vec![node("b3", &["a2"]), node("a2", &["a1"]), node("a1", &[])]],
            );
        let finder = LastCommonCommitsFinder::with_fetcher(fetcher);

        let commits = finder.find_last_common_commits("main", "dev").await.unwrap();
        assert_eq!(commits, set(&["a2"]));
    }

    #[tokio::test]
    async fn identical_tips_return_the_tip() {
        let fetcher = FixtureFetcher::new()
            .branch("main", vec![vec![node("x", &["a1"]), node("a1", &[])]])
            .branch("copy", vec![vec![node("x", &["a1"]), node("a1", &[])]]);
        let finder = LastCommonCommitsFinder::with_fetcher(fetcher);

        let commits = finder.find_last_common_commits("main", "copy").await.unwrap();
        assert_eq!(commits, set(&["x"]));
    }

    #[tokio::test]
    async fn unrelated_histories_share_nothing() {
        let fetcher = FixtureFetcher::new()
            .branch("main", vec![vec![node("a1", &[])]])
            .branch("orphan", vec![vec![node("b1", &[])]]);
        let finder = LastCommonCommitsFinder::with_fetcher(fetcher);

        let commits = finder
            .find_last_common_commits("main", "orphan")
            .await
            .unwrap();
        assert!(commits.is_empty());
    }

    #[tokio::test]
    async fn merge_history_yields_both_frontier_commits() {
        // x is a parent of y; z is unrelated to both within the intersection.
        let fetcher = FixtureFetcher::new()
            .branch(
                "main",
                vec![vec![
                    node("tip_a", &["y", "z"]),
                    node("y", &["x"]),
                    node("z", &[]),
                    node("x", &[]),
                ]],
            )
            .branch(
                "dev",
                vec![vec![
                    node("tip_b", &["y"]),
                    node("y", &["x"]),
                    node("z", &[]),
                    node("x", &[]),
                ]],
            );
        let finder = LastCommonCommitsFinder::with_fetcher(fetcher);

        let commits = finder.find_last_common_commits("main", "dev").await.unwrap();
        assert_eq!(commits, set(&["y", "z"]));
    }

    #[tokio::test]
    async fn common_ancestor_beyond_the_ceiling_is_absent() {
        // Shared history is the root a0, but a ceiling of 2 never reaches
        // it on either branch: best-effort result is empty, not an error.
        let fetcher = FixtureFetcher::new()
            .branch(
                "main",
                vec![vec![
                    node("a3", &["a2"]),
                    node("a2", &["a1"]),
                    node("a1", &["a0"]),
                    node("a0", &[]),
                ]],
            )
            .branch(
                "dev",
                vec![vec![
                    node("b3", &["b2"]),
                    node("b2", &["b1"]),
                    node("b1", &["a0"]),
                    node("a0", &[]),
                ]],
            );
        let finder = LastCommonCommitsFinder::with_fetcher(fetcher).max_commits(2);

        let commits = finder.find_last_common_commits("main", "dev").await.unwrap();
        assert!(commits.is_empty());
    }

    #[tokio::test]
    async fn repeated_queries_reuse_the_cache() {
        let fetcher = FixtureFetcher::new()
            .branch("main", vec![vec![node("a2", &["a1"]), node("a1", &[])]])
            .branch("dev", vec![vec![node("b2", &["a1"]), node("a1", &[])]]);
        let finder = LastCommonCommitsFinder::with_fetcher(fetcher);

        let first = finder.find_last_common_commits("main", "dev").await.unwrap();
        let second = finder.find_last_common_commits("dev", "main").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first, set(&["a1"]));
        assert_eq!(finder.cache.len(), 3);
    }

    #[tokio::test]
    async fn missing_branch_fails_the_query() {
        let fetcher = FixtureFetcher::new().branch("main", vec![vec![node("a1", &[])]]);
        let finder = LastCommonCommitsFinder::with_fetcher(fetcher);

        let err = finder
            .find_last_common_commits("main", "gone")
            .await
            .unwrap_err();
        assert!(matches!(err, FinderError::BranchNotFound(b) if b == "gone"));
    }

    #[tokio::test]
    async fn remote_failure_propagates() {
        let finder = LastCommonCommitsFinder::with_fetcher(FailingFetcher);
        let err = finder
            .find_last_common_commits("main", "dev")
            .await
            .unwrap_err();
        assert!(matches!(err, FinderError::RemoteUnavailable(_)));
    }
}
