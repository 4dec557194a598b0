pub mod builder;
pub mod cache;
pub mod error;
pub mod fetcher;
pub mod finder;
pub mod github;

pub use builder::{build_ancestry, BranchAncestry, DEFAULT_MAX_COMMITS};
pub use cache::CommitCache;
pub use error::FinderError;
pub use fetcher::{HistoryFetcher, HistoryPage};
pub use finder::LastCommonCommitsFinder;
pub use github::{GithubConfig, GithubFetcher};
