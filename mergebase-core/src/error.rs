use thiserror::Error;

/// Failures surfaced by history fetches and finder queries.
///
/// None of these is retried or downgraded internally: a single failed page
/// fetch aborts the whole branch build, and the error reaches the caller of
/// [`crate::LastCommonCommitsFinder::find_last_common_commits`] unmodified.
#[derive(Debug, Error)]
pub enum FinderError {
    /// The branch reference does not exist in the repository
    #[error("branch not found: {0}")]
    BranchNotFound(String),

    /// The remote rejected the configured credential
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The remote could not be reached or answered outside the protocol
    #[error("remote unavailable: {0}")]
    RemoteUnavailable(String),

    /// A page payload was missing an expected field
    #[error("malformed page: {0}")]
    MalformedPage(String),
}
