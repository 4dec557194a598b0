pub mod core;
pub mod query;

pub use core::{CommitNode, Dag};
pub use query::last_common_commits;
