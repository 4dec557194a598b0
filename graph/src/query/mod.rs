pub mod frontier;

pub use frontier::last_common_commits;
