pub mod dag;
pub mod node;

pub use dag::Dag;
pub use node::CommitNode;
