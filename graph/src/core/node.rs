/// A commit node in the DAG
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitNode {
    /// Unique commit ID (SHA)
    pub id: String,
    /// Parent commit IDs; parents are referenced by ID only and resolved to
    /// nodes by the containing graph
    pub parents: Vec<String>,
}

impl CommitNode {
    pub fn new(id: String, parents: Vec<String>) -> Self {
        Self { id, parents }
    }

    /// Check if this is a root commit (no parents)
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    /// Check if this is a merge commit (multiple parents)
    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }
}
