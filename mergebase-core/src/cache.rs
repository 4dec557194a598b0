use dashmap::DashMap;
use graph::CommitNode;
use std::sync::Arc;

/// Cache of resolved commit nodes, shared across branch builds so commits
/// common to several queries are materialized once.
///
/// Entries are write-once: a node's parent list is fixed at creation and the
/// first writer for an ID wins, so concurrent builds may insert without
/// coordination beyond the per-entry lock. The cache is never evicted; a
/// long-lived finder resolving many distinct branches grows without bound.
#[derive(Debug, Default)]
pub struct CommitCache {
    nodes: DashMap<String, Arc<CommitNode>>,
}

impl CommitCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a node, returning the cached instance when the ID was already
    /// resolved by an earlier build
    pub fn intern(&self, node: CommitNode) -> Arc<CommitNode> {
        self.nodes
            .entry(node.id.clone())
            .or_insert_with(|| Arc::new(node))
            .value()
            .clone()
    }

    pub fn get(&self, commit_id: &str) -> Option<Arc<CommitNode>> {
        self.nodes.get(commit_id).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
