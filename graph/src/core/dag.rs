use super::node::CommitNode;
use std::collections::HashMap;
use std::sync::Arc;

/// Directed acyclic graph holding the ancestry of one branch
///
/// Nodes are shared by `Arc` with the process-wide commit cache, so two
/// graphs built for branches with common history point at the same node
/// instances. A parent ID may be absent from the map when the walk that
/// produced the graph was cut short; lookups simply miss.
#[derive(Debug, Clone, Default)]
pub struct Dag {
    /// All nodes indexed by commit ID
    pub nodes: HashMap<String, Arc<CommitNode>>,
}

impl Dag {
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
        }
    }

    /// Add a commit node to the DAG; the first instance for an ID wins
    pub fn add_node(&mut self, node: Arc<CommitNode>) {
        self.nodes.entry(node.id.clone()).or_insert(node);
    }

    pub fn contains(&self, commit_id: &str) -> bool {
        self.nodes.contains_key(commit_id)
    }

    pub fn get(&self, commit_id: &str) -> Option<&Arc<CommitNode>> {
        self.nodes.get(commit_id)
    }

    /// Get parents of a commit, skipping parents the graph never saw
    pub fn get_parents(&self, commit_id: &str) -> Vec<&CommitNode> {
        self.nodes
            .get(commit_id)
            .map(|node| {
                node.parents
                    .iter()
                    .filter_map(|id| self.nodes.get(id).map(|n| n.as_ref()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Get all root commits (no parents)
    pub fn roots(&self) -> Vec<&CommitNode> {
        self.nodes
            .values()
            .filter(|node| node.is_root())
            .map(|node| node.as_ref())
            .collect()
    }

    /// Count of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
