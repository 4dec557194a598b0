use crate::core::Dag;
use std::collections::HashSet;

/// Reduce two branch ancestry graphs to their last common commits.
///
/// A commit qualifies when it appears in both graphs and is not the parent
/// of any other commit appearing in both graphs: being such a parent means a
/// more recent common commit already subsumes it as an ancestor. Parent IDs
/// that neither graph resolves (truncated history) are ignored.
///
/// The relation is symmetric; page ordering during the builds does not
/// affect membership.
pub fn last_common_commits(a: &Dag, b: &Dag) -> HashSet<String> {
    let common: HashSet<&str> = a
        .nodes
        .keys()
        .filter(|id| b.contains(id))
        .map(|id| id.as_str())
        .collect();

    let mut frontier: HashSet<String> = common.iter().map(|id| id.to_string()).collect();
    for id in &common {
        // The node exists in both graphs; either copy carries the same parents.
        if let Some(node) = a.get(id).or_else(|| b.get(id)) {
            for parent in &node.parents {
                if common.contains(parent.as_str()) {
                    frontier.remove(parent.as_str());
                }
            }
        }
    }

    frontier
}
