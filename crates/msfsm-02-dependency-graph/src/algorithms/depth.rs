//! Depth assignment over a verified-acyclic graph.
//!
//! Memoized depth-first traversal: each node's depth is computed once and
//! cached by index. Recursion depth is bounded by the number of automatons.

use super::kahns::ensure_acyclic;
use crate::domain::entities::{DependencyGraph, DepthGroups};
use crate::domain::errors::GraphError;
use std::collections::BTreeMap;

/// Depth of every node, indexed by node. Leaves have depth 1.
///
/// Fails without a partial result if the graph is cyclic.
pub fn assign_depths(graph: &DependencyGraph) -> Result<Vec<usize>, GraphError> {
    ensure_acyclic(graph)?;
    let mut memo: Vec<Option<usize>> = vec![None; graph.node_count()];
    for node in 0..graph.node_count() {
        depth_of(graph, node, &mut memo);
    }
    Ok(memo.into_iter().map(|d| d.unwrap_or(1)).collect())
}

fn depth_of(graph: &DependencyGraph, node: usize, memo: &mut [Option<usize>]) -> usize {
    if let Some(depth) = memo[node] {
        return depth;
    }
    let deepest = graph
        .out_edges(node)
        .iter()
        .map(|&dep| depth_of(graph, dep, memo))
        .max()
        .unwrap_or(0);
    let depth = deepest + 1;
    memo[node] = Some(depth);
    depth
}

/// Groups nodes by depth, ascending index within each group.
pub fn group_by_depth(graph: &DependencyGraph) -> Result<DepthGroups, GraphError> {
    let depths = assign_depths(graph)?;
    let mut groups: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (node, depth) in depths.into_iter().enumerate() {
        groups.entry(depth).or_default().push(node);
    }
    Ok(DepthGroups::new(groups))
}
