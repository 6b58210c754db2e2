//! Kahn's algorithm for cycle detection.
//!
//! O(V + E). In-degrees are counted over the dependency edges, every
//! zero-in-degree node is enqueued, and dequeuing a node decrements the
//! in-degree of its out-neighbours. The graph is cyclic iff fewer nodes are
//! dequeued than exist.

use crate::domain::entities::DependencyGraph;
use crate::domain::errors::GraphError;
use std::collections::VecDeque;

/// Number of nodes Kahn's algorithm dequeues.
#[must_use]
pub fn kahns_visit_count(graph: &DependencyGraph) -> usize {
    let n = graph.node_count();

    // 1. In-degree per node
    let mut in_degree = vec![0usize; n];
    for (_, to) in graph.edges() {
        in_degree[to] += 1;
    }

    // 2. Seed with zero in-degree nodes, ascending
    let mut queue: VecDeque<usize> = (0..n).filter(|&node| in_degree[node] == 0).collect();

    // 3. Drain
    let mut visited = 0;
    while let Some(node) = queue.pop_front() {
        visited += 1;
        for &neighbor in graph.out_edges(node) {
            in_degree[neighbor] -= 1;
            if in_degree[neighbor] == 0 {
                queue.push_back(neighbor);
            }
        }
    }
    visited
}

/// True iff the graph has at least one cycle (self-edges included).
#[must_use]
pub fn is_cyclic(graph: &DependencyGraph) -> bool {
    kahns_visit_count(graph) < graph.node_count()
}

/// Fails with [`GraphError::CyclicDependency`] if the graph has a cycle.
pub fn ensure_acyclic(graph: &DependencyGraph) -> Result<(), GraphError> {
    let visited = kahns_visit_count(graph);
    let total = graph.node_count();
    if visited < total {
        return Err(GraphError::CyclicDependency { visited, total });
    }
    Ok(())
}
