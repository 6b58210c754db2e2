//! Core entities for automaton ordering.

use serde::Serialize;
use std::collections::BTreeMap;

/// Directed graph over automaton indices.
///
/// `adjacency[u]` lists the automatons `u` depends on, sorted and
/// deduplicated. A node listing itself is a cycle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    adjacency: Vec<Vec<usize>>,
}

impl DependencyGraph {
    /// Graph with `node_count` nodes and no edges.
    #[must_use]
    pub fn new(node_count: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); node_count],
        }
    }

    /// Graph from an explicit edge list. Out-of-range edges are ignored.
    #[must_use]
    pub fn from_edges(node_count: usize, edges: impl IntoIterator<Item = (usize, usize)>) -> Self {
        let mut graph = Self::new(node_count);
        for (from, to) in edges {
            graph.add_edge(from, to);
        }
        graph
    }

    /// Adds `from → to` unless present. Returns false if it was a duplicate
    /// or out of range.
    pub fn add_edge(&mut self, from: usize, to: usize) -> bool {
        if to >= self.adjacency.len() {
            return false;
        }
        let Some(out) = self.adjacency.get_mut(from) else {
            return false;
        };
        match out.binary_search(&to) {
            Ok(_) => false,
            Err(pos) => {
                out.insert(pos, to);
                true
            }
        }
    }

    /// Check whether `from → to` exists.
    #[must_use]
    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        self.adjacency
            .get(from)
            .is_some_and(|out| out.binary_search(&to).is_ok())
    }

    /// Dependencies of `node`, ascending.
    #[must_use]
    pub fn out_edges(&self, node: usize) -> &[usize] {
        self.adjacency.get(node).map_or(&[][..], Vec::as_slice)
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    /// All edges `(from, to)` in ascending order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(from, out)| out.iter().map(move |&to| (from, to)))
    }
}

/// Automaton indices grouped by depth. Keys start at 1; indices within a
/// group are ascending.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DepthGroups(BTreeMap<usize, Vec<usize>>);

impl DepthGroups {
    pub(crate) fn new(groups: BTreeMap<usize, Vec<usize>>) -> Self {
        Self(groups)
    }

    /// Nodes at `depth`.
    #[must_use]
    pub fn get(&self, depth: usize) -> Option<&[usize]> {
        self.0.get(&depth).map(Vec::as_slice)
    }

    /// `(depth, nodes)` in ascending depth.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[usize])> {
        self.0.iter().map(|(d, nodes)| (*d, nodes.as_slice()))
    }

    /// Deepest layer, 0 for an empty graph.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.0.keys().next_back().copied().unwrap_or(0)
    }

    /// Flattened processing order: ascending depth, then ascending index.
    #[must_use]
    pub fn processing_order(&self) -> Vec<usize> {
        self.0.values().flatten().copied().collect()
    }

    /// Underlying map.
    #[must_use]
    pub fn as_map(&self) -> &BTreeMap<usize, Vec<usize>> {
        &self.0
    }
}

/// One automaton in the deployment plan.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlanStep {
    pub depth: usize,
    pub index: usize,
    pub automaton: String,
    /// Names of the automatons whose addresses this one embeds.
    pub dependencies: Vec<String>,
}

/// Automatons in the order they are generated and deployed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DeploymentPlan {
    pub specification: String,
    pub steps: Vec<PlanStep>,
}

impl DeploymentPlan {
    /// Number of automatons to deploy.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True if there is nothing to deploy.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Steps at `depth`.
    pub fn at_depth(&self, depth: usize) -> impl Iterator<Item = &PlanStep> {
        self.steps.iter().filter(move |s| s.depth == depth)
    }
}
