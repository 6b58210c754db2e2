//! Builds the automaton dependency graph and the deployment plan.

use super::depth::group_by_depth;
use crate::domain::entities::{DependencyGraph, DeploymentPlan, PlanStep};
use crate::domain::errors::GraphError;
use msfsm_01_specification::{AutomatonId, Specification};
use tracing::{debug, instrument};

/// One node per automaton (by index) and an edge `u → v` for every
/// `automata__<v>__*` condition of `u`.
#[must_use]
pub fn build_dependency_graph(specification: &Specification) -> DependencyGraph {
    let mut graph = DependencyGraph::new(specification.len());
    for automaton in specification.automatons() {
        for dependency in automaton.dependencies() {
            graph.add_edge(automaton.id.index(), dependency.index());
        }
    }
    graph
}

impl DeploymentPlan {
    /// Orders the automatons of `specification` by ascending depth, then index.
    #[instrument(skip(specification), fields(specification = %specification.name))]
    pub fn from_specification(specification: &Specification) -> Result<Self, GraphError> {
        let graph = build_dependency_graph(specification);
        let groups = group_by_depth(&graph)?;

        let name_of = |index: usize| {
            specification
                .automaton(AutomatonId(index))
                .map(|a| a.name.clone())
                .unwrap_or_default()
        };

        let steps: Vec<PlanStep> = groups
            .iter()
            .flat_map(|(depth, nodes)| nodes.iter().map(move |&index| (depth, index)))
            .map(|(depth, index)| PlanStep {
                depth,
                index,
                automaton: name_of(index),
                dependencies: graph.out_edges(index).iter().map(|&d| name_of(d)).collect(),
            })
            .collect();

        debug!(
            automatons = steps.len(),
            edges = graph.edge_count(),
            max_depth = groups.max_depth(),
            "Deployment plan computed"
        );

        Ok(Self {
            specification: specification.name.clone(),
            steps,
        })
    }
}
