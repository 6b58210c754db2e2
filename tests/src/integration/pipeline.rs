//! # Deployment Pipeline Flows
//!
//! Specification → dependency graph → generation → compilation (stub) →
//! deployment through the real bridge against [`MemoryNode`].
//!
//! [`MemoryNode`]: crate::fixtures::node::MemoryNode

#[cfg(test)]
mod tests {
    use crate::fixtures::compiler::SourceCompiler;
    use crate::fixtures::documents::{self, CYCLIC, REFERENCE_DAG, SHOP};
    use crate::fixtures::node::MemoryNode;
    use crate::fixtures::bridge;
    use msfsm_01_specification::PackageSet;
    use msfsm_02_dependency_graph::{build_dependency_graph, group_by_depth, GraphError};
    use msfsm_03_code_generation::GeneratorConfig;
    use msfsm_05_chain_bridge::{ContractDeployer, DeploymentError, TransactionError};
    use msfsm_06_orchestrator::{generate_predicted, Orchestrator, OrchestratorError};
    use shared_types::compute_contract_address;
    use std::collections::BTreeMap;
    use std::sync::Arc;

    fn orchestrator(
        node: &Arc<MemoryNode>,
        compiler: SourceCompiler,
    ) -> Orchestrator<SourceCompiler, msfsm_05_chain_bridge::EthereumBridge<Arc<MemoryNode>>> {
        Orchestrator::new(compiler, bridge(node), GeneratorConfig::default())
    }

    // =========================================================================
    // DEPENDENCY ORDER
    // =========================================================================

    #[test]
    fn test_reference_dag_depth_groups() {
        let spec = documents::specification(REFERENCE_DAG).unwrap();
        let groups = group_by_depth(&build_dependency_graph(&spec)).unwrap();
        let expected: BTreeMap<usize, Vec<usize>> =
            [(1, vec![0]), (2, vec![2]), (3, vec![3]), (4, vec![1, 4])].into();
        assert_eq!(groups.as_map(), &expected);
    }

    #[tokio::test]
    async fn test_reference_dag_deploys_in_depth_order() {
        let node = Arc::new(MemoryNode::default());
        let orchestrator = orchestrator(&node, SourceCompiler::new());
        let spec = documents::specification(REFERENCE_DAG).unwrap();

        let result = orchestrator.run(&spec, &PackageSet::default()).await.unwrap();

        let order: Vec<&str> = result.iter().map(|(name, _)| name).collect();
        assert_eq!(
            order,
            vec!["Automata0", "Automata2", "Automata3", "Automata1", "Automata4"]
        );

        let sender = orchestrator.deployer().sender();
        for (nonce, (_, contract)) in (0u64..).zip(result.iter()) {
            assert_eq!(contract.address, compute_contract_address(sender, nonce));
            assert!(node.code_at(contract.address).is_some());
        }
        assert!(node.transactions().iter().all(|tx| tx.from == sender && tx.to.is_none()));
    }

    // =========================================================================
    // ADDRESS BAKING
    // =========================================================================

    #[tokio::test]
    async fn test_dependency_addresses_are_baked_into_sources() {
        let node = Arc::new(MemoryNode::default());
        let orchestrator = orchestrator(&node, SourceCompiler::new());
        let spec = documents::specification(REFERENCE_DAG).unwrap();
        let result = orchestrator.run(&spec, &PackageSet::default()).await.unwrap();

        let transactions = node.transactions();
        let automata1 = transactions
            .iter()
            .zip(result.iter())
            .find(|(_, (name, _))| *name == "Automata1")
            .map(|(tx, _)| tx.data.clone())
            .unwrap();

        // Bytecode is derived from the source, so compare against a source
        // generated with the same addresses.
        let sender = orchestrator.deployer().sender();
        let predicted = generate_predicted(
            &spec,
            &PackageSet::default(),
            &GeneratorConfig::default(),
            sender,
            0,
            None,
        )
        .unwrap();
        let source = &predicted.iter().find(|c| c.name == "Automata1").unwrap().source;
        assert_eq!(automata1, SourceCompiler::bytecode_for(source).0);

        for dependency in ["Automata0", "Automata2", "Automata3"] {
            let address = result.address_of(dependency).unwrap().to_checksum();
            assert!(source.contains(&format!("address({address})")), "{dependency}");
        }
    }

    #[tokio::test]
    async fn test_offline_generation_matches_deployed_sources() {
        let node = Arc::new(MemoryNode::default());
        let compiler = SourceCompiler::new();
        let spec = documents::specification(SHOP).unwrap();
        let packages = documents::shop_packages().unwrap();

        let offline = orchestrator(&node, SourceCompiler::new())
            .generate_offline(&spec, &packages)
            .await
            .unwrap();
        assert!(node.transactions().is_empty());

        let orchestrator = Orchestrator::new(compiler, bridge(&node), GeneratorConfig::default());
        orchestrator.run(&spec, &packages).await.unwrap();

        let offline: Vec<(String, String)> =
            offline.into_iter().map(|c| (c.name, c.source)).collect();
        let deployed: Vec<(String, String)> = node
            .transactions()
            .iter()
            .zip(&offline)
            .map(|(tx, (name, source))| {
                assert_eq!(tx.data, SourceCompiler::bytecode_for(source).0, "{name}");
                (name.clone(), source.clone())
            })
            .collect();
        assert_eq!(deployed, offline);
        let names: Vec<&str> = offline.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["Payment", "Shipping", "Order"]);
    }

    // =========================================================================
    // FAILURES
    // =========================================================================

    #[tokio::test]
    async fn test_reverted_creation_keeps_partial_result() {
        let node = Arc::new(MemoryNode::default().reverting_creation(2));
        let orchestrator = orchestrator(&node, SourceCompiler::new());
        let spec = documents::specification(REFERENCE_DAG).unwrap();

        let failure = orchestrator
            .run(&spec, &PackageSet::default())
            .await
            .unwrap_err();

        assert!(matches!(
            failure.error,
            OrchestratorError::Deployment(DeploymentError::Transaction {
                source: TransactionError::Reverted { .. },
                ..
            })
        ));
        let partial: Vec<&str> = failure.partial.iter().map(|(n, _)| n).collect();
        assert_eq!(partial, vec!["Automata0", "Automata2"]);
        assert_eq!(node.transactions().len(), 3);
    }

    #[tokio::test]
    async fn test_compile_failure_stops_before_deploying() {
        let node = Arc::new(MemoryNode::default());
        let orchestrator = orchestrator(&node, SourceCompiler::failing_on("Automata3"));
        let spec = documents::specification(REFERENCE_DAG).unwrap();

        let failure = orchestrator
            .run(&spec, &PackageSet::default())
            .await
            .unwrap_err();

        assert!(matches!(
            failure.error,
            OrchestratorError::Compilation { ref automaton, .. } if automaton == "Automata3"
        ));
        assert_eq!(failure.partial.len(), 2);
        assert_eq!(node.transactions().len(), 2);
        assert!(failure.to_string().contains("2 contract(s) deployed"));
    }

    #[tokio::test]
    async fn test_cycle_is_rejected_before_any_transaction() {
        let node = Arc::new(MemoryNode::default());
        let orchestrator = orchestrator(&node, SourceCompiler::new());
        let spec = documents::specification(CYCLIC).unwrap();

        let failure = orchestrator
            .run(&spec, &PackageSet::default())
            .await
            .unwrap_err();

        assert!(matches!(
            failure.error,
            OrchestratorError::Graph(GraphError::CyclicDependency { .. })
        ));
        assert!(failure.partial.is_empty());
        assert!(node.transactions().is_empty());
    }

    #[tokio::test]
    async fn test_redeploy_uses_fresh_nonces() {
        let node = Arc::new(MemoryNode::default());
        let spec = documents::specification(SHOP).unwrap();
        let packages = documents::shop_packages().unwrap();

        let first = orchestrator(&node, SourceCompiler::new())
            .run(&spec, &packages)
            .await
            .unwrap();
        let second = orchestrator(&node, SourceCompiler::new())
            .run(&spec, &packages)
            .await
            .unwrap();

        assert_eq!(node.transactions().len(), 6);
        for (name, contract) in second.iter() {
            assert_ne!(first.address_of(name), Some(contract.address));
        }
    }
}
