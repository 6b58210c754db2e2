//! # Execution Flows
//!
//! Deploys the shop specification, persists the deployment record and
//! executes functions through the real bridge. Functions without outputs
//! are sent as signed transactions; functions with outputs go through
//! `eth_call`.

#[cfg(test)]
mod tests {
    use crate::fixtures::compiler::SourceCompiler;
    use crate::fixtures::documents::{self, SHOP};
    use crate::fixtures::node::MemoryNode;
    use crate::fixtures::{bridge, CHAIN_ID};
    use msfsm_03_code_generation::GeneratorConfig;
    use msfsm_05_chain_bridge::ExecutionError;
    use msfsm_06_orchestrator::{ExecutionService, Orchestrator, OrchestratorError};
    use serde_json::json;
    use shared_types::{keccak256, DeploymentRecord};
    use std::sync::Arc;

    async fn deploy_shop(node: &Arc<MemoryNode>) -> DeploymentRecord {
        let spec = documents::specification(SHOP).unwrap();
        let packages = documents::shop_packages().unwrap();
        let contracts = Orchestrator::new(SourceCompiler::new(), bridge(node), GeneratorConfig::default())
            .run(&spec, &packages)
            .await
            .unwrap();
        DeploymentRecord::new(spec.name, CHAIN_ID, contracts)
    }

    fn selector(signature: &str) -> Vec<u8> {
        keccak256(signature.as_bytes()).0[..4].to_vec()
    }

    #[tokio::test]
    async fn test_trigger_is_sent_as_transaction() {
        let node = Arc::new(MemoryNode::default());
        let record = deploy_shop(&node).await;
        let service = ExecutionService::new(bridge(&node));

        let response = service
            .execute_record(&record, "Payment", "pay", &[])
            .await
            .unwrap();

        assert_eq!(response.contract, "Shop");
        assert_eq!(response.result, json!(true));
        let tx = node.transactions().pop().unwrap();
        assert_eq!(tx.to, record.contracts.address_of("Payment"));
        assert_eq!(tx.data, selector("pay()"));
        assert!(node.calls().is_empty());
    }

    #[tokio::test]
    async fn test_arguments_are_abi_encoded() {
        let node = Arc::new(MemoryNode::default());
        let record = deploy_shop(&node).await;
        let service = ExecutionService::new(bridge(&node));

        service
            .execute_record(&record, "Payment", "deposit", &["258".to_string()])
            .await
            .unwrap();

        let tx = node.transactions().pop().unwrap();
        let mut expected = selector("deposit(uint256)");
        let mut word = [0u8; 32];
        word[30] = 0x01;
        word[31] = 0x02;
        expected.extend_from_slice(&word);
        assert_eq!(tx.data, expected);
    }

    #[tokio::test]
    async fn test_view_function_is_called() {
        let node = Arc::new(MemoryNode::default());
        let record = deploy_shop(&node).await;
        let deployed = node.transactions().len();
        let service = ExecutionService::new(bridge(&node));

        let response = service
            .execute_record(&record, "Shipping", "package__stock__available", &[])
            .await
            .unwrap();

        assert_eq!(response.result, json!(true));
        assert_eq!(node.transactions().len(), deployed);
        let calls = node.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(Some(calls[0].0), record.contracts.address_of("Shipping"));
        assert_eq!(calls[0].1, selector("package__stock__available()"));
    }

    #[tokio::test]
    async fn test_execute_from_persisted_record() {
        let node = Arc::new(MemoryNode::default());
        let record = deploy_shop(&node).await;
        let text = serde_json::to_string(&record).unwrap();
        let restored: DeploymentRecord = serde_json::from_str(&text).unwrap();
        assert_eq!(restored, record);

        let service = ExecutionService::new(bridge(&node));
        let response = service
            .execute_record(&restored, "Order", "close", &[])
            .await
            .unwrap();
        assert_eq!(response.automaton, "Order");
        assert_eq!(response.function, "close");
    }

    #[tokio::test]
    async fn test_unknown_automaton_and_function() {
        let node = Arc::new(MemoryNode::default());
        let record = deploy_shop(&node).await;
        let service = ExecutionService::new(bridge(&node));

        let err = service
            .execute_record(&record, "Refund", "pay", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, OrchestratorError::AutomatonNotFound { .. }));

        let err = service
            .execute_record(&record, "Payment", "refund", &[])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            OrchestratorError::Execution(ExecutionError::UnknownFunction(_))
        ));
    }

    #[tokio::test]
    async fn test_argument_count_is_checked() {
        let node = Arc::new(MemoryNode::default());
        let record = deploy_shop(&node).await;
        let sent = node.transactions().len();
        let service = ExecutionService::new(bridge(&node));

        let err = service
            .execute_record(&record, "Payment", "deposit", &[])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            OrchestratorError::Execution(ExecutionError::ArgumentCount {
                expected: 1,
                actual: 0,
                ..
            })
        ));
        assert_eq!(node.transactions().len(), sent);
    }
}
