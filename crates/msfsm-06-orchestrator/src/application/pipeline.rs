//! # Deployment Pipeline
//!
//! Sequential generate → compile → deploy loop over the deployment plan.
//! Depth groups are serialization barriers: nothing at depth `d + 1` is
//! generated before everything at depth `d` has an address.

use crate::errors::{OrchestratorError, PipelineFailure};
use crate::ports::SourceSink;
use msfsm_01_specification::{AutomatonId, PackageSet, Specification};
use msfsm_02_dependency_graph::{DeploymentPlan, PlanStep};
use msfsm_03_code_generation::{GeneratedContract, GeneratorConfig, SolidityGenerator};
use msfsm_04_solidity_compiler::ContractCompiler;
use msfsm_05_chain_bridge::ContractDeployer;
use msfsm_telemetry::{
    time_histogram, COMPILATIONS, COMPILE_DURATION, CONTRACTS_GENERATED, DEPLOYMENTS,
    DEPLOY_DURATION, PIPELINE_RUNS,
};
use shared_types::{compute_contract_address, Address, DeployedContract, DeploymentResult};
use tracing::{error, info, instrument};

/// Owns the compiler and deployer for one run configuration.
pub struct Orchestrator<C, D> {
    compiler: C,
    deployer: D,
    generator: GeneratorConfig,
    sink: Option<Box<dyn SourceSink>>,
}

fn outcome<T, E>(result: &Result<T, E>) -> &'static str {
    if result.is_ok() {
        "success"
    } else {
        "failure"
    }
}

impl<C: ContractCompiler, D: ContractDeployer> Orchestrator<C, D> {
    pub fn new(compiler: C, deployer: D, generator: GeneratorConfig) -> Self {
        Self {
            compiler,
            deployer,
            generator,
            sink: None,
        }
    }

    /// Hands every generated source to `sink` before compiling it.
    #[must_use]
    pub fn with_source_sink(mut self, sink: impl SourceSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    #[must_use]
    pub fn deployer(&self) -> &D {
        &self.deployer
    }

    /// Processing order without touching the compiler or the chain.
    pub fn plan(&self, specification: &Specification) -> Result<DeploymentPlan, OrchestratorError> {
        Ok(DeploymentPlan::from_specification(specification)?)
    }

    /// Generates, compiles and deploys every automaton of `specification`.
    ///
    /// On failure the contracts deployed so far are returned with the error.
    #[instrument(skip_all, fields(specification = %specification.name))]
    pub async fn run(
        &self,
        specification: &Specification,
        packages: &PackageSet,
    ) -> Result<DeploymentResult, PipelineFailure> {
        let mut deployed = DeploymentResult::new();
        let result = self.run_into(specification, packages, &mut deployed).await;
        PIPELINE_RUNS.with_label_values(&[outcome(&result)]).inc();
        match result {
            Ok(()) => {
                info!(contracts = deployed.len(), "Deployment complete");
                Ok(deployed)
            }
            Err(error) => {
                error!(
                    stage = error.stage(),
                    deployed = deployed.len(),
                    "Deployment aborted: {error}"
                );
                Err(PipelineFailure {
                    error,
                    partial: deployed,
                })
            }
        }
    }

    async fn run_into(
        &self,
        specification: &Specification,
        packages: &PackageSet,
        deployed: &mut DeploymentResult,
    ) -> Result<(), OrchestratorError> {
        packages.resolve(specification)?;
        let plan = self.plan(specification)?;
        let generator = SolidityGenerator::new(specification, packages, self.generator.clone());

        for step in &plan.steps {
            let contract = self.generate_step(&generator, step, deployed)?;
            let address = self.compile_and_deploy(step, contract, deployed).await?;
            info!(
                automaton = %step.automaton,
                depth = step.depth,
                %address,
                "Automaton deployed"
            );
        }
        Ok(())
    }

    fn generate_step(
        &self,
        generator: &SolidityGenerator<'_>,
        step: &PlanStep,
        deployed: &DeploymentResult,
    ) -> Result<GeneratedContract, OrchestratorError> {
        let contract = generator.generate(AutomatonId(step.index), deployed)?;
        CONTRACTS_GENERATED.inc();
        if let Some(sink) = &self.sink {
            sink.save(&contract)?;
        }
        Ok(contract)
    }

    async fn compile_and_deploy(
        &self,
        step: &PlanStep,
        contract: GeneratedContract,
        deployed: &mut DeploymentResult,
    ) -> Result<Address, OrchestratorError> {
        let compiled = {
            let _timer = time_histogram!(COMPILE_DURATION);
            let result = self.compiler.compile(&contract.name, &contract.source).await;
            COMPILATIONS.with_label_values(&[outcome(&result)]).inc();
            result.map_err(|source| OrchestratorError::Compilation {
                automaton: step.automaton.clone(),
                source,
            })?
        };

        let address = {
            let _timer = time_histogram!(DEPLOY_DURATION);
            let result = self
                .deployer
                .deploy(&compiled.name, &compiled.abi, &compiled.bytecode)
                .await;
            DEPLOYMENTS.with_label_values(&[outcome(&result)]).inc();
            result?
        };

        deployed.record(
            step.automaton.clone(),
            DeployedContract {
                address,
                abi: compiled.abi,
            },
        )?;
        Ok(address)
    }

    /// Generates every contract without compiling or deploying.
    ///
    /// Dependency addresses are predicted: the k-th contract in processing
    /// order is assumed to be created by the deployer account at nonce
    /// `next_nonce + k`.
    #[instrument(skip_all, fields(specification = %specification.name))]
    pub async fn generate_offline(
        &self,
        specification: &Specification,
        packages: &PackageSet,
    ) -> Result<Vec<GeneratedContract>, OrchestratorError> {
        let nonce = self.deployer.next_nonce().await?;
        generate_predicted(
            specification,
            packages,
            &self.generator,
            self.deployer.sender(),
            nonce,
            self.sink.as_deref(),
        )
    }
}

/// Offline generation with CREATE addresses predicted from `sender` and
/// `start_nonce`.
pub fn generate_predicted(
    specification: &Specification,
    packages: &PackageSet,
    config: &GeneratorConfig,
    sender: Address,
    start_nonce: u64,
    sink: Option<&dyn SourceSink>,
) -> Result<Vec<GeneratedContract>, OrchestratorError> {
    packages.resolve(specification)?;
    let plan = DeploymentPlan::from_specification(specification)?;
    let generator = SolidityGenerator::new(specification, packages, config.clone());

    let mut predicted = DeploymentResult::new();
    let mut contracts = Vec::with_capacity(plan.len());
    for (nonce, step) in (start_nonce..).zip(&plan.steps) {
        let contract = generator.generate(AutomatonId(step.index), &predicted)?;
        CONTRACTS_GENERATED.inc();
        if let Some(sink) = sink {
            sink.save(&contract)?;
        }
        let address = compute_contract_address(sender, nonce);
        info!(automaton = %step.automaton, %address, nonce, "Contract generated at predicted address");
        predicted.record(
            step.automaton.clone(),
            DeployedContract {
                address,
                abi: Vec::new(),
            },
        )?;
        contracts.push(contract);
    }
    Ok(contracts)
}
