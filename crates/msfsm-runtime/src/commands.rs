//! Subcommand implementations.
//!
//! Each command loads its inputs, wires the adapters it needs and returns a
//! value for `main` to print. Nothing here writes to stdout.

use crate::config::RuntimeConfig;
use crate::record::{read_record, write_record};
use anyhow::{Context, Result};
use msfsm_01_specification::{PackageRepository, PackageSet, Specification};
use msfsm_02_dependency_graph::DeploymentPlan;
use msfsm_03_code_generation::GeneratedContract;
use msfsm_04_solidity_compiler::SolcCompiler;
use msfsm_05_chain_bridge::{ContractDeployer, EthereumBridge};
use msfsm_06_orchestrator::{
    generate_predicted, ExecutionResponse, ExecutionService, Orchestrator, SourceDirectory,
    SourceSink,
};
use shared_types::DeploymentRecord;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Loads a specification and the packages it requires.
pub fn load_inputs(
    config: &RuntimeConfig,
    specification: &Path,
) -> Result<(Specification, PackageSet)> {
    let specification = Specification::load_from_file(specification)
        .with_context(|| format!("failed to load {}", specification.display()))?;
    let packages = PackageRepository::new(&config.packages.dir)
        .load_required(&specification)
        .with_context(|| {
            format!(
                "failed to load packages from {}",
                config.packages.dir.display()
            )
        })?;
    packages.resolve(&specification)?;
    Ok((specification, packages))
}

/// Dependency order without touching the network.
pub fn plan(config: &RuntimeConfig, specification: &Path) -> Result<DeploymentPlan> {
    let (specification, _) = load_inputs(config, specification)?;
    Ok(DeploymentPlan::from_specification(&specification)?)
}

/// One line per step: depth, automaton and what it embeds.
#[must_use]
pub fn render_plan(plan: &DeploymentPlan) -> String {
    let mut out = format!("{} ({} automatons)\n", plan.specification, plan.len());
    for step in &plan.steps {
        let _ = write!(out, "  depth {:>2}  {}", step.depth, step.automaton);
        if !step.dependencies.is_empty() {
            let _ = write!(out, "  <- {}", step.dependencies.join(", "));
        }
        out.push('\n');
    }
    out
}

/// Writes `<Automaton>.sol` for every automaton into `out_dir`.
///
/// With `start_nonce` the deployer address comes from the configured key and
/// the node is never contacted; otherwise the pending nonce is fetched.
pub async fn generate(
    config: &RuntimeConfig,
    specification: &Path,
    out_dir: &Path,
    start_nonce: Option<u64>,
) -> Result<Vec<GeneratedContract>> {
    let (specification, packages) = load_inputs(config, specification)?;
    let sink = SourceDirectory::new(out_dir);

    let contracts = match start_nonce {
        Some(nonce) => {
            let sender = config.network.validate()?.address();
            generate_predicted(
                &specification,
                &packages,
                &config.generator(),
                sender,
                nonce,
                Some(&sink as &dyn SourceSink),
            )?
        }
        None => {
            let bridge = EthereumBridge::connect(config.network.clone())?;
            Orchestrator::new(
                SolcCompiler::new(config.compiler.clone()),
                bridge,
                config.generator(),
            )
            .with_source_sink(sink)
            .generate_offline(&specification, &packages)
            .await?
        }
    };
    info!(count = contracts.len(), dir = %out_dir.display(), "Sources written");
    Ok(contracts)
}

/// Record file for contracts deployed before a failure.
#[must_use]
pub fn partial_record_path(output: &Path) -> PathBuf {
    output.with_extension("partial.json")
}

/// Generates, compiles and deploys every automaton and writes the record.
pub async fn deploy(
    config: &RuntimeConfig,
    specification: &Path,
    output: &Path,
    sources_dir: Option<&Path>,
) -> Result<DeploymentRecord> {
    let (specification, packages) = load_inputs(config, specification)?;

    let compiler = SolcCompiler::new(config.compiler.clone());
    let version = compiler
        .ensure_version()
        .await
        .context("solc version check failed")?;
    info!(%version, "Compiler ready");

    let bridge = EthereumBridge::connect(config.network.clone())?;
    info!(sender = %bridge.sender(), rpc_url = %config.network.rpc_url, "Deployer ready");

    let mut orchestrator = Orchestrator::new(compiler, bridge, config.generator());
    if let Some(dir) = sources_dir {
        orchestrator = orchestrator.with_source_sink(SourceDirectory::new(dir));
    }

    let chain_id = config.network.chain_id;
    match orchestrator.run(&specification, &packages).await {
        Ok(contracts) => {
            let record = DeploymentRecord::new(specification.name.clone(), chain_id, contracts);
            write_record(output, &record)?;
            info!(path = %output.display(), "Deployment record written");
            Ok(record)
        }
        Err(failure) => {
            if !failure.partial.is_empty() {
                let path = partial_record_path(output);
                let record =
                    DeploymentRecord::new(specification.name.clone(), chain_id, failure.partial.clone());
                write_record(&path, &record)?;
                warn!(path = %path.display(), "Partial deployment record written");
            }
            Err(failure.into())
        }
    }
}

/// Invokes `function` on a recorded automaton.
pub async fn execute(
    config: &RuntimeConfig,
    record: &Path,
    automaton: &str,
    function: &str,
    args: &[String],
) -> Result<ExecutionResponse> {
    let record = read_record(record)?;
    if record.chain_id != config.network.chain_id {
        warn!(
            recorded = record.chain_id,
            configured = config.network.chain_id,
            "Record was deployed on a different chain"
        );
    }
    let bridge = EthereumBridge::connect(config.network.clone())?;
    let service = ExecutionService::new(bridge);
    Ok(service
        .execute_record(&record, automaton, function, args)
        .await?)
}
