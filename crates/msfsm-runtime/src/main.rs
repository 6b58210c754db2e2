//! `msfsm`: compile multi-scale FSM specifications to Solidity, deploy them
//! in dependency order and execute their functions.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::error;

use msfsm_runtime::commands;
use msfsm_runtime::{RuntimeConfig, DEFAULT_RECORD_FILE};

#[derive(Parser, Debug)]
#[command(name = "msfsm")]
#[command(about = "Multi-scale FSM to Solidity compiler and deployer")]
struct Cli {
    /// Configuration file (default: ./msfsm.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print Prometheus metrics to stderr when the command finishes
    #[arg(long, global = true)]
    metrics: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the deployment order of a specification
    Plan {
        specification: PathBuf,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate Solidity sources with predicted dependency addresses
    Generate {
        specification: PathBuf,

        #[arg(short, long, default_value = "contracts")]
        out_dir: PathBuf,

        /// Deployer nonce of the first contract; fetched from the node when omitted
        #[arg(long)]
        nonce: Option<u64>,
    },

    /// Generate, compile and deploy every automaton
    Deploy {
        specification: PathBuf,

        /// Deployment record
        #[arg(short, long, default_value = DEFAULT_RECORD_FILE)]
        output: PathBuf,

        /// Also save the deployed sources here
        #[arg(long)]
        sources_dir: Option<PathBuf>,
    },

    /// Invoke a function of a deployed automaton
    Execute {
        automaton: String,

        function: String,

        args: Vec<String>,

        /// Deployment record
        #[arg(short, long, default_value = DEFAULT_RECORD_FILE)]
        record: PathBuf,
    },
}

async fn run(cli: Cli, config: RuntimeConfig) -> Result<()> {
    match cli.command {
        Command::Plan {
            specification,
            json,
        } => {
            let plan = commands::plan(&config, &specification)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                print!("{}", commands::render_plan(&plan));
            }
        }
        Command::Generate {
            specification,
            out_dir,
            nonce,
        } => {
            let contracts = commands::generate(&config, &specification, &out_dir, nonce).await?;
            for contract in contracts {
                println!("{}", out_dir.join(format!("{}.sol", contract.name)).display());
            }
        }
        Command::Deploy {
            specification,
            output,
            sources_dir,
        } => {
            let record =
                commands::deploy(&config, &specification, &output, sources_dir.as_deref()).await?;
            println!("{}", serde_json::to_string_pretty(&record.contracts)?);
        }
        Command::Execute {
            automaton,
            function,
            args,
            record,
        } => {
            let response =
                commands::execute(&config, &record, &automaton, &function, &args).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = RuntimeConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    let _telemetry = msfsm_telemetry::init_telemetry(&config.telemetry)?;

    let metrics = cli.metrics;
    let outcome = run(cli, config).await;
    if let Err(e) = &outcome {
        error!(error = %format!("{e:#}"), "Command failed");
    }
    if metrics {
        eprint!("{}", msfsm_telemetry::encode_metrics()?);
    }
    outcome
}
