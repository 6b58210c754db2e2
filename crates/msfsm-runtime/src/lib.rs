//! # MSFSM Runtime
//!
//! Wiring for the `msfsm` binary.
//!
//! ## Commands
//!
//! | Command | Network | Effect |
//! |---------|---------|--------|
//! | `plan` | no | Prints the dependency order |
//! | `generate` | nonce lookup unless `--nonce` | Writes `<Automaton>.sol` files |
//! | `deploy` | yes | Compiles, deploys, writes the deployment record |
//! | `execute` | yes | Calls or transacts against a recorded contract |
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (file, then `MSFSM_*` environment)
//! 2. Initialize telemetry
//! 3. Load the specification and its packages
//! 4. Run the command

pub mod commands;
pub mod config;
pub mod record;

pub use config::{ConfigError, RuntimeConfig, DEFAULT_CONFIG_FILE};
pub use record::{read_record, write_record, DEFAULT_RECORD_FILE};
