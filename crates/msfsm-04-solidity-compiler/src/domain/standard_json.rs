//! solc standard-JSON request and response.
//!
//! One source unit `<Name>.sol` per request; only `abi` and
//! `evm.bytecode.object` are selected.

use super::entities::{CompiledContract, Diagnostic, Severity};
use crate::config::CompilerConfig;
use crate::errors::CompilerError;
use serde::Deserialize;
use serde_json::{json, Value};
use shared_types::{AbiEntry, Bytes};
use std::collections::HashMap;

/// Source unit name used for contract `name`.
#[must_use]
pub fn source_unit(name: &str) -> String {
    format!("{name}.sol")
}

/// Builds the standard-JSON input document.
#[must_use]
pub fn build_input(name: &str, source: &str, config: &CompilerConfig) -> Value {
    let mut settings = json!({
        "optimizer": {
            "enabled": config.optimize,
            "runs": config.optimizer_runs,
        },
        "outputSelection": {
            "*": {
                "*": ["abi", "evm.bytecode.object"]
            }
        }
    });
    if let Some(evm_version) = &config.evm_version {
        settings["evmVersion"] = json!(evm_version);
    }
    json!({
        "language": "Solidity",
        "sources": {
            source_unit(name): { "content": source }
        },
        "settings": settings,
    })
}

#[derive(Debug, Deserialize)]
struct Output {
    #[serde(default)]
    errors: Vec<Diagnostic>,
    #[serde(default)]
    contracts: HashMap<String, HashMap<String, ContractOutput>>,
}

#[derive(Debug, Deserialize)]
struct ContractOutput {
    #[serde(default)]
    abi: Option<Vec<AbiEntry>>,
    #[serde(default)]
    evm: Option<EvmOutput>,
}

#[derive(Debug, Deserialize)]
struct EvmOutput {
    bytecode: BytecodeOutput,
}

#[derive(Debug, Deserialize)]
struct BytecodeOutput {
    object: String,
}

/// Parses standard-JSON output for contract `name`.
///
/// Returns the compiled contract plus the non-fatal diagnostics.
pub fn parse_output(
    name: &str,
    output: &str,
) -> Result<(CompiledContract, Vec<Diagnostic>), CompilerError> {
    let output: Output =
        serde_json::from_str(output).map_err(|e| CompilerError::InvalidOutput(e.to_string()))?;

    let (errors, warnings): (Vec<Diagnostic>, Vec<Diagnostic>) = output
        .errors
        .into_iter()
        .partition(|d| d.severity == Severity::Error);
    if !errors.is_empty() {
        return Err(CompilerError::Diagnostics {
            contract: name.to_string(),
            messages: errors.iter().map(Diagnostic::render).collect(),
        });
    }

    let missing = || CompilerError::MissingOutput {
        contract: name.to_string(),
    };
    let contract = output
        .contracts
        .get(&source_unit(name))
        .and_then(|unit| unit.get(name))
        .ok_or_else(missing)?;
    let abi = contract.abi.clone().ok_or_else(missing)?;
    let object = contract
        .evm
        .as_ref()
        .map(|evm| evm.bytecode.object.as_str())
        .ok_or_else(missing)?;
    let bytecode: Bytes = object
        .parse()
        .map_err(|e| CompilerError::InvalidOutput(format!("bytecode of `{name}`: {e}")))?;
    if bytecode.is_empty() {
        return Err(missing());
    }

    Ok((
        CompiledContract {
            name: name.to_string(),
            abi,
            bytecode,
        },
        warnings,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_selects_abi_and_bytecode() {
        let input = build_input("Payment", "contract Payment {}", &CompilerConfig::default());
        assert_eq!(input["language"], "Solidity");
        assert_eq!(
            input["sources"]["Payment.sol"]["content"],
            "contract Payment {}"
        );
        assert_eq!(
            input["settings"]["outputSelection"]["*"]["*"],
            json!(["abi", "evm.bytecode.object"])
        );
        assert!(input["settings"].get("evmVersion").is_none());
    }

    #[test]
    fn test_input_evm_version() {
        let config = CompilerConfig {
            evm_version: Some("paris".into()),
            optimize: true,
            ..CompilerConfig::default()
        };
        let input = build_input("A", "", &config);
        assert_eq!(input["settings"]["evmVersion"], "paris");
        assert_eq!(input["settings"]["optimizer"]["enabled"], true);
    }

    #[test]
    fn test_parse_success_with_warning() {
        let output = json!({
            "errors": [{
                "severity": "warning",
                "type": "Warning",
                "message": "Unused local variable.",
                "formattedMessage": "Warning: Unused local variable.\n"
            }],
            "contracts": {
                "Payment.sol": {
                    "Payment": {
                        "abi": [{"inputs": [], "name": "pay", "outputs": [],
                                 "stateMutability": "nonpayable", "type": "function"}],
                        "evm": {"bytecode": {"object": "6080604052"}}
                    }
                }
            }
        });
        let (contract, warnings) = parse_output("Payment", &output.to_string()).unwrap();
        assert_eq!(contract.abi.len(), 1);
        assert_eq!(contract.bytecode.as_slice(), &[0x60, 0x80, 0x60, 0x40, 0x52]);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].render(), "Warning: Unused local variable.");
    }

    #[test]
    fn test_parse_errors_fail() {
        let output = json!({
            "errors": [{
                "severity": "error",
                "type": "ParserError",
                "message": "Expected ';' but got '}'"
            }]
        });
        let err = parse_output("Payment", &output.to_string()).unwrap_err();
        assert_eq!(
            err,
            CompilerError::Diagnostics {
                contract: "Payment".into(),
                messages: vec!["ParserError: Expected ';' but got '}'".into()],
            }
        );
    }

    #[test]
    fn test_parse_missing_contract() {
        let output = json!({"contracts": {"Other.sol": {}}});
        assert_eq!(
            parse_output("Payment", &output.to_string()).unwrap_err(),
            CompilerError::MissingOutput {
                contract: "Payment".into()
            }
        );
    }

    #[test]
    fn test_parse_empty_bytecode_is_missing() {
        let output = json!({"contracts": {"I.sol": {"I": {"abi": [], "evm": {"bytecode": {"object": ""}}}}}});
        assert!(matches!(
            parse_output("I", &output.to_string()),
            Err(CompilerError::MissingOutput { .. })
        ));
    }

    #[test]
    fn test_parse_garbage() {
        assert!(matches!(
            parse_output("A", "not json"),
            Err(CompilerError::InvalidOutput(_))
        ));
    }
}
