//! Stand-in for `solc`.

use async_trait::async_trait;
use msfsm_04_solidity_compiler::{CompiledContract, CompilerError, ContractCompiler};
use parking_lot::Mutex;
use shared_types::{keccak256, AbiEntry, AbiParam, Bytes};

/// Builds the ABI from the `function` lines of the source.
///
/// Functions declaring `returns (T)` get one output of type `T`; the rest
/// have none. Bytecode is `0x6080` followed by the source hash, so equal
/// sources give equal bytecode.
#[derive(Default)]
pub struct SourceCompiler {
    sources: Mutex<Vec<(String, String)>>,
    fail_on: Option<String>,
}

impl SourceCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports a diagnostic for `contract` instead of compiling it.
    pub fn failing_on(contract: &str) -> Self {
        Self {
            fail_on: Some(contract.to_string()),
            ..Self::default()
        }
    }

    /// `(contract, source)` in compilation order.
    pub fn sources(&self) -> Vec<(String, String)> {
        self.sources.lock().clone()
    }

    pub fn bytecode_for(source: &str) -> Bytes {
        let mut code = vec![0x60, 0x80];
        code.extend_from_slice(&keccak256(source.as_bytes()).0);
        Bytes::new(code)
    }
}

fn abi_from_source(source: &str) -> Vec<AbiEntry> {
    source
        .lines()
        .map(str::trim)
        .filter_map(|line| {
            let rest = line.strip_prefix("function ")?;
            let name = &rest[..rest.find('(')?];
            let outputs = line
                .split_once("returns (")
                .and_then(|(_, tail)| tail.split(')').next())
                .map(|ty| vec![AbiParam::new("", ty.trim())])
                .unwrap_or_default();
            let mutability = if line.contains(" view ") {
                "view"
            } else if line.contains(" pure ") {
                "pure"
            } else {
                "nonpayable"
            };
            let inputs = rest[rest.find('(')? + 1..]
                .split(')')
                .next()
                .filter(|params| !params.trim().is_empty())
                .map(|params| {
                    params
                        .split(',')
                        .filter_map(|p| {
                            let mut parts = p.split_whitespace();
                            Some(AbiParam::new(parts.next_back()?, parts.next()?))
                        })
                        .collect()
                })
                .unwrap_or_default();
            Some(AbiEntry::function(name, inputs, outputs, mutability))
        })
        .collect()
}

#[async_trait]
impl ContractCompiler for SourceCompiler {
    async fn compile(&self, name: &str, source: &str) -> Result<CompiledContract, CompilerError> {
        self.sources
            .lock()
            .push((name.to_string(), source.to_string()));
        if self.fail_on.as_deref() == Some(name) {
            return Err(CompilerError::Diagnostics {
                contract: name.to_string(),
                messages: vec![format!("TypeError: cannot compile {name}")],
            });
        }
        Ok(CompiledContract {
            name: name.to_string(),
            abi: abi_from_source(source),
            bytecode: Self::bytecode_for(source),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abi_from_source() {
        let abi = abi_from_source(
            "contract C {\n    function pay() public {\n    }\n    function deposit(uint256 amount) public { balance += amount; }\n    function is_completed() public view returns (bool) {\n    }\n}",
        );
        assert_eq!(abi.len(), 3);
        assert_eq!(abi[0].name.as_deref(), Some("pay"));
        assert!(abi[0].outputs.is_empty());
        assert_eq!(abi[1].inputs[0].kind, "uint256");
        assert_eq!(abi[1].inputs[0].name, "amount");
        assert_eq!(abi[2].outputs[0].kind, "bool");
        assert_eq!(abi[2].state_mutability.as_deref(), Some("view"));
    }
}
