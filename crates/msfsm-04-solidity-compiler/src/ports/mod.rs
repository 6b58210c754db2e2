//! Ports for the compiler subsystem.

use crate::domain::entities::CompiledContract;
use crate::errors::CompilerError;
use async_trait::async_trait;

/// Compiles one contract's source into ABI and bytecode.
#[async_trait]
pub trait ContractCompiler: Send + Sync {
    /// Compiles `source`, which must define a contract named `name`.
    async fn compile(&self, name: &str, source: &str) -> Result<CompiledContract, CompilerError>;
}
