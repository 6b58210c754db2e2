//! JSON-RPC hex quantities (`0x`-prefixed, no leading zeros).

use crate::errors::RpcError;
use primitive_types::U256;

#[must_use]
pub fn to_quantity(value: u64) -> String {
    format!("0x{value:x}")
}

#[must_use]
pub fn u256_to_quantity(value: &U256) -> String {
    format!("0x{value:x}")
}

/// Hex data with `0x` prefix, as used for `data` and raw transactions.
#[must_use]
pub fn to_data(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

fn digits<'a>(method: &str, value: &'a str) -> Result<&'a str, RpcError> {
    let digits = value
        .strip_prefix("0x")
        .ok_or_else(|| RpcError::invalid(method, format!("quantity `{value}` lacks 0x prefix")))?;
    Ok(if digits.is_empty() { "0" } else { digits })
}

pub fn parse_u64(method: &str, value: &str) -> Result<u64, RpcError> {
    u64::from_str_radix(digits(method, value)?, 16)
        .map_err(|e| RpcError::invalid(method, format!("quantity `{value}`: {e}")))
}

pub fn parse_u256(method: &str, value: &str) -> Result<U256, RpcError> {
    U256::from_str_radix(digits(method, value)?, 16)
        .map_err(|e| RpcError::invalid(method, format!("quantity `{value}`: {e:?}")))
}
