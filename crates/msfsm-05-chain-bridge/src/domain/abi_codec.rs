//! # ABI Call Codec
//!
//! Converts textual arguments into Solidity ABI call data and decodes
//! return data into JSON values. Word layout is handled by `ethers::abi`;
//! this module owns the text-to-token rules and the JSON rendering.
//!
//! ## Argument Text
//!
//! | Type | Argument text | Decoded as |
//! |------|---------------|------------|
//! | `uintN` / `intN` | decimal or `0x` hex, optional `-` for `int` | number up to 64 bits, decimal string above |
//! | `bool` | `true` / `false` / `1` / `0` | bool |
//! | `address` | hex address | EIP-55 string |
//! | `bytesN` | hex, exactly N bytes | `0x` hex |
//! | `bytes` | hex | `0x` hex |
//! | `string` | raw text | string |
//! | `T[]` / `T[k]` | `[a,b,c]` | array |
//! | `tuple` | `(a,b)` | array |
//!
//! Elements of arrays and tuples follow the lenient ethabi tokenizer.

use crate::errors::ExecutionError;
use ethers::abi::ethabi::param_type::Reader;
use ethers::abi::ethabi::token::{LenientTokenizer, Tokenizer};
use ethers::abi::{self, ParamType, Token};
use ethers::types::{H160, U256};
use serde_json::Value;
use shared_types::{AbiEntry, AbiParam, Address};

fn is_well_formed(ty: &ParamType) -> bool {
    match ty {
        ParamType::Uint(bits) | ParamType::Int(bits) => *bits > 0 && *bits <= 256 && bits % 8 == 0,
        ParamType::FixedBytes(size) => (1..=32).contains(size),
        ParamType::Array(inner) | ParamType::FixedArray(inner, _) => is_well_formed(inner),
        ParamType::Tuple(items) => items.iter().all(is_well_formed),
        _ => true,
    }
}

/// Wraps `base` in the array dimensions of `suffix`, e.g. `[][3]`.
fn with_array_suffix(mut ty: ParamType, mut suffix: &str) -> Option<ParamType> {
    while !suffix.is_empty() {
        let close = suffix.find(']')?;
        let dimension = suffix.get(..close)?.strip_prefix('[')?;
        ty = if dimension.is_empty() {
            ParamType::Array(Box::new(ty))
        } else {
            ParamType::FixedArray(Box::new(ty), dimension.parse().ok()?)
        };
        suffix = &suffix[close + 1..];
    }
    Some(ty)
}

/// ABI type of a solc parameter, expanding `tuple` components.
pub fn param_type(param: &AbiParam) -> Result<ParamType, ExecutionError> {
    let unsupported = || ExecutionError::UnsupportedType(param.canonical_type());
    let ty = match param.kind.strip_prefix("tuple") {
        Some(suffix) => {
            if param.components.is_empty() {
                return Err(unsupported());
            }
            let components = param
                .components
                .iter()
                .map(param_type)
                .collect::<Result<Vec<_>, _>>()?;
            with_array_suffix(ParamType::Tuple(components), suffix).ok_or_else(unsupported)?
        }
        None => Reader::read(&param.kind).map_err(|_| unsupported())?,
    };
    if is_well_formed(&ty) {
        Ok(ty)
    } else {
        Err(unsupported())
    }
}

fn parse_magnitude(text: &str) -> Result<U256, String> {
    match text.strip_prefix("0x") {
        Some(hex_digits) => U256::from_str_radix(hex_digits, 16).map_err(|e| format!("{e:?}")),
        None => U256::from_dec_str(text).map_err(|e| format!("{e:?}")),
    }
}

fn hex_argument(text: &str) -> Result<Vec<u8>, String> {
    hex::decode(text.strip_prefix("0x").unwrap_or(text)).map_err(|e| e.to_string())
}

fn tokenize(ty: &ParamType, raw: &str) -> Result<Token, String> {
    let text = raw.trim();
    let token = match ty {
        ParamType::Uint(bits) => {
            let value = parse_magnitude(text)?;
            if *bits < 256 && value >= (U256::one() << *bits) {
                return Err("out of range".to_string());
            }
            Token::Uint(value)
        }
        ParamType::Int(bits) => {
            let (negative, digits) = match text.strip_prefix('-') {
                Some(rest) => (true, rest),
                None => (false, text),
            };
            let magnitude = parse_magnitude(digits)?;
            let limit = U256::one() << (*bits - 1);
            if (!negative && magnitude >= limit) || (negative && magnitude > limit) {
                return Err("out of range".to_string());
            }
            Token::Int(if negative {
                (!magnitude).overflowing_add(U256::one()).0
            } else {
                magnitude
            })
        }
        ParamType::Bool => match text {
            "true" | "1" => Token::Bool(true),
            "false" | "0" => Token::Bool(false),
            _ => return Err("expected true or false".to_string()),
        },
        ParamType::Address => {
            let address: Address = text.parse().map_err(|e| format!("{e}"))?;
            Token::Address(H160::from(address.0))
        }
        ParamType::FixedBytes(size) => {
            let bytes = hex_argument(text)?;
            if bytes.len() != *size {
                return Err(format!("expected {size} bytes, got {}", bytes.len()));
            }
            Token::FixedBytes(bytes)
        }
        ParamType::Bytes => Token::Bytes(hex_argument(text)?),
        ParamType::String => Token::String(raw.to_string()),
        composite => LenientTokenizer::tokenize(composite, text).map_err(|e| e.to_string())?,
    };
    if token.type_check(ty) {
        Ok(token)
    } else {
        Err(format!("value does not match {ty}"))
    }
}

/// Selector plus ABI-encoded `args` for function `entry`.
pub fn encode_call(entry: &AbiEntry, args: &[String]) -> Result<Vec<u8>, ExecutionError> {
    let function = entry.name.clone().unwrap_or_default();
    if entry.inputs.len() != args.len() {
        return Err(ExecutionError::ArgumentCount {
            function,
            expected: entry.inputs.len(),
            actual: args.len(),
        });
    }

    let mut tokens = Vec::with_capacity(args.len());
    for (index, (param, raw)) in entry.inputs.iter().zip(args).enumerate() {
        let ty = param_type(param)?;
        let token = tokenize(&ty, raw).map_err(|reason| ExecutionError::InvalidArgument {
            index,
            kind: param.canonical_type(),
            value: raw.clone(),
            reason,
        })?;
        tokens.push(token);
    }

    let mut data = entry.selector().to_vec();
    data.extend(abi::encode(&tokens));
    Ok(data)
}

fn render(ty: &ParamType, token: Token) -> Result<Value, ExecutionError> {
    let value = match (ty, token) {
        (ParamType::Uint(bits), Token::Uint(value)) => {
            if *bits <= 64 {
                Value::from(value.low_u64())
            } else {
                Value::String(value.to_string())
            }
        }
        (ParamType::Int(bits), Token::Int(raw)) => {
            let negative = raw.bit(255);
            let magnitude = if negative {
                (!raw).overflowing_add(U256::one()).0
            } else {
                raw
            };
            if *bits <= 64 {
                let magnitude = i128::from(magnitude.low_u64());
                let signed = if negative { -magnitude } else { magnitude };
                Value::from(signed as i64)
            } else if negative {
                Value::String(format!("-{magnitude}"))
            } else {
                Value::String(magnitude.to_string())
            }
        }
        (ParamType::Bool, Token::Bool(flag)) => Value::Bool(flag),
        (ParamType::Address, Token::Address(address)) => {
            Value::String(Address::from(address.0).to_checksum())
        }
        (ParamType::FixedBytes(_), Token::FixedBytes(bytes))
        | (ParamType::Bytes, Token::Bytes(bytes)) => {
            Value::String(format!("0x{}", hex::encode(bytes)))
        }
        (ParamType::String, Token::String(text)) => Value::String(text),
        (ParamType::Array(inner), Token::Array(items))
        | (ParamType::FixedArray(inner, _), Token::FixedArray(items)) => Value::Array(
            items
                .into_iter()
                .map(|item| render(inner, item))
                .collect::<Result<_, _>>()?,
        ),
        (ParamType::Tuple(types), Token::Tuple(items)) => Value::Array(
            types
                .iter()
                .zip(items)
                .map(|(ty, item)| render(ty, item))
                .collect::<Result<_, _>>()?,
        ),
        (ty, token) => {
            return Err(ExecutionError::Decode(format!(
                "decoded {token:?} for {ty}"
            )))
        }
    };
    Ok(value)
}

/// Decodes return data for `outputs`.
///
/// A single output decodes to its value, several to a JSON array.
pub fn decode_outputs(outputs: &[AbiParam], data: &[u8]) -> Result<Value, ExecutionError> {
    let types = outputs
        .iter()
        .map(param_type)
        .collect::<Result<Vec<_>, _>>()?;
    let tokens = abi::decode(&types, data).map_err(|e| ExecutionError::Decode(e.to_string()))?;
    let mut values = types
        .iter()
        .zip(tokens)
        .map(|(ty, token)| render(ty, token))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(match values.len() {
        1 => values.remove(0),
        _ => Value::Array(values),
    })
}
