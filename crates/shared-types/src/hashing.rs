//! # Hashing
//!
//! Keccak-256 and CREATE address derivation.

use crate::value_objects::{Address, Hash};
use rlp::RlpStream;
use sha3::{Digest, Keccak256};

/// Keccak-256 digest of `data`.
#[must_use]
pub fn keccak256(data: &[u8]) -> Hash {
    let digest = Keccak256::digest(data);
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    Hash::new(out)
}

/// Address of a contract created by `sender` at account nonce `nonce`.
///
/// `keccak256(rlp([sender, nonce]))[12..]`
#[must_use]
pub fn compute_contract_address(sender: Address, nonce: u64) -> Address {
    let mut stream = RlpStream::new_list(2);
    stream.append(&sender.as_bytes().to_vec());
    stream.append(&nonce);
    let hash = keccak256(&stream.out());
    let mut addr = [0u8; 20];
    addr.copy_from_slice(&hash.0[12..]);
    Address::new(addr)
}
