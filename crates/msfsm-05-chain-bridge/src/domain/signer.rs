//! secp256k1 transaction signer.

use super::transaction::LegacyTransaction;
use crate::errors::TransactionError;
use k256::ecdsa::{SigningKey, VerifyingKey};
use shared_types::{keccak256, Address, Bytes, Hash};
use std::fmt;
use zeroize::Zeroizing;

/// Signed, RLP-encoded transaction and its hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    pub raw: Bytes,
    pub hash: Hash,
}

/// Holds the account key and signs legacy transactions with EIP-155 `v`.
#[derive(Clone)]
pub struct TransactionSigner {
    key: SigningKey,
    address: Address,
}

impl fmt::Debug for TransactionSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransactionSigner")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// Ethereum address of a public key: last 20 bytes of
/// `keccak256(uncompressed_point[1..])`.
#[must_use]
pub fn address_from_key(key: &VerifyingKey) -> Address {
    let point = key.to_encoded_point(false);
    let hash = keccak256(&point.as_bytes()[1..]);
    let mut out = [0u8; 20];
    out.copy_from_slice(&hash.0[12..]);
    Address::new(out)
}

impl TransactionSigner {
    /// Parses a 32-byte hex secret, with or without `0x`.
    pub fn from_hex(secret: &str) -> Result<Self, TransactionError> {
        let trimmed = secret.trim();
        let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        let bytes = Zeroizing::new(
            hex::decode(digits).map_err(|e| TransactionError::InvalidKey(e.to_string()))?,
        );
        if bytes.len() != 32 {
            return Err(TransactionError::InvalidKey(format!(
                "expected 32 bytes, got {}",
                bytes.len()
            )));
        }
        let key = SigningKey::from_slice(&bytes)
            .map_err(|_| TransactionError::InvalidKey("scalar out of range".to_string()))?;
        let address = address_from_key(key.verifying_key());
        Ok(Self { key, address })
    }

    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    /// Signs `tx`; `v = recovery_id + 35 + 2 * chain_id`.
    pub fn sign(&self, tx: &LegacyTransaction) -> Result<SignedTransaction, TransactionError> {
        let digest = tx.signing_hash();
        let (signature, recovery_id) = self
            .key
            .sign_prehash_recoverable(digest.as_bytes())
            .map_err(|e| TransactionError::Signing(e.to_string()))?;

        let bytes = signature.to_bytes();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..]);
        let v = u64::from(recovery_id.to_byte()) + 35 + 2 * tx.chain_id;

        let raw = tx.encode_signed(v, &r, &s);
        let hash = keccak256(&raw);
        Ok(SignedTransaction {
            raw: Bytes::new(raw),
            hash,
        })
    }
}
