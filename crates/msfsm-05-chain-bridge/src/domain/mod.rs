//! Pure chain-bridge logic: encoding, signing, hex quantities.

pub mod abi_codec;
pub mod quantity;
pub mod signer;
pub mod transaction;
