//! Solana address encoding and seed-derived addresses.
//!
//! A Solana address is the Base58 encoding of a raw 32-byte Ed25519 public
//! key, with no hashing step (unlike Bitcoin or Ethereum). Seed-derived addresses
//! (`SystemInstruction::CreateAccountWithSeed`) are a pure function of
//! (base key, UTF-8 seed, owner program):
//!
//! ```text
//! derived = SHA-256(base || seed || owner)
//! ```

use sha2::{Digest, Sha256};

use crate::error::WireError;

/// Maximum length, in bytes, of a derivation seed.
pub const MAX_SEED_LEN: usize = 32;

/// Marker appended during PDA derivation. An owner key ending in these bytes
/// would make seed-derived addresses collide with the PDA address space, so
/// such owners are rejected.
const PDA_MARKER: &[u8] = b"ProgramDerivedAddress";

/// Encode 32 bytes as a Solana address (Base58 string).
pub fn bytes_to_address(bytes: &[u8; 32]) -> String {
    bs58::encode(bytes).into_string()
}

/// Decode a Solana address string to its 32-byte representation.
///
/// Returns an error if the address is not valid Base58 or does not decode
/// to exactly 32 bytes.
pub fn address_to_bytes(address: &str) -> Result<[u8; 32], WireError> {
    let bytes = bs58::decode(address)
        .into_vec()
        .map_err(|e| WireError::InvalidAddress(format!("base58 decode failed: {e}")))?;

    let arr: [u8; 32] = bytes.try_into().map_err(|v: Vec<u8>| {
        WireError::InvalidAddress(format!("expected 32 bytes, got {}", v.len()))
    })?;

    Ok(arr)
}

/// Derive the address of an account created with
/// `SystemInstruction::CreateAccountWithSeed`.
///
/// The result is `SHA-256(base || seed || owner)`. The same inputs always
/// produce the same address; distinct seeds diverge (collision-free only by
/// convention of seed uniqueness).
pub fn derive_with_seed(
    base: &[u8; 32],
    seed: &str,
    owner: &[u8; 32],
) -> Result<[u8; 32], WireError> {
    if seed.len() > MAX_SEED_LEN {
        return Err(WireError::InvalidSeed(format!(
            "seed is {} bytes, max is {MAX_SEED_LEN}",
            seed.len()
        )));
    }

    if owner.ends_with(PDA_MARKER) {
        return Err(WireError::InvalidSeed(
            "owner address ends with the PDA marker".into(),
        ));
    }

    let mut hasher = Sha256::new();
    hasher.update(base);
    hasher.update(seed.as_bytes());
    hasher.update(owner);

    Ok(hasher.finalize().into())
}
