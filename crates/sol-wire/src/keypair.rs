//! Keypair-file loading and Ed25519 signing.
//!
//! The Solana CLI persists keypairs as a JSON array of 64 raw bytes: the
//! 32-byte Ed25519 seed followed by the 32-byte public key. This module
//! loads those files and wraps the signing key behind a small type so the
//! raw seed never leaks out of this crate.

use std::path::Path;

use ed25519_dalek::{Signer, SigningKey};
use zeroize::Zeroize;

use crate::address::bytes_to_address;
use crate::error::WireError;

/// An Ed25519 keypair usable as a Solana identity.
#[derive(Debug)]
pub struct Keypair {
    signing: SigningKey,
}

impl Keypair {
    /// Load a keypair from a Solana CLI keypair file (JSON byte array).
    ///
    /// Fails if the file is absent, not valid JSON, or does not hold a
    /// 32-byte seed or 64-byte seed+pubkey array.
    pub fn from_file(path: &Path) -> Result<Self, WireError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            WireError::InvalidKeypair(format!("cannot read {}: {e}", path.display()))
        })?;

        let mut bytes: Vec<u8> = serde_json::from_str(&raw).map_err(|e| {
            WireError::InvalidKeypair(format!("{} is not a JSON byte array: {e}", path.display()))
        })?;

        let keypair = Self::from_bytes(&bytes);
        bytes.zeroize();
        keypair
    }

    /// Build a keypair from raw bytes: either the 32-byte seed alone or the
    /// 64-byte seed+pubkey layout the Solana CLI writes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, WireError> {
        if bytes.len() != 32 && bytes.len() != 64 {
            return Err(WireError::InvalidKeypair(format!(
                "expected 32 or 64 bytes, got {}",
                bytes.len()
            )));
        }

        let mut seed = [0u8; 32];
        seed.copy_from_slice(&bytes[..32]);
        let signing = SigningKey::from_bytes(&seed);
        seed.zeroize();

        // For the 64-byte layout, the trailing half must match the derived
        // public key, otherwise the file is corrupt.
        if bytes.len() == 64 && signing.verifying_key().to_bytes()[..] != bytes[32..] {
            return Err(WireError::InvalidKeypair(
                "public key half does not match the seed".into(),
            ));
        }

        Ok(Self { signing })
    }

    /// The 32-byte public key.
    pub fn pubkey(&self) -> [u8; 32] {
        self.signing.verifying_key().to_bytes()
    }

    /// The Base58 address for this keypair's public key.
    pub fn address(&self) -> String {
        bytes_to_address(&self.pubkey())
    }

    /// Sign an arbitrary message, returning the 64-byte Ed25519 signature.
    pub fn sign(&self, message: &[u8]) -> [u8; 64] {
        self.signing.sign(message).to_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed_keypair(seed: u8) -> Keypair {
        Keypair::from_bytes(&[seed; 32]).unwrap()
    }

    #[test]
    fn from_bytes_accepts_32_byte_seed() {
        let kp = seed_keypair(0x42);
        assert_eq!(kp.pubkey().len(), 32);
    }

    #[test]
    fn from_bytes_accepts_64_byte_layout() {
        let kp = seed_keypair(0x42);
        let mut full = [0x42u8; 32].to_vec();
        full.extend_from_slice(&kp.pubkey());

        let reloaded = Keypair::from_bytes(&full).unwrap();
        assert_eq!(reloaded.pubkey(), kp.pubkey());
    }

    #[test]
    fn from_bytes_rejects_mismatched_pubkey_half() {
        let mut full = [0x42u8; 32].to_vec();
        full.extend_from_slice(&[0xFFu8; 32]);
        assert!(Keypair::from_bytes(&full).is_err());
    }

    #[test]
    fn from_bytes_rejects_wrong_length() {
        assert!(Keypair::from_bytes(&[0u8; 31]).is_err());
        assert!(Keypair::from_bytes(&[0u8; 63]).is_err());
        assert!(Keypair::from_bytes(&[]).is_err());
    }

    #[test]
    fn address_is_valid_base58_of_pubkey() {
        let kp = seed_keypair(0x07);
        let decoded = crate::address::address_to_bytes(&kp.address()).unwrap();
        assert_eq!(decoded, kp.pubkey());
    }

    #[test]
    fn signatures_verify() {
        use ed25519_dalek::{Signature, VerifyingKey};

        let kp = seed_keypair(0x55);
        let message = b"record write";
        let sig = kp.sign(message);

        let vk = VerifyingKey::from_bytes(&kp.pubkey()).unwrap();
        assert!(vk
            .verify_strict(message, &Signature::from_bytes(&sig))
            .is_ok());
    }

    #[test]
    fn from_file_loads_cli_format() {
        let kp = seed_keypair(0x99);
        let mut full = [0x99u8; 32].to_vec();
        full.extend_from_slice(&kp.pubkey());

        let path = std::env::temp_dir().join("sol-wire-keypair-test.json");
        std::fs::write(&path, serde_json::to_string(&full).unwrap()).unwrap();

        let loaded = Keypair::from_file(&path).unwrap();
        assert_eq!(loaded.pubkey(), kp.pubkey());

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn from_file_missing_path_fails() {
        let path = std::env::temp_dir().join("sol-wire-no-such-keypair.json");
        let err = Keypair::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("cannot read"));
    }

    #[test]
    fn from_file_malformed_json_fails() {
        let path = std::env::temp_dir().join("sol-wire-bad-keypair.json");
        std::fs::write(&path, "{\"not\": \"an array\"}").unwrap();

        assert!(Keypair::from_file(&path).is_err());

        std::fs::remove_file(&path).ok();
    }
}
