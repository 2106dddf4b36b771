//! Instruction builders for the System Program and the record program.

use crate::error::WireError;
use crate::transaction::{AccountMeta, Instruction};

/// The Solana System Program public key: 32 zero bytes.
/// Base58: `11111111111111111111111111111111`
pub const SYSTEM_PROGRAM_ID: [u8; 32] = [0u8; 32];

/// System Program `CreateAccountWithSeed` instruction index (little-endian u32).
const SYSTEM_CREATE_WITH_SEED_IX_INDEX: u32 = 3;

/// Build a System Program `CreateAccountWithSeed` instruction.
///
/// Creates `derived` (which must equal `derive_with_seed(base, seed, owner)`),
/// funds it with `lamports`, allocates `space` bytes, and assigns ownership
/// to `owner`. The derived account does not sign; only the payer (and the
/// base, when it differs from the payer) do.
///
/// # Wire format
///
/// The System Program uses bincode: `u32` LE instruction index, then fields
/// in declaration order. Strings are a `u64` LE byte length followed by the
/// UTF-8 bytes.
pub fn build_create_account_with_seed(
    payer: &[u8; 32],
    base: &[u8; 32],
    derived: &[u8; 32],
    seed: &str,
    lamports: u64,
    space: u64,
    owner: &[u8; 32],
) -> Result<Instruction, WireError> {
    if space == 0 {
        return Err(WireError::TransactionBuildError(
            "account space must be > 0".into(),
        ));
    }

    let seed_bytes = seed.as_bytes();
    let mut data = Vec::with_capacity(4 + 32 + 8 + seed_bytes.len() + 8 + 8 + 32);
    data.extend_from_slice(&SYSTEM_CREATE_WITH_SEED_IX_INDEX.to_le_bytes());
    data.extend_from_slice(base);
    data.extend_from_slice(&(seed_bytes.len() as u64).to_le_bytes());
    data.extend_from_slice(seed_bytes);
    data.extend_from_slice(&lamports.to_le_bytes());
    data.extend_from_slice(&space.to_le_bytes());
    data.extend_from_slice(owner);

    let mut accounts = vec![
        AccountMeta {
            pubkey: *payer,
            is_signer: true,
            is_writable: true,
        },
        AccountMeta {
            pubkey: *derived,
            is_signer: false,
            is_writable: true,
        },
    ];
    if base != payer {
        accounts.push(AccountMeta {
            pubkey: *base,
            is_signer: true,
            is_writable: false,
        });
    }

    Ok(Instruction {
        program_id: SYSTEM_PROGRAM_ID,
        accounts,
        data,
    })
}

/// Build the record-write instruction for the record program.
///
/// The target account is the only account: writable, not a signer. The
/// payload is opaque to this layer; the caller supplies the encoded record.
pub fn build_record_write(
    program_id: &[u8; 32],
    record_account: &[u8; 32],
    data: Vec<u8>,
) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: vec![AccountMeta {
            pubkey: *record_account,
            is_signer: false,
            is_writable: true,
        }],
        data,
    }
}
