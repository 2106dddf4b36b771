//! The on-chain candidate record and its borsh schema.
//!
//! The same binary schema is used on the write path (instruction data) and
//! the read path (account data), so any reader/writer pair agrees on field
//! order and width by construction.

use borsh::{BorshDeserialize, BorshSerialize};

use crate::error::ClientError;

/// Multiplier applied to the zero-valued serialized length when sizing the
/// on-chain allocation. A heuristic upper bound for the variable-length
/// string fields, not a guarantee; the decoder tolerates the resulting
/// padding.
pub const SPACE_HEADROOM: u64 = 3;

/// One candidate record, stored whole in the derived account. Every write
/// overwrites the full record; there is no patching.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateRecord {
    pub age: u32,
    pub experience: u32,
    pub first_name: String,
    pub last_name: String,
    pub qualification: String,
    pub timestamp: u64,
}

/// On-chain space to allocate for a record account.
///
/// Computed by serializing a zero-valued record and applying the headroom
/// multiplier. Fixed for a given schema version, so repeated calls in one
/// process always agree.
pub fn record_space() -> Result<u64, ClientError> {
    let zero = borsh::to_vec(&CandidateRecord::default())
        .map_err(|e| ClientError::Configuration(format!("record schema serialization: {e}")))?;
    Ok(zero.len() as u64 * SPACE_HEADROOM)
}

/// Decode a record from raw account bytes.
///
/// Permissive about length: the account is allocated larger than the
/// serialized record, so trailing padding after the decoded prefix is
/// expected and ignored.
pub fn decode_record(data: &[u8]) -> Result<CandidateRecord, borsh::io::Error> {
    let mut slice = data;
    CandidateRecord::deserialize(&mut slice)
}
