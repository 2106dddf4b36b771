//! Solana wire-level primitives for the candidate-record client.
//!
//! This crate handles addresses, keypair files, seed-derived account
//! addresses, instruction building, and manual transaction wire-format
//! serialization and signing, all without pulling in `solana-sdk` (which
//! drags in tokio and 200+ transitive dependencies).
//!
//! Everything here is pure computation; the RPC side lives in `sol-rpc`.

pub mod address;
pub mod error;
pub mod instruction;
pub mod keypair;
pub mod transaction;

// Re-export key public types for ergonomic imports.
pub use address::{address_to_bytes, bytes_to_address, derive_with_seed, MAX_SEED_LEN};
pub use error::WireError;
pub use instruction::{
    build_create_account_with_seed, build_record_write, SYSTEM_PROGRAM_ID,
};
pub use keypair::Keypair;
pub use transaction::{
    compile_transaction, encode_compact_u16, serialize_message, sign_transaction, AccountMeta,
    CompiledInstruction, Instruction, Transaction,
};
