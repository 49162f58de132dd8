//! Minimal proof-of-work blockchain core: an append-only ledger of
//! transaction batches, each block chained to its predecessor by hash and
//! sealed by a difficulty-bounded nonce search.
//!
//! The crate stops at the integrity core. Transactions arrive
//! pre-validated and are hashed as opaque payloads; persistence,
//! networking, and any CLI live outside, feeding off the serde
//! representations and the canonical header encoding documented in
//! [`block::BlockHeader::canonical_bytes`].

pub mod block;
pub mod chain;
pub mod constants;
pub mod error;
pub mod hash;
pub mod merkle;
pub mod mine;
pub mod pow;
pub mod transaction;

pub use block::{Block, BlockBuilder, BlockHeader};
pub use chain::Chain;
pub use error::{CoreError, ViolationKind};
pub use hash::{decode_hash, digest, Hash};
pub use merkle::merkle_root;
pub use transaction::Transaction;
