use crate::hash::Hash;

pub const HASH_SIZE: usize = 32;
pub const HASH_HEX_SIZE: usize = HASH_SIZE * 2;
/// Canonical header layout: index, timestamp, previous hash, merkle root,
/// difficulty, nonce.
pub const HEADER_SIZE: usize = 8 + 8 + HASH_SIZE + HASH_SIZE + 8 + 8;
/// Predecessor sentinel for the genesis block.
pub const ZERO_HASH: Hash = [0u8; HASH_SIZE];
pub const GENESIS_DIFFICULTY: u32 = 0;
/// Default nonce-search bound. Enough for any difficulty worth mining on
/// one machine; an exhausted bound is a reported failure, not a hang.
pub const MAX_SEAL_ITERATIONS: u64 = 1 << 40;
