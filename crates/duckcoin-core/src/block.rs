use crate::constants::{GENESIS_DIFFICULTY, HEADER_SIZE, MAX_SEAL_ITERATIONS, ZERO_HASH};
use crate::error::CoreError;
use crate::hash::{digest, hash_from_slice, Hash};
use crate::merkle::merkle_root;
use crate::transaction::Transaction;
use crate::{mine, pow};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// The hashed header fields of a block. The block's own hash is derived
/// from these and stored beside them, never inside them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    pub index: u64,
    pub timestamp: u64,
    pub previous_hash: Hash,
    pub merkle_root: Hash,
    pub difficulty: u32,
    pub nonce: u64,
}

impl BlockHeader {
    /// Canonical 96-byte encoding, the input to the header hash:
    /// index (u64 BE), timestamp (u64 BE epoch seconds), previous hash
    /// (raw 32), merkle root (raw 32), difficulty (u64 BE), nonce
    /// (u64 BE). Fixed order and widths so independent parties can
    /// re-verify the hash byte for byte.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(HEADER_SIZE);
        bytes.extend_from_slice(&self.index.to_be_bytes());
        bytes.extend_from_slice(&self.timestamp.to_be_bytes());
        bytes.extend_from_slice(&self.previous_hash);
        bytes.extend_from_slice(&self.merkle_root);
        bytes.extend_from_slice(&u64::from(self.difficulty).to_be_bytes());
        bytes.extend_from_slice(&self.nonce.to_be_bytes());
        bytes
    }

    pub fn hash(&self) -> Hash {
        digest(&self.canonical_bytes())
    }
}

/// A sealed block. Construction is the only way to get one, so the stored
/// hash always matches the header; "changing" a field means building a new
/// block through [`BlockBuilder`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Block {
    pub(crate) header: BlockHeader,
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) hash: Hash,
}

impl Block {
    /// Build and seal a block in one call. Fails if `previous_hash` is not
    /// a full digest, or if the nonce search exhausts its default bound.
    pub fn new(
        index: u64,
        timestamp: u64,
        previous_hash: &[u8],
        transactions: Vec<Transaction>,
        difficulty: u32,
    ) -> Result<Self, CoreError> {
        let previous_hash = hash_from_slice(previous_hash)?;
        BlockBuilder::new(index)
            .timestamp(timestamp)
            .previous_hash(previous_hash)
            .transactions(transactions)
            .difficulty(difficulty)
            .seal()
    }

    /// The fixed first block: index 0, all-zero predecessor, a single
    /// sentinel transaction, difficulty 0. Any hash qualifies at
    /// difficulty 0, so the nonce is pinned to 0 and no search runs.
    pub fn genesis(timestamp: u64) -> Self {
        let transactions = vec![Transaction::genesis(timestamp)];
        let header = BlockHeader {
            index: 0,
            timestamp,
            previous_hash: ZERO_HASH,
            merkle_root: merkle_root(&transactions),
            difficulty: GENESIS_DIFFICULTY,
            nonce: 0,
        };
        let hash = header.hash();
        Self {
            header,
            transactions,
            hash,
        }
    }

    pub fn header(&self) -> &BlockHeader {
        &self.header
    }

    pub fn index(&self) -> u64 {
        self.header.index
    }

    pub fn timestamp(&self) -> u64 {
        self.header.timestamp
    }

    pub fn previous_hash(&self) -> Hash {
        self.header.previous_hash
    }

    pub fn merkle_root(&self) -> Hash {
        self.header.merkle_root
    }

    pub fn difficulty(&self) -> u32 {
        self.header.difficulty
    }

    pub fn nonce(&self) -> u64 {
        self.header.nonce
    }

    pub fn hash(&self) -> Hash {
        self.hash
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn transaction_count(&self) -> u64 {
        self.transactions.len() as u64
    }

    pub fn into_transactions(self) -> Vec<Transaction> {
        self.transactions
    }

    /// Recompute the header hash with the stored nonce and check it against
    /// the stored hash, the difficulty target, and the transactions. The
    /// check an external auditor runs on an untrusted block.
    pub fn verify(&self) -> bool {
        self.header.hash() == self.hash
            && pow::meets_difficulty(&self.hash, self.header.difficulty)
            && merkle_root(&self.transactions) == self.header.merkle_root
    }
}

/// Mutable pre-seal state. Accumulate fields, then [`seal`](Self::seal);
/// the merkle root is computed from the final transaction list at seal
/// time, so it can never go stale.
#[derive(Clone, Debug, Default)]
pub struct BlockBuilder {
    index: u64,
    timestamp: Option<u64>,
    previous_hash: Hash,
    transactions: Vec<Transaction>,
    difficulty: u32,
}

impl BlockBuilder {
    pub fn new(index: u64) -> Self {
        Self {
            index,
            ..Self::default()
        }
    }

    /// Epoch seconds. Omitted: stamped with the current time at seal.
    pub fn timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn previous_hash(mut self, previous_hash: Hash) -> Self {
        self.previous_hash = previous_hash;
        self
    }

    /// Slice-taking variant for hashes arriving from outside the crate;
    /// rejects anything that is not a full digest.
    pub fn previous_hash_bytes(mut self, bytes: &[u8]) -> Result<Self, CoreError> {
        self.previous_hash = hash_from_slice(bytes)?;
        Ok(self)
    }

    pub fn transactions(mut self, transactions: Vec<Transaction>) -> Self {
        self.transactions = transactions;
        self
    }

    pub fn push_transaction(mut self, transaction: Transaction) -> Self {
        self.transactions.push(transaction);
        self
    }

    pub fn difficulty(mut self, difficulty: u32) -> Self {
        self.difficulty = difficulty;
        self
    }

    fn header(&self) -> BlockHeader {
        BlockHeader {
            index: self.index,
            timestamp: self.timestamp.unwrap_or_else(unix_now),
            previous_hash: self.previous_hash,
            merkle_root: merkle_root(&self.transactions),
            difficulty: self.difficulty,
            nonce: 0,
        }
    }

    /// Seal with the serial nonce search and the default bound.
    pub fn seal(self) -> Result<Block, CoreError> {
        self.seal_with_bound(MAX_SEAL_ITERATIONS)
    }

    /// Seal with a caller-controlled search bound, for aborting
    /// pathological difficulties early.
    pub fn seal_with_bound(self, bound: u64) -> Result<Block, CoreError> {
        let mut header = self.header();
        let (nonce, hash) = pow::search(header, bound)?;
        header.nonce = nonce;
        Ok(Block {
            header,
            transactions: self.transactions,
            hash,
        })
    }

    /// Seal with the rayon nonce search; same contract as [`seal`](Self::seal).
    pub fn seal_parallel(self) -> Result<Block, CoreError> {
        let mut header = self.header();
        let (nonce, hash) = mine::search_parallel(header, MAX_SEAL_ITERATIONS)?;
        header.nonce = nonce;
        Ok(Block {
            header,
            transactions: self.transactions,
            hash,
        })
    }
}

pub(crate) fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_secs()
}
