//! Chain ownership and integrity.
//!
//! All mutation goes through `&mut Chain`, so appends and retunes are
//! serialized by ownership; any number of `&Chain` readers can run
//! between mutations but never during one. The nonce search inside a
//! mutation is the only parallel work, and it stays internal.

use crate::block::{unix_now, Block, BlockBuilder};
use crate::constants::{GENESIS_DIFFICULTY, ZERO_HASH};
use crate::error::{CoreError, ViolationKind};
use crate::hash::Hash;
use crate::merkle::merkle_root;
use crate::pow::meets_difficulty;
use crate::transaction::Transaction;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// An append-only sequence of sealed blocks, genesis first. Holds the
/// difficulty applied to every future (and retuned) block; genesis stays
/// at difficulty 0 forever.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Chain {
    difficulty: u32,
    blocks: Vec<Block>,
}

impl Chain {
    /// A fresh chain holding only a genesis block stamped with the
    /// current time.
    pub fn new(difficulty: u32) -> Self {
        Self::with_genesis_timestamp(difficulty, unix_now())
    }

    pub fn with_genesis_timestamp(difficulty: u32, timestamp: u64) -> Self {
        Self {
            difficulty,
            blocks: vec![Block::genesis(timestamp)],
        }
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    pub fn len(&self) -> u64 {
        self.blocks.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// The most recent block. `None` only for a chain deserialized from
    /// data that lost its genesis block; every constructed chain has one.
    pub fn tip(&self) -> Option<&Block> {
        self.blocks.last()
    }

    pub fn get(&self, index: u64) -> Result<&Block, CoreError> {
        self.blocks
            .get(index as usize)
            .ok_or(CoreError::IndexOutOfRange {
                index,
                len: self.len(),
            })
    }

    /// Seal a new block over `transactions` at the chain tail and append
    /// it. `timestamp` defaults to now. Returns the new block's index and
    /// hash as confirmation.
    pub fn append(
        &mut self,
        transactions: Vec<Transaction>,
        timestamp: Option<u64>,
    ) -> Result<(u64, Hash), CoreError> {
        let index = self.len();
        let tip_hash = self
            .tip()
            .ok_or(CoreError::IntegrityViolation {
                index: 0,
                kind: ViolationKind::EmptyChain,
            })?
            .hash();
        let mut builder = BlockBuilder::new(index)
            .previous_hash(tip_hash)
            .transactions(transactions)
            .difficulty(self.difficulty);
        if let Some(ts) = timestamp {
            builder = builder.timestamp(ts);
        }
        let block = builder.seal_parallel()?;
        let hash = block.hash();
        debug!("appended block {} with hash {}", index, hex::encode(hash));
        self.blocks.push(block);
        Ok((index, hash))
    }

    /// Conform a detached, pre-built block to the chain tail and append
    /// it: its index, previous hash, and difficulty are overwritten with
    /// the values the tail requires, then the block is resealed. Its
    /// timestamp and transactions are kept. Mismatched fields are never
    /// grounds for rejection here.
    pub fn append_block(&mut self, block: Block) -> Result<(u64, Hash), CoreError> {
        let timestamp = block.timestamp();
        self.append(block.into_transactions(), Some(timestamp))
    }

    /// Retune every non-genesis block to `difficulty` and make it the
    /// target for future appends.
    ///
    /// This is a full re-mine: every existing proof of work is discarded
    /// and redone, in strictly increasing index order so each block is
    /// resealed before its successor's previous-hash is derived from it.
    /// Cost is O(len × expected search at the new difficulty). The
    /// rebuilt sequence replaces the old one only after every block has
    /// sealed, so a failed retune leaves the chain exactly as it was.
    pub fn set_difficulty(&mut self, difficulty: u32) -> Result<(), CoreError> {
        let mut rebuilt: Vec<Block> = Vec::with_capacity(self.blocks.len());
        let mut previous_hash = self.blocks[0].hash();
        rebuilt.push(self.blocks[0].clone());
        for block in &self.blocks[1..] {
            let sealed = BlockBuilder::new(block.index())
                .timestamp(block.timestamp())
                .previous_hash(previous_hash)
                .transactions(block.transactions().to_vec())
                .difficulty(difficulty)
                .seal_parallel()?;
            previous_hash = sealed.hash();
            rebuilt.push(sealed);
        }
        debug!(
            "retuned {} blocks to difficulty {}",
            rebuilt.len() - 1,
            difficulty
        );
        self.blocks = rebuilt;
        self.difficulty = difficulty;
        Ok(())
    }

    /// Walk the chain and report the first violation, or nothing. Read
    /// only, never corrects anything; a violating chain is rejected
    /// wholesale. This is the check to run on deserialized, untrusted
    /// data.
    pub fn validate(&self) -> Result<(), CoreError> {
        // Deserialized input may arrive with no blocks at all; that is a
        // violation to report, not a place to index.
        let Some(genesis) = self.blocks.first() else {
            return Err(violation(0, ViolationKind::EmptyChain));
        };
        if genesis.index() != 0
            || genesis.previous_hash() != ZERO_HASH
            || genesis.difficulty() != GENESIS_DIFFICULTY
        {
            return Err(violation(0, ViolationKind::MalformedGenesis));
        }
        if genesis.header.hash() != genesis.hash {
            return Err(violation(0, ViolationKind::HashMismatch));
        }
        if merkle_root(genesis.transactions()) != genesis.merkle_root() {
            return Err(violation(0, ViolationKind::MerkleMismatch));
        }
        for (i, block) in self.blocks.iter().enumerate().skip(1) {
            let index = i as u64;
            if block.index() != index {
                return Err(violation(index, ViolationKind::IndexMismatch));
            }
            if block.previous_hash() != self.blocks[i - 1].hash() {
                return Err(violation(index, ViolationKind::BrokenLinkage));
            }
            if block.header.hash() != block.hash {
                return Err(violation(index, ViolationKind::HashMismatch));
            }
            if !meets_difficulty(&block.hash, block.difficulty()) {
                return Err(violation(index, ViolationKind::DifficultyNotMet));
            }
            if merkle_root(block.transactions()) != block.merkle_root() {
                return Err(violation(index, ViolationKind::MerkleMismatch));
            }
        }
        Ok(())
    }
}

fn violation(index: u64, kind: ViolationKind) -> CoreError {
    CoreError::IntegrityViolation { index, kind }
}
