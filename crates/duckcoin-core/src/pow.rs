//! Serial proof-of-work search.
//!
//! Difficulty counts leading zero hex characters (nibbles) of the header
//! hash; one nibble is four bits. The same predicate drives mining and
//! validation, so a sealed block re-verifies under the unit it was mined
//! with.

use crate::block::BlockHeader;
use crate::constants::HASH_HEX_SIZE;
use crate::error::CoreError;
use crate::hash::Hash;

/// Number of leading zero hex characters in the digest.
pub fn leading_zero_nibbles(hash: &Hash) -> u32 {
    let mut total = 0u32;
    for b in hash {
        if *b == 0 {
            total += 2;
        } else {
            if *b >> 4 == 0 {
                total += 1;
            }
            break;
        }
    }
    total
}

pub fn meets_difficulty(hash: &Hash, difficulty: u32) -> bool {
    leading_zero_nibbles(hash) >= difficulty
}

/// Search nonces `0..bound` for a header hash meeting the difficulty.
///
/// A difficulty wider than the digest fails before any hashing; an
/// exhausted bound is a reported failure. Never an unbounded loop.
pub fn search(header: BlockHeader, bound: u64) -> Result<(u64, Hash), CoreError> {
    if header.difficulty as usize > HASH_HEX_SIZE {
        return Err(CoreError::ProofOfWorkUnsatisfiable {
            difficulty: header.difficulty,
            iterations: 0,
        });
    }
    let mut attempt = header;
    for nonce in 0..bound {
        attempt.nonce = nonce;
        let hash = attempt.hash();
        if meets_difficulty(&hash, header.difficulty) {
            return Ok((nonce, hash));
        }
    }
    Err(CoreError::ProofOfWorkUnsatisfiable {
        difficulty: header.difficulty,
        iterations: bound,
    })
}
