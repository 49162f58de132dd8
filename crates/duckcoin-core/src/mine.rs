//! Parallel nonce search. Rayon splits the bounded nonce range across
//! workers; `find_any` short-circuits on the first qualifying hash, so the
//! losing workers are cancelled and no partial result is kept.

use crate::block::BlockHeader;
use crate::constants::HASH_HEX_SIZE;
use crate::error::CoreError;
use crate::hash::Hash;
use crate::pow::meets_difficulty;
use rayon::prelude::*;
use tracing::info;

/// Same contract as [`crate::pow::search`], but races nonce ranges across
/// threads. The winning nonce is whichever worker finds one first, not
/// necessarily the smallest.
pub fn search_parallel(header: BlockHeader, bound: u64) -> Result<(u64, Hash), CoreError> {
    if header.difficulty as usize > HASH_HEX_SIZE {
        return Err(CoreError::ProofOfWorkUnsatisfiable {
            difficulty: header.difficulty,
            iterations: 0,
        });
    }
    let base = header;
    let found = (0u64..bound).into_par_iter().find_any(|nonce| {
        let mut attempt = base;
        attempt.nonce = *nonce;
        meets_difficulty(&attempt.hash(), base.difficulty)
    });
    match found {
        Some(nonce) => {
            let mut sealed = base;
            sealed.nonce = nonce;
            let hash = sealed.hash();
            info!(
                "sealed block {} at difficulty {} with nonce {} and hash {}",
                base.index,
                base.difficulty,
                nonce,
                hex::encode(hash)
            );
            Ok((nonce, hash))
        }
        None => Err(CoreError::ProofOfWorkUnsatisfiable {
            difficulty: base.difficulty,
            iterations: bound,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::ZERO_HASH;

    fn header(difficulty: u32) -> BlockHeader {
        BlockHeader {
            index: 7,
            timestamp: 1_600_000_000,
            previous_hash: ZERO_HASH,
            merkle_root: [2u8; 32],
            difficulty,
            nonce: 0,
        }
    }

    #[test]
    fn parallel_search_seals_and_reverifies() {
        let h = header(2);
        let (nonce, hash) = search_parallel(h, 1 << 20).unwrap();
        assert!(meets_difficulty(&hash, 2));
        let mut sealed = h;
        sealed.nonce = nonce;
        assert_eq!(sealed.hash(), hash);
    }

    #[test]
    fn parallel_search_rejects_oversized_difficulty() {
        let err = search_parallel(header(65), 1 << 20).unwrap_err();
        assert_eq!(
            err,
            CoreError::ProofOfWorkUnsatisfiable {
                difficulty: 65,
                iterations: 0
            }
        );
    }

    #[test]
    fn parallel_search_reports_an_exhausted_bound() {
        let err = search_parallel(header(12), 64).unwrap_err();
        assert_eq!(
            err,
            CoreError::ProofOfWorkUnsatisfiable {
                difficulty: 12,
                iterations: 64
            }
        );
    }
}
