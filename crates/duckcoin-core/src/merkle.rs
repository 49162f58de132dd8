use crate::constants::HASH_SIZE;
use crate::hash::{digest, Hash};
use crate::transaction::Transaction;

/// Root digest over an ordered batch of transactions.
///
/// Each transaction's canonical encoding is hashed into a leaf, then
/// adjacent digests are combined pairwise level by level; a level with an
/// odd count pairs its last digest with itself. The empty batch hashes to
/// the digest of the empty byte string, so it is defined and distinct
/// from the all-zero genesis sentinel. Reordering the batch changes the
/// root: this is integrity over a sequence, not a set.
pub fn merkle_root(txs: &[Transaction]) -> Hash {
    if txs.is_empty() {
        return digest(&[]);
    }
    let mut level: Vec<Hash> = txs.iter().map(|t| digest(&t.canonical_bytes())).collect();
    while level.len() > 1 {
        let mut next = Vec::with_capacity(level.len().div_ceil(2));
        for pair in level.chunks(2) {
            let (a, b) = if pair.len() == 2 {
                (pair[0], pair[1])
            } else {
                (pair[0], pair[0])
            };
            let mut bytes = [0u8; HASH_SIZE * 2];
            bytes[..HASH_SIZE].copy_from_slice(&a);
            bytes[HASH_SIZE..].copy_from_slice(&b);
            next.push(digest(&bytes));
        }
        level = next;
    }
    level[0]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(i: u64) -> Transaction {
        Transaction::new(i, 1_600_000_000 + i * 100, format!("user-{i}"), "bob", i + 1, "sig")
    }

    fn combine(a: Hash, b: Hash) -> Hash {
        let mut bytes = [0u8; HASH_SIZE * 2];
        bytes[..HASH_SIZE].copy_from_slice(&a);
        bytes[HASH_SIZE..].copy_from_slice(&b);
        digest(&bytes)
    }

    #[test]
    fn empty_batch_uses_documented_marker() {
        let root = merkle_root(&[]);
        assert_eq!(root, digest(&[]));
        assert_eq!(
            hex::encode(root),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn single_leaf_is_its_own_root() {
        let t = tx(0);
        assert_eq!(merkle_root(&[t.clone()]), digest(&t.canonical_bytes()));
    }

    #[test]
    fn two_leaves_combine_in_order() {
        let (a, b) = (tx(0), tx(1));
        let expected = combine(
            digest(&a.canonical_bytes()),
            digest(&b.canonical_bytes()),
        );
        assert_eq!(merkle_root(&[a, b]), expected);
    }

    #[test]
    fn odd_leaf_pairs_with_itself() {
        let batch = [tx(0), tx(1), tx(2)];
        let leaves: Vec<Hash> = batch.iter().map(|t| digest(&t.canonical_bytes())).collect();
        let expected = combine(
            combine(leaves[0], leaves[1]),
            combine(leaves[2], leaves[2]),
        );
        assert_eq!(merkle_root(&batch), expected);
    }

    #[test]
    fn reordering_changes_root() {
        let (a, b) = (tx(0), tx(1));
        let forward = merkle_root(&[a.clone(), b.clone()]);
        let reversed = merkle_root(&[b, a]);
        assert_ne!(forward, reversed);
    }

    #[test]
    fn appending_changes_root() {
        let batch = vec![tx(0), tx(1)];
        let root = merkle_root(&batch);
        let mut extended = batch;
        extended.push(tx(2));
        assert_ne!(merkle_root(&extended), root);
    }

    #[test]
    fn root_is_deterministic() {
        let batch: Vec<Transaction> = (0..100).map(tx).collect();
        assert_eq!(merkle_root(&batch), merkle_root(&batch));
    }
}
