use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("previous hash must be {expected} bytes, got {got}")]
    InvalidPreviousHash { expected: usize, got: usize },

    #[error("digest is not valid hex ({length} characters)")]
    InvalidHexDigest { length: usize },

    #[error("block {index} out of range for chain of length {len}")]
    IndexOutOfRange { index: u64, len: u64 },

    #[error("proof-of-work exhausted {iterations} nonces without meeting difficulty {difficulty}")]
    ProofOfWorkUnsatisfiable { difficulty: u32, iterations: u64 },

    #[error("chain integrity violation at block {index}: {kind}")]
    IntegrityViolation { index: u64, kind: ViolationKind },
}

/// What `Chain::validate` found wrong at a given index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ViolationKind {
    #[error("chain holds no blocks at all")]
    EmptyChain,
    #[error("malformed genesis block")]
    MalformedGenesis,
    #[error("block index does not match its position")]
    IndexMismatch,
    #[error("previous-hash link does not match the preceding block")]
    BrokenLinkage,
    #[error("stored hash does not match the header")]
    HashMismatch,
    #[error("hash does not meet the difficulty target")]
    DifficultyNotMet,
    #[error("merkle root does not match the transactions")]
    MerkleMismatch,
}
