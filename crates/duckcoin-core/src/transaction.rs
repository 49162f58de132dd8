use serde::{Deserialize, Serialize};

/// A transfer record embedded in a block. The core treats it as an
/// already-validated, opaque payload: the signature travels with it but is
/// never checked here, and `amount` is non-negative by type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub index: u64,
    pub timestamp: u64,
    pub sender: String,
    pub receiver: String,
    pub amount: u64,
    pub signature: String,
}

impl Transaction {
    pub fn new(
        index: u64,
        timestamp: u64,
        sender: impl Into<String>,
        receiver: impl Into<String>,
        amount: u64,
        signature: impl Into<String>,
    ) -> Self {
        Self {
            index,
            timestamp,
            sender: sender.into(),
            receiver: receiver.into(),
            amount,
            signature: signature.into(),
        }
    }

    /// The sentinel payload carried by every genesis block.
    pub fn genesis(timestamp: u64) -> Self {
        Self::new(0, timestamp, "genesis", "genesis", 0, "")
    }

    /// Canonical byte encoding hashed into merkle leaves: JSON with fields
    /// in declaration order, no whitespace. Stable across runs, so leaf
    /// digests are reproducible by independent parties.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        serde_json::to_vec(self).expect("transaction serializes to JSON")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genesis_sentinel_fields() {
        let tx = Transaction::genesis(1_600_000_000);
        assert_eq!(tx.index, 0);
        assert_eq!(tx.timestamp, 1_600_000_000);
        assert_eq!(tx.sender, "genesis");
        assert_eq!(tx.receiver, "genesis");
        assert_eq!(tx.amount, 0);
        assert_eq!(tx.signature, "");
    }

    #[test]
    fn canonical_encoding_is_stable() {
        let tx = Transaction::new(1, 1_600_000_000, "alice", "bob", 10, "sig");
        let expected =
            r#"{"index":1,"timestamp":1600000000,"sender":"alice","receiver":"bob","amount":10,"signature":"sig"}"#;
        assert_eq!(tx.canonical_bytes(), expected.as_bytes());
        let decoded: Transaction = serde_json::from_slice(expected.as_bytes()).unwrap();
        assert_eq!(decoded, tx);
    }
}
