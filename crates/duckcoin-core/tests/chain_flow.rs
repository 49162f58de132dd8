//! End-to-end flow over the public API: genesis, appends, retune,
//! validation, and the untrusted-deserialization path.

use duckcoin_core::constants::ZERO_HASH;
use duckcoin_core::{Chain, CoreError, Transaction, ViolationKind};

const EMPTY_BATCH_ROOT: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

#[test]
fn full_chain_lifecycle() {
    let mut chain = Chain::with_genesis_timestamp(2, 1_600_000_000);

    let genesis = chain.get(0).unwrap();
    assert_eq!(genesis.index(), 0);
    assert_eq!(genesis.previous_hash(), ZERO_HASH);
    assert_eq!(genesis.difficulty(), 0);

    let batch = vec![Transaction::new(0, 1_600_000_500, "A", "B", 10, "sig")];
    let (index, hash) = chain.append(batch, Some(1_600_001_000)).unwrap();
    assert_eq!(index, 1);
    let genesis_hash = chain.get(0).unwrap().hash();
    let first = chain.get(1).unwrap();
    assert_eq!(first.previous_hash(), genesis_hash);
    assert!(hex::encode(hash).starts_with("00"));

    let (index, _) = chain.append(Vec::new(), Some(1_600_002_000)).unwrap();
    assert_eq!(index, 2);
    assert_eq!(
        hex::encode(chain.get(2).unwrap().merkle_root()),
        EMPTY_BATCH_ROOT
    );

    chain.set_difficulty(3).unwrap();
    let first = chain.get(1).unwrap();
    let second = chain.get(2).unwrap();
    assert!(hex::encode(first.hash()).starts_with("000"));
    assert!(hex::encode(second.hash()).starts_with("000"));
    assert_eq!(second.previous_hash(), first.hash());

    chain.validate().unwrap();
}

#[test]
fn every_sealed_block_verifies() {
    let mut chain = Chain::with_genesis_timestamp(1, 1_600_000_000);
    for i in 0..3u64 {
        let batch = vec![Transaction::new(i, 1_600_000_000 + i, "A", "B", i + 1, "sig")];
        chain.append(batch, None).unwrap();
    }
    for block in chain.blocks() {
        assert!(block.verify());
    }
}

#[test]
fn blockless_json_is_rejected_on_revalidation() {
    let chain: Chain = serde_json::from_str(r#"{"difficulty":1,"blocks":[]}"#).unwrap();
    assert_eq!(
        chain.validate().unwrap_err(),
        CoreError::IntegrityViolation {
            index: 0,
            kind: ViolationKind::EmptyChain
        }
    );
}

#[test]
fn tampered_json_is_rejected_on_revalidation() {
    let mut chain = Chain::with_genesis_timestamp(1, 1_600_000_000);
    chain
        .append(
            vec![Transaction::new(0, 1_600_000_500, "A", "B", 10, "sig")],
            Some(1_600_001_000),
        )
        .unwrap();

    let mut value: serde_json::Value = serde_json::to_value(&chain).unwrap();
    let ts = value
        .pointer_mut("/blocks/1/header/timestamp")
        .expect("serialized chain exposes the header timestamp");
    *ts = serde_json::json!(1_700_000_000u64);

    let tampered: Chain = serde_json::from_value(value).unwrap();
    assert_eq!(
        tampered.validate().unwrap_err(),
        CoreError::IntegrityViolation {
            index: 1,
            kind: ViolationKind::HashMismatch
        }
    );
}
