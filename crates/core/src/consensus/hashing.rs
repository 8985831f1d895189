use super::block::Block;
use sha2::{Digest, Sha256};

/// Canonical digest of a block, as lower-case hex
///
/// The block is serialized through `serde_json::Value`, whose object map is
/// key-sorted, so the digest is independent of in-memory field order. Two
/// semantically identical blocks always hash identically, which the chain
/// linkage checks rely on.
pub fn block_hash(block: &Block) -> String {
    // Block fields are all JSON-representable; a serialization failure here
    // is a construction bug, not a runtime condition.
    let canonical = serde_json::to_value(block)
        .expect("block serialization is infallible")
        .to_string();

    hex::encode(Sha256::digest(canonical.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consensus::transaction::Transaction;

    #[test]
    fn test_hash_is_deterministic() {
        let block = Block::genesis();
        assert_eq!(block_hash(&block), block_hash(&block));
    }

    #[test]
    fn test_hash_is_canonical_across_field_order() {
        // Deserializing the same fields in two different orders must yield
        // blocks that hash identically.
        let a: Block = serde_json::from_str(
            r#"{"index":2,"timestamp":100,"transactions":[],"proof":7,"previous_hash":"aa"}"#,
        )
        .unwrap();
        let b: Block = serde_json::from_str(
            r#"{"previous_hash":"aa","proof":7,"transactions":[],"timestamp":100,"index":2}"#,
        )
        .unwrap();

        assert_eq!(block_hash(&a), block_hash(&b));
    }

    #[test]
    fn test_hash_covers_full_content() {
        let base = Block::new(2, vec![], 7, "aa".to_string());

        let mut changed_proof = base.clone();
        changed_proof.proof = 8;
        assert_ne!(block_hash(&base), block_hash(&changed_proof));

        let mut changed_txs = base.clone();
        changed_txs.transactions.push(Transaction::new("a", "b", 1));
        assert_ne!(block_hash(&base), block_hash(&changed_txs));
    }

    #[test]
    fn test_hash_shape() {
        let digest = block_hash(&Block::genesis());
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
