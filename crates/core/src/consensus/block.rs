use super::transaction::Transaction;
use serde::{Deserialize, Serialize};
use tinychain_common::config::protocol;
use tinychain_common::Timestamp;

/// One sealed step of the ledger
///
/// A block is immutable once appended. It links to its predecessor through
/// `previous_hash` (the predecessor's canonical digest) and through the
/// proof-of-work relation between the two blocks' proofs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Chain position, 1-based and strictly increasing by 1
    pub index: u64,

    /// When the block was sealed
    pub timestamp: Timestamp,

    /// Transactions sealed into this block (possibly empty)
    pub transactions: Vec<Transaction>,

    /// Proof satisfying the proof-of-work predicate against the predecessor
    pub proof: u64,

    /// Canonical digest of the predecessor, or the genesis sentinel
    pub previous_hash: String,
}

impl Block {
    /// Create a new block stamped with the current time
    pub fn new(
        index: u64,
        transactions: Vec<Transaction>,
        proof: u64,
        previous_hash: String,
    ) -> Self {
        Self {
            index,
            timestamp: Timestamp::now(),
            transactions,
            proof,
            previous_hash,
        }
    }

    /// Create the genesis block: the trust anchor every chain starts from
    ///
    /// Its proof and previous-hash are fixed sentinels; it is not required to
    /// satisfy the proof-of-work predicate against anything.
    pub fn genesis() -> Self {
        Self::new(
            1,
            Vec::new(),
            protocol::GENESIS_PROOF,
            protocol::GENESIS_PREVIOUS_HASH.to_string(),
        )
    }

    /// Number of transactions sealed into this block
    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genesis_block() {
        let genesis = Block::genesis();

        assert_eq!(genesis.index, 1);
        assert_eq!(genesis.proof, protocol::GENESIS_PROOF);
        assert_eq!(genesis.previous_hash, protocol::GENESIS_PREVIOUS_HASH);
        assert_eq!(genesis.transaction_count(), 0);
    }

    #[test]
    fn test_block_holds_transactions() {
        let txs = vec![
            Transaction::new("alice", "bob", 3),
            Transaction::reward("node-1"),
        ];
        let block = Block::new(2, txs, 35293, "abc123".to_string());

        assert_eq!(block.index, 2);
        assert_eq!(block.transaction_count(), 2);
        assert!(block.transactions[1].is_reward());
    }

    #[test]
    fn test_block_serde_roundtrip() {
        let block = Block::new(2, vec![Transaction::new("a", "b", 1)], 7, "ff".to_string());
        let json = serde_json::to_string(&block).unwrap();
        let decoded: Block = serde_json::from_str(&json).unwrap();

        assert_eq!(decoded, block);
    }
}
