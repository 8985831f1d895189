use super::block::Block;
use super::hashing::block_hash;
use super::pow::Miner;

/// Whether a chain is internally consistent end to end
///
/// Walks the sequence from the second block onward, checking that each block
/// carries its predecessor's canonical digest and a proof satisfying the
/// proof-of-work predicate against the predecessor's proof. A single block is
/// trivially valid (genesis alone); an empty sequence is invalid, since every
/// replica must at least report genesis.
///
/// Total and side-effect-free: chains received from untrusted peers pass
/// through the typed deserialization boundary before reaching this predicate,
/// so structurally malformed input never arrives here.
pub fn is_valid_chain(chain: &[Block], miner: &Miner) -> bool {
    let Some(mut previous) = chain.first() else {
        return false;
    };

    for block in &chain[1..] {
        if block.previous_hash != block_hash(previous) {
            return false;
        }
        if !miner.valid_proof(previous.proof, block.proof) {
            return false;
        }
        previous = block;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consensus::ledger::Ledger;

    /// Build a chain of `extra` legitimately mined blocks on top of genesis.
    fn mined_chain(miner: &Miner, extra: usize) -> Vec<Block> {
        let mut ledger = Ledger::new();
        for _ in 0..extra {
            let last_proof = ledger.head().unwrap().proof;
            let proof = miner.find_proof(last_proof).unwrap();
            ledger.seal_block(proof, None).unwrap();
        }
        ledger.chain().to_vec()
    }

    #[test]
    fn test_genesis_alone_is_valid() {
        let miner = Miner::new(2, None);
        let chain = mined_chain(&miner, 0);
        assert!(is_valid_chain(&chain, &miner));
    }

    #[test]
    fn test_empty_chain_is_invalid() {
        let miner = Miner::new(2, None);
        assert!(!is_valid_chain(&[], &miner));
    }

    #[test]
    fn test_mined_chain_is_valid() {
        let miner = Miner::new(2, None);
        let chain = mined_chain(&miner, 4);
        assert!(is_valid_chain(&chain, &miner));
    }

    #[test]
    fn test_tampered_proof_is_detected() {
        let miner = Miner::new(2, None);
        let mut chain = mined_chain(&miner, 3);

        chain[2].proof += 1;
        assert!(!is_valid_chain(&chain, &miner));
    }

    #[test]
    fn test_tampered_previous_hash_is_detected() {
        let miner = Miner::new(2, None);
        let mut chain = mined_chain(&miner, 3);

        chain[1].previous_hash = "00".repeat(32);
        assert!(!is_valid_chain(&chain, &miner));
    }

    #[test]
    fn test_reordered_blocks_are_detected() {
        let miner = Miner::new(2, None);
        let mut chain = mined_chain(&miner, 3);

        chain.swap(1, 2);
        assert!(!is_valid_chain(&chain, &miner));
    }

    #[test]
    fn test_tampered_transactions_are_detected() {
        let miner = Miner::new(2, None);

        let mut ledger = Ledger::new();
        ledger.add_transaction("alice", "bob", 5).unwrap();
        let proof = miner.find_proof(ledger.head().unwrap().proof).unwrap();
        ledger.seal_block(proof, None).unwrap();
        let proof = miner.find_proof(ledger.head().unwrap().proof).unwrap();
        ledger.seal_block(proof, None).unwrap();

        let mut chain = ledger.chain().to_vec();
        // Rewriting history in block 2 breaks block 3's hash linkage.
        chain[1].transactions[0].amount = 500;
        assert!(!is_valid_chain(&chain, &miner));
    }
}
