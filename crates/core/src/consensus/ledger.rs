use super::block::Block;
use super::hashing::block_hash;
use super::transaction::Transaction;
use std::collections::HashSet;

/// Ledger errors
///
/// `EmptyChain` indicates a construction bug (a ledger always holds genesis);
/// it is not an ordinary negative outcome and should not be caught and
/// retried.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("ledger has no blocks")]
    EmptyChain,

    #[error("invalid peer address: {0}")]
    InvalidPeerAddress(String),
}

/// The replicated append-only ledger
///
/// Owns the ordered block sequence, the pending-transaction buffer, and the
/// set of known peers. `seal_block` is the only path that appends blocks;
/// `replace_chain` (used by consensus) is the only path that discards them.
pub struct Ledger {
    /// Sealed blocks, genesis first
    chain: Vec<Block>,

    /// Transactions accepted but not yet sealed into a block
    pending: Vec<Transaction>,

    /// Known peers, normalized to `host:port`
    peers: HashSet<String>,
}

impl Ledger {
    /// Create a ledger holding only the genesis block
    pub fn new() -> Self {
        Self {
            chain: vec![Block::genesis()],
            pending: Vec::new(),
            peers: HashSet::new(),
        }
    }

    /// The current head of the chain
    pub fn head(&self) -> Result<&Block, LedgerError> {
        self.chain.last().ok_or(LedgerError::EmptyChain)
    }

    /// Seal the pending buffer into a new block and append it
    ///
    /// No validation happens here: the caller (the mining workflow) is
    /// responsible for supplying a proof that satisfies the proof-of-work
    /// predicate and, when given, a correct predecessor hash. When
    /// `previous_hash` is `None` it is computed from the current head.
    pub fn seal_block(
        &mut self,
        proof: u64,
        previous_hash: Option<String>,
    ) -> Result<&Block, LedgerError> {
        let previous_hash = match previous_hash {
            Some(hash) => hash,
            None => block_hash(self.head()?),
        };

        let block = Block::new(
            self.chain.len() as u64 + 1,
            std::mem::take(&mut self.pending),
            proof,
            previous_hash,
        );
        self.chain.push(block);

        self.head()
    }

    /// Buffer a transaction; returns the index of the block it will be
    /// sealed into
    pub fn add_transaction(
        &mut self,
        sender: impl Into<String>,
        recipient: impl Into<String>,
        amount: i64,
    ) -> Result<u64, LedgerError> {
        let next_index = self.head()?.index + 1;
        self.pending.push(Transaction::new(sender, recipient, amount));
        Ok(next_index)
    }

    /// Register a peer address, normalized to `host:port`; idempotent
    pub fn register_peer(&mut self, address: &str) -> Result<(), LedgerError> {
        let normalized = normalize_peer_address(address)?;
        self.peers.insert(normalized);
        Ok(())
    }

    /// Replace the whole chain; only consensus resolution calls this
    pub fn replace_chain(&mut self, chain: Vec<Block>) {
        self.chain = chain;
    }

    pub fn chain(&self) -> &[Block] {
        &self.chain
    }

    pub fn pending(&self) -> &[Transaction] {
        &self.pending
    }

    pub fn peers(&self) -> &HashSet<String> {
        &self.peers
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalize a peer address to `host:port`
///
/// Accepts bare `host:port` as well as `http://` / `https://` URLs, whose
/// path component is discarded.
fn normalize_peer_address(address: &str) -> Result<String, LedgerError> {
    let trimmed = address.trim();
    let without_scheme = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"))
        .unwrap_or(trimmed);

    let host_port = without_scheme.split('/').next().unwrap_or_default();

    let Some((host, port)) = host_port.rsplit_once(':') else {
        return Err(LedgerError::InvalidPeerAddress(address.to_string()));
    };
    if host.is_empty() || port.parse::<u16>().is_err() {
        return Err(LedgerError::InvalidPeerAddress(address.to_string()));
    }

    Ok(host_port.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tinychain_common::config::protocol;

    #[test]
    fn test_genesis_invariant() {
        let ledger = Ledger::new();

        assert_eq!(ledger.len(), 1);
        let genesis = ledger.head().unwrap();
        assert_eq!(genesis.index, 1);
        assert_eq!(genesis.previous_hash, protocol::GENESIS_PREVIOUS_HASH);
        assert_eq!(genesis.proof, protocol::GENESIS_PROOF);
    }

    #[test]
    fn test_monotonic_indexing() {
        let mut ledger = Ledger::new();
        for proof in [10u64, 20, 30] {
            ledger.seal_block(proof, None).unwrap();
        }

        for (i, block) in ledger.chain().iter().enumerate() {
            assert_eq!(block.index, i as u64 + 1);
        }
    }

    #[test]
    fn test_seal_links_to_head_by_default() {
        let mut ledger = Ledger::new();
        let head_hash = block_hash(ledger.head().unwrap());

        let sealed = ledger.seal_block(42, None).unwrap();
        assert_eq!(sealed.previous_hash, head_hash);
    }

    #[test]
    fn test_add_transaction_reports_target_block() {
        let mut ledger = Ledger::new();

        let index = ledger.add_transaction("alice", "bob", 5).unwrap();
        assert_eq!(index, 2);
        assert_eq!(ledger.pending().len(), 1);
    }

    #[test]
    fn test_seal_drains_pending_buffer() {
        let mut ledger = Ledger::new();
        ledger.add_transaction("alice", "bob", 5).unwrap();
        ledger.add_transaction("bob", "carol", 2).unwrap();

        let sealed = ledger.seal_block(42, None).unwrap();
        assert_eq!(sealed.transaction_count(), 2);
        assert!(ledger.pending().is_empty());

        // Sealing again with nothing buffered yields an empty block.
        let empty = ledger.seal_block(43, None).unwrap();
        assert_eq!(empty.transaction_count(), 0);
    }

    #[test]
    fn test_register_peer_normalizes_and_dedupes() {
        let mut ledger = Ledger::new();

        ledger.register_peer("http://10.0.0.1:7000").unwrap();
        ledger.register_peer("10.0.0.1:7000").unwrap();
        ledger.register_peer("https://10.0.0.1:7000/chain").unwrap();

        assert_eq!(ledger.peers().len(), 1);
        assert!(ledger.peers().contains("10.0.0.1:7000"));
    }

    #[test]
    fn test_register_peer_rejects_malformed_addresses() {
        let mut ledger = Ledger::new();

        for bad in ["", "http://", "nohost", ":7000", "host:notaport"] {
            let err = ledger.register_peer(bad).unwrap_err();
            assert!(matches!(err, LedgerError::InvalidPeerAddress(_)), "{bad}");
        }
        assert!(ledger.peers().is_empty());
    }

    #[test]
    fn test_replace_chain_swaps_wholesale() {
        let mut ledger = Ledger::new();
        ledger.seal_block(42, None).unwrap();

        let mut other = Ledger::new();
        other.seal_block(7, None).unwrap();
        other.seal_block(8, None).unwrap();
        other.seal_block(9, None).unwrap();

        ledger.replace_chain(other.chain().to_vec());
        assert_eq!(ledger.len(), 4);
    }
}
