/// tinychain node runtime
///
/// The `Node` owns the ledger behind an async lock and coordinates the miner
/// and the consensus resolver. It is the handle the HTTP transport works
/// through: no process-wide state, every handler gets an explicit `Arc<Node>`.

use crate::consensus::{
    block_hash, Block, ChainSnapshot, ConsensusResolver, Ledger, LedgerError, Miner, REWARD_SENDER,
};
use anyhow::Result;
use std::sync::Arc;
use tinychain_common::config::protocol;
use tinychain_common::NodeConfig;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

pub struct Node {
    /// This node's identity, credited on every block it seals
    node_id: String,

    /// The ledger; all mutators serialize on the write lock
    ledger: Arc<RwLock<Ledger>>,

    /// Proof-of-work parameters
    miner: Miner,

    /// Longest-valid-chain conflict resolution
    resolver: ConsensusResolver,
}

impl Node {
    /// Create a node from configuration, registering any bootstrap peers
    pub fn new(config: &NodeConfig) -> Result<Self> {
        let node_id = Uuid::new_v4().simple().to_string();
        info!(%node_id, difficulty = config.difficulty, "initializing node");

        let miner = Miner::new(config.difficulty, config.max_mining_iterations);
        let resolver = ConsensusResolver::new(miner.clone(), config.peer_timeout())?;

        let mut ledger = Ledger::new();
        for peer in &config.bootstrap_peers {
            ledger.register_peer(peer)?;
        }

        Ok(Self {
            node_id,
            ledger: Arc::new(RwLock::new(ledger)),
            miner,
            resolver,
        })
    }

    /// Mine one block: find a proof for the current head, credit the mining
    /// reward, and seal the pending buffer
    ///
    /// The proof search runs on a blocking thread with no ledger lock held,
    /// so transaction submission and chain reads are never starved while a
    /// proof is being ground out. Because the head can move while the lock is
    /// released (a concurrent mine, or consensus replacing the chain), the
    /// seal re-checks under the write lock that the head is still the one
    /// the proof was mined against, and restarts the search otherwise —
    /// sealing against a stale head would break the chain's hash linkage.
    /// `Ok(None)` means the configured iteration cap was reached before a
    /// proof was found.
    pub async fn mine(&self) -> Result<Option<Block>> {
        loop {
            let (last_proof, previous_hash) = {
                let guard = self.ledger.read().await;
                let head = guard.head()?;
                (head.proof, block_hash(head))
            };

            let miner = self.miner.clone();
            let proof = tokio::task::spawn_blocking(move || miner.find_proof(last_proof)).await?;

            let Some(proof) = proof else {
                debug!(last_proof, "mining iteration cap reached");
                return Ok(None);
            };

            let mut guard = self.ledger.write().await;
            if block_hash(guard.head()?) != previous_hash {
                debug!(last_proof, "head moved while mining, restarting search");
                continue;
            }

            guard.add_transaction(REWARD_SENDER, self.node_id.clone(), protocol::MINING_REWARD)?;
            let block = guard.seal_block(proof, Some(previous_hash))?.clone();

            info!(
                index = block.index,
                proof,
                transactions = block.transaction_count(),
                "sealed block"
            );
            return Ok(Some(block));
        }
    }

    /// Buffer a transaction; returns the index of the block that will
    /// eventually contain it
    pub async fn submit_transaction(
        &self,
        sender: impl Into<String>,
        recipient: impl Into<String>,
        amount: i64,
    ) -> Result<u64, LedgerError> {
        let mut guard = self.ledger.write().await;
        guard.add_transaction(sender, recipient, amount)
    }

    /// Read-only copy of the full chain, in the peer wire shape
    pub async fn chain_snapshot(&self) -> ChainSnapshot {
        let guard = self.ledger.read().await;
        ChainSnapshot {
            length: guard.len(),
            chain: guard.chain().to_vec(),
        }
    }

    /// Register peer addresses; returns the total number of known peers
    pub async fn register_peers(&self, addresses: &[String]) -> Result<usize, LedgerError> {
        let mut guard = self.ledger.write().await;
        for address in addresses {
            guard.register_peer(address)?;
        }
        Ok(guard.peers().len())
    }

    /// Run conflict resolution against all known peers
    ///
    /// Returns whether the local chain was replaced, along with the chain
    /// that is now authoritative.
    pub async fn resolve_conflicts(&self) -> (bool, ChainSnapshot) {
        let replaced = self.resolver.resolve(&self.ledger).await;
        (replaced, self.chain_snapshot().await)
    }

    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    pub async fn peer_count(&self) -> usize {
        self.ledger.read().await.peers().len()
    }
}
