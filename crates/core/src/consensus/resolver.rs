use super::block::Block;
use super::ledger::Ledger;
use super::pow::Miner;
use super::validator::is_valid_chain;
use anyhow::Result;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// A replica's full chain as served on `GET /chain`
///
/// This is the typed peer wire contract: anything a peer sends that does not
/// deserialize into this shape is treated as "peer unavailable" before any
/// validation runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainSnapshot {
    /// Self-reported chain length; must match `chain.len()`
    pub length: usize,

    /// The full ordered block sequence, genesis first
    pub chain: Vec<Block>,
}

/// Longest-valid-chain conflict resolution
///
/// Polls every known peer for its chain and adopts the longest one that
/// passes validation. The rule is Nakamoto-style: with constant difficulty,
/// chain length approximates accumulated proof-of-work, so no voting round or
/// leader election is needed and repeated resolution converges.
pub struct ConsensusResolver {
    client: reqwest::Client,
    miner: Miner,
}

impl ConsensusResolver {
    /// Create a resolver with the given per-peer timeout
    pub fn new(miner: Miner, peer_timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(peer_timeout).build()?;
        Ok(Self { client, miner })
    }

    /// Fetch one peer's chain; any failure means "peer unavailable"
    ///
    /// Transport errors, timeouts, non-2xx statuses, and bodies that do not
    /// deserialize are all skipped the same way: resolution never aborts on a
    /// bad peer.
    pub async fn fetch_snapshot(&self, peer: &str) -> Option<ChainSnapshot> {
        let url = format!("http://{peer}/chain");

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(err) => {
                debug!(peer, %err, "peer unavailable");
                return None;
            }
        };

        if !response.status().is_success() {
            debug!(peer, status = %response.status(), "peer returned non-success");
            return None;
        }

        match response.json::<ChainSnapshot>().await {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                debug!(peer, %err, "peer sent malformed chain");
                return None;
            }
        }
    }

    /// Pick the longest valid chain strictly longer than `local_length`
    ///
    /// A snapshot whose self-reported length disagrees with its actual block
    /// count is ignored: a peer must not win consensus by inflating `length`.
    pub fn select_longest(
        &self,
        local_length: usize,
        snapshots: impl IntoIterator<Item = ChainSnapshot>,
    ) -> Option<Vec<Block>> {
        let mut max_length = local_length;
        let mut candidate = None;

        for snapshot in snapshots {
            if snapshot.length != snapshot.chain.len() {
                debug!(
                    reported = snapshot.length,
                    actual = snapshot.chain.len(),
                    "snapshot length mismatch, ignoring"
                );
                continue;
            }

            if snapshot.length > max_length && is_valid_chain(&snapshot.chain, &self.miner) {
                max_length = snapshot.length;
                candidate = Some(snapshot.chain);
            }
        }

        candidate
    }

    /// Poll all known peers and adopt the longest valid chain, if any
    ///
    /// Fetches fan out concurrently, so total latency is bounded by the
    /// slowest responsive peer. Returns true iff the local chain was
    /// replaced; an unreachable or invalid peer is never an error.
    pub async fn resolve(&self, ledger: &RwLock<Ledger>) -> bool {
        let (peers, local_length) = {
            let guard = ledger.read().await;
            let peers: Vec<String> = guard.peers().iter().cloned().collect();
            (peers, guard.len())
        };

        if peers.is_empty() {
            return false;
        }

        let fetches = peers.iter().map(|peer| self.fetch_snapshot(peer));
        let snapshots: Vec<ChainSnapshot> =
            join_all(fetches).await.into_iter().flatten().collect();

        let Some(chain) = self.select_longest(local_length, snapshots) else {
            return false;
        };

        let mut guard = ledger.write().await;
        // The local chain may have grown while we were polling; never replace
        // it with something that is no longer strictly longer.
        if chain.len() <= guard.len() {
            return false;
        }

        info!(
            old_length = guard.len(),
            new_length = chain.len(),
            "adopting longer valid chain from peers"
        );
        guard.replace_chain(chain);
        true
    }
}
