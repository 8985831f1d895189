/// API request and response types

use serde::{Deserialize, Serialize};
use tinychain_core::{Block, Transaction};

/// New transaction request
#[derive(Debug, Serialize, Deserialize)]
pub struct TransactionRequest {
    /// Sender identifier
    pub sender: String,
    /// Recipient identifier
    pub recipient: String,
    /// Transferred amount
    pub amount: i64,
}

/// Peer registration request
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterPeersRequest {
    /// Peer addresses, as `host:port` or full URLs
    pub nodes: Vec<String>,
}

/// Mining response
#[derive(Debug, Serialize, Deserialize)]
pub struct MineResponse {
    /// Human-readable outcome
    pub message: String,
    /// Index of the sealed block
    pub index: u64,
    /// Transactions sealed into the block
    pub transactions: Vec<Transaction>,
    /// The proof found by the miner
    pub proof: u64,
    /// Digest of the predecessor block
    pub previous_hash: String,
}

/// Simple message response
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable outcome
    pub message: String,
}

/// Peer registration response
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterPeersResponse {
    /// Human-readable outcome
    pub message: String,
    /// Total number of known peers after registration
    pub total_nodes: usize,
}

/// Conflict resolution response
#[derive(Debug, Serialize, Deserialize)]
pub struct ResolveResponse {
    /// Whether the local chain was replaced
    pub replaced: bool,
    /// Human-readable outcome
    pub message: String,
    /// The chain that is now authoritative
    pub chain: Vec<Block>,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: u16,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
        }
    }
}
