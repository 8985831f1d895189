use serde::{Deserialize, Serialize};
use tinychain_common::config::protocol;

/// Sender identifier that marks a mining reward
pub const REWARD_SENDER: &str = "0";

/// A transfer of value between two identities
///
/// Transactions are immutable once created. They live in the ledger's pending
/// buffer until a block is sealed, at which point the block takes ownership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Sender identifier ("0" for mining rewards)
    pub sender: String,

    /// Recipient identifier
    pub recipient: String,

    /// Transferred amount
    pub amount: i64,
}

impl Transaction {
    /// Create a new transaction
    pub fn new(sender: impl Into<String>, recipient: impl Into<String>, amount: i64) -> Self {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
            amount,
        }
    }

    /// Create the mining-reward transaction credited to the sealing node
    pub fn reward(recipient: impl Into<String>) -> Self {
        Self::new(REWARD_SENDER, recipient, protocol::MINING_REWARD)
    }

    /// Whether this transaction is a mining reward
    pub fn is_reward(&self) -> bool {
        self.sender == REWARD_SENDER
    }
}
