/// Ledger, proof-of-work, and chain consensus
///
/// This module implements the core of tinychain: the block/transaction data
/// model, the canonical block digest, the proof-of-work miner, the ledger
/// that owns the chain and the pending buffer, the chain-validity predicate,
/// and the longest-valid-chain conflict resolver.

mod block;
mod hashing;
mod ledger;
mod pow;
mod resolver;
mod transaction;
mod validator;

pub use block::Block;
pub use hashing::block_hash;
pub use ledger::{Ledger, LedgerError};
pub use pow::Miner;
pub use resolver::{ChainSnapshot, ConsensusResolver};
pub use transaction::{Transaction, REWARD_SENDER};
pub use validator::is_valid_chain;
