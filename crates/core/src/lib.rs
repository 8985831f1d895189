pub mod consensus;
pub mod node;

pub use consensus::{
    block_hash, is_valid_chain, Block, ChainSnapshot, ConsensusResolver, Ledger, LedgerError,
    Miner, Transaction, REWARD_SENDER,
};
pub use node::Node;
