/// Shared types and configuration for tinychain
///
/// This crate holds the pieces every other tinychain crate needs:
/// the node configuration (with TOML load/save) and the timestamp type
/// blocks are stamped with.

pub mod config;
pub mod types;

pub use config::{ConfigError, NodeConfig};
pub use types::Timestamp;
