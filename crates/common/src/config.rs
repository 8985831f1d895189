use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Protocol constants
pub mod protocol {
    /// Default port for the HTTP node API
    pub const DEFAULT_PORT: u16 = 7000;

    /// Proof-of-work difficulty: number of leading zero hex digits required
    pub const DEFAULT_DIFFICULTY: usize = 4;

    /// Per-peer timeout when fetching chains during conflict resolution
    pub const PEER_TIMEOUT_SECS: u64 = 5;

    /// Proof carried by every genesis block
    pub const GENESIS_PROOF: u64 = 100;

    /// Previous-hash sentinel carried by every genesis block
    pub const GENESIS_PREVIOUS_HASH: &str = "1";

    /// Credit paid to the local node for sealing a block
    pub const MINING_REWARD: i64 = 1;
}

/// Node configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Listen address
    pub listen_addr: String,

    /// Listen port
    pub listen_port: u16,

    /// Proof-of-work difficulty (leading zero hex digits)
    pub difficulty: usize,

    /// Optional cap on proof-of-work search iterations (unbounded when absent)
    pub max_mining_iterations: Option<u64>,

    /// Per-peer timeout for consensus fetches, in seconds
    pub peer_timeout_secs: u64,

    /// Peers registered at startup, as `host:port` or full URLs
    pub bootstrap_peers: Vec<String>,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0".to_string(),
            listen_port: protocol::DEFAULT_PORT,
            difficulty: protocol::DEFAULT_DIFFICULTY,
            max_mining_iterations: None,
            peer_timeout_secs: protocol::PEER_TIMEOUT_SECS,
            bootstrap_peers: Vec::new(),
        }
    }
}

impl NodeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.listen_port = port;
        self
    }

    pub fn with_difficulty(mut self, difficulty: usize) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_max_mining_iterations(mut self, cap: u64) -> Self {
        self.max_mining_iterations = Some(cap);
        self
    }

    pub fn with_bootstrap_peers(mut self, peers: Vec<String>) -> Self {
        self.bootstrap_peers = peers;
        self
    }

    pub fn peer_timeout(&self) -> Duration {
        Duration::from_secs(self.peer_timeout_secs)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError(e.to_string()))?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Save configuration to a TOML file
    pub fn to_file(&self, path: &PathBuf) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(path, contents).map_err(|e| ConfigError::WriteError(e.to_string()))?;

        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config: {0}")]
    ParseError(String),

    #[error("Failed to serialize config: {0}")]
    SerializeError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),
}
