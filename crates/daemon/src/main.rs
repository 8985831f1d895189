/// tinychain daemon - proof-of-work ledger node
///
/// Runs a single tinychain node: an in-memory ledger with a proof-of-work
/// miner and longest-valid-chain consensus, exposed over HTTP so that peers
/// (and clients) can submit transactions, trigger mining, fetch the chain,
/// and reconcile replicas.

use anyhow::Result;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn, Level};
use tracing_subscriber;

use tinychain_common::NodeConfig;
use tinychain_core::Node;
use tinychain_daemon::ApiServer;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    info!("Starting tinychain daemon v{}", env!("CARGO_PKG_VERSION"));

    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "help" | "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "version" | "--version" | "-v" => {
                println!("tinychain daemon v{}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            _ => {
                eprintln!("Unknown command: {}", args[1]);
                eprintln!("Run with 'help' to see available commands");
                std::process::exit(1);
            }
        }
    }

    run_node().await
}

/// Load configuration and serve the node
async fn run_node() -> Result<()> {
    // Load or create default configuration
    let config_path = PathBuf::from("tinychain.toml");
    let config = if config_path.exists() {
        info!("Loading configuration from {:?}", config_path);
        NodeConfig::from_file(&config_path)?
    } else {
        info!("No configuration file found, using defaults");
        let config = NodeConfig::default();

        // Save default config for next time
        if let Err(e) = config.to_file(&config_path) {
            warn!("Failed to save default config: {}", e);
        } else {
            info!("Saved default configuration to {:?}", config_path);
        }

        config
    };

    let node = Arc::new(Node::new(&config)?);
    info!("Node ID: {}", node.node_id());

    let listen_addr: SocketAddr =
        format!("{}:{}", config.listen_addr, config.listen_port).parse()?;

    ApiServer::new(listen_addr, node).start().await
}

/// Print help message
fn print_help() {
    println!("tinychain daemon - proof-of-work ledger node");
    println!();
    println!("USAGE:");
    println!("    tinychain-daemon [COMMAND]");
    println!();
    println!("COMMANDS:");
    println!("    help        Show this help message");
    println!("    version     Show version information");
    println!();
    println!("Without a command the node starts and serves its HTTP API.");
    println!("Configuration is read from ./tinychain.toml (created with");
    println!("defaults on first run).");
    println!();
    println!("ENDPOINTS:");
    println!("    GET  /mine               Mine one block");
    println!("    POST /transactions/new   Submit a transaction");
    println!("    GET  /chain              Fetch the full chain");
    println!("    POST /nodes/register     Register peer addresses");
    println!("    GET  /nodes/resolve      Run conflict resolution");
}
