/// API server implementation

use super::handlers::*;
use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tinychain_core::Node;
use tower_http::cors::CorsLayer;
use tracing::info;

/// HTTP server exposing the node's mine/transaction/chain/peer endpoints
pub struct ApiServer {
    listen_addr: SocketAddr,
    node: Arc<Node>,
}

impl ApiServer {
    /// Create a new API server
    pub fn new(listen_addr: SocketAddr, node: Arc<Node>) -> Self {
        Self { listen_addr, node }
    }

    /// Build the router over the shared node handle
    pub fn router(node: Arc<Node>) -> Router {
        let state = AppState { node };

        Router::new()
            // Health check
            .route("/health", get(health_check))
            // Mining and transactions
            .route("/mine", get(mine))
            .route("/transactions/new", post(new_transaction))
            // Chain inspection (also the peer wire contract)
            .route("/chain", get(full_chain))
            // Peer bookkeeping and consensus
            .route("/nodes/register", post(register_peers))
            .route("/nodes/resolve", get(resolve))
            .layer(CorsLayer::permissive())
            .with_state(state)
    }

    /// Start the API server
    pub async fn start(self) -> Result<()> {
        let app = Self::router(self.node);

        info!("API server starting on {}", self.listen_addr);

        let listener = tokio::net::TcpListener::bind(self.listen_addr).await?;

        axum::serve(listener, app)
            .await
            .map_err(|e| anyhow::anyhow!("API server error: {}", e))?;

        Ok(())
    }
}
