/// API request handlers

use super::responses::*;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tinychain_core::{ChainSnapshot, Node};
use tracing::{debug, error};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub node: Arc<Node>,
}

/// Handler for GET /mine
pub async fn mine(State(state): State<AppState>) -> Result<Json<MineResponse>, AppError> {
    debug!("API: GET /mine");

    match state.node.mine().await? {
        Some(block) => Ok(Json(MineResponse {
            message: "New block sealed".to_string(),
            index: block.index,
            transactions: block.transactions,
            proof: block.proof,
            previous_hash: block.previous_hash,
        })),
        None => Err(AppError::unavailable(
            "mining iteration cap reached before a proof was found",
        )),
    }
}

/// Handler for POST /transactions/new
///
/// The typed extractor rejects bodies missing any of the three fields before
/// this handler runs.
pub async fn new_transaction(
    State(state): State<AppState>,
    Json(request): Json<TransactionRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    debug!("API: POST /transactions/new");

    let index = state
        .node
        .submit_transaction(request.sender, request.recipient, request.amount)
        .await
        .map_err(|err| AppError::internal(err.to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: format!("Transaction will be sealed into block {index}"),
        }),
    ))
}

/// Handler for GET /chain
pub async fn full_chain(State(state): State<AppState>) -> Json<ChainSnapshot> {
    debug!("API: GET /chain");

    Json(state.node.chain_snapshot().await)
}

/// Handler for POST /nodes/register
pub async fn register_peers(
    State(state): State<AppState>,
    Json(request): Json<RegisterPeersRequest>,
) -> Result<(StatusCode, Json<RegisterPeersResponse>), AppError> {
    debug!("API: POST /nodes/register");

    if request.nodes.is_empty() {
        return Err(AppError::bad_request("peer list is empty"));
    }

    let total_nodes = state
        .node
        .register_peers(&request.nodes)
        .await
        .map_err(|err| AppError::bad_request(err.to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterPeersResponse {
            message: "Peers registered".to_string(),
            total_nodes,
        }),
    ))
}

/// Handler for GET /nodes/resolve
pub async fn resolve(State(state): State<AppState>) -> Json<ResolveResponse> {
    debug!("API: GET /nodes/resolve");

    let (replaced, snapshot) = state.node.resolve_conflicts().await;
    let message = if replaced {
        "Local chain was replaced"
    } else {
        "Local chain is authoritative"
    };

    Json(ResolveResponse {
        replaced,
        message: message.to_string(),
        chain: snapshot.chain,
    })
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    debug!("API: GET /health");
    (StatusCode::OK, "OK")
}

/// Application error type
pub struct AppError {
    message: String,
    status_code: StatusCode,
}

impl AppError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: StatusCode::BAD_REQUEST,
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("API Error: {}", self.message);

        let body = Json(ErrorResponse::new(self.message, self.status_code.as_u16()));

        (self.status_code, body).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::internal(err.to_string())
    }
}
