use std::sync::Arc;

use axum::{Json, extract::State};
use tracing::debug;

use crate::{
    state::WalletBridgeState,
    types::{
        ApiResponse, BridgeTransaction, ChainSwitchRequest, ChainSwitchResponse, Connection,
        ConnectionReport, TransactionResponse,
    },
};

pub(crate) async fn get_connection(
    State(state): State<Arc<WalletBridgeState>>,
) -> Json<ApiResponse<Option<Connection>>> {
    Json(ApiResponse::ok(state.get_connection()))
}

pub(crate) async fn post_connection(
    State(state): State<Arc<WalletBridgeState>>,
    Json(report): Json<ConnectionReport>,
) -> Json<ApiResponse<()>> {
    debug!(
        target: "waveportal::wallet",
        has_provider = report.has_provider,
        connected = report.connection.is_some(),
        "connection report"
    );
    state.set_report(report);
    Json(ApiResponse::ok(()))
}

pub(crate) async fn get_next_transaction_request(
    State(state): State<Arc<WalletBridgeState>>,
) -> Json<ApiResponse<BridgeTransaction>> {
    match state.read_next_transaction_request() {
        Some(request) => Json(ApiResponse::ok(request)),
        None => Json(ApiResponse::error("No pending transaction")),
    }
}

pub(crate) async fn post_transaction_response(
    State(state): State<Arc<WalletBridgeState>>,
    Json(response): Json<TransactionResponse>,
) -> Json<ApiResponse<()>> {
    if !state.has_transaction_request(&response.id) {
        return Json(ApiResponse::error("Unknown transaction id"));
    }
    debug!(target: "waveportal::wallet", id = %response.id, ok = response.error.is_none(), "transaction response");
    state.add_transaction_response(response);
    Json(ApiResponse::ok(()))
}

pub(crate) async fn get_next_chain_request(
    State(state): State<Arc<WalletBridgeState>>,
) -> Json<ApiResponse<ChainSwitchRequest>> {
    match state.read_next_switch_request() {
        Some(request) => Json(ApiResponse::ok(request)),
        None => Json(ApiResponse::error("No pending chain switch")),
    }
}

pub(crate) async fn post_chain_response(
    State(state): State<Arc<WalletBridgeState>>,
    Json(response): Json<ChainSwitchResponse>,
) -> Json<ApiResponse<()>> {
    if !state.has_switch_request(&response.id) {
        return Json(ApiResponse::error("Unknown chain switch id"));
    }
    state.add_switch_response(response);
    Json(ApiResponse::ok(()))
}
