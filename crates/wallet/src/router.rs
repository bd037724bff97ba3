use std::sync::Arc;

use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};

use crate::{handlers, state::WalletBridgeState};

/// The bridge API routes, guarded by the session token middleware.
///
/// Callers nest this wherever it should live (the portal mounts it under
/// `/api/wallet`).
pub(crate) fn build_router(state: Arc<WalletBridgeState>) -> Router {
    Router::new()
        .route("/connection", get(handlers::get_connection))
        .route("/connection", post(handlers::post_connection))
        .route("/transaction/request", get(handlers::get_next_transaction_request))
        .route("/transaction/response", post(handlers::post_transaction_response))
        .route("/chain/request", get(handlers::get_next_chain_request))
        .route("/chain/response", post(handlers::post_chain_response))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_session_token))
        .with_state(state)
}

async fn require_session_token(
    State(state): State<Arc<WalletBridgeState>>,
    req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let expected = state.session_token();
    let ok = req
        .headers()
        .get("X-Session-Token")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == expected.as_str())
        .unwrap_or(false);

    if !ok {
        return Err(StatusCode::FORBIDDEN);
    }

    Ok(next.run(req).await)
}
