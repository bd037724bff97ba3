use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::Html,
    routing::{get, post},
};
use serde::Deserialize;
use tracing::debug;
use waveportal_client::{SessionState, WaveClient};
use waveportal_wallet::WalletBridge;

use crate::utils::PortalProvider;

const PORTAL_HTML: &str = include_str!("assets/portal.html");

#[derive(Clone)]
struct AppState {
    client: WaveClient<PortalProvider>,
    page: Arc<String>,
}

/// The portal server: the page at `/`, the portal API under `/api`, and the
/// wallet bridge nested under `/api/wallet`.
pub(crate) fn router(client: WaveClient<PortalProvider>, bridge: &WalletBridge) -> Router {
    let page = PORTAL_HTML.replace("__SESSION_TOKEN__", bridge.session_token().as_str());
    let state = AppState { client, page: Arc::new(page) };

    Router::new()
        .route("/", get(serve_index))
        .route("/api/state", get(get_state))
        .route("/api/wave", post(post_wave))
        .route("/api/refresh", post(post_refresh))
        .with_state(state)
        .nest("/api/wallet", bridge.router())
}

async fn serve_index(State(state): State<AppState>) -> Html<String> {
    Html(state.page.as_ref().clone())
}

async fn get_state(State(state): State<AppState>) -> Json<SessionState> {
    Json(state.client.snapshot())
}

#[derive(Debug, Deserialize)]
struct WaveRequest {
    message: String,
}

/// Kicks off a submission and returns immediately; the outcome lands in the
/// session state the page is already polling.
async fn post_wave(State(state): State<AppState>, Json(body): Json<WaveRequest>) -> StatusCode {
    let client = state.client.clone();
    tokio::spawn(async move {
        if let Err(err) = client.submit(&body.message).await {
            debug!(target: "waveportal", %err, "wave submission failed");
        }
    });
    StatusCode::ACCEPTED
}

async fn post_refresh(State(state): State<AppState>) -> StatusCode {
    let client = state.client.clone();
    tokio::spawn(async move {
        if let Err(err) = client.fetch_history().await {
            debug!(target: "waveportal", %err, "history refresh failed");
        }
    });
    StatusCode::ACCEPTED
}
