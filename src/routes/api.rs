use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::handlers::{signer, voices};
use crate::state::AppState;
use std::sync::Arc;

/// Create the API router
///
/// Note: CORS and rate limiting layers are applied in main.rs after the
/// full router is assembled
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/xunfei/tts-ws-url", get(signer::tts_ws_url))
        .route("/api/xunfei/voices", get(voices::list_voices))
        .layer(TraceLayer::new_for_http())
}
