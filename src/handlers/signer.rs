//! Signed WebSocket URL issuance for the Xunfei TTS API.
//!
//! This is the trust boundary of the system: the handler runs where the
//! long-lived API secret lives, stamps a fresh signature per request, and
//! hands untrusted callers a short-lived connection URL plus the app id.
//! Callers in the secure path never compute their own signature.

use axum::Json;
use axum::extract::State;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::core::tts::xunfei::UrlSigner;
use crate::errors::AppError;
use crate::state::AppState;

/// Success body of the credential endpoint:
/// `{"wsUrl": "wss://…", "appId": "…"}`.
#[derive(Debug, Serialize)]
pub struct TtsWsUrlResponse {
    #[serde(rename = "wsUrl")]
    pub ws_url: String,
    #[serde(rename = "appId")]
    pub app_id: String,
}

/// Handler for GET /api/xunfei/tts-ws-url - issue a signed session URL.
///
/// On missing credentials, responds 500 with a body naming exactly the
/// absent fields (see [`crate::errors::CredentialErrorBody`]); no signing
/// work happens before that check.
pub async fn tts_ws_url(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TtsWsUrlResponse>, AppError> {
    let credentials = state.config.xunfei_credentials().map_err(|missing| {
        warn!(missing = %missing, "refusing to issue session URL");
        AppError::MissingCredentials(missing)
    })?;

    let signer = UrlSigner::new(credentials);
    let ws_url = signer.issue();
    debug!("issued signed TTS session URL");

    Ok(Json(TtsWsUrlResponse {
        ws_url,
        app_id: signer.app_id().to_string(),
    }))
}
