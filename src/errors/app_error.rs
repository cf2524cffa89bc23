//! HTTP-layer error responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::core::tts::xunfei::auth::MissingCredentials;

/// Errors surfaced by the HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Signer credentials are not configured; maps to the credential
    /// endpoint's 500 contract.
    MissingCredentials(MissingCredentials),
}

/// Body of the misconfiguration response:
/// `{"error": "...", "missing": {"apiKey": bool, "apiSecret": bool, "appId": bool}}`.
#[derive(Debug, Serialize)]
pub struct CredentialErrorBody {
    pub error: String,
    pub missing: MissingCredentials,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::MissingCredentials(missing) => {
                let body = CredentialErrorBody {
                    error: "API credentials not configured on server.".to_string(),
                    missing,
                };
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}
