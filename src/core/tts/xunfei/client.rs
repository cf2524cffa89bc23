//! Streaming session client for the Xunfei TTS WebSocket API.
//!
//! One [`synthesize`](XunfeiTtsClient::synthesize) call drives exactly one
//! session: fetch a signed URL from the trusted signer, open one WebSocket
//! connection, send one request frame, and fold the chunked responses into
//! a single [`AudioArtifact`] or a single terminal [`TtsError`].
//!
//! # Session lifecycle
//!
//! ```text
//! AwaitingCredential ──▶ Connecting ──▶ AwaitingFirstFrame ──▶ Streaming ──▶ Completed
//!         │                  │                  │                  │
//!         └──────────────────┴──────────────────┴──────────────────┴──▶ Failed
//! ```
//!
//! The machine is driven by awaited transport events; there is no callback
//! wiring and no shared mutable state. Each call owns its connection and
//! chunk buffer, so concurrent calls are fully isolated. There are no
//! retries and no session-level timeout: a failed credential fetch, a
//! failed connection, or an upstream error code all surface as one terminal
//! failure, and retry policy belongs to the caller.

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::protocol::Message;
use tracing::{debug, info, warn};
use url::Url;

use super::config::SynthesisParams;
use super::messages::{AudioArtifact, SynthesisRequest, SynthesisResponse};
use crate::errors::tts_error::{TtsError, TtsResult};

// =============================================================================
// Credential source
// =============================================================================

/// A signed session credential: the single-use connection URL plus the app
/// id that must accompany the request frame.
#[derive(Debug, Clone)]
pub struct SessionCredential {
    pub ws_url: String,
    pub app_id: String,
}

/// Source of signed session credentials.
///
/// The secure path fetches credentials from the trusted signer over HTTP
/// ([`HttpCredentialSource`]); the client never computes its own signature.
#[async_trait]
pub trait CredentialSource: Send + Sync {
    async fn issue(&self) -> TtsResult<SessionCredential>;
}

/// Fetches session credentials from the signer's HTTP endpoint.
///
/// Expects a JSON body `{"wsUrl": "...", "appId": "..."}`. Both fields are
/// required; a response missing either one fails the session even though
/// the app id is conceptually independent of the signature.
pub struct HttpCredentialSource {
    endpoint: String,
    http: reqwest::Client,
}

impl HttpCredentialSource {
    /// Create a source against a signer endpoint URL
    /// (e.g. `http://localhost:3001/api/xunfei/tts-ws-url`).
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            http: reqwest::Client::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SignerSuccessBody {
    #[serde(rename = "wsUrl", default)]
    ws_url: Option<String>,
    #[serde(rename = "appId", default)]
    app_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SignerErrorBody {
    #[serde(default)]
    error: Option<String>,
}

#[async_trait]
impl CredentialSource for HttpCredentialSource {
    async fn issue(&self) -> TtsResult<SessionCredential> {
        let response = self
            .http
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| TtsError::Credential(format!("Signer request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<SignerErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| format!("Signer returned status {status}"));
            return Err(TtsError::Credential(detail));
        }

        let body: SignerSuccessBody = response
            .json()
            .await
            .map_err(|e| TtsError::Credential(format!("Failed to parse signer response: {e}")))?;

        let ws_url = body
            .ws_url
            .filter(|v| !v.is_empty())
            .ok_or_else(|| TtsError::Credential("Signer response is missing wsUrl".to_string()))?;
        let app_id = body
            .app_id
            .filter(|v| !v.is_empty())
            .ok_or_else(|| TtsError::Credential("Signer response is missing appId".to_string()))?;

        Ok(SessionCredential { ws_url, app_id })
    }
}

// =============================================================================
// Session state
// =============================================================================

/// States of one synthesis session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingCredential,
    Connecting,
    AwaitingFirstFrame,
    Streaming,
    Completed,
    Failed,
}

// =============================================================================
// Client
// =============================================================================

/// Xunfei TTS session client.
///
/// Cheap to construct and safe to share; every `synthesize` call is an
/// independent single-use session.
pub struct XunfeiTtsClient<S = HttpCredentialSource> {
    credentials: S,
}

impl XunfeiTtsClient<HttpCredentialSource> {
    /// Create a client that fetches credentials from the given signer
    /// endpoint.
    pub fn new(signer_endpoint: impl Into<String>) -> Self {
        Self {
            credentials: HttpCredentialSource::new(signer_endpoint),
        }
    }
}

impl<S: CredentialSource> XunfeiTtsClient<S> {
    /// Create a client over a custom credential source.
    pub fn with_credential_source(credentials: S) -> Self {
        Self { credentials }
    }

    /// Synthesize `text` into a complete audio artifact.
    ///
    /// Empty (or whitespace-only) text is rejected before any network call.
    /// The result is either the fully assembled artifact or a single
    /// terminal error; partially buffered audio is never returned.
    pub async fn synthesize(
        &self,
        text: &str,
        params: &SynthesisParams,
    ) -> TtsResult<AudioArtifact> {
        if text.trim().is_empty() {
            return Err(TtsError::EmptyText);
        }

        let mut state = SessionState::AwaitingCredential;
        debug!(?state, "starting synthesis session");

        let credential = self.credentials.issue().await?;
        let session_url = Url::parse(&credential.ws_url).map_err(|e| {
            TtsError::Credential(format!("Signer returned an invalid session URL: {e}"))
        })?;
        if !matches!(session_url.scheme(), "ws" | "wss") {
            return Err(TtsError::Credential(format!(
                "Signer returned a non-websocket session URL (scheme {})",
                session_url.scheme()
            )));
        }

        state = SessionState::Connecting;
        debug!(?state, host = ?session_url.host_str(), "connecting to upstream TTS service");
        let (ws_stream, _) = connect_async(credential.ws_url.as_str())
            .await
            .map_err(|e| TtsError::Transport(format!("Failed to connect: {e}")))?;
        let (mut sink, mut stream) = ws_stream.split();

        let request = SynthesisRequest::new(&credential.app_id, text, &params.resolve());
        let frame = request
            .to_json()
            .map_err(|e| TtsError::Transport(format!("Failed to encode request frame: {e}")))?;
        sink.send(Message::Text(frame.into()))
            .await
            .map_err(|e| TtsError::Transport(format!("Failed to send request frame: {e}")))?;

        state = SessionState::AwaitingFirstFrame;
        debug!(?state, "request frame sent");

        let mut chunks: Vec<String> = Vec::new();

        while let Some(message) = stream.next().await {
            let message =
                message.map_err(|e| TtsError::Transport(format!("WebSocket error: {e}")))?;

            match message {
                Message::Text(payload) => {
                    let response = match SynthesisResponse::parse(&payload) {
                        Ok(response) => response,
                        Err(e) => {
                            warn!("Failed to parse TTS response frame: {e}");
                            continue;
                        }
                    };

                    if response.is_error() {
                        let _ = sink.send(Message::Close(None)).await;
                        state = SessionState::Failed;
                        debug!(
                            ?state,
                            code = response.code,
                            sid = ?response.sid,
                            "upstream reported an error"
                        );
                        return Err(TtsError::Protocol {
                            code: response.code,
                            message: response.error_message(),
                        });
                    }

                    let is_final = response.is_final();
                    if let Some(data) = response.data {
                        if let Some(audio) = data.audio {
                            chunks.push(audio);
                            if state != SessionState::Streaming {
                                state = SessionState::Streaming;
                                debug!(?state, sid = ?response.sid, "first audio chunk received");
                            }
                        }
                    }

                    if is_final {
                        let _ = sink.send(Message::Close(None)).await;
                        state = SessionState::Completed;
                        info!(?state, chunks = chunks.len(), "synthesis session completed");
                        return Ok(AudioArtifact::from_chunks(chunks));
                    }
                }
                // Close without an error frame and without a final chunk:
                // resolved as a transport failure rather than leaving the
                // call pending.
                Message::Close(frame) => {
                    debug!(?frame, "upstream closed the connection early");
                    return Err(TtsError::Transport(
                        "Connection closed before the final audio frame".to_string(),
                    ));
                }
                Message::Ping(_) | Message::Pong(_) => {}
                Message::Binary(_) => {
                    debug!("Ignoring unexpected binary frame");
                }
                _ => {}
            }
        }

        Err(TtsError::Transport(
            "Connection ended before the final audio frame".to_string(),
        ))
    }
}
