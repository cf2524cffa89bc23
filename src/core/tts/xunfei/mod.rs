//! Xunfei (iFlytek) TTS: signed-URL issuance and the streaming session
//! client.
//!
//! Two cooperating components on different trust boundaries:
//!
//! - [`auth`]: the trusted signer. Holds the long-lived API secret and
//!   derives a fresh time-stamped, HMAC-signed WebSocket URL per request.
//! - [`client`]: the untrusted session client. Consumes a signed URL,
//!   drives one request/response exchange over the WebSocket, and
//!   reassembles the chunked audio into one artifact.

pub mod auth;
pub mod client;
pub mod config;
pub mod messages;

pub use auth::{MissingCredentials, SignerCredentials, UrlSigner};
pub use client::{
    CredentialSource, HttpCredentialSource, SessionCredential, SessionState, XunfeiTtsClient,
};
pub use config::{ResolvedParams, SynthesisParams};
pub use messages::{
    AudioArtifact, ResponseData, SynthesisRequest, SynthesisResponse, STATUS_FINAL_FRAME,
};

/// Fixed upstream hostname; part of the signed material.
pub const XUNFEI_TTS_HOST: &str = "tts-api.xfyun.cn";

/// Resource path of the synthesis endpoint; part of the signed request line.
pub const XUNFEI_TTS_PATH: &str = "/v2/tts";

/// Full upstream WebSocket URL the signed query string is appended to.
pub const XUNFEI_TTS_URL: &str = "wss://tts-api.xfyun.cn/v2/tts";

/// Baseline voice used when the caller does not pick one.
pub const DEFAULT_VOICE: &str = "xiaoyan";

/// Default speed/volume/pitch level (midpoint of the accepted range).
pub const DEFAULT_LEVEL: i32 = 50;

/// Lower bound for speed/volume/pitch.
pub const MIN_LEVEL: i32 = 0;

/// Upper bound for speed/volume/pitch.
pub const MAX_LEVEL: i32 = 100;
