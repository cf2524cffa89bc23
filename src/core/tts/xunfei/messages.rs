//! WebSocket message types for the Xunfei TTS v2 streaming API.
//!
//! A session exchanges exactly one outbound frame for a sequence of inbound
//! frames over a single ordered connection:
//!
//! - **Outbound**: [`SynthesisRequest`] carrying the app id, the business
//!   parameters, and the complete text payload (base64, marked final).
//! - **Inbound**: [`SynthesisResponse`] frames, each optionally carrying a
//!   base64 audio chunk. A nonzero `code` terminates the session with an
//!   error; `data.status == 2` marks the final chunk.
//!
//! Chunks are reassembled in arrival order into an [`AudioArtifact`].

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};

use super::config::ResolvedParams;

/// `data.status` value marking a final frame, in both directions: the single
/// request frame is always final, and the response frame carrying it ends
/// the stream.
pub const STATUS_FINAL_FRAME: u8 = 2;

// =============================================================================
// Outbound: synthesis request
// =============================================================================

/// The single outbound frame of a synthesis session.
///
/// Serialized shape:
///
/// ```json
/// {
///   "common": { "app_id": "…" },
///   "business": {
///     "aue": "lame", "sfl": 1, "vcn": "xiaoyan",
///     "speed": 50, "volume": 50, "pitch": 50,
///     "bgs": 0, "tte": "UTF8"
///   },
///   "data": { "text": "aGVsbG8=", "status": 2 }
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct SynthesisRequest {
    common: CommonParams,
    business: BusinessParams,
    data: TextPayload,
}

#[derive(Debug, Clone, Serialize)]
struct CommonParams {
    app_id: String,
}

/// Business parameters for the synthesis request.
#[derive(Debug, Clone, Serialize)]
pub struct BusinessParams {
    /// Audio encoding; `lame` selects MP3 output.
    aue: &'static str,
    /// Streaming flag, required for chunked MP3 delivery.
    sfl: u8,
    /// Voice identifier.
    vcn: String,
    speed: i32,
    volume: i32,
    pitch: i32,
    /// Background sound, disabled.
    bgs: u8,
    /// Text encoding of the (pre-base64) payload.
    tte: &'static str,
}

#[derive(Debug, Clone, Serialize)]
struct TextPayload {
    /// Base64 of the UTF-8 text.
    text: String,
    /// Always [`STATUS_FINAL_FRAME`]: the protocol as used here is
    /// single-shot, never multi-turn text streaming.
    status: u8,
}

impl SynthesisRequest {
    /// Build the request frame for one synthesis call.
    pub fn new(app_id: &str, text: &str, params: &ResolvedParams) -> Self {
        Self {
            common: CommonParams {
                app_id: app_id.to_string(),
            },
            business: BusinessParams {
                aue: "lame",
                sfl: 1,
                vcn: params.voice.clone(),
                speed: params.speed,
                volume: params.volume,
                pitch: params.pitch,
                bgs: 0,
                tte: "UTF8",
            },
            data: TextPayload {
                text: BASE64.encode(text.as_bytes()),
                status: STATUS_FINAL_FRAME,
            },
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

// =============================================================================
// Inbound: synthesis response
// =============================================================================

/// One inbound frame from the upstream service.
#[derive(Debug, Clone, Deserialize)]
pub struct SynthesisResponse {
    /// 0 on success; any other value is a terminal upstream error.
    pub code: i32,
    /// Human-readable error detail, empty on success.
    #[serde(default)]
    pub message: String,
    /// Upstream session id, when present. Logged for correlation only.
    #[serde(default)]
    pub sid: Option<String>,
    #[serde(default)]
    pub data: Option<ResponseData>,
}

/// Audio payload of a response frame.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseData {
    /// Base64 audio chunk. Absent on frames that only carry status.
    #[serde(default)]
    pub audio: Option<String>,
    /// 2 marks the final chunk; anything else means more frames follow.
    pub status: u8,
}

impl SynthesisResponse {
    /// Parse a WebSocket text message into a response frame.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        self.code != 0
    }

    /// Whether this frame carries the final-chunk marker.
    #[inline]
    pub fn is_final(&self) -> bool {
        matches!(&self.data, Some(data) if data.status == STATUS_FINAL_FRAME)
    }

    /// The upstream message, or a code-based fallback when it is empty.
    pub fn error_message(&self) -> String {
        if self.message.is_empty() {
            format!("TTS Error Code: {}", self.code)
        } else {
            self.message.clone()
        }
    }
}

// =============================================================================
// AudioArtifact
// =============================================================================

/// The assembled result of a completed synthesis session.
///
/// Holds the base64 audio chunks exactly as they arrived; created once at
/// session completion and immutable thereafter. The playable form is a
/// `data:audio/mp3;base64,…` URI whose payload is the chunks joined in
/// arrival order, matching the upstream chunking contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioArtifact {
    chunks: Vec<String>,
}

impl AudioArtifact {
    pub(crate) fn from_chunks(chunks: Vec<String>) -> Self {
        Self { chunks }
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Render the artifact as a playable data URI.
    pub fn to_data_uri(&self) -> String {
        format!("data:audio/mp3;base64,{}", self.chunks.concat())
    }

    /// Decode the artifact to raw MP3 bytes.
    ///
    /// Chunks are decoded individually and concatenated, so padded chunk
    /// boundaries decode the same bytes the upstream emitted.
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        let mut bytes = Vec::new();
        for chunk in &self.chunks {
            bytes.extend(BASE64.decode(chunk)?);
        }
        Ok(bytes)
    }
}
