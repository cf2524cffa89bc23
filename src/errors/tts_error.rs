//! Error taxonomy for the TTS signing and session flow.
//!
//! Every failure is terminal for the in-flight `synthesize` call: there is
//! no partial-success return of buffered audio and no automatic retry at
//! any layer. Retry and backoff policy belong to the caller.

use thiserror::Error;

use crate::core::tts::xunfei::auth::MissingCredentials;

/// Errors that can occur while issuing credentials or driving a synthesis
/// session.
#[derive(Debug, Error)]
pub enum TtsError {
    /// Required signer credentials are absent. Raised before any network or
    /// cryptographic work; names the missing fields, never their values.
    #[error("Missing Xunfei credentials: {0}")]
    Configuration(MissingCredentials),

    /// The signer was reachable but its response was unusable (missing URL
    /// or app id, unexpected status, malformed body).
    #[error("Credential issuance failed: {0}")]
    Credential(String),

    /// A response frame carried a nonzero upstream code. The message is the
    /// upstream detail verbatim when available.
    #[error("Upstream TTS error {code}: {message}")]
    Protocol { code: i32, message: String },

    /// Connection-level failure, including a connection that closed before
    /// delivering a final frame.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Synthesis text was empty; rejected before any network call.
    #[error("Synthesis text must not be empty")]
    EmptyText,
}

/// Result type for TTS operations.
pub type TtsResult<T> = Result<T, TtsError>;

impl From<MissingCredentials> for TtsError {
    fn from(missing: MissingCredentials) -> Self {
        TtsError::Configuration(missing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_names_fields_only() {
        let error = TtsError::Configuration(MissingCredentials {
            api_key: true,
            api_secret: true,
            app_id: false,
        });
        assert_eq!(
            error.to_string(),
            "Missing Xunfei credentials: apiKey, apiSecret"
        );
    }

    #[test]
    fn test_protocol_error_display() {
        let error = TtsError::Protocol {
            code: 2,
            message: "TTS Error Code: 2".to_string(),
        };
        assert_eq!(error.to_string(), "Upstream TTS error 2: TTS Error Code: 2");
    }
}
