pub mod tts;

// Re-export commonly used types for convenience
pub use tts::{
    AudioArtifact, CredentialSource, HttpCredentialSource, MissingCredentials, SessionCredential,
    SignerCredentials, SynthesisParams, UrlSigner, XunfeiTtsClient,
};
