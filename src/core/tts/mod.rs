pub mod xunfei;

pub use xunfei::{
    AudioArtifact, CredentialSource, HttpCredentialSource, MissingCredentials, SessionCredential,
    SignerCredentials, SynthesisParams, SynthesisRequest, SynthesisResponse, UrlSigner,
    XunfeiTtsClient,
};
