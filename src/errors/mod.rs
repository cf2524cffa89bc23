pub mod app_error;
pub mod tts_error;

pub use app_error::{AppError, CredentialErrorBody};
pub use tts_error::{TtsError, TtsResult};
