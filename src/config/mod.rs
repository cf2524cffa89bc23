//! Configuration module for the TTS gateway.
//!
//! Configuration is resolved from environment variables, with `.env` files
//! honored at startup (loaded into the process environment in `main`).
//! Priority: actual environment variables > `.env` values > defaults.
//!
//! The Xunfei credentials are the external contract of the deployment:
//! `XUNFEI_API_KEY`, `XUNFEI_API_SECRET`, and `XUNFEI_APP_ID`. They are held
//! here as optional values so the server can boot without them and report
//! the misconfiguration per request; [`ServerConfig::xunfei_credentials`]
//! converts them into the explicit credential struct the signer consumes.

use std::path::PathBuf;

use crate::core::tts::xunfei::auth::{MissingCredentials, SignerCredentials};

/// Default bind host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default bind port.
pub const DEFAULT_PORT: u16 = 3001;

const DEFAULT_RATE_LIMIT_RPS: u32 = 60;
const DEFAULT_RATE_LIMIT_BURST: u32 = 10;

/// TLS configuration for HTTPS
#[derive(Debug, Clone)]
pub struct TlsConfig {
    /// Path to the TLS certificate file (PEM format)
    pub cert_path: PathBuf,
    /// Path to the TLS private key file (PEM format)
    pub key_path: PathBuf,
}

/// Server configuration
///
/// Contains everything needed to run the gateway:
/// - Server settings (host, port, TLS)
/// - Xunfei signer credentials
/// - Security settings (CORS, rate limiting)
#[derive(Debug, Clone)]
pub struct ServerConfig {
    // Server settings
    pub host: String,
    pub port: u16,

    // TLS configuration (optional)
    pub tls: Option<TlsConfig>,

    // Xunfei signer credentials
    pub xunfei_api_key: Option<String>,
    pub xunfei_api_secret: Option<String>,
    pub xunfei_app_id: Option<String>,

    // Security configuration
    /// CORS allowed origins (comma-separated list or "*" for all)
    /// Default: None (CORS disabled, same-origin only)
    pub cors_allowed_origins: Option<String>,

    // Rate limiting configuration
    /// Maximum requests per second per IP address
    pub rate_limit_requests_per_second: u32,
    /// Maximum burst size for rate limiting
    pub rate_limit_burst_size: u32,
}

/// Zeroize secret fields when the config is dropped so credentials do not
/// linger in memory after use.
impl Drop for ServerConfig {
    fn drop(&mut self) {
        use zeroize::Zeroize;

        if let Some(ref mut key) = self.xunfei_api_key {
            key.zeroize();
        }
        if let Some(ref mut secret) = self.xunfei_api_secret {
            secret.zeroize();
        }
        if let Some(ref mut app_id) = self.xunfei_app_id {
            app_id.zeroize();
        }
    }
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    /// Returns an error if a numeric variable fails to parse, or if only
    /// one half of the TLS certificate/key pair is configured.
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an explicit variable lookup.
    ///
    /// The seam `from_env` goes through; tests exercise it with a map
    /// instead of mutating the process environment.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        fn non_empty(value: Option<String>) -> Option<String> {
            value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
        }

        let host = non_empty(lookup("HOST")).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match non_empty(lookup("PORT")) {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|e| format!("Invalid PORT value '{raw}': {e}"))?,
            None => DEFAULT_PORT,
        };

        let tls = match (
            non_empty(lookup("TLS_CERT_PATH")),
            non_empty(lookup("TLS_KEY_PATH")),
        ) {
            (Some(cert), Some(key)) => Some(TlsConfig {
                cert_path: PathBuf::from(cert),
                key_path: PathBuf::from(key),
            }),
            (None, None) => None,
            _ => {
                return Err(
                    "TLS_CERT_PATH and TLS_KEY_PATH must be configured together".into(),
                );
            }
        };

        let rate_limit_requests_per_second =
            match non_empty(lookup("RATE_LIMIT_REQUESTS_PER_SECOND")) {
                Some(raw) => raw
                    .parse::<u32>()
                    .map_err(|e| format!("Invalid RATE_LIMIT_REQUESTS_PER_SECOND '{raw}': {e}"))?,
                None => DEFAULT_RATE_LIMIT_RPS,
            };
        let rate_limit_burst_size = match non_empty(lookup("RATE_LIMIT_BURST_SIZE")) {
            Some(raw) => raw
                .parse::<u32>()
                .map_err(|e| format!("Invalid RATE_LIMIT_BURST_SIZE '{raw}': {e}"))?,
            None => DEFAULT_RATE_LIMIT_BURST,
        };

        Ok(Self {
            host,
            port,
            tls,
            xunfei_api_key: non_empty(lookup("XUNFEI_API_KEY")),
            xunfei_api_secret: non_empty(lookup("XUNFEI_API_SECRET")),
            xunfei_app_id: non_empty(lookup("XUNFEI_APP_ID")),
            cors_allowed_origins: non_empty(lookup("CORS_ALLOWED_ORIGINS")),
            rate_limit_requests_per_second,
            rate_limit_burst_size,
        })
    }

    /// Get the server address as a string in the format "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check if TLS is enabled
    pub fn is_tls_enabled(&self) -> bool {
        self.tls.is_some()
    }

    /// Assemble the signer credentials.
    ///
    /// Fails with a report naming exactly the missing fields when any of
    /// the three credentials is absent.
    pub fn xunfei_credentials(&self) -> Result<SignerCredentials, MissingCredentials> {
        SignerCredentials::from_parts(
            self.xunfei_api_key.clone(),
            self.xunfei_api_secret.clone(),
            self.xunfei_app_id.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = pairs.iter().copied().collect();
        move |name| map.get(name).map(|v| v.to_string())
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let config = ServerConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(config.tls.is_none());
        assert!(config.xunfei_api_key.is_none());
        assert_eq!(config.rate_limit_requests_per_second, 60);
        assert_eq!(config.rate_limit_burst_size, 10);
    }

    #[test]
    fn test_address_formatting() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
        ]))
        .unwrap();
        assert_eq!(config.address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        let result = ServerConfig::from_lookup(lookup_from(&[("PORT", "not-a-port")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_blank_values_count_as_unset() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("XUNFEI_API_KEY", "   "),
            ("XUNFEI_API_SECRET", "secret"),
        ]))
        .unwrap();
        assert!(config.xunfei_api_key.is_none());
        assert_eq!(config.xunfei_api_secret.as_deref(), Some("secret"));
    }

    #[test]
    fn test_partial_tls_pair_is_an_error() {
        let result =
            ServerConfig::from_lookup(lookup_from(&[("TLS_CERT_PATH", "/tmp/cert.pem")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_credentials_report_missing_fields() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("XUNFEI_API_KEY", "key-id"),
        ]))
        .unwrap();

        let missing = config.xunfei_credentials().unwrap_err();
        assert!(!missing.api_key);
        assert!(missing.api_secret);
        assert!(missing.app_id);
    }

    #[test]
    fn test_credentials_complete() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("XUNFEI_API_KEY", "key-id"),
            ("XUNFEI_API_SECRET", "key-secret"),
            ("XUNFEI_APP_ID", "app1"),
        ]))
        .unwrap();

        let credentials = config.xunfei_credentials().unwrap();
        assert_eq!(credentials.app_id, "app1");
    }
}
