//! Request signing for the Xunfei TTS WebSocket API.
//!
//! The upstream service authenticates connections through query-string
//! parameters derived from an HMAC-SHA256 signature over a canonical
//! request description:
//!
//! ```text
//! host: tts-api.xfyun.cn
//! date: {RFC 1123 HTTP-date}
//! GET /v2/tts HTTP/1.1
//! ```
//!
//! The digest is base64-encoded into a structured authorization string,
//! which is itself base64-encoded and placed, together with the date that
//! was signed and the host, into the connection URL:
//!
//! ```text
//! wss://tts-api.xfyun.cn/v2/tts?authorization=…&date=…&host=…
//! ```
//!
//! Upstream verification is order-sensitive and character-exact. The date
//! in the query string is the same formatted string that was signed, never
//! regenerated, and none of the three components receive additional URL
//! encoding.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use hmac::{Hmac, Mac};
use serde::Serialize;
use sha2::Sha256;
use std::fmt;
use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use zeroize::ZeroizeOnDrop;

use super::{XUNFEI_TTS_HOST, XUNFEI_TTS_PATH, XUNFEI_TTS_URL};

type HmacSha256 = Hmac<Sha256>;

/// RFC 1123 HTTP-date, always rendered in GMT with second granularity.
const HTTP_DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
);

// =============================================================================
// Credentials
// =============================================================================

/// Reports which signer credentials are absent from the configuration.
///
/// Field spellings match the JSON body returned by the credential endpoint
/// (`{"missing": {"apiKey": …, "apiSecret": …, "appId": …}}`). The report
/// only ever names fields, never values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingCredentials {
    pub api_key: bool,
    pub api_secret: bool,
    pub app_id: bool,
}

impl MissingCredentials {
    /// List the missing field names in their external spelling.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.api_key {
            names.push("apiKey");
        }
        if self.api_secret {
            names.push("apiSecret");
        }
        if self.app_id {
            names.push("appId");
        }
        names
    }

    pub fn any(&self) -> bool {
        self.api_key || self.api_secret || self.app_id
    }
}

impl fmt::Display for MissingCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.names().join(", "))
    }
}

/// The long-lived Xunfei API credentials held by the trusted signer.
///
/// Constructed explicitly from configuration and injected into [`UrlSigner`];
/// there is no ambient lookup at signing time. Secrets are wiped from memory
/// when the value is dropped, and the type deliberately has no `Debug`
/// implementation so they cannot leak through logging.
#[derive(Clone, ZeroizeOnDrop)]
pub struct SignerCredentials {
    pub api_key: String,
    pub api_secret: String,
    pub app_id: String,
}

impl std::fmt::Debug for SignerCredentials {
    /// Redacts every secret field; exists only to satisfy trait bounds such as
    /// `Result::unwrap_err`, never to expose the underlying credentials.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignerCredentials")
            .field("api_key", &"<redacted>")
            .field("api_secret", &"<redacted>")
            .field("app_id", &"<redacted>")
            .finish()
    }
}

impl SignerCredentials {
    /// Assemble credentials from optional configuration values.
    ///
    /// Empty or whitespace-only values count as missing. Fails with a
    /// [`MissingCredentials`] report before any cryptographic work happens,
    /// naming exactly the absent fields.
    pub fn from_parts(
        api_key: Option<String>,
        api_secret: Option<String>,
        app_id: Option<String>,
    ) -> Result<Self, MissingCredentials> {
        fn present(value: &Option<String>) -> bool {
            value.as_deref().is_some_and(|v| !v.trim().is_empty())
        }

        let missing = MissingCredentials {
            api_key: !present(&api_key),
            api_secret: !present(&api_secret),
            app_id: !present(&app_id),
        };
        if missing.any() {
            return Err(missing);
        }

        Ok(Self {
            api_key: api_key.unwrap_or_default(),
            api_secret: api_secret.unwrap_or_default(),
            app_id: app_id.unwrap_or_default(),
        })
    }
}

// =============================================================================
// Signing primitive
// =============================================================================

/// Format a timestamp as an RFC 1123 HTTP-date (e.g. `Fri, 07 Aug 2026 09:30:00 GMT`).
pub fn http_date(at: OffsetDateTime) -> String {
    at.to_offset(time::UtcOffset::UTC)
        .format(HTTP_DATE_FORMAT)
        .expect("HTTP-date formatting is infallible for UTC timestamps")
}

/// Build the canonical string that is signed.
///
/// `host` and `date` are part of the signed material, so both must reappear
/// unchanged in the final query string.
pub fn signature_origin(date: &str) -> String {
    format!("host: {XUNFEI_TTS_HOST}\ndate: {date}\nGET {XUNFEI_TTS_PATH} HTTP/1.1")
}

/// HMAC-SHA256 over the canonical string, base64-encoded.
pub fn sign(origin: &str, api_secret: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(api_secret.as_bytes()).expect("HMAC accepts keys of any length");
    mac.update(origin.as_bytes());
    BASE64.encode(mac.finalize().into_bytes())
}

/// The structured authorization string, base64-encoded for the query.
pub fn authorization_value(api_key: &str, signature: &str) -> String {
    let origin = format!(
        "api_key=\"{api_key}\", algorithm=\"hmac-sha256\", \
         headers=\"host date request-line\", signature=\"{signature}\""
    );
    BASE64.encode(origin)
}

// =============================================================================
// UrlSigner
// =============================================================================

/// Trusted signer producing single-use session URLs for the upstream TTS
/// service.
///
/// Stateless across calls: every [`issue`](Self::issue) stamps a fresh
/// HTTP-date and derives the full signed URL from it. The URL is only valid
/// within the upstream's expiry window around that timestamp, and a single
/// connection attempt is expected to consume it.
pub struct UrlSigner {
    credentials: SignerCredentials,
}

impl UrlSigner {
    pub fn new(credentials: SignerCredentials) -> Self {
        Self { credentials }
    }

    /// The application id paired with the issued URL.
    ///
    /// The app id rides alongside the signed URL in the credential response;
    /// it is not part of the signature itself but the session cannot proceed
    /// without it.
    pub fn app_id(&self) -> &str {
        &self.credentials.app_id
    }

    /// Issue a signed session URL stamped with the current time.
    pub fn issue(&self) -> String {
        self.issue_at(OffsetDateTime::now_utc())
    }

    /// Issue a signed session URL for an explicit timestamp.
    ///
    /// Pure: identical credentials and timestamp produce a byte-identical
    /// URL. Timestamps differing by at least one second produce different
    /// signatures.
    pub fn issue_at(&self, at: OffsetDateTime) -> String {
        let date = http_date(at);
        let signature = sign(&signature_origin(&date), &self.credentials.api_secret);
        let authorization = authorization_value(&self.credentials.api_key, &signature);

        // Literal query parameters in fixed order; the upstream parses the
        // date back out of the query, so it must stay unencoded.
        format!("{XUNFEI_TTS_URL}?authorization={authorization}&date={date}&host={XUNFEI_TTS_HOST}")
    }
}
