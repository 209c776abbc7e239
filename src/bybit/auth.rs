//! HMAC-SHA256 request signing for private Bybit endpoints.
//!
//! String to sign: `timestamp + api_key + recv_window + payload`, where the
//! payload is the query string for GET and the JSON body for POST.
use std::fmt;

use hmac::{digest::InvalidLength, Hmac, Mac};
use sha2::Sha256;

pub const HEADER_API_KEY: &str = "X-BAPI-API-KEY";
pub const HEADER_TIMESTAMP: &str = "X-BAPI-TIMESTAMP";
pub const HEADER_SIGN: &str = "X-BAPI-SIGN";
pub const HEADER_RECV_WINDOW: &str = "X-BAPI-RECV-WINDOW";

/// API key pair for private endpoints.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub api_secret: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    /// Lowercase hex signature for one request.
    pub fn sign(
        &self,
        timestamp_ms: i64,
        recv_window: u64,
        payload: &str,
    ) -> Result<String, InvalidLength> {
        sign_payload(
            &self.api_secret,
            &format!("{timestamp_ms}{}{recv_window}{payload}", self.api_key),
        )
    }
}

/// HMAC-SHA256 of `message` keyed by `secret`, hex encoded.
pub fn sign_payload(secret: &str, message: &str) -> Result<String, InvalidLength> {
    let mut mac = <Hmac<Sha256> as Mac>::new_from_slice(secret.as_bytes())?;
    mac.update(message.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}
