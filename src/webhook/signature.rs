//! Webhook signature verification using HMAC-SHA256.
//!
//! Every callback carries an uppercase hex HMAC-SHA256 of the raw request
//! body, keyed with the webhook secret, in the `x-fivetran-signature-256`
//! header. Verification must run on the exact bytes received, before any
//! JSON parsing.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::fmt;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

const SIGNATURE_HEADER: &str = "x-fivetran-signature-256";

/// Why a callback failed verification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SignatureError {
    /// No signature header, or an empty one
    #[error("signature header missing")]
    MissingSignature,
    /// Signature present but does not match the payload
    #[error("signature does not match payload")]
    InvalidSignature,
}

/// Shared secret used to sign webhook payloads
///
/// Never printed; `Debug` shows a placeholder.
#[derive(Clone, PartialEq, Eq)]
pub struct WebhookSecret(Vec<u8>);

impl WebhookSecret {
    /// Wrap raw secret bytes
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self(secret.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sign a payload with this secret
    pub fn sign(&self, payload: &[u8]) -> String {
        compute_signature(payload, &self.0)
    }

    /// Verify a payload against a received signature
    pub fn verify(&self, payload: &[u8], signature: Option<&str>) -> Result<(), SignatureError> {
        verify(payload, signature, &self.0)
    }
}

impl AsRef<[u8]> for WebhookSecret {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<String> for WebhookSecret {
    fn from(secret: String) -> Self {
        Self(secret.into_bytes())
    }
}

impl From<&str> for WebhookSecret {
    fn from(secret: &str) -> Self {
        Self(secret.as_bytes().to_vec())
    }
}

impl fmt::Debug for WebhookSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WebhookSecret(<redacted>)")
    }
}

/// Header the signature is sent under
pub fn signature_header_name() -> &'static str {
    SIGNATURE_HEADER
}

/// Compute the uppercase hex HMAC-SHA256 of `payload` keyed by `secret`
///
/// # Examples
///
/// ```
/// use fivetran_client::webhook::compute_signature;
///
/// let sig = compute_signature(b"{}", b"secret");
/// assert_eq!(sig.len(), 64);
/// assert_eq!(sig, sig.to_uppercase());
/// ```
pub fn compute_signature(payload: &[u8], secret: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(payload);
    hex::encode_upper(mac.finalize().into_bytes())
}

/// Verify a received signature against the payload and secret
///
/// The received signature may use any letter case. The MAC comparison is
/// done by `hmac` in constant time.
///
/// # Examples
///
/// ```
/// use fivetran_client::webhook::{compute_signature, verify, SignatureError};
///
/// let payload = br#"{"event":"sync_end"}"#;
/// let sig = compute_signature(payload, b"secret");
///
/// assert!(verify(payload, Some(&sig), b"secret").is_ok());
/// assert!(verify(payload, Some(&sig.to_lowercase()), b"secret").is_ok());
/// assert_eq!(verify(payload, None, b"secret"), Err(SignatureError::MissingSignature));
/// assert_eq!(verify(payload, Some(&sig), b"other"), Err(SignatureError::InvalidSignature));
/// ```
pub fn verify(payload: &[u8], signature: Option<&str>, secret: &[u8]) -> Result<(), SignatureError> {
    let received = match signature {
        Some(sig) if !sig.is_empty() => sig,
        _ => return Err(SignatureError::MissingSignature),
    };

    let decoded = hex::decode(received).map_err(|_| SignatureError::InvalidSignature)?;

    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(payload);
    mac.verify_slice(&decoded)
        .map_err(|_| SignatureError::InvalidSignature)
}
