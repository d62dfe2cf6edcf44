//! Bearer credential extraction - core logic.
//!
//! This module only knows about `HeaderMap`; it does not depend on axum
//! extractors or the messaging layer, so the forwarder and the HTTP guard share
//! the same extraction rules.
//!
//! Policy: the credential is the value after the first space of the
//! `Authorization` header (`Bearer abc123` -> `abc123`). The scheme token
//! itself is not forwarded.

use std::fmt;

use axum::http::{HeaderMap, header};

/// A non-empty credential taken from the `Authorization` header.
///
/// `Debug` never prints the token; use `fingerprint()` to correlate logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Returns `None` for empty (or whitespace-only) tokens.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Short, non-reversible identifier for log correlation:
    /// the first 11 chars of base64url(SHA-256(token)).
    pub fn fingerprint(&self) -> String {
        use base64::Engine as _;
        use sha2::{Digest, Sha256};

        let digest = Sha256::digest(self.0.as_bytes());
        let mut encoded = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(digest);
        encoded.truncate(11);
        encoded
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential")
            .field(&format_args!("<redacted:{}>", self.fingerprint()))
            .finish()
    }
}

/// Read `Authorization` (case-insensitive) and strip the scheme token.
///
/// Returns `None` when the header is absent, not visible ASCII, carries no
/// scheme separator, or the token after the scheme is empty.
pub fn extract_credential(headers: &HeaderMap) -> Option<Credential> {
    let raw = headers.get(header::AUTHORIZATION)?.to_str().ok()?.trim();
    let (_scheme, token) = raw.split_once(' ')?;
    Credential::new(token)
}

/// Header names only, for diagnostics. Values are never collected.
pub fn header_names(headers: &HeaderMap) -> Vec<&str> {
    headers.keys().map(|name| name.as_str()).collect()
}
