//! Truncated SHA-256 fingerprint of the session signing key.
//!
//! Logged at startup so operators can tell which key is active without
//! exposing key material.

use actix_web::cookie::Key;
use sha2::{Digest, Sha256};

const FINGERPRINT_BYTES: usize = 8;

/// First eight bytes of `SHA-256(signing key)` as lowercase hex.
///
/// ```rust
/// use actix_web::cookie::Key;
/// use showcase::inbound::http::session_config::fingerprint::key_fingerprint;
///
/// let fp = key_fingerprint(&Key::generate());
/// assert_eq!(fp.len(), 16);
/// ```
#[must_use]
pub fn key_fingerprint(key: &Key) -> String {
    let digest = Sha256::digest(key.signing());
    digest
        .get(..FINGERPRINT_BYTES)
        .map(hex::encode)
        .unwrap_or_default()
}
