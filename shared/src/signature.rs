//! Request signing for the remote-administration API
//!
//! Every request carries an `Authorization: <nonce>:<digest>` header. The digest
//! is an HMAC-SHA1 over the canonical string
//!
//! ```text
//! <resource url>\r\n<nonce>\r\n<date>\r\n
//! ```
//!
//! keyed with the base64-decoded shared secret, then base64-encoded. The
//! resource URL is the path plus query (`/vrageremote/v1/session/grids`),
//! never the scheme or host.

use crate::error::Result;
use ring::hmac;

/// Decodes the user-supplied shared key into raw HMAC key bytes.
pub fn decode_key(key: &str) -> Result<Vec<u8>> {
    Ok(base64::decode(key)?)
}

/// Builds the exact string the server expects to be signed.
pub fn canonical_string(resource_url: &str, nonce: &str, date: &str) -> String {
    format!("{}\r\n{}\r\n{}\r\n", resource_url, nonce, date)
}

/// Computes the base64 HMAC-SHA1 digest for one request.
///
/// Pure and deterministic: identical inputs always produce the same digest.
pub fn sign(resource_url: &str, nonce: &str, date: &str, key_bytes: &[u8]) -> String {
    let key = hmac::Key::new(hmac::HMAC_SHA1_FOR_LEGACY_USE_ONLY, key_bytes);
    let tag = hmac::sign(&key, canonical_string(resource_url, nonce, date).as_bytes());
    base64::encode(tag.as_ref())
}

/// Decodes `key` and signs in one step, failing before any digest work on a bad key.
pub fn sign_with_key(resource_url: &str, nonce: &str, date: &str, key: &str) -> Result<String> {
    let key_bytes = decode_key(key)?;
    Ok(sign(resource_url, nonce, date, &key_bytes))
}

/// Formats the `Authorization` header value.
pub fn authorization_header(nonce: &str, digest: &str) -> String {
    format!("{}:{}", nonce, digest)
}
