//! Salted hash strategy

use crate::config::SecretString;
use secrecy::ExposeSecret;
use sha2::{Digest, Sha256};

/// Hex characters of the digest kept in the output
const DIGEST_PREFIX_LEN: usize = 8;

/// `[HASH:xxxxxxxx]` from SHA-256 of `value` followed by the salt
///
/// Deterministic for a given `(value, salt)` pair, so equal values stay
/// linkable across a document without being readable.
pub fn hash_value(value: &str, salt: &SecretString) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let salt: &str = salt.expose_secret().as_ref();
    hasher.update(salt.as_bytes());
    let digest = format!("{:x}", hasher.finalize());

    format!("[HASH:{}]", &digest[..DIGEST_PREFIX_LEN])
}
