//! Salted credential hashing.
//!
//! Stored credentials have the form `salt$digest`, both hex-encoded, where
//! the digest is SHA-256 over the salt bytes followed by the password
//! bytes. The plaintext password never reaches the store.

use sha2::{Digest, Sha256};
use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hasher};

/// Hash a password with a fresh random salt.
#[must_use]
pub fn hash_password(password: &str) -> String {
    let salt = generate_salt();
    let digest = digest_hex(&salt, password);
    format!("{salt}${digest}")
}

/// Check a password against a stored `salt$digest` credential.
///
/// Returns `false` for malformed stored values rather than erroring, so a
/// corrupted row behaves like a wrong password.
#[must_use]
pub fn verify_password(password: &str, stored: &str) -> bool {
    match stored.split_once('$') {
        Some((salt, expected)) => digest_hex(salt, password) == expected,
        None => false,
    }
}

/// Hex-encoded SHA-256 of salt followed by password.
fn digest_hex(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hasher.finalize().iter().map(|byte| format!("{byte:02x}")).collect()
}

/// Generate a 16-hex-character random salt.
#[allow(clippy::cast_possible_truncation)]
fn generate_salt() -> String {
    let state = RandomState::new();
    let mut hasher = state.build_hasher();
    hasher.write_u64(
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos() as u64),
    );
    format!("{:016x}", hasher.finish())
}
