//! Salted password hashing.
//!
//! Stored form is `hex(salt)$hex(sha256(salt || password))` with sixteen
//! random salt bytes per account.

use rand::RngCore;
use sha2::{Digest, Sha256};

const SALT_LEN: usize = 16;

// == Hash ==
/// Hashes a plaintext password with a fresh random salt.
pub fn hash_password(password: &str) -> String {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);

    format!(
        "{}${}",
        hex::encode(salt),
        hex::encode(digest(&salt, password))
    )
}

// == Verify ==
/// Checks a plaintext password against a stored hash.
///
/// Returns false for malformed stored values rather than erroring, so a
/// corrupt row reads as a failed login, not a 500.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let Some((salt_hex, digest_hex)) = stored.split_once('$') else {
        return false;
    };
    let Ok(salt) = hex::decode(salt_hex) else {
        return false;
    };

    hex::encode(digest(&salt, password)) == digest_hex
}

fn digest(salt: &[u8], password: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hasher.finalize().into()
}
