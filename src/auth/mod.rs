//! Auth Module
//!
//! Signup/login plumbing: salted password hashes, opaque bearer tokens,
//! and the extractor that turns an `Authorization` header into a loaded
//! user. Tokens are random bytes; the server keeps only their hash, so a
//! leaked database cannot be replayed as a session.

mod extract;
mod password;
mod token;

pub use extract::AuthUser;
pub use password::{hash_password, verify_password};
pub use token::{generate_token, token_hash};
