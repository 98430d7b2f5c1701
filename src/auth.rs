//! Raw-access credential check.
//!
//! Produces the `authorized_raw` flag the report engine consumes. The store of
//! record is a SHA-256 digest of the token, so config files never hold the
//! token itself.

use sha2::{Digest, Sha256};
use tracing::debug;

/// Lowercase hex SHA-256 of a token
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// Whether `token` unlocks raw reports.
///
/// False when no digest is configured or no token is presented.
pub fn authorize_raw(token: Option<&str>, expected_sha256: Option<&str>) -> bool {
    let (Some(token), Some(expected)) = (token, expected_sha256) else {
        return false;
    };
    if token.is_empty() {
        return false;
    }

    let authorized = hash_token(token) == expected.trim().to_ascii_lowercase();
    debug!("Raw access {}", if authorized { "granted" } else { "denied" });
    authorized
}
