use sha2::{Digest, Sha256};

/// Derives a Gravatar URL for an email address.
///
/// Uses the SHA-256 address hash with size 200, rating `pg`, and the
/// mystery-person default, so every account has an avatar from day one.
pub fn avatar_url(email: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(email.trim().to_lowercase().as_bytes());
    let digest = hex::encode(hasher.finalize());

    format!("https://www.gravatar.com/avatar/{}?s=200&r=pg&d=mp", digest)
}
