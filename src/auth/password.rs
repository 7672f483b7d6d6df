use crate::types::{AppError, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Hashes a password with Argon2id and a freshly generated salt.
///
/// Returns a PHC-formatted string that embeds the salt and cost parameters,
/// so verification can reconstruct the exact same computation later.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

/// Verifies a submitted password against a stored PHC hash string.
///
/// Returns `Ok(false)` on a mismatch. A stored hash that cannot be parsed is
/// an [`AppError::Integrity`] - a configuration fault, not a wrong password.
/// The underlying comparison is constant-time, so timing does not leak how
/// many leading bytes matched.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| AppError::Integrity(format!("Malformed stored password hash: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn hash_produces_phc_string() {
        let hash = hash_password("secret123").expect("should hash");
        assert_ne!(hash, "secret123");
        assert!(hash.starts_with("$argon2"), "hash should be in PHC format");
    }

    #[test]
    fn round_trip_verifies() {
        let hash = hash_password("secret123").expect("should hash");
        assert!(verify_password("secret123", &hash).expect("should verify"));
    }

    #[rstest]
    #[case("secret124")]
    #[case("Secret123")]
    #[case("secret12")]
    #[case("")]
    fn mutated_password_fails(#[case] wrong: &str) {
        let hash = hash_password("secret123").expect("should hash");
        assert!(!verify_password(wrong, &hash).expect("should verify"));
    }

    #[test]
    fn salts_differ_between_hashes() {
        let a = hash_password("secret123").expect("should hash");
        let b = hash_password("secret123").expect("should hash");
        assert_ne!(a, b, "fresh salt per record");
    }

    #[test]
    fn malformed_stored_hash_is_integrity_error() {
        let result = verify_password("secret123", "not-a-phc-string");
        assert!(matches!(result, Err(AppError::Integrity(_))));
    }
}
