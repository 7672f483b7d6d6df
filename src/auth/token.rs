use crate::types::{AppError, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Claims carried inside an identity token.
///
/// The identity is the sole payload; `iat`/`exp` bound its validity window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// The authenticated user's identity
    pub sub: String,
    /// Issuance time (Unix seconds)
    pub iat: usize,
    /// Absolute expiry (Unix seconds)
    pub exp: usize,
}

/// Issues and verifies signed, time-limited identity tokens.
///
/// This is the substitution seam for the token scheme: handlers and the auth
/// guard only see `issue`/`verify`, so a revocation list or a short-lived
/// token-plus-refresh design can replace [`JwtCodec`] without touching them.
pub trait TokenCodec: Send + Sync {
    /// Signs a new token asserting `user_id` for the configured lifetime.
    fn issue(&self, user_id: &str) -> Result<String>;

    /// Verifies signature, structure, and expiry; returns the embedded
    /// identity on success.
    ///
    /// All rejection reasons map to [`AppError::InvalidToken`] - the caller
    /// is deliberately not told whether the token was forged, malformed, or
    /// merely expired.
    fn verify(&self, token: &str) -> Result<String>;
}

/// HS256 JWT implementation of [`TokenCodec`].
///
/// The signing secret and lifetime are injected once at construction and
/// never mutated, so codecs with distinct secrets can coexist in one process.
pub struct JwtCodec {
    secret: String,
    ttl_seconds: i64,
}

impl JwtCodec {
    /// Creates a codec from a signing secret and token lifetime in seconds.
    pub fn new(secret: impl Into<String>, ttl_seconds: i64) -> Self {
        Self {
            secret: secret.into(),
            ttl_seconds,
        }
    }
}

impl TokenCodec for JwtCodec {
    fn issue(&self, user_id: &str) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp() as usize,
            exp: (now + Duration::seconds(self.ttl_seconds)).timestamp() as usize,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AppError::TokenCreation(e.to_string()))
    }

    fn verify(&self, token: &str) -> Result<String> {
        let mut validation = Validation::new(Algorithm::HS256);
        // No clock leeway: an expired token is rejected immediately.
        validation.leeway = 0;

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims.sub)
        .map_err(|_| AppError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_codec() -> JwtCodec {
        JwtCodec::new("test-secret-key-that-is-at-least-32-chars", 360_000)
    }

    #[test]
    fn issue_then_verify_returns_identity() {
        let codec = test_codec();
        let token = codec.issue("user-123").expect("should issue");
        let identity = codec.verify(&token).expect("should verify");
        assert_eq!(identity, "user-123");
    }

    #[test]
    fn expired_token_is_rejected() {
        let codec = JwtCodec::new("test-secret-key-that-is-at-least-32-chars", -60);
        let token = codec.issue("user-123").expect("should issue");
        assert!(matches!(codec.verify(&token), Err(AppError::InvalidToken)));
    }

    #[test]
    fn tampered_signature_is_rejected() {
        let codec = test_codec();
        let token = codec.issue("user-123").expect("should issue");

        // Flip the last character of the signature segment.
        let mut tampered = token.clone();
        let last = tampered.pop().expect("token is non-empty");
        tampered.push(if last == 'A' { 'B' } else { 'A' });

        assert!(matches!(
            codec.verify(&tampered),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn truncated_token_is_rejected() {
        let codec = test_codec();
        let token = codec.issue("user-123").expect("should issue");
        let truncated = &token[..token.len() - 1];
        assert!(matches!(
            codec.verify(truncated),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn structurally_malformed_token_is_rejected() {
        let codec = test_codec();
        assert!(matches!(
            codec.verify("not.a.jwt"),
            Err(AppError::InvalidToken)
        ));
        assert!(matches!(codec.verify(""), Err(AppError::InvalidToken)));
    }

    #[test]
    fn distinct_secrets_do_not_cross_verify() {
        let codec1 = JwtCodec::new("secret-one-that-is-32-chars-long", 360_000);
        let codec2 = JwtCodec::new("secret-two-that-is-32-chars-long", 360_000);

        let token = codec1.issue("user-123").expect("should issue");
        assert!(matches!(
            codec2.verify(&token),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn claims_window_matches_ttl() {
        let codec = test_codec();
        let token = codec.issue("user-123").expect("should issue");

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        let claims = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"test-secret-key-that-is-at-least-32-chars"),
            &validation,
        )
        .expect("should decode")
        .claims;

        let now = Utc::now().timestamp() as usize;
        assert!(claims.iat <= now && claims.iat >= now - 5);
        assert_eq!(claims.exp, claims.iat + 360_000);
    }
}
