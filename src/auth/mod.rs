//! Authentication and authorization core.
//!
//! Four components, each deliberately small and independently testable:
//!
//! - [`password`] - Argon2id credential hashing and verification
//! - [`token`] - the [`TokenCodec`](token::TokenCodec) seam and its JWT
//!   implementation for signed, time-limited identity tokens
//! - [`guard`] - the [`AuthUser`](guard::AuthUser) extractor that verifies
//!   the `x-auth-token` header on every private route
//! - [`policy`] - the single ownership predicate used before mutating any
//!   owned resource
//!
//! # Security Contract
//!
//! - Plaintext passwords are never persisted or logged; stored hashes are
//!   PHC strings carrying their own salt and cost parameters.
//! - Tokens are bearer-style and stateless: possession equals
//!   authentication, and nothing can be revoked before expiry. The
//!   [`TokenCodec`](token::TokenCodec) trait is the substitution point if a
//!   revocable scheme is ever needed.
//! - A missing token is reported distinctly from an invalid one, but
//!   expired, forged, and malformed tokens all collapse into the same
//!   rejection so callers learn nothing about why verification failed.
//! - Login failures use one generic message whether the email or the
//!   password was wrong, to prevent account enumeration.

/// Request-boundary token extraction and verification.
pub mod guard;
/// Argon2id password hashing and constant-time verification.
pub mod password;
/// Ownership predicate for mutations of owned resources.
pub mod policy;
/// Signed identity token issuance and verification.
pub mod token;

pub use guard::AuthUser;
pub use token::{JwtCodec, TokenCodec};
