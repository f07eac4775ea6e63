//! Signed, time-limited authentication tokens
//!
//! Tokens are HS256 JWTs carrying the user id. The signing key lives in a
//! [`TokenSigner`] owned by application state; nothing here is global.
//! When no key is configured a random one is generated at startup and
//! held only in memory, so tokens do not survive a restart.

use anyhow::Result;
use argon2::password_hash::rand_core::{OsRng, RngCore};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use shoe_catalog_shared::AuthError;
use std::fmt;
use std::sync::Arc;

/// Lifetime of a token when the caller does not pick one
pub const DEFAULT_TOKEN_EXPIRY_SECS: i64 = 600;

/// Longest lifetime a token may be issued with (30 days)
pub const MAX_TOKEN_EXPIRY_SECS: i64 = 30 * 24 * 60 * 60;

/// Length of a generated signing key
pub const GENERATED_SECRET_LEN: usize = 32;

const SECRET_ALPHABET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Claims carried by an auth token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// User id
    pub id: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Outcome of verifying a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenVerification {
    Valid(i64),
    /// Signature checks out but the validity window has passed
    Expired,
    /// Malformed, forged, or signed with another key
    Invalid,
}

impl TokenVerification {
    /// Collapse to the user id, dropping the failure kind
    pub fn user_id(self) -> Option<i64> {
        match self {
            TokenVerification::Valid(id) => Some(id),
            TokenVerification::Expired | TokenVerification::Invalid => None,
        }
    }

    pub fn into_result(self) -> Result<i64, AuthError> {
        match self {
            TokenVerification::Valid(id) => Ok(id),
            TokenVerification::Expired => Err(AuthError::TokenExpired),
            TokenVerification::Invalid => Err(AuthError::InvalidToken),
        }
    }
}

/// Generate a random 32-character `A-Z0-9` signing key from the OS RNG
pub fn random_secret() -> SecretString {
    let mut rng = OsRng;
    let mut secret = String::with_capacity(GENERATED_SECRET_LEN);
    let mut buf = [0u8; GENERATED_SECRET_LEN];

    while secret.len() < GENERATED_SECRET_LEN {
        rng.fill_bytes(&mut buf);
        // 252 = 7 * 36; rejecting larger bytes keeps the draw uniform
        for byte in buf.iter().copied().filter(|b| *b < 252) {
            if secret.len() == GENERATED_SECRET_LEN {
                break;
            }
            secret.push(char::from(SECRET_ALPHABET[usize::from(byte % 36)]));
        }
    }

    SecretString::new(secret)
}

/// Key material derived once from the secret
#[derive(Clone)]
struct SigningKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl SigningKeys {
    fn new(secret: &SecretString) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding: Arc::new(EncodingKey::from_secret(bytes)),
            decoding: Arc::new(DecodingKey::from_secret(bytes)),
        }
    }
}

/// Issues and verifies auth tokens under one signing key
///
/// Cloning is cheap; the keys are shared behind `Arc`.
#[derive(Clone)]
pub struct TokenSigner {
    keys: SigningKeys,
    validation: Arc<Validation>,
    default_expiry_secs: i64,
}

impl fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSigner")
            .field("default_expiry_secs", &self.default_expiry_secs)
            .finish_non_exhaustive()
    }
}

impl TokenSigner {
    pub fn new(secret: &SecretString, default_expiry_secs: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked by `verify` so that it can be reported separately
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            keys: SigningKeys::new(secret),
            validation: Arc::new(validation),
            default_expiry_secs,
        }
    }

    /// Signer with a freshly generated in-memory key
    pub fn with_random_secret(default_expiry_secs: i64) -> Self {
        Self::new(&random_secret(), default_expiry_secs)
    }

    /// Issue a token using the default lifetime
    #[inline]
    pub fn issue_default(&self, user_id: i64) -> Result<String> {
        self.issue(user_id, self.default_expiry_secs)
    }

    /// Issue a token for `user_id` valid for `expiry_secs`
    ///
    /// A zero or negative lifetime yields a token that is already expired.
    /// A lifetime that overflows the representable timestamp range is an error.
    pub fn issue(&self, user_id: i64, expiry_secs: i64) -> Result<String> {
        let now = Utc::now();
        let exp = Duration::try_seconds(expiry_secs)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| anyhow::anyhow!("Token lifetime out of range: {}s", expiry_secs))?;

        let claims = TokenClaims {
            id: user_id,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.keys.encoding)
            .map_err(|e| anyhow::anyhow!("Failed to sign auth token: {}", e))
    }

    /// Check signature and expiry
    ///
    /// A token is expired once the current second reaches its `exp`.
    pub fn verify(&self, token: &str) -> TokenVerification {
        let data = match decode::<TokenClaims>(token, &self.keys.decoding, &self.validation) {
            Ok(data) => data,
            Err(e) => {
                tracing::debug!(error = %e, "Rejected auth token");
                return TokenVerification::Invalid;
            }
        };

        if data.claims.exp <= Utc::now().timestamp() {
            return TokenVerification::Expired;
        }

        TokenVerification::Valid(data.claims.id)
    }

    #[inline]
    pub fn default_expiry_secs(&self) -> i64 {
        self.default_expiry_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn signer() -> TokenSigner {
        TokenSigner::new(
            &SecretString::new("TESTSECRETTESTSECRETTESTSECRET12".to_string()),
            DEFAULT_TOKEN_EXPIRY_SECS,
        )
    }

    #[test]
    fn test_issue_then_verify() {
        let signer = signer();
        let token = signer.issue_default(42).unwrap();
        assert_eq!(signer.verify(&token), TokenVerification::Valid(42));
    }

    #[test]
    fn test_zero_and_negative_lifetimes_are_expired() {
        let signer = signer();
        for expiry in [0, -1, -3600] {
            let token = signer.issue(1, expiry).unwrap();
            assert_eq!(signer.verify(&token), TokenVerification::Expired);
        }
    }

    #[test]
    fn test_out_of_range_lifetime_is_an_error() {
        let signer = signer();
        for expiry in [i64::MAX, i64::MIN, 100_000_000_000_000] {
            assert!(signer.issue(1, expiry).is_err());
        }
        assert!(signer.issue(1, MAX_TOKEN_EXPIRY_SECS).is_ok());
    }

    #[test]
    fn test_other_key_is_invalid() {
        let first = TokenSigner::with_random_secret(DEFAULT_TOKEN_EXPIRY_SECS);
        let restarted = TokenSigner::with_random_secret(DEFAULT_TOKEN_EXPIRY_SECS);

        let token = first.issue_default(5).unwrap();
        assert_eq!(restarted.verify(&token), TokenVerification::Invalid);
    }

    #[test]
    fn test_garbage_is_invalid() {
        assert_eq!(signer().verify("not.a.token"), TokenVerification::Invalid);
        assert_eq!(signer().verify(""), TokenVerification::Invalid);
    }

    #[test]
    fn test_tampered_payload_is_invalid() {
        let signer = signer();
        let forged = signer.issue_default(2).unwrap();
        let forged_payload = forged.split('.').nth(1).unwrap().to_string();
        let token = signer.issue_default(1).unwrap();
        let mut parts: Vec<&str> = token.split('.').collect();
        parts[1] = &forged_payload;

        assert_eq!(signer.verify(&parts.join(".")), TokenVerification::Invalid);
    }

    #[test]
    fn test_verification_collapse() {
        assert_eq!(TokenVerification::Valid(9).user_id(), Some(9));
        assert_eq!(TokenVerification::Expired.user_id(), None);
        assert_eq!(TokenVerification::Invalid.user_id(), None);
        assert_eq!(
            TokenVerification::Expired.into_result(),
            Err(AuthError::TokenExpired)
        );
        assert_eq!(
            TokenVerification::Invalid.into_result(),
            Err(AuthError::InvalidToken)
        );
    }

    #[test]
    fn test_random_secret_shape() {
        let secret = random_secret();
        let value = secret.expose_secret();
        assert_eq!(value.len(), GENERATED_SECRET_LEN);
        assert!(value
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
        assert_ne!(value, random_secret().expose_secret());
    }

    #[test]
    fn test_debug_hides_key() {
        let rendered = format!("{:?}", signer());
        assert!(!rendered.contains("TESTSECRET"));
    }

    proptest! {
        #[test]
        fn prop_round_trip_returns_user_id(id in any::<i64>(), expiry in 60i64..86_400) {
            let signer = signer();
            let token = signer.issue(id, expiry).unwrap();
            prop_assert_eq!(signer.verify(&token), TokenVerification::Valid(id));
        }
    }
}
