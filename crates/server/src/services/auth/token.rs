//! Signed session tokens.
//!
//! Tokens are HS256 JWTs carrying the user id and username. They are not
//! stored anywhere: a token is valid as long as its signature checks out and
//! the current time is not past `exp`.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use stockroom_core::UserId;

/// How long a freshly issued token stays valid.
pub const TOKEN_TTL_SECONDS: i64 = 3600;

/// Token errors.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Signing failed.
    #[error("failed to sign token: {0}")]
    Encode(#[source] jsonwebtoken::errors::Error),

    /// Malformed token or bad signature.
    #[error("invalid token: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),

    /// Signature is fine but `exp` has passed.
    #[error("token expired")]
    Expired,
}

/// Claims carried by every session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub id: UserId,
    pub username: String,
    /// Issued-at, Unix seconds.
    pub iat: i64,
    /// Expiry, Unix seconds.
    pub exp: i64,
}

/// Issues and verifies session tokens with one shared secret.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenIssuer {
    /// Build an issuer from the signing secret.
    #[must_use]
    pub fn new(secret: &SecretString) -> Self {
        let bytes = secret.expose_secret().as_bytes();

        // Expiry is checked by hand against an explicit clock in `verify_at`.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
            validation,
            ttl: Duration::seconds(TOKEN_TTL_SECONDS),
        }
    }

    /// Issue a token for `user` that is valid from `now` for one hour.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Encode` if signing fails.
    pub fn issue_at(
        &self,
        id: UserId,
        username: &str,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = Claims {
            id,
            username: username.to_owned(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(TokenError::Encode)
    }

    /// Issue a token valid from the current time.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Encode` if signing fails.
    pub fn issue(&self, id: UserId, username: &str) -> Result<String, TokenError> {
        self.issue_at(id, username, Utc::now())
    }

    /// Verify a token against an explicit clock.
    ///
    /// A token is accepted while `now <= exp` and rejected strictly after.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Invalid` for malformed or forged tokens and
    /// `TokenError::Expired` once the validity window has passed.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(TokenError::Invalid)?;

        if now.timestamp() > data.claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(data.claims)
    }

    /// Verify a token against the current time.
    ///
    /// # Errors
    ///
    /// See [`TokenIssuer::verify_at`].
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify_at(token, Utc::now())
    }
}

impl fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("algorithm", &"HS256")
            .field("ttl_seconds", &self.ttl.num_seconds())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn issuer(secret: &str) -> TokenIssuer {
        TokenIssuer::new(&SecretString::from(secret))
    }

    fn at(seconds: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(seconds, 0).unwrap()
    }

    #[test]
    fn test_round_trip_claims() {
        let tokens = issuer("k3Yz!9qP#vL2@wR7$tN5^bM8&cX4*dF6");
        let token = tokens.issue_at(UserId::new(7), "alice", at(1_000)).unwrap();

        let claims = tokens.verify_at(&token, at(1_000)).unwrap();
        assert_eq!(claims.id, UserId::new(7));
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.iat, 1_000);
        assert_eq!(claims.exp, 1_000 + TOKEN_TTL_SECONDS);
    }

    #[test]
    fn test_expiry_boundary() {
        let tokens = issuer("k3Yz!9qP#vL2@wR7$tN5^bM8&cX4*dF6");
        let token = tokens.issue_at(UserId::new(1), "bob", at(5_000)).unwrap();

        assert!(tokens.verify_at(&token, at(5_000 + TOKEN_TTL_SECONDS)).is_ok());
        assert!(matches!(
            tokens.verify_at(&token, at(5_000 + TOKEN_TTL_SECONDS + 1)),
            Err(TokenError::Expired)
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = issuer("k3Yz!9qP#vL2@wR7$tN5^bM8&cX4*dF6")
            .issue(UserId::new(1), "carol")
            .unwrap();
        let other = issuer("Q9w#E8r$T7y^U6i&O5p*A4s(D3f)G2h!");
        assert!(matches!(other.verify(&token), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_garbage_rejected() {
        let tokens = issuer("k3Yz!9qP#vL2@wR7$tN5^bM8&cX4*dF6");
        assert!(matches!(
            tokens.verify("not-a-jwt"),
            Err(TokenError::Invalid(_))
        ));
    }

    #[test]
    fn test_token_does_not_embed_secret_material() {
        let tokens = issuer("k3Yz!9qP#vL2@wR7$tN5^bM8&cX4*dF6");
        let debug = format!("{tokens:?}");
        assert!(!debug.contains("k3Yz"));
    }
}
