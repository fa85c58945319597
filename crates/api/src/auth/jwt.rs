//! Bearer-token verification.
//!
//! Callers present an HS256 JWT whose `sub` claim is their user id. That id
//! becomes the owner of every script the request touches. The service only
//! verifies tokens; [`generate_access_token`] exists for operators and tests
//! that need to mint one with the shared secret.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use scriptstore_core::types::DbId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims carried by an access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Owner id for every store call made with this token.
    pub sub: DbId,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

/// Shared-secret settings for token verification.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    /// Lifetime of tokens minted by [`generate_access_token`].
    pub access_token_expiry_mins: i64,
}

const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 15;

/// Why a bearer token was refused.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,

    #[error("token subject is not a valid user id")]
    InvalidSubject,

    #[error("invalid token: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),
}

impl JwtConfig {
    /// Read `JWT_SECRET` (required) and `JWT_ACCESS_EXPIRY_MINS`
    /// (default `15`).
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is missing or empty, or the expiry is not an
    /// integer.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let access_token_expiry_mins: i64 = std::env::var("JWT_ACCESS_EXPIRY_MINS")
            .unwrap_or_else(|_| DEFAULT_ACCESS_EXPIRY_MINS.to_string())
            .parse()
            .expect("JWT_ACCESS_EXPIRY_MINS must be a valid i64");

        Self {
            secret,
            access_token_expiry_mins,
        }
    }
}

/// Mint an HS256 token for `user_id`.
pub fn generate_access_token(
    user_id: DbId,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        exp: now + config.access_token_expiry_mins * 60,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify signature and expiry, and require a positive subject id.
pub fn validate_token(token: &str, config: &JwtConfig) -> Result<Claims, TokenError> {
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Invalid(e),
    })?;

    if claims.sub <= 0 {
        return Err(TokenError::InvalidSubject);
    }
    Ok(claims)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn config(secret: &str) -> JwtConfig {
        JwtConfig {
            secret: secret.to_string(),
            access_token_expiry_mins: 15,
        }
    }

    fn signed(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn minted_token_round_trips_owner() {
        let config = config("owner-secret");
        let token = generate_access_token(42, &config).unwrap();

        let claims = validate_token(&token, &config).unwrap();
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.exp - claims.iat, 15 * 60);
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        // Past the default 60-second leeway.
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: 1,
            exp: now - 300,
            iat: now - 600,
            jti: Uuid::new_v4().to_string(),
        };

        let token = signed(&claims, "owner-secret");
        assert_matches!(
            validate_token(&token, &config("owner-secret")),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn foreign_secret_and_garbage_are_invalid() {
        let token = generate_access_token(1, &config("secret-alpha")).unwrap();
        assert_matches!(
            validate_token(&token, &config("secret-bravo")),
            Err(TokenError::Invalid(_))
        );
        assert_matches!(
            validate_token("not-a-jwt", &config("secret-alpha")),
            Err(TokenError::Invalid(_))
        );
    }

    #[test]
    fn non_positive_subject_is_rejected() {
        let config = config("owner-secret");
        let token = generate_access_token(0, &config).unwrap();
        assert_matches!(validate_token(&token, &config), Err(TokenError::InvalidSubject));
    }
}
