use crate::error::AppError;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Represents the claims encoded within a bearer token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject of the token: the principal's unique identifier.
    pub sub: i32,
    /// Expiration timestamp (seconds since epoch) for the token.
    pub exp: usize,
    /// Timestamp (seconds since epoch) at which the token was issued.
    pub iat: usize,
}

/// Issues and verifies signed, time-limited bearer tokens (JWT, HS256).
///
/// Constructed once at startup from the process-wide signing secret and
/// default TTL, then passed explicitly to whatever needs it. Tokens are
/// stateless: validity is determined purely by signature and expiry, never
/// by a lookup table, so individual tokens cannot be revoked.
#[derive(Clone)]
pub struct TokenCodec {
    secret: String,
    default_ttl: Duration,
}

impl TokenCodec {
    pub fn new(secret: impl Into<String>, default_ttl: Duration) -> Self {
        Self {
            secret: secret.into(),
            default_ttl,
        }
    }

    /// Issues a token for `subject` valid for the default TTL.
    pub fn issue(&self, subject: i32) -> Result<String, AppError> {
        self.issue_with_ttl(subject, self.default_ttl)
    }

    /// Issues a token for `subject` valid for the given TTL.
    pub fn issue_with_ttl(&self, subject: i32, ttl: Duration) -> Result<String, AppError> {
        let now = Utc::now();
        let expiration = now
            .checked_add_signed(ttl)
            .ok_or_else(|| AppError::InternalServerError("Token expiry out of range".into()))?;

        let claims = Claims {
            sub: subject,
            exp: expiration.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AppError::InternalServerError(format!("Failed to sign token: {}", e)))
    }

    /// Verifies a token string and decodes its claims.
    ///
    /// Rejects malformed structure, bad signatures and expired tokens. All
    /// three collapse into the same opaque `AppError::InvalidToken` so a
    /// caller cannot tell which check failed. Expiry is checked with zero
    /// leeway against this process's own clock.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::default();
        validation.leeway = 0;

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|_| AppError::InvalidToken)
    }
}
