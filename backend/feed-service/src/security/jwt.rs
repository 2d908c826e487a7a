/// Session token issuance and verification
///
/// Tokens are self-contained HS256 JWTs bound to a user id with a bounded
/// lifetime. There is no server-side revocation list; logout is advisory.
/// The signing secret is injected by the caller from `Config` — this module
/// holds no key state of its own.
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, Result};

/// Claims carried by a session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id
    pub sub: String,
    /// Issued-at, seconds since epoch
    pub iat: i64,
    /// Expiry, seconds since epoch
    pub exp: i64,
}

/// Mint a signed session token for a user
pub fn generate_token(secret: &str, user_id: Uuid, expiry_days: i64) -> Result<String> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::days(expiry_days)).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| AppError::Internal("Failed to sign session token".to_string()))
}

/// Verify a token's signature and expiry and return its claims
pub fn validate_token(secret: &str, token: &str) -> Result<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Unauthorized("Not authorized, token failed".to_string()))
}

/// Extract the subject user id from validated claims
pub fn subject_user_id(claims: &Claims) -> Result<Uuid> {
    Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Unauthorized("Not authorized, token failed".to_string()))
}
