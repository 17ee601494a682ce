use crate::error::{Error, Result};
use crate::middleware::auth::Claims;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use uuid::Uuid;

/// Signs an HS256 bearer token carrying the user id and role.
pub fn sign_token(user_id: Uuid, role: &str, secret: &str, expiry_hours: i64) -> Result<String> {
    let exp = (Utc::now() + Duration::hours(expiry_hours)).timestamp() as usize;
    let claims = Claims {
        sub: user_id.to_string(),
        role: Some(role.to_string()),
        exp,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| Error::Internal(format!("Failed to sign token: {}", e)))
}
