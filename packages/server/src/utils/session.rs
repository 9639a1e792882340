use anyhow::Result;
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims carried by a provider session token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id (UUID string), as issued by the auth provider.
    pub sub: String,
    pub email: String,
    /// Expiration timestamp.
    pub exp: usize,
}

/// Verify and decode a session token against the shared provider key.
///
/// This service never issues sessions in production; it only reads them.
pub fn verify(token: &str, secret: &str) -> Result<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}

/// Mint a provider-shaped session token. Used by tests and local tooling to
/// simulate the hosted provider.
pub fn sign(user_id: Uuid, email: &str, secret: &str) -> Result<String> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::days(7))
        .expect("valid timestamp")
        .timestamp();

    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_owned(),
        exp: expiration as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}
