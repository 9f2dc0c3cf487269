// Authentication models for the recipe backend
// Tokens are issued by the external auth service; this crate only verifies them

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Access token claims structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccessTokenClaims {
    /// User ID (subject), a UUID string
    pub sub: String,

    /// Audience (aud)
    pub aud: String,

    /// Issuer (iss)
    pub iss: String,

    /// Issued at timestamp (Unix epoch seconds)
    pub iat: u64,

    /// Expires at timestamp (Unix epoch seconds)
    pub exp: u64,
}

impl AccessTokenClaims {
    pub fn new(user_id: Uuid, audience: String, issuer: String, issued_at: u64, expires_at: u64) -> Self {
        Self {
            sub: user_id.to_string(),
            aud: audience,
            iss: issuer,
            iat: issued_at,
            exp: expires_at,
        }
    }

    /// Parse the subject as a user UUID
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}
