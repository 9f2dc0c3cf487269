// Bearer token verification (HS256)
// Tokens are issued by the external auth service; only validation lives here

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use thiserror::Error;
use uuid::Uuid;

use crate::app_config::AppConfig;
use crate::models::auth::AccessTokenClaims;

#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Invalid subject: {0}")]
    InvalidSubject(String),

    #[error("JWT decoding error: {0}")]
    DecodingError(String),
}

impl From<jsonwebtoken::errors::Error> for JwtError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;
        match err.kind() {
            ErrorKind::ExpiredSignature => JwtError::TokenExpired,
            ErrorKind::InvalidToken | ErrorKind::InvalidSignature => JwtError::InvalidToken,
            _ => JwtError::DecodingError(err.to_string()),
        }
    }
}

#[derive(Clone)]
pub struct JwtService {
    decoding_key: DecodingKey,
    audience: String,
    issuer: String,
}

impl JwtService {
    pub fn new(secret: &str, audience: impl Into<String>, issuer: impl Into<String>) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            audience: audience.into(),
            issuer: issuer.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            &config.jwt_access_secret,
            config.jwt_audience.clone(),
            config.jwt_issuer.clone(),
        )
    }

    /// Validate an access token and return its claims
    pub fn validate_access_token(&self, token: &str) -> Result<AccessTokenClaims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[self.audience.clone()]);
        validation.set_issuer(&[self.issuer.clone()]);
        validation.validate_exp = true;
        validation.validate_nbf = false;
        validation.leeway = 0;

        let token_data = decode::<AccessTokenClaims>(token, &self.decoding_key, &validation)?;

        Ok(token_data.claims)
    }

    /// Validate an access token and return the user it was issued for
    pub fn authenticate(&self, token: &str) -> Result<Uuid, JwtError> {
        let claims = self.validate_access_token(token)?;
        claims
            .user_id()
            .map_err(|_| JwtError::InvalidSubject(claims.sub.clone()))
    }
}
