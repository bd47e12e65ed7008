use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use super::domain::{Claims, Principal};
use super::errors::AuthError;

/// Precondition run before a protected operation. Receives the raw bearer
/// credential, if the request carried one.
#[async_trait]
pub trait AccessGate: Send + Sync {
    async fn authorize(&self, credential: Option<&str>) -> Result<Principal, AuthError>;
}

/// Admits every request. Used when auth is switched off.
#[derive(Debug, Default, Clone)]
pub struct OpenAccessGate;

#[async_trait]
impl AccessGate for OpenAccessGate {
    async fn authorize(&self, _credential: Option<&str>) -> Result<Principal, AuthError> {
        Ok(Principal::anonymous())
    }
}

/// Verifies HS256 tokens and enforces `exp`.
#[derive(Clone)]
pub struct JwtAccessGate {
    key: DecodingKey,
    validation: Validation,
}

impl JwtAccessGate {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        Self { key: DecodingKey::from_secret(secret.as_bytes()), validation }
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }
}

#[async_trait]
impl AccessGate for JwtAccessGate {
    async fn authorize(&self, credential: Option<&str>) -> Result<Principal, AuthError> {
        let token = credential.map(str::trim).filter(|t| !t.is_empty()).ok_or(AuthError::MissingToken)?;
        let claims = self.verify(token)?;
        Ok(Principal { subject: claims.sub })
    }
}
