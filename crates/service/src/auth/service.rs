use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header as JwtHeader};
use tracing::{info, warn, instrument};

use super::domain::{AuthSession, Claims, LoginInput};
use super::errors::AuthError;

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub admin_username: String,
    pub admin_password: String,
}

/// Issues tokens for the single configured operator account.
pub struct AuthService {
    cfg: AuthConfig,
}

impl AuthService {
    pub fn new(cfg: AuthConfig) -> Self { Self { cfg } }

    /// Check credentials and issue a signed token.
    ///
    /// # Examples
    /// ```
    /// use service::auth::service::{AuthService, AuthConfig};
    /// use service::auth::domain::LoginInput;
    /// let svc = AuthService::new(AuthConfig {
    ///     jwt_secret: "secret".into(),
    ///     token_ttl: chrono::Duration::hours(12),
    ///     admin_username: "admin".into(),
    ///     admin_password: "123".into(),
    /// });
    /// let session = svc.login(LoginInput { username: "admin".into(), password: "123".into() }).unwrap();
    /// assert_eq!(session.subject, "admin");
    /// assert!(!session.token.is_empty());
    /// ```
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        if input.username != self.cfg.admin_username || input.password != self.cfg.admin_password {
            warn!("login rejected");
            return Err(AuthError::Unauthorized);
        }
        let now = Utc::now();
        let exp = (now + self.cfg.token_ttl).timestamp() as usize;
        let claims = Claims { sub: input.username, iat: now.timestamp() as usize, exp };
        let token = encode(&JwtHeader::default(), &claims, &EncodingKey::from_secret(self.cfg.jwt_secret.as_bytes()))
            .map_err(|e| AuthError::TokenError(e.to_string()))?;
        info!(subject = %claims.sub, "token_issued");
        Ok(AuthSession { subject: claims.sub, token, expires_at: exp })
    }
}
