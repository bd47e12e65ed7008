use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};

use service::auth::{
    domain::LoginInput,
    errors::AuthError,
    service::AuthConfig,
    AccessGate, AuthService, JwtAccessGate, OpenAccessGate,
};
use service::inventory::{InventoryService, SeaOrmInventoryStore};

use crate::errors::JsonApiError;
use crate::metrics::AUTH_REJECTIONS_TOTAL;

#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub inventory: Arc<InventoryService<SeaOrmInventoryStore>>,
    pub auth: Arc<AuthService>,
    pub gate: Arc<dyn AccessGate>,
    pub auth_enabled: bool,
}

impl ServerState {
    /// Wire the inventory service and pick the access gate from `cfg.enabled`.
    pub fn from_config(db: DatabaseConnection, cfg: &configs::AuthConfig) -> Self {
        let store = Arc::new(SeaOrmInventoryStore::new(db.clone()));
        let gate: Arc<dyn AccessGate> = if cfg.enabled {
            Arc::new(JwtAccessGate::new(&cfg.jwt_secret))
        } else {
            Arc::new(OpenAccessGate)
        };
        let auth = AuthService::new(AuthConfig {
            jwt_secret: cfg.jwt_secret.clone(),
            token_ttl: chrono::Duration::hours(cfg.token_ttl_hours),
            admin_username: cfg.admin_username.clone(),
            admin_password: cfg.admin_password.clone(),
        });
        Self {
            db,
            inventory: Arc::new(InventoryService::new(store)),
            auth: Arc::new(auth),
            gate,
            auth_enabled: cfg.enabled,
        }
    }
}

#[derive(Serialize)]
pub struct LoginOutput {
    pub token: String,
    pub expires_at: usize,
}

fn invalid_credentials() -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({"error": "invalid credentials"}))).into_response()
}

#[utoipa::path(post, path = "/auth/login", tag = "auth", request_body = crate::openapi::LoginRequestDoc, responses((status = 200, description = "Token issued", body = crate::openapi::LoginResponseDoc), (status = 401, description = "Invalid credentials"), (status = 404, description = "Auth disabled")))]
pub async fn login(State(state): State<ServerState>, payload: Result<Json<LoginInput>, JsonRejection>) -> Response {
    if !state.auth_enabled {
        return JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some("auth is disabled".into())).into_response();
    }
    let Ok(Json(input)) = payload else {
        return invalid_credentials();
    };
    match state.auth.login(input) {
        Ok(session) => Json(LoginOutput { token: session.token, expires_at: session.expires_at }).into_response(),
        Err(AuthError::TokenError(e)) => {
            JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "token generation failed", Some(e)).into_response()
        }
        Err(_) => invalid_credentials(),
    }
}

/// Credential from `Authorization`, with or without the `Bearer ` prefix.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let raw = headers.get(header::AUTHORIZATION)?.to_str().ok()?.trim();
    let token = match raw.split_once(' ') {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
        _ if raw.eq_ignore_ascii_case("bearer") => "",
        _ => raw,
    };
    if token.is_empty() { None } else { Some(token) }
}

/// Route layer for the inventory API. Rejected requests get 401 before any
/// handler runs; admitted ones carry the `Principal` in request extensions.
pub async fn require_access(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    let path = req.uri().path().to_string();
    let credential = bearer_token(req.headers()).map(str::to_owned);

    match state.gate.authorize(credential.as_deref()).await {
        Ok(principal) => {
            info!(path = %path, subject = %principal.subject, "access granted");
            req.extensions_mut().insert(principal);
            Ok(next.run(req).await)
        }
        Err(e) => {
            AUTH_REJECTIONS_TOTAL.inc();
            warn!(path = %path, err = %e, "access rejected");
            let message = match e {
                AuthError::MissingToken => "Missing token",
                _ => "Invalid token",
            };
            Err(JsonApiError::new(StatusCode::UNAUTHORIZED, "Unauthorized", Some(message.into())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn bearer_prefix_is_optional() {
        let mut h = HeaderMap::new();
        assert_eq!(bearer_token(&h), None);
        h.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert_eq!(bearer_token(&h), Some("abc"));
        h.insert(header::AUTHORIZATION, HeaderValue::from_static("abc"));
        assert_eq!(bearer_token(&h), Some("abc"));
        h.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&h), None);
    }
}
