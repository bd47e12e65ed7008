#![allow(dead_code)]
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use migration::MigratorTrait;
use serde_json::Value;
use tower::ServiceExt;
use tower_http::cors::CorsLayer;

use server::routes::{self, auth::ServerState};

pub const SECRET: &str = "test-secret";

pub fn auth_config(enabled: bool) -> configs::AuthConfig {
    configs::AuthConfig {
        enabled,
        jwt_secret: SECRET.into(),
        token_ttl_hours: 12,
        admin_username: "admin".into(),
        admin_password: "123".into(),
    }
}

/// Router over a fresh migrated in-memory store.
pub async fn app(auth_enabled: bool) -> anyhow::Result<Router> {
    let db = models::db::connect_with_config(&models::db::DatabaseConfig::sqlite_in_memory()).await?;
    migration::Migrator::up(&db, None).await?;
    let state = ServerState::from_config(db, &auth_config(auth_enabled));
    Ok(routes::build_router(state, CorsLayer::very_permissive()))
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        req = req.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }
    let req = match body {
        Some(v) => req
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => req.body(Body::empty()).unwrap(),
    };
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}
