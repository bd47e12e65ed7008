mod support;

use axum::http::{Method, StatusCode};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;

use support::{app, send, SECRET};

fn token_with_exp(secret: &str, exp: i64) -> String {
    let claims = json!({"sub": "admin", "iat": 0, "exp": exp});
    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
}

#[tokio::test]
async fn missing_or_bad_token_is_rejected() -> anyhow::Result<()> {
    let app = app(true).await?;

    let (status, body) = send(&app, Method::GET, "/api/inventory", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Missing token");

    let (status, body) = send(&app, Method::GET, "/api/inventory", None, Some("garbage")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid token");

    let far_future = 4_102_444_800; // 2100-01-01
    let forged = token_with_exp("other-secret", far_future);
    let (status, _) = send(&app, Method::GET, "/api/inventory", None, Some(&forged)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let expired = token_with_exp(SECRET, 1_000);
    let (status, _) = send(&app, Method::GET, "/api/inventory", None, Some(&expired)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // rejected writes never reach the store
    let (status, _) = send(&app, Method::POST, "/api/inventory", Some(json!({"name": "n", "sku": "s"})), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let valid = token_with_exp(SECRET, far_future);
    let (status, body) = send(&app, Method::GET, "/api/inventory", None, Some(&valid)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
    Ok(())
}

#[tokio::test]
async fn login_then_use_token() -> anyhow::Result<()> {
    let app = app(true).await?;

    let (status, body) = send(&app, Method::POST, "/auth/login", Some(json!({"username": "admin", "password": "nope"})), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid credentials");

    let (status, body) = send(&app, Method::POST, "/auth/login", Some(json!({"username": "admin", "password": "123"})), None).await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().expect("token").to_string();

    let (status, body) = send(&app, Method::POST, "/api/inventory", Some(json!({"name": "n", "sku": "s", "stock": 2})), Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 1);
    Ok(())
}

#[tokio::test]
async fn public_routes_skip_the_gate() -> anyhow::Result<()> {
    let app = app(true).await?;
    let (status, _) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, Method::GET, "/swagger.json", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, Method::GET, "/metrics", None, None).await;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn malformed_login_body_is_invalid_credentials() -> anyhow::Result<()> {
    let app = app(true).await?;
    for b in [json!({"username": "admin"}), json!({}), json!(["admin", "123"])] {
        let (status, body) = send(&app, Method::POST, "/auth/login", Some(b.clone()), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "body {b}");
        assert_eq!(body["error"], "invalid credentials");
    }
    Ok(())
}

#[tokio::test]
async fn login_is_not_served_when_auth_is_disabled() -> anyhow::Result<()> {
    let app = app(false).await?;
    let (status, body) = send(&app, Method::POST, "/auth/login", Some(json!({"username": "admin", "password": "123"})), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.get("token").is_none());
    assert!(body["error"].is_string());
    Ok(())
}
