use std::net::SocketAddr;

use migration::MigratorTrait;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use server::routes::{self, auth::ServerState};

struct TestApp {
    base_url: String,
}

async fn start_server() -> anyhow::Result<TestApp> {
    let db = models::db::connect_with_config(&models::db::DatabaseConfig::sqlite_in_memory()).await?;
    migration::Migrator::up(&db, None).await?;

    let auth = configs::AuthConfig {
        enabled: true,
        jwt_secret: "e2e-secret".into(),
        token_ttl_hours: 1,
        admin_username: "admin".into(),
        admin_password: "123".into(),
    };
    let state = ServerState::from_config(db, &auth);
    let app = routes::build_router(state, CorsLayer::very_permissive());

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

#[tokio::test]
async fn e2e_login_and_inventory_over_http() -> anyhow::Result<()> {
    let app = start_server().await?;
    let client = reqwest::Client::new();

    let res = client.get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let res = client.get(format!("{}/api/inventory", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::UNAUTHORIZED);

    let res = client
        .post(format!("{}/auth/login", app.base_url))
        .json(&json!({"username": "admin", "password": "123"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let token = res.json::<Value>().await?["token"].as_str().unwrap_or_default().to_string();
    assert!(!token.is_empty());

    let res = client
        .post(format!("{}/api/inventory", app.base_url))
        .bearer_auth(&token)
        .json(&json!({"name": "Widget", "sku": "W-1", "stock": 3}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?["id"], 1);

    // bare token without the Bearer prefix is accepted too
    let res = client
        .get(format!("{}/api/inventory", app.base_url))
        .header("Authorization", token.as_str())
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let rows = res.json::<Value>().await?;
    assert_eq!(rows[0]["sku"], "W-1");
    assert_eq!(rows[0]["stock"], 3);
    Ok(())
}
