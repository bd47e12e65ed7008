use std::path::Path;

use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{warn, Level};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::openapi::{swagger_json, ApiDoc};
use auth::ServerState;

pub mod auth;
pub mod inventory;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "Store reachable", body = crate::openapi::HealthResponse), (status = 503, description = "Store unreachable")))]
pub async fn health(State(state): State<ServerState>) -> (StatusCode, Json<Health>) {
    match state.db.ping().await {
        Ok(()) => (StatusCode::OK, Json(Health::ok())),
        Err(e) => {
            warn!(err = %e, "health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, Json(Health::degraded()))
        }
    }
}

/// Build the application router without static assets.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    compose(state, cors, None)
}

/// Same as [`build_router`], serving `frontend_dir` for every unmatched path.
pub fn build_router_with_frontend(state: ServerState, cors: CorsLayer, frontend_dir: &str) -> Router {
    compose(state, cors, Some(frontend_dir))
}

fn compose(state: ServerState, cors: CorsLayer, frontend_dir: Option<&str>) -> Router {
    // Public routes (health, metrics, docs, login)
    let public = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(crate::metrics::metrics))
        .route("/swagger.json", get(swagger_json))
        .route("/auth/login", post(auth::login))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // Inventory API behind the access gate
    let api = Router::new()
        .route("/api/inventory", get(inventory::list).post(inventory::create))
        .route("/api/inventory/", get(inventory::list).post(inventory::create))
        .route(
            "/api/inventory/:id",
            get(inventory::get).put(inventory::update).delete(inventory::delete),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_access));

    let mut app = public.merge(api);
    if let Some(dir) = frontend_dir {
        let index = Path::new(dir).join("index.html");
        app = app.fallback_service(ServeDir::new(dir).fallback(ServeFile::new(index)));
    }

    app.with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // one span per request, INFO level, no headers
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // status and latency on response
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx as ERROR
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
