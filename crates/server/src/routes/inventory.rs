use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use serde_json::Value;
use tracing::instrument;

use common::types::Message;
use service::inventory::domain::ProductRecord;

use super::auth::ServerState;
use crate::errors::JsonApiError;
use crate::metrics::record;

fn body(payload: Result<Json<Value>, JsonRejection>) -> Result<Value, JsonApiError> {
    payload
        .map(|Json(v)| v)
        .map_err(|e| JsonApiError::bad_request(e.body_text()))
}

fn product_id(path: Result<Path<i32>, PathRejection>) -> Result<i32, JsonApiError> {
    path.map(|Path(id)| id)
        .map_err(|e| JsonApiError::bad_request(e.body_text()))
}

#[utoipa::path(get, path = "/api/inventory", tag = "inventory", security(("bearer_auth" = [])), responses((status = 200, description = "All products ordered by id", body = [crate::openapi::ProductRecordDoc]), (status = 401, description = "Unauthorized")))]
#[instrument(skip(state))]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<ProductRecord>>, JsonApiError> {
    let res = state.inventory.get_all().await;
    record("list", &res);
    Ok(Json(res?))
}

#[utoipa::path(get, path = "/api/inventory/{id}", tag = "inventory", security(("bearer_auth" = [])), params(("id" = i32, Path, description = "Product id")), responses((status = 200, description = "Product", body = crate::openapi::ProductRecordDoc), (status = 404, description = "Not Found")))]
#[instrument(skip(state, path))]
pub async fn get(State(state): State<ServerState>, path: Result<Path<i32>, PathRejection>) -> Result<Json<ProductRecord>, JsonApiError> {
    let id = product_id(path)?;
    let res = state.inventory.get(id).await;
    record("get", &res);
    Ok(Json(res?))
}

#[utoipa::path(post, path = "/api/inventory", tag = "inventory", security(("bearer_auth" = [])), request_body = crate::openapi::CreateProductRequestDoc, responses((status = 200, description = "Created", body = crate::openapi::MessageResponseDoc), (status = 400, description = "Bad Request"), (status = 409, description = "Conflict")))]
#[instrument(skip(state, payload))]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Message>, JsonApiError> {
    let input = body(payload)?;
    let res = state.inventory.create(&input).await;
    record("create", &res);
    let created = res?;
    Ok(Json(Message::with_id("created", created.id)))
}

#[utoipa::path(put, path = "/api/inventory/{id}", tag = "inventory", security(("bearer_auth" = [])), params(("id" = i32, Path, description = "Product id")), request_body = crate::openapi::UpdateProductRequestDoc, responses((status = 200, description = "Updated", body = crate::openapi::MessageResponseDoc), (status = 400, description = "Bad Request"), (status = 404, description = "Not Found"), (status = 409, description = "Conflict")))]
#[instrument(skip(state, path, payload))]
pub async fn update(
    State(state): State<ServerState>,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Message>, JsonApiError> {
    let id = product_id(path)?;
    let input = body(payload)?;
    let res = state.inventory.update(id, &input).await;
    record("update", &res);
    res?;
    Ok(Json(Message::new("updated")))
}

#[utoipa::path(delete, path = "/api/inventory/{id}", tag = "inventory", security(("bearer_auth" = [])), params(("id" = i32, Path, description = "Product id")), responses((status = 200, description = "Deleted", body = crate::openapi::MessageResponseDoc), (status = 404, description = "Not Found")))]
#[instrument(skip(state, path))]
pub async fn delete(State(state): State<ServerState>, path: Result<Path<i32>, PathRejection>) -> Result<Json<Message>, JsonApiError> {
    let id = product_id(path)?;
    let res = state.inventory.delete(id).await;
    record("delete", &res);
    res?;
    Ok(Json(Message::new("deleted")))
}
