use axum::Json;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct LoginRequestDoc { pub username: String, pub password: String }

#[derive(ToSchema)]
pub struct LoginResponseDoc { pub token: String, pub expires_at: u64 }

#[derive(ToSchema)]
pub struct CreateProductRequestDoc {
    pub name: String,
    pub sku: String,
    /// Defaults to 0 when absent.
    pub stock: Option<i32>,
}

/// Any subset of the writable columns.
#[derive(ToSchema)]
pub struct UpdateProductRequestDoc {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub stock: Option<i32>,
}

#[derive(ToSchema)]
pub struct ProductRecordDoc {
    pub id: i32,
    pub name: String,
    pub sku: String,
    pub stock: i32,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(ToSchema)]
pub struct MessageResponseDoc {
    pub message: String,
    pub id: Option<i32>,
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).bearer_format("JWT").build()),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    info(title = "Inventory API", description = "Product inventory CRUD"),
    paths(
        crate::routes::health,
        crate::routes::auth::login,
        crate::routes::inventory::list,
        crate::routes::inventory::get,
        crate::routes::inventory::create,
        crate::routes::inventory::update,
        crate::routes::inventory::delete,
    ),
    components(
        schemas(
            HealthResponse,
            LoginRequestDoc,
            LoginResponseDoc,
            CreateProductRequestDoc,
            UpdateProductRequestDoc,
            ProductRecordDoc,
            MessageResponseDoc,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "inventory")
    )
)]
pub struct ApiDoc;

pub async fn swagger_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
