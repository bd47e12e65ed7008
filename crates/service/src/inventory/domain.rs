use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use models::product::{self, NewProduct, ProductPatch};
use crate::errors::ServiceError;

/// Columns a caller may write.
pub const WRITABLE_FIELDS: [&str; 3] = ["name", "sku", "stock"];
/// Columns owned by the store.
pub const SYSTEM_FIELDS: [&str; 3] = ["id", "created_at", "updated_at"];

/// Response view of a product. Timestamps are RFC 3339 strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: i32,
    pub name: String,
    pub sku: String,
    pub stock: i32,
    pub created_at: String,
    pub updated_at: String,
}

impl From<product::Model> for ProductRecord {
    fn from(m: product::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            sku: m.sku,
            stock: m.stock,
            created_at: m.created_at.to_rfc3339(),
            updated_at: m.updated_at.to_rfc3339(),
        }
    }
}

fn as_object(input: &Value) -> Result<&Map<String, Value>, ServiceError> {
    input
        .as_object()
        .ok_or_else(|| ServiceError::validation("request body must be a JSON object"))
}

fn check_keys(map: &Map<String, Value>) -> Result<(), ServiceError> {
    for key in map.keys() {
        if SYSTEM_FIELDS.contains(&key.as_str()) {
            return Err(ServiceError::Validation(format!("field '{}' is immutable", key)));
        }
        if !WRITABLE_FIELDS.contains(&key.as_str()) {
            return Err(ServiceError::Validation(format!("unknown field '{}'", key)));
        }
    }
    Ok(())
}

fn string_field(map: &Map<String, Value>, key: &str) -> Result<Option<String>, ServiceError> {
    match map.get(key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ServiceError::Validation(format!("{} must be a string", key))),
    }
}

fn stock_value(v: &Value) -> Result<i32, ServiceError> {
    v.as_i64()
        .and_then(|n| i32::try_from(n).ok())
        .ok_or_else(|| ServiceError::validation("stock must be an integer"))
}

/// Translate a create body. `name` and `sku` must be present strings; a
/// missing or null `stock` means 0. Value rules are checked by the store.
pub fn parse_new_product(input: &Value) -> Result<NewProduct, ServiceError> {
    let map = as_object(input)?;
    check_keys(map)?;
    let name = string_field(map, "name")?.ok_or_else(|| ServiceError::validation("name required"))?;
    let sku = string_field(map, "sku")?.ok_or_else(|| ServiceError::validation("sku required"))?;
    let stock = match map.get("stock") {
        None | Some(Value::Null) => 0,
        Some(v) => stock_value(v)?,
    };
    Ok(NewProduct { name, sku, stock })
}

/// Translate an update body into an allow-listed patch.
pub fn parse_patch(input: &Value) -> Result<ProductPatch, ServiceError> {
    let map = as_object(input)?;
    check_keys(map)?;
    Ok(ProductPatch {
        name: string_field(map, "name")?,
        sku: string_field(map, "sku")?,
        stock: map.get("stock").map(stock_value).transpose()?,
    })
}
