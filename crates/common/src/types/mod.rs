use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Health {
    pub status: String,
}

impl Health {
    pub fn ok() -> Self { Self { status: "ok".into() } }

    pub fn degraded() -> Self { Self { status: "degraded".into() } }

    pub fn is_ok(&self) -> bool { self.status == "ok" }
}

/// Plain `{"message": ...}` acknowledgement body used by mutating endpoints.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Message {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self { Self { message: message.into(), id: None } }

    pub fn with_id(message: impl Into<String>, id: i32) -> Self { Self { message: message.into(), id: Some(id) } }
}
