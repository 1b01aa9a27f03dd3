//! Uniform `(status, body)` result of every API operation.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;
use crate::types::{AuthKey, KeyBody, Pet, PetList};

/// Response body: JSON when the server sent JSON, raw text otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
}

impl ResponseBody {
    pub fn from_text(text: String) -> Self {
        match serde_json::from_str(&text) {
            Ok(value) => ResponseBody::Json(value),
            Err(_) => ResponseBody::Text(text),
        }
    }

    /// `true` when the body is a JSON object with a top-level `name` field.
    pub fn has_field(&self, name: &str) -> bool {
        match self {
            ResponseBody::Json(Value::Object(map)) => map.contains_key(name),
            _ => false,
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        match self {
            ResponseBody::Json(value) => value.get(name),
            ResponseBody::Text(_) => None,
        }
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        match self {
            ResponseBody::Json(value) => serde_json::from_value(value.clone())
                .map_err(|e| ApiError::Deserialization(e.to_string())),
            ResponseBody::Text(text) => Err(ApiError::Deserialization(format!(
                "expected a JSON body, got {text:?}"
            ))),
        }
    }
}

/// Status code and parsed body of one API call.
///
/// The status is carried as received; nothing here decides whether it is
/// acceptable.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: ResponseBody,
}

impl ApiResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    pub fn auth_key(&self) -> Result<AuthKey, ApiError> {
        self.body.json::<KeyBody>().map(|body| body.key)
    }

    pub fn pets(&self) -> Result<Vec<Pet>, ApiError> {
        self.body.json::<PetList>().map(|list| list.pets)
    }

    pub fn pet(&self) -> Result<Pet, ApiError> {
        self.body.json()
    }
}
