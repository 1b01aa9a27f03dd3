//! Domain DTOs for the PetFriends API.
//!
//! # Design
//! These types mirror the server's JSON schema but are defined independently
//! of the mock-server crate; the scenario tests catch any drift. Age is text
//! on both sides of the wire so that numeric validation stays the server's
//! business.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// An email/password pair exchanged for an [`AuthKey`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Opaque token returned by `GET /api/key`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthKey(String);

impl AuthKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AuthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Body of a successful `GET /api/key`.
#[derive(Debug, Clone, Deserialize)]
pub struct KeyBody {
    pub key: AuthKey,
}

/// A pet record as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    pub id: String,
    pub name: String,
    pub animal_type: String,
    #[serde(deserialize_with = "age_as_text")]
    pub age: String,
    #[serde(default)]
    pub pet_photo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Body of `GET /api/pets`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PetList {
    pub pets: Vec<Pet>,
}

/// Fields sent when creating or updating a pet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PetInfo {
    pub name: String,
    pub animal_type: String,
    pub age: String,
}

impl PetInfo {
    pub fn new(
        name: impl Into<String>,
        animal_type: impl Into<String>,
        age: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            animal_type: animal_type.into(),
            age: age.into(),
        }
    }
}

/// Scope of a pet listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PetFilter {
    /// Every pet on the server (`filter=`).
    #[default]
    All,
    /// Only pets owned by the authenticated account (`filter=my_pets`).
    MyPets,
    /// Any other value, passed through untouched.
    Other(String),
}

impl PetFilter {
    pub fn as_str(&self) -> &str {
        match self {
            PetFilter::All => "",
            PetFilter::MyPets => "my_pets",
            PetFilter::Other(value) => value,
        }
    }
}

impl From<&str> for PetFilter {
    fn from(value: &str) -> Self {
        match value {
            "" => PetFilter::All,
            "my_pets" => PetFilter::MyPets,
            other => PetFilter::Other(other.to_string()),
        }
    }
}

/// Accept `"4"` as well as `4`; some deployments emit ages as numbers.
fn age_as_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Age {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Age::deserialize(deserializer)? {
        Age::Text(text) => text,
        Age::Number(number) => number.to_string(),
    })
}
