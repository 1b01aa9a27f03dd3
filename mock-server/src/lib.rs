//! In-process stand-in for the PetFriends API.
//!
//! Serves the same routes as the public deployment and reproduces its
//! observed behaviour, including the known defects: empty fields and negative
//! ages are accepted, any pet can be deleted by anyone, and setting a photo on
//! someone else's pet fails with 500.

pub mod store;

use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Form, Json, Router,
};
use base64::Engine;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{info, warn};

pub use store::{Account, Pet, Store, SEED_ACCOUNTS};

pub type Db = Arc<RwLock<Store>>;

#[derive(Debug, Serialize, Deserialize)]
pub struct KeyBody {
    pub key: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PetList {
    pub pets: Vec<Pet>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PetForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub animal_type: String,
    #[serde(default)]
    pub age: String,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub filter: String,
}

/// Rejections, rendered as plain-text bodies like the real server's.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match self {
            ServerError::Forbidden(_) => StatusCode::FORBIDDEN,
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        warn!(%status, error = %self, "request rejected");
        (status, self.to_string()).into_response()
    }
}

struct Photo {
    content_type: String,
    data: Vec<u8>,
}

impl Photo {
    fn data_uri(&self) -> String {
        let encoded = base64::engine::general_purpose::STANDARD.encode(&self.data);
        format!("data:{};base64,{encoded}", self.content_type)
    }
}

pub fn app() -> Router {
    app_with_store(Store::seeded())
}

pub fn app_with_store(store: Store) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .route("/api/key", get(get_api_key))
        .route("/api/pets", get(list_pets).post(create_pet))
        .route("/api/create_pet_simple", post(create_pet_simple))
        .route("/api/pets/set_photo/{pet_id}", post(set_photo))
        .route("/api/pets/{pet_id}", put(update_pet).delete(delete_pet))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

fn authenticate(store: &Store, headers: &HeaderMap) -> Result<Account, ServerError> {
    store
        .account_by_key(header(headers, "auth_key"))
        .cloned()
        .ok_or_else(|| ServerError::Forbidden("Please provide 'auth_key' Header".to_string()))
}

/// Empty or integer; negative values slip through like on the real server.
fn validate_age(age: &str) -> Result<(), ServerError> {
    if age.is_empty() || age.trim().parse::<i64>().is_ok() {
        Ok(())
    } else {
        Err(ServerError::BadRequest(format!("Age should be a number, got {age:?}")))
    }
}

async fn read_multipart(mut multipart: Multipart) -> Result<(PetForm, Option<Photo>), ServerError> {
    let mut form = PetForm::default();
    let mut photo = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == "pet_photo" {
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| ServerError::BadRequest(e.to_string()))?;
            photo = Some(Photo {
                content_type,
                data: data.to_vec(),
            });
            continue;
        }
        let value = field
            .text()
            .await
            .map_err(|e| ServerError::BadRequest(e.to_string()))?;
        match name.as_str() {
            "name" => form.name = value,
            "animal_type" => form.animal_type = value,
            "age" => form.age = value,
            _ => {}
        }
    }
    Ok((form, photo))
}

async fn get_api_key(
    State(db): State<Db>,
    headers: HeaderMap,
) -> Result<Json<KeyBody>, ServerError> {
    let store = db.read().await;
    let account = store
        .login(header(&headers, "email"), header(&headers, "password"))
        .ok_or_else(|| ServerError::Forbidden("This user wasn't found in database".to_string()))?;
    Ok(Json(KeyBody {
        key: account.key.clone(),
    }))
}

async fn list_pets(
    State(db): State<Db>,
    headers: HeaderMap,
    Query(params): Query<ListParams>,
) -> Result<Json<PetList>, ServerError> {
    let store = db.read().await;
    let account = authenticate(&store, &headers)?;
    let pets: Vec<Pet> = match params.filter.as_str() {
        "" => store.pets().cloned().collect(),
        "my_pets" => store.owned_by(&account.user_id).cloned().collect(),
        other => {
            return Err(ServerError::BadRequest(format!(
                "Filter value is incorrect: {other:?}"
            )))
        }
    };
    Ok(Json(PetList { pets }))
}

async fn create_pet(
    State(db): State<Db>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Json<Pet>, ServerError> {
    let account = authenticate(&*db.read().await, &headers)?;
    let (form, photo) = read_multipart(multipart).await?;
    let photo = photo.ok_or_else(|| ServerError::BadRequest("pet_photo is required".to_string()))?;
    validate_age(&form.age)?;

    let pet = db.write().await.insert_pet(
        &account.user_id,
        &form.name,
        &form.animal_type,
        &form.age,
        photo.data_uri(),
    );
    info!(pet_id = %pet.id, owner = %account.email, "pet created");
    Ok(Json(pet))
}

async fn create_pet_simple(
    State(db): State<Db>,
    headers: HeaderMap,
    Form(form): Form<PetForm>,
) -> Result<Json<Pet>, ServerError> {
    let mut store = db.write().await;
    let account = authenticate(&store, &headers)?;
    validate_age(&form.age)?;

    let pet = store.insert_pet(
        &account.user_id,
        &form.name,
        &form.animal_type,
        &form.age,
        String::new(),
    );
    info!(pet_id = %pet.id, owner = %account.email, "pet created without photo");
    Ok(Json(pet))
}

async fn set_photo(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(pet_id): Path<String>,
    multipart: Multipart,
) -> Result<Json<Pet>, ServerError> {
    let account = authenticate(&*db.read().await, &headers)?;
    let (_, photo) = read_multipart(multipart).await?;
    let photo = photo.ok_or_else(|| ServerError::BadRequest("pet_photo is required".to_string()))?;

    let mut store = db.write().await;
    let pet = store
        .get_mut(&pet_id)
        .ok_or_else(|| ServerError::BadRequest(format!("Pet with id {pet_id} wasn't found")))?;
    if pet.user_id != account.user_id {
        return Err(ServerError::Internal("Internal Server Error".to_string()));
    }
    pet.pet_photo = photo.data_uri();
    info!(pet_id = %pet.id, "photo set");
    Ok(Json(pet.clone()))
}

async fn update_pet(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(pet_id): Path<String>,
    Form(form): Form<PetForm>,
) -> Result<Json<Pet>, ServerError> {
    let mut store = db.write().await;
    let account = authenticate(&store, &headers)?;
    let pet = store
        .get_mut(&pet_id)
        .ok_or_else(|| ServerError::BadRequest(format!("Pet with id {pet_id} wasn't found")))?;
    if pet.user_id != account.user_id {
        return Err(ServerError::Forbidden("This pet belongs to another user".to_string()));
    }
    pet.name = form.name;
    pet.animal_type = form.animal_type;
    pet.age = form.age;
    info!(pet_id = %pet.id, "pet updated");
    Ok(Json(pet.clone()))
}

async fn delete_pet(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(pet_id): Path<String>,
) -> Result<StatusCode, ServerError> {
    let mut store = db.write().await;
    let account = authenticate(&store, &headers)?;
    // Ownership is not checked; the real server lets anyone delete any pet.
    if let Some(pet) = store.remove(&pet_id) {
        info!(pet_id = %pet.id, by = %account.email, owner = %pet.user_id, "pet deleted");
    }
    Ok(StatusCode::OK)
}
