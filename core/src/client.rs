//! Stateless HTTP request builder and response parser for the PetFriends API.
//!
//! # Design
//! `PetFriendsClient` holds only a `base_url` and carries no mutable state
//! between calls. Each operation is a `build_*` method that produces an
//! `HttpRequest`; `parse_response` turns whatever came back into an
//! `ApiResponse`. Statuses are never interpreted here.

use tracing::trace;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::multipart::{Multipart, PhotoFile};
use crate::response::{ApiResponse, ResponseBody};
use crate::types::{AuthKey, Credentials, PetFilter, PetInfo};

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Synchronous, stateless client for the PetFriends API.
#[derive(Debug, Clone)]
pub struct PetFriendsClient {
    base_url: String,
}

impl PetFriendsClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /api/key` with the credentials passed as headers.
    pub fn build_get_api_key(&self, credentials: &Credentials) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}/api/key", self.base_url),
            headers: vec![
                ("email".to_string(), credentials.email.clone()),
                ("password".to_string(), credentials.password.clone()),
            ],
            body: None,
        }
    }

    pub fn build_get_list_of_pets(
        &self,
        auth_key: &AuthKey,
        filter: &PetFilter,
    ) -> Result<HttpRequest, ApiError> {
        let query = serde_urlencoded::to_string(&[("filter", filter.as_str())])
            .map_err(|e| ApiError::Encoding(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}/api/pets?{query}", self.base_url),
            headers: auth_headers(auth_key),
            body: None,
        })
    }

    pub fn build_add_new_pet(
        &self,
        auth_key: &AuthKey,
        pet: &PetInfo,
        photo: &PhotoFile,
    ) -> HttpRequest {
        let (content_type, body) = Multipart::new()
            .text("name", &pet.name)
            .text("animal_type", &pet.animal_type)
            .text("age", &pet.age)
            .file("pet_photo", photo)
            .finish();
        let url = format!("{}/api/pets", self.base_url);
        self.multipart_request(url, auth_key, content_type, body)
    }

    pub fn build_add_new_pet_without_photo(
        &self,
        auth_key: &AuthKey,
        pet: &PetInfo,
    ) -> Result<HttpRequest, ApiError> {
        self.form_request(
            HttpMethod::Post,
            format!("{}/api/create_pet_simple", self.base_url),
            auth_key,
            pet,
        )
    }

    pub fn build_add_pet_photo(
        &self,
        auth_key: &AuthKey,
        pet_id: &str,
        photo: &PhotoFile,
    ) -> HttpRequest {
        let (content_type, body) = Multipart::new().file("pet_photo", photo).finish();
        self.multipart_request(
            format!("{}/api/pets/set_photo/{pet_id}", self.base_url),
            auth_key,
            content_type,
            body,
        )
    }

    pub fn build_update_pet_info(
        &self,
        auth_key: &AuthKey,
        pet_id: &str,
        pet: &PetInfo,
    ) -> Result<HttpRequest, ApiError> {
        self.form_request(
            HttpMethod::Put,
            format!("{}/api/pets/{pet_id}", self.base_url),
            auth_key,
            pet,
        )
    }

    pub fn build_delete_pet(&self, auth_key: &AuthKey, pet_id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            url: format!("{}/api/pets/{pet_id}", self.base_url),
            headers: auth_headers(auth_key),
            body: None,
        }
    }

    /// Wrap any response, whatever its status, into an `ApiResponse`.
    pub fn parse_response(&self, response: HttpResponse) -> ApiResponse {
        let body = ResponseBody::from_text(response.body);
        trace!(status = response.status, ?body, "parsed response");
        ApiResponse {
            status: response.status,
            body,
        }
    }

    fn form_request(
        &self,
        method: HttpMethod,
        url: String,
        auth_key: &AuthKey,
        pet: &PetInfo,
    ) -> Result<HttpRequest, ApiError> {
        let body =
            serde_urlencoded::to_string(pet).map_err(|e| ApiError::Encoding(e.to_string()))?;
        let mut headers = auth_headers(auth_key);
        headers.push(("content-type".to_string(), FORM_URLENCODED.to_string()));
        Ok(HttpRequest {
            method,
            url,
            headers,
            body: Some(body.into_bytes()),
        })
    }

    fn multipart_request(
        &self,
        url: String,
        auth_key: &AuthKey,
        content_type: String,
        body: Vec<u8>,
    ) -> HttpRequest {
        let mut headers = auth_headers(auth_key);
        headers.push(("content-type".to_string(), content_type));
        HttpRequest {
            method: HttpMethod::Post,
            url,
            headers,
            body: Some(body),
        }
    }
}

fn auth_headers(auth_key: &AuthKey) -> Vec<(String, String)> {
    vec![("auth_key".to_string(), auth_key.as_str().to_string())]
}
