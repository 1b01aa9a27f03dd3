//! One-call-per-operation facade over `PetFriendsClient` and a `Transport`.
//!
//! Every method performs exactly one network call and returns the
//! `(status, body)` pair as an `ApiResponse`. `Err` is reserved for failures
//! that produced no status at all.

use std::path::Path;

use tracing::debug;

use crate::client::PetFriendsClient;
use crate::error::ApiError;
use crate::http::HttpRequest;
use crate::multipart::PhotoFile;
use crate::response::ApiResponse;
use crate::transport::{Transport, UreqTransport};
use crate::types::{AuthKey, Credentials, PetFilter, PetInfo};

/// A PetFriends API client bound to one base URL.
///
/// Construct it once and pass it by reference to every scenario; the
/// transport's connection pool is shared across calls.
#[derive(Debug, Clone)]
pub struct PetFriends<T = UreqTransport> {
    client: PetFriendsClient,
    transport: T,
}

impl PetFriends<UreqTransport> {
    pub fn new(base_url: &str) -> Self {
        Self::with_transport(base_url, UreqTransport::new())
    }
}

impl<T: Transport> PetFriends<T> {
    pub fn with_transport(base_url: &str, transport: T) -> Self {
        Self {
            client: PetFriendsClient::new(base_url),
            transport,
        }
    }

    pub fn client(&self) -> &PetFriendsClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn get_api_key(&self, credentials: &Credentials) -> Result<ApiResponse, ApiError> {
        self.send("get_api_key", self.client.build_get_api_key(credentials))
    }

    pub fn get_list_of_pets(
        &self,
        auth_key: &AuthKey,
        filter: &PetFilter,
    ) -> Result<ApiResponse, ApiError> {
        let request = self.client.build_get_list_of_pets(auth_key, filter)?;
        self.send("get_list_of_pets", request)
    }

    pub fn add_new_pet(
        &self,
        auth_key: &AuthKey,
        pet: &PetInfo,
        photo_path: &Path,
    ) -> Result<ApiResponse, ApiError> {
        let photo = PhotoFile::read(photo_path)?;
        self.send("add_new_pet", self.client.build_add_new_pet(auth_key, pet, &photo))
    }

    pub fn add_new_pet_without_photo(
        &self,
        auth_key: &AuthKey,
        pet: &PetInfo,
    ) -> Result<ApiResponse, ApiError> {
        let request = self.client.build_add_new_pet_without_photo(auth_key, pet)?;
        self.send("add_new_pet_without_photo", request)
    }

    pub fn add_pet_photo(
        &self,
        auth_key: &AuthKey,
        pet_id: &str,
        photo_path: &Path,
    ) -> Result<ApiResponse, ApiError> {
        let photo = PhotoFile::read(photo_path)?;
        self.send(
            "add_pet_photo",
            self.client.build_add_pet_photo(auth_key, pet_id, &photo),
        )
    }

    pub fn update_pet_info(
        &self,
        auth_key: &AuthKey,
        pet_id: &str,
        pet: &PetInfo,
    ) -> Result<ApiResponse, ApiError> {
        let request = self.client.build_update_pet_info(auth_key, pet_id, pet)?;
        self.send("update_pet_info", request)
    }

    pub fn delete_pet(&self, auth_key: &AuthKey, pet_id: &str) -> Result<ApiResponse, ApiError> {
        self.send("delete_pet", self.client.build_delete_pet(auth_key, pet_id))
    }

    fn send(&self, operation: &'static str, request: HttpRequest) -> Result<ApiResponse, ApiError> {
        let response = self.transport.execute(request)?;
        debug!(operation, status = response.status, "api call finished");
        Ok(self.client.parse_response(response))
    }
}
