//! Scenario helpers: one auth key per scenario and explicit setup steps.
//!
//! # Design
//! A `Session` borrows the suite's `PetFriends` value and holds the key
//! obtained when it was opened. Helpers that need server state either
//! provision it (`ensure_owned_pet`) or fail with a precondition error
//! (`first_owned_pet`, `first_foreign_pet`); none of them retries.

use tracing::info;

use crate::api::PetFriends;
use crate::error::ScenarioError;
use crate::transport::Transport;
use crate::types::{AuthKey, Credentials, Pet, PetFilter, PetInfo};

/// An authenticated view of the API for the length of one scenario.
#[derive(Debug)]
pub struct Session<'c, T> {
    api: &'c PetFriends<T>,
    key: AuthKey,
}

impl<'c, T: Transport> Session<'c, T> {
    pub fn open(api: &'c PetFriends<T>, credentials: &Credentials) -> Result<Self, ScenarioError> {
        let response = api.get_api_key(credentials)?;
        expect_ok("get_api_key", response.status)?;
        Ok(Self {
            api,
            key: response.auth_key()?,
        })
    }

    pub fn api(&self) -> &'c PetFriends<T> {
        self.api
    }

    pub fn key(&self) -> &AuthKey {
        &self.key
    }

    pub fn pets(&self, filter: &PetFilter) -> Result<Vec<Pet>, ScenarioError> {
        let response = self.api.get_list_of_pets(&self.key, filter)?;
        expect_ok("get_list_of_pets", response.status)?;
        Ok(response.pets()?)
    }

    pub fn my_pets(&self) -> Result<Vec<Pet>, ScenarioError> {
        self.pets(&PetFilter::MyPets)
    }

    pub fn all_pets(&self) -> Result<Vec<Pet>, ScenarioError> {
        self.pets(&PetFilter::All)
    }

    /// First pet owned by the account, without provisioning one.
    pub fn first_owned_pet(&self) -> Result<Pet, ScenarioError> {
        self.my_pets()?
            .into_iter()
            .next()
            .ok_or(ScenarioError::NoOwnedPets)
    }

    /// Id of an owned pet, creating one from `seed` if the account has none.
    pub fn ensure_owned_pet(&self, seed: &PetInfo) -> Result<String, ScenarioError> {
        if let Some(pet) = self.my_pets()?.into_iter().next() {
            return Ok(pet.id);
        }
        let response = self.api.add_new_pet_without_photo(&self.key, seed)?;
        expect_ok("add_new_pet_without_photo", response.status)?;
        let pet = response.pet()?;
        info!(pet_id = %pet.id, "provisioned a pet for the scenario");
        Ok(pet.id)
    }

    /// First listed pet that the account does not own.
    pub fn first_foreign_pet(&self) -> Result<Pet, ScenarioError> {
        let mine = self.my_pets()?;
        self.all_pets()?
            .into_iter()
            .find(|pet| mine.iter().all(|own| own.id != pet.id))
            .ok_or(ScenarioError::NoForeignPets)
    }
}

fn expect_ok(operation: &'static str, status: u16) -> Result<(), ScenarioError> {
    if status == 200 {
        Ok(())
    } else {
        Err(ScenarioError::UnexpectedStatus { operation, status })
    }
}
