//! The scenario catalogue, runnable against any `Harness`.
//!
//! Scenarios marked "known defect" assert what the server does today, not
//! what it should do.

use petfriends_core::{PetFilter, PetInfo, ScenarioError, Session};

use super::{fixture, Harness};

const CAT: &str = "images/cat1.jpg";
const PORTRAIT: &str = "images/P1040103.jpg";

fn seed() -> PetInfo {
    PetInfo::new("Суперкот", "кот", "3")
}

fn open(h: &Harness) -> Result<Session<'_, petfriends_core::UreqTransport>, ScenarioError> {
    Session::open(&h.api, &h.settings.valid)
}

// --- authentication ---

pub fn get_api_key_for_valid_user(h: &Harness) -> Result<(), ScenarioError> {
    let response = h.api.get_api_key(&h.settings.valid)?;

    assert_eq!(response.status, 200);
    assert!(response.body.has_field("key"));
    assert!(!response.auth_key()?.as_str().is_empty());
    Ok(())
}

pub fn get_api_key_for_invalid_user(h: &Harness) -> Result<(), ScenarioError> {
    let response = h.api.get_api_key(&h.settings.invalid)?;

    assert_eq!(response.status, 403);
    assert!(!response.body.has_field("key"));
    Ok(())
}

pub fn get_api_key_with_empty_user_data(h: &Harness) -> Result<(), ScenarioError> {
    let response = h.api.get_api_key(&h.settings.empty)?;

    assert_eq!(response.status, 403);
    assert!(!response.body.has_field("key"));
    Ok(())
}

// --- listing ---

pub fn get_all_pets_with_valid_key(h: &Harness) -> Result<(), ScenarioError> {
    let session = open(h)?;
    let response = h.api.get_list_of_pets(session.key(), &PetFilter::All)?;

    assert_eq!(response.status, 200);
    assert!(!response.pets()?.is_empty());
    Ok(())
}

pub fn my_pets_lists_owned_pet(h: &Harness) -> Result<(), ScenarioError> {
    let session = open(h)?;
    let id = session.ensure_owned_pet(&seed())?;
    let response = h.api.get_list_of_pets(session.key(), &PetFilter::MyPets)?;

    assert_eq!(response.status, 200);
    let pets = response.pets()?;
    assert!(!pets.is_empty());
    assert!(pets.iter().any(|pet| pet.id == id));
    Ok(())
}

// --- creation ---

pub fn add_new_pet_with_valid_data(h: &Harness) -> Result<(), ScenarioError> {
    let session = open(h)?;
    let pet = PetInfo::new("Барбоскин", "двортерьер", "4");
    let response = h.api.add_new_pet(session.key(), &pet, &fixture(CAT))?;

    assert_eq!(response.status, 200);
    let created = response.pet()?;
    assert_eq!(created.name, pet.name);
    assert!(!created.pet_photo.is_empty());

    let mine = session.my_pets()?;
    assert!(mine.iter().any(|p| p.id == created.id && p.name == pet.name));
    Ok(())
}

pub fn add_new_pet_without_photo_with_valid_data(h: &Harness) -> Result<(), ScenarioError> {
    let session = open(h)?;
    let pet = PetInfo::new("Зик", "Попугай", "2");
    let response = h.api.add_new_pet_without_photo(session.key(), &pet)?;

    assert_eq!(response.status, 200);
    let created = response.pet()?;
    assert_eq!(created.name, pet.name);
    assert!(created.pet_photo.is_empty());
    Ok(())
}

/// Known defect: empty name, type and age are accepted.
pub fn add_new_pet_without_photo_and_with_empty_data(h: &Harness) -> Result<(), ScenarioError> {
    let session = open(h)?;
    let response = h
        .api
        .add_new_pet_without_photo(session.key(), &PetInfo::new("", "", ""))?;

    assert_eq!(response.status, 200);
    assert_eq!(response.pet()?.name, "");
    Ok(())
}

/// Known defect: empty name, type and age are accepted.
pub fn add_new_pet_with_photo_and_empty_data(h: &Harness) -> Result<(), ScenarioError> {
    let session = open(h)?;
    let response = h
        .api
        .add_new_pet(session.key(), &PetInfo::new("", "", ""), &fixture(CAT))?;

    assert_eq!(response.status, 200);
    assert_eq!(response.pet()?.name, "");
    Ok(())
}

pub fn add_new_pet_with_invalid_age(h: &Harness) -> Result<(), ScenarioError> {
    let session = open(h)?;
    let response = h.api.add_new_pet_without_photo(
        session.key(),
        &PetInfo::new("Барбоскин", "двортерьер", "cnuer"),
    )?;

    assert_eq!(response.status, 400);
    Ok(())
}

/// Known defect: a negative age is accepted and echoed back.
pub fn add_new_pet_with_negative_age(h: &Harness) -> Result<(), ScenarioError> {
    let session = open(h)?;
    let response = h.api.add_new_pet(
        session.key(),
        &PetInfo::new("Мурка", "Кошка", "-5"),
        &fixture(CAT),
    )?;

    assert_eq!(response.status, 200);
    assert_eq!(response.pet()?.age, "-5");
    Ok(())
}

// --- mutation ---

pub fn update_own_pet_info(h: &Harness) -> Result<(), ScenarioError> {
    let session = open(h)?;
    let id = session.ensure_owned_pet(&seed())?;
    let info = PetInfo::new("Мурзик", "Котэ", "5");
    let response = h.api.update_pet_info(session.key(), &id, &info)?;

    assert_eq!(response.status, 200);
    let updated = response.pet()?;
    assert_eq!(updated.id, id);
    assert_eq!(updated.name, info.name);
    assert_eq!(updated.age, info.age);
    Ok(())
}

pub fn add_photo_to_own_pet(h: &Harness) -> Result<(), ScenarioError> {
    let session = open(h)?;
    let id = session.ensure_owned_pet(&seed())?;
    let response = h.api.add_pet_photo(session.key(), &id, &fixture(PORTRAIT))?;

    assert_eq!(response.status, 200);
    let updated = response.pet()?;
    assert!(!updated.pet_photo.is_empty());

    let listed = session
        .my_pets()?
        .into_iter()
        .find(|pet| pet.id == id)
        .ok_or(ScenarioError::NoOwnedPets)?;
    assert_eq!(updated.pet_photo, listed.pet_photo);
    Ok(())
}

/// Without provisioning, an account with no pets is a precondition failure.
pub fn mutation_without_owned_pets_is_a_precondition_failure(
    h: &Harness,
) -> Result<(), ScenarioError> {
    let session = open(h)?;
    for pet in session.my_pets()? {
        h.api.delete_pet(session.key(), &pet.id)?;
    }

    assert!(matches!(
        session.first_owned_pet(),
        Err(ScenarioError::NoOwnedPets)
    ));
    Ok(())
}

// --- deletion ---

pub fn delete_own_pet(h: &Harness) -> Result<(), ScenarioError> {
    let session = open(h)?;
    let id = session.ensure_owned_pet(&seed())?;
    let response = h.api.delete_pet(session.key(), &id)?;

    assert_eq!(response.status, 200);
    assert!(session.my_pets()?.iter().all(|pet| pet.id != id));
    Ok(())
}

/// Add, delete, and check the listing: the end-to-end example.
pub fn create_then_delete_round_trip(h: &Harness) -> Result<(), ScenarioError> {
    let key_response = h.api.get_api_key(&h.settings.valid)?;
    assert_eq!(key_response.status, 200);
    assert!(key_response.body.has_field("key"));
    let key = key_response.auth_key()?;

    let created = h.api.add_new_pet(
        &key,
        &PetInfo::new("Барбоскин", "двортерьер", "4"),
        &fixture(CAT),
    )?;
    assert_eq!(created.status, 200);
    let pet = created.pet()?;
    assert_eq!(pet.name, "Барбоскин");

    let deleted = h.api.delete_pet(&key, &pet.id)?;
    assert_eq!(deleted.status, 200);

    let listing = h.api.get_list_of_pets(&key, &PetFilter::MyPets)?;
    assert_eq!(listing.status, 200);
    assert!(listing.pets()?.iter().all(|p| p.id != pet.id));
    Ok(())
}

// --- cross-ownership ---

/// Known defect: deleting someone else's pet succeeds.
pub fn delete_not_own_pet(h: &Harness) -> Result<(), ScenarioError> {
    let session = open(h)?;
    let foreign = session.first_foreign_pet()?;
    let response = h.api.delete_pet(session.key(), &foreign.id)?;

    assert_eq!(response.status, 200);
    assert!(session.all_pets()?.iter().all(|pet| pet.id != foreign.id));
    Ok(())
}

/// Known defect: the server fails with 500 instead of rejecting the call.
pub fn set_photo_not_own_pet(h: &Harness) -> Result<(), ScenarioError> {
    let session = open(h)?;
    let foreign = session.first_foreign_pet()?;
    let response = h
        .api
        .add_pet_photo(session.key(), &foreign.id, &fixture(PORTRAIT))?;

    assert_eq!(response.status, 500);
    Ok(())
}
