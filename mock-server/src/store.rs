//! In-memory accounts and pets.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Accounts every fresh store starts with: `(email, password)`.
pub const SEED_ACCOUNTS: [(&str, &str); 2] = [
    ("valid@test.com", "validpass"),
    ("other@test.com", "otherpass"),
];

#[derive(Clone, Debug)]
pub struct Account {
    pub email: String,
    pub password: String,
    pub key: String,
    pub user_id: String,
}

impl Account {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
            key: Uuid::new_v4().simple().to_string(),
            user_id: Uuid::new_v4().simple().to_string(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pet {
    pub id: String,
    pub name: String,
    pub animal_type: String,
    pub age: String,
    pub pet_photo: String,
    pub user_id: String,
    pub created_at: String,
}

#[derive(Debug, Default)]
pub struct Store {
    accounts: Vec<Account>,
    /// Newest first, the order listings are served in.
    pets: Vec<Pet>,
}

impl Store {
    /// Seed accounts, with one pet owned by the second account.
    pub fn seeded() -> Self {
        let mut store = Store::default();
        for (email, password) in SEED_ACCOUNTS {
            store.add_account(Account::new(email, password));
        }
        let other = store.accounts[1].user_id.clone();
        store.insert_pet(&other, "Шарик", "дворняга", "3", String::new());
        store
    }

    pub fn add_account(&mut self, account: Account) {
        self.accounts.push(account);
    }

    pub fn login(&self, email: &str, password: &str) -> Option<&Account> {
        self.accounts
            .iter()
            .find(|a| a.email == email && a.password == password)
    }

    pub fn account_by_key(&self, key: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.key == key)
    }

    pub fn pets(&self) -> impl Iterator<Item = &Pet> {
        self.pets.iter()
    }

    pub fn owned_by<'a>(&'a self, user_id: &'a str) -> impl Iterator<Item = &'a Pet> {
        self.pets.iter().filter(move |p| p.user_id == user_id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Pet> {
        self.pets.iter_mut().find(|p| p.id == id)
    }

    pub fn insert_pet(
        &mut self,
        user_id: &str,
        name: &str,
        animal_type: &str,
        age: &str,
        pet_photo: String,
    ) -> Pet {
        let pet = Pet {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            animal_type: animal_type.to_string(),
            age: age.to_string(),
            pet_photo,
            user_id: user_id.to_string(),
            created_at: timestamp(),
        };
        self.pets.insert(0, pet.clone());
        pet
    }

    pub fn remove(&mut self, id: &str) -> Option<Pet> {
        let index = self.pets.iter().position(|p| p.id == id)?;
        Some(self.pets.remove(index))
    }
}

fn timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{:.3}", now.as_secs_f64())
}
