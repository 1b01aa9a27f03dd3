//! Base URL and credential fixtures.

use std::env;

use crate::types::Credentials;

pub const DEFAULT_BASE_URL: &str = "https://petfriends.skillfactory.ru";

pub const VALID_EMAIL: &str = "valid@test.com";
pub const VALID_PASSWORD: &str = "validpass";
pub const INVALID_EMAIL: &str = "nobody@nowhere.invalid";
pub const INVALID_PASSWORD: &str = "wrong-password";

/// Where the suite runs and which credentials it presents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub base_url: String,
    pub valid: Credentials,
    pub invalid: Credentials,
    pub empty: Credentials,
}

impl Settings {
    /// Built-in fixtures against `base_url`.
    pub fn for_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            valid: Credentials::new(VALID_EMAIL, VALID_PASSWORD),
            invalid: Credentials::new(INVALID_EMAIL, INVALID_PASSWORD),
            empty: Credentials::new("", ""),
        }
    }

    /// Read `PETFRIENDS_BASE_URL`, `PETFRIENDS_EMAIL` and
    /// `PETFRIENDS_PASSWORD`; anything unset falls back to the fixtures.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url =
            lookup("PETFRIENDS_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let mut settings = Self::for_base_url(base_url);
        if let Some(email) = lookup("PETFRIENDS_EMAIL") {
            settings.valid.email = email;
        }
        if let Some(password) = lookup("PETFRIENDS_PASSWORD") {
            settings.valid.password = password;
        }
        settings
    }
}
