//! Error types for the PetFriends client and scenario helpers.
//!
//! # Design
//! `ApiError` covers only failures on the client side of the wire: the
//! request could not be built, sent, or its body decoded. HTTP statuses are
//! never errors at this layer; callers read them from `ApiResponse`.
//! `ScenarioError` is where a status becomes a failure, together with the
//! precondition signals raised when required setup data is missing.

use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by `PetFriendsClient` and the `PetFriends` facade.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced an HTTP status (DNS, refused connection, ...).
    #[error("transport failed: {0}")]
    Transport(#[from] ureq::Error),

    /// The photo file to upload could not be read.
    #[error("cannot read photo {}: {source}", .path.display())]
    Photo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A query string or form body could not be encoded.
    #[error("request encoding failed: {0}")]
    Encoding(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),
}

/// Errors raised by `Session` helpers.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A setup call answered with something other than 200.
    #[error("{operation} returned HTTP {status}")]
    UnexpectedStatus { operation: &'static str, status: u16 },

    /// The account owns no pets and the scenario does not provision one.
    #[error("no pets available: the account owns no pets")]
    NoOwnedPets,

    /// Every listed pet belongs to the authenticated account.
    #[error("no pets available: no pet owned by another account")]
    NoForeignPets,
}
