//! Synchronous API client and scenario helpers for the PetFriends service.
//!
//! # Overview
//! `PetFriendsClient` builds `HttpRequest` values and parses `HttpResponse`
//! values without touching the network (host-does-IO pattern). A `Transport`
//! performs the round-trip, and `PetFriends` ties the two together into one
//! call per API operation returning `(status, body)` as an `ApiResponse`.
//!
//! # Design
//! - Statuses are data, never errors: the client does not reclassify them.
//! - `Session` holds one auth key per scenario and makes setup explicit.
//! - DTOs are defined independently from the mock-server crate; the scenario
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod multipart;
pub mod response;
pub mod session;
pub mod transport;
pub mod types;

pub use api::PetFriends;
pub use client::PetFriendsClient;
pub use config::Settings;
pub use error::{ApiError, ScenarioError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use multipart::PhotoFile;
pub use response::{ApiResponse, ResponseBody};
pub use session::Session;
pub use transport::{Transport, UreqTransport};
pub use types::{AuthKey, Credentials, Pet, PetFilter, PetInfo};
