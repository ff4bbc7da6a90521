// File: ./src/client/mod.rs
// REST resource clients. Each family borrows the shared `ApiClient`:
// `client.journals().list_for_user(id)`.
pub mod auth;
pub mod bookings;
pub mod core;
pub mod error;
pub mod journals;
pub mod motivations;
pub mod therapists;
pub mod users;

pub use crate::client::core::ApiClient;
pub use crate::client::error::{ApiError, ApiResult};

use crate::client::auth::Auth;
use crate::client::bookings::Bookings;
use crate::client::journals::Journals;
use crate::client::motivations::Motivations;
use crate::client::therapists::Therapists;
use crate::client::users::Users;

impl ApiClient {
    pub fn auth(&self) -> Auth<'_> {
        Auth(self)
    }

    pub fn journals(&self) -> Journals<'_> {
        Journals(self)
    }

    pub fn bookings(&self) -> Bookings<'_> {
        Bookings(self)
    }

    pub fn therapists(&self) -> Therapists<'_> {
        Therapists(self)
    }

    pub fn motivations(&self) -> Motivations<'_> {
        Motivations(self)
    }

    pub fn users(&self) -> Users<'_> {
        Users(self)
    }
}
