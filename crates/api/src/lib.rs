// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod error;
mod request_response;
mod service;
mod store;

#[cfg(test)]
mod tests;

pub use auth::{
    AuthorizationService, Caller, CallerClaims, IdentityProvider, Role, StaticTokenProvider,
};
pub use error::{ApiError, AuthError, translate_persistence_error};
pub use request_response::{
    ComplaintListResponse, ComplaintListing, ComplaintResponse, HealthResponse,
    ListComplaintsQuery, MessageResponse, Submitted, Updated,
};
pub use service::{ComplaintService, DELETED_MESSAGE, SUBMITTED_MESSAGE, UPDATED_MESSAGE};
pub use store::ComplaintStore;
