// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Caller extraction for the server.
//!
//! Resolves the `Authorization: Bearer <token>` header through the
//! configured identity provider. Whether a caller is required is decided
//! by the operation, not here.

use axum::{extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts};
use complaint_desk_api::Caller;
use std::convert::Infallible;
use tracing::{debug, warn};

use crate::AppState;

/// Extractor for the optional caller identity.
///
/// # Usage
///
/// ```ignore
/// async fn my_handler(
///     SessionCaller(caller): SessionCaller,
/// ) -> Result<Json<Response>, HttpError> {
///     service.submit(caller.as_ref(), &draft).await?;
/// }
/// ```
///
/// A missing header, a header that is not a bearer token, and an unknown
/// token all yield `None`. The extractor never rejects a request.
pub struct SessionCaller(pub Option<Caller>);

impl FromRequestParts<AppState> for SessionCaller {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(header) = parts.headers.get(AUTHORIZATION) else {
            debug!("No Authorization header");
            return Ok(Self(None));
        };

        let Some(token) = header
            .to_str()
            .ok()
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
        else {
            warn!("Authorization header is not a bearer token");
            return Ok(Self(None));
        };

        let Some(claims) = state.identities.resolve(token).await else {
            warn!("Bearer token did not resolve to a caller");
            return Ok(Self(None));
        };

        let caller: Caller = Caller::from_claims(claims);
        debug!(caller = %caller.id, role = %caller.role, "Caller resolved");
        Ok(Self(Some(caller)))
    }
}
