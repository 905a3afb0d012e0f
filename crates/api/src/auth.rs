// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Caller identity and role-based authorization.
//!
//! Identities are issued elsewhere. This module only resolves a bearer
//! token into claims through an [`IdentityProvider`] and checks those
//! claims against the role an operation requires.

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::AuthError;

/// Caller roles for authorization.
///
/// `Admin` satisfies every requirement that `User` does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// May list, update and delete complaints.
    Admin,
    /// May submit complaints.
    User,
}

impl Role {
    /// Interprets a role claim. Absent or unrecognized claims mean `User`.
    #[must_use]
    pub fn from_claim(claim: Option<&str>) -> Self {
        match claim {
            Some("admin") => Self::Admin,
            _ => Self::User,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }

    /// Returns true if this role meets `required`.
    #[must_use]
    pub const fn satisfies(self, required: Self) -> bool {
        matches!((self, required), (Self::Admin, _) | (Self::User, Self::User))
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Claims produced by the identity provider for a token.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CallerClaims {
    /// Stable identifier of the caller.
    #[serde(rename = "sub")]
    pub subject: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// An authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub id: String,
    pub email: Option<String>,
    pub role: Role,
}

impl Caller {
    #[must_use]
    pub fn new(id: &str, role: Role) -> Self {
        Self {
            id: id.to_string(),
            email: None,
            role,
        }
    }

    #[must_use]
    pub fn from_claims(claims: CallerClaims) -> Self {
        let role: Role = Role::from_claim(claims.role.as_deref());
        Self {
            id: claims.subject,
            email: claims.email,
            role,
        }
    }
}

/// Authorization service for enforcing role-based access control.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks that a caller is present and holds `required`.
    ///
    /// # Arguments
    ///
    /// * `caller` - The resolved caller, if any
    /// * `required` - The role the action needs
    /// * `action` - The action name, for error reporting
    ///
    /// # Errors
    ///
    /// Returns `AuthenticationFailed` if there is no caller and
    /// `Unauthorized` if the caller's role is insufficient.
    pub fn authorize<'a>(
        caller: Option<&'a Caller>,
        required: Role,
        action: &str,
    ) -> Result<&'a Caller, AuthError> {
        let Some(caller) = caller else {
            warn!(action, "Rejected request without caller identity");
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Unauthorized"),
            });
        };

        if caller.role.satisfies(required) {
            debug!(caller = %caller.id, action, "Authorized");
            Ok(caller)
        } else {
            warn!(
                caller = %caller.id,
                role = %caller.role,
                action,
                "Rejected request with insufficient role"
            );
            Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: required.to_string(),
            })
        }
    }
}

/// Resolves bearer tokens into caller claims.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Returns the claims for `token`, or `None` if the token is unknown.
    async fn resolve(&self, token: &str) -> Option<CallerClaims>;
}

/// An identity provider backed by a fixed token table.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenProvider {
    tokens: HashMap<String, CallerClaims>,
}

impl StaticTokenProvider {
    #[must_use]
    pub const fn new(tokens: HashMap<String, CallerClaims>) -> Self {
        Self { tokens }
    }

    /// Loads a token table from a JSON object mapping tokens to claims.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_json_file(path: &Path) -> Result<Self, AuthError> {
        let raw: String =
            std::fs::read_to_string(path).map_err(|e| AuthError::IdentitySourceUnavailable {
                reason: format!("{}: {e}", path.display()),
            })?;
        let tokens: HashMap<String, CallerClaims> =
            serde_json::from_str(&raw).map_err(|e| AuthError::IdentitySourceUnavailable {
                reason: format!("{}: {e}", path.display()),
            })?;
        Ok(Self::new(tokens))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[async_trait]
impl IdentityProvider for StaticTokenProvider {
    async fn resolve(&self, token: &str) -> Option<CallerClaims> {
        self.tokens.get(token).cloned()
    }
}
