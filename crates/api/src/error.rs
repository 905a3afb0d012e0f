// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use complaint_desk_domain::ValidationErrors;
use complaint_desk_persistence::PersistenceError;
use tracing::error;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No caller identity was presented.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// The identity source could not be loaded.
    IdentitySourceUnavailable {
        /// Why the source could not be loaded.
        reason: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::IdentitySourceUnavailable { reason } => {
                write!(f, "Identity source unavailable: {reason}")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from persistence errors and represent the API
/// contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// No caller identity where one is required.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// The caller does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// Input failed validation.
    ValidationFailed {
        /// Field-level messages, in order.
        details: Vec<String>,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The store failed. The message names the operation only.
    StorageFailure {
        /// A caller-safe description, e.g. "Failed to fetch complaint".
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    #[must_use]
    pub fn complaint_not_found() -> Self {
        Self::ResourceNotFound {
            resource_type: String::from("Complaint"),
            message: String::from("Complaint not found"),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::ValidationFailed { details } => {
                write!(f, "Validation failed: {}", details.join("; "))
            }
            Self::ResourceNotFound { message, .. } | Self::StorageFailure { message } => {
                write!(f, "{message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
            AuthError::IdentitySourceUnavailable { reason } => Self::Internal { message: reason },
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        Self::ValidationFailed {
            details: errors.messages(),
        }
    }
}

/// Translates a persistence error into an API error.
///
/// Missing records and validation failures pass through. Anything else is
/// logged with its cause and reported as a storage failure naming only
/// `operation`, e.g. `"fetch complaint"`.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError, operation: &str) -> ApiError {
    match err {
        PersistenceError::ComplaintNotFound(_) => ApiError::complaint_not_found(),
        PersistenceError::Validation(errors) => ApiError::from(errors),
        other => {
            error!(operation, error = %other, "Storage operation failed");
            ApiError::StorageFailure {
                message: format!("Failed to {operation}"),
            }
        }
    }
}
