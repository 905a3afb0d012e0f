// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors raised when parsing domain literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The category is not one of the enumerated literals.
    InvalidCategory(String),
    /// The priority is not one of the enumerated literals.
    InvalidPriority(String),
    /// The status is not one of the enumerated literals.
    InvalidStatus(String),
    /// The complaint identifier could not be parsed.
    InvalidComplaintId(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCategory(value) => write!(f, "Invalid category: '{value}'"),
            Self::InvalidPriority(value) => write!(f, "Invalid priority: '{value}'"),
            Self::InvalidStatus(value) => write!(f, "Invalid status: '{value}'"),
            Self::InvalidComplaintId(value) => write!(f, "Invalid complaint id: '{value}'"),
        }
    }
}

impl std::error::Error for DomainError {}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// The external (JSON) name of the offending field.
    pub field: String,
    /// The human-readable message shown to the caller.
    pub message: String,
}

impl FieldError {
    /// Creates a new field error.
    #[must_use]
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// An ordered collection of field-level validation failures.
///
/// Order follows the canonical field order of a complaint so that
/// callers receive stable `details` lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Creates an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Creates a collection holding a single failure.
    #[must_use]
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors: Self = Self::new();
        errors.push(field, message);
        errors
    }

    /// Records a failure for `field`.
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    /// Returns true if no failures were recorded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the recorded failures in order.
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Returns just the messages, in order.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.message.clone()).collect()
    }

    /// Returns true if a failure was recorded for `field`.
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// Converts the collection into a result carrying `value` when empty.
    ///
    /// # Errors
    ///
    /// Returns `self` if any failure was recorded.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Validation failed: {}", self.messages().join("; "))
    }
}

impl std::error::Error for ValidationErrors {}
