// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::ValidationErrors;
use crate::types::{
    Category, Complaint, ComplaintDraft, ComplaintPatch, NewComplaint, Priority, Status,
};
use regex::Regex;
use std::str::FromStr;
use std::sync::LazyLock;

/// Maximum title length, in characters.
pub const TITLE_MAX_CHARS: usize = 200;
/// Maximum description length, in characters.
pub const DESCRIPTION_MAX_CHARS: usize = 2000;
/// Maximum customer name length, in characters.
pub const CUSTOMER_NAME_MAX_CHARS: usize = 100;

const TITLE_REQUIRED: &str = "Please provide a title for the complaint";
const TITLE_TOO_LONG: &str = "Title cannot be more than 200 characters";
const DESCRIPTION_REQUIRED: &str = "Please provide a description for the complaint";
const DESCRIPTION_TOO_LONG: &str = "Description cannot be more than 2000 characters";
const CATEGORY_REQUIRED: &str = "Please select a category";
const CATEGORY_INVALID: &str = "Please select a valid category";
const PRIORITY_REQUIRED: &str = "Please select a priority level";
const PRIORITY_INVALID: &str = "Please select a valid priority level";
pub(crate) const STATUS_INVALID: &str = "Please select a valid status";
const EMAIL_INVALID: &str = "Please provide a valid email address";
const CUSTOMER_NAME_TOO_LONG: &str = "Customer name cannot be more than 100 characters";

/// Word characters are ASCII only; non-ASCII local parts and domains are
/// rejected.
#[allow(clippy::expect_used)] // Literal pattern, covered by tests
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?-u:\w)+([.-]?(?-u:\w)+)*@(?-u:\w)+([.-]?(?-u:\w)+)*(\.(?-u:\w){2,3})+$")
        .expect("valid email regex")
});

/// Returns true if `email` has the shape of a deliverable address.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Validates raw submission fields.
///
/// Text fields are trimmed, the email is lower-cased, and empty optional
/// fields collapse to `None`. All failures are collected, in field order.
///
/// # Errors
///
/// Returns every field-level failure if any required field is missing or
/// any length, format, or enumeration constraint is violated.
pub fn validate_new_complaint(draft: &ComplaintDraft) -> Result<NewComplaint, ValidationErrors> {
    let mut errors: ValidationErrors = ValidationErrors::new();

    let title: Option<String> = required_text(
        &mut errors,
        "title",
        draft.title.as_deref(),
        TITLE_MAX_CHARS,
        TITLE_REQUIRED,
        TITLE_TOO_LONG,
    );
    let description: Option<String> = required_text(
        &mut errors,
        "description",
        draft.description.as_deref(),
        DESCRIPTION_MAX_CHARS,
        DESCRIPTION_REQUIRED,
        DESCRIPTION_TOO_LONG,
    );
    let category: Option<Category> = required_literal(
        &mut errors,
        "category",
        draft.category.as_deref(),
        CATEGORY_REQUIRED,
        CATEGORY_INVALID,
    );
    let priority: Option<Priority> = required_literal(
        &mut errors,
        "priority",
        draft.priority.as_deref(),
        PRIORITY_REQUIRED,
        PRIORITY_INVALID,
    );
    let email: Option<String> = optional_email(&mut errors, draft.email.as_deref());
    let customer_name: Option<String> =
        optional_customer_name(&mut errors, draft.customer_name.as_deref());

    match (title, description, category, priority) {
        (Some(title), Some(description), Some(category), Some(priority)) if errors.is_empty() => {
            Ok(NewComplaint {
                title,
                description,
                category,
                priority,
                email,
                customer_name,
            })
        }
        _ => Err(errors),
    }
}

/// Merges `patch` into `current` and re-validates the result.
///
/// The identifier, submission time, submitter and update time are carried
/// over untouched; the store stamps `updated_at` when it writes.
///
/// # Errors
///
/// Returns every field-level failure found in the supplied fields.
pub fn apply_patch(
    current: &Complaint,
    patch: &ComplaintPatch,
) -> Result<Complaint, ValidationErrors> {
    let mut errors: ValidationErrors = ValidationErrors::new();
    let mut merged: Complaint = current.clone();

    if let Some(title) = patch.title.as_deref()
        && let Some(value) = required_text(
            &mut errors,
            "title",
            Some(title),
            TITLE_MAX_CHARS,
            TITLE_REQUIRED,
            TITLE_TOO_LONG,
        )
    {
        merged.title = value;
    }

    if let Some(description) = patch.description.as_deref()
        && let Some(value) = required_text(
            &mut errors,
            "description",
            Some(description),
            DESCRIPTION_MAX_CHARS,
            DESCRIPTION_REQUIRED,
            DESCRIPTION_TOO_LONG,
        )
    {
        merged.description = value;
    }

    if let Some(category) = patch.category.as_deref()
        && let Some(value) = required_literal(
            &mut errors,
            "category",
            Some(category),
            CATEGORY_REQUIRED,
            CATEGORY_INVALID,
        )
    {
        merged.category = value;
    }

    if let Some(priority) = patch.priority.as_deref()
        && let Some(value) = required_literal(
            &mut errors,
            "priority",
            Some(priority),
            PRIORITY_REQUIRED,
            PRIORITY_INVALID,
        )
    {
        merged.priority = value;
    }

    if let Some(status) = patch.status.as_deref()
        && let Some(value) = required_literal::<Status>(
            &mut errors,
            "status",
            Some(status),
            STATUS_INVALID,
            STATUS_INVALID,
        )
    {
        merged.status = value;
    }

    if let Some(email) = &patch.email {
        merged.email = optional_email(&mut errors, email.as_deref());
    }

    if let Some(customer_name) = &patch.customer_name {
        merged.customer_name = optional_customer_name(&mut errors, customer_name.as_deref());
    }

    errors.into_result(merged)
}

fn required_text(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<&str>,
    max_chars: usize,
    missing: &str,
    too_long: &str,
) -> Option<String> {
    let trimmed: &str = value.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        errors.push(field, missing);
        return None;
    }
    if trimmed.chars().count() > max_chars {
        errors.push(field, too_long);
        return None;
    }
    Some(trimmed.to_string())
}

fn required_literal<T: FromStr>(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<&str>,
    missing: &str,
    invalid: &str,
) -> Option<T> {
    let Some(raw) = value.filter(|v| !v.is_empty()) else {
        errors.push(field, missing);
        return None;
    };
    raw.parse::<T>().map_or_else(
        |_| {
            errors.push(field, invalid);
            None
        },
        Some,
    )
}

fn optional_email(errors: &mut ValidationErrors, value: Option<&str>) -> Option<String> {
    let normalized: String = value.map(str::trim)?.to_lowercase();
    if normalized.is_empty() {
        return None;
    }
    if !is_valid_email(&normalized) {
        errors.push("email", EMAIL_INVALID);
        return None;
    }
    Some(normalized)
}

fn optional_customer_name(errors: &mut ValidationErrors, value: Option<&str>) -> Option<String> {
    let trimmed: &str = value.map(str::trim)?;
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.chars().count() > CUSTOMER_NAME_MAX_CHARS {
        errors.push("customerName", CUSTOMER_NAME_TOO_LONG);
        return None;
    }
    Some(trimmed.to_string())
}
