// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Decoding of partial updates from JSON objects.
//!
//! Every key in an update body must be accounted for: known fields are
//! decoded, immutable fields and unknown keys are reported as validation
//! failures instead of being dropped.

use crate::error::ValidationErrors;
use crate::types::ComplaintPatch;
use crate::validation::STATUS_INVALID;
use serde_json::{Map, Value};

/// Fields a caller may change through an update.
const PATCHABLE_FIELDS: [&str; 7] = [
    "title",
    "description",
    "category",
    "priority",
    "status",
    "email",
    "customerName",
];

/// Fields that exist on a complaint but are fixed once it is created.
const IMMUTABLE_FIELDS: [&str; 7] = [
    "id",
    "_id",
    "dateSubmitted",
    "submittingUserId",
    "userId",
    "createdAt",
    "updatedAt",
];

impl ComplaintPatch {
    /// Decodes a patch from a JSON object.
    ///
    /// Known fields are read in canonical order; immutable and unknown keys
    /// are reported afterwards in key order.
    ///
    /// # Errors
    ///
    /// Returns field-level failures for wrongly typed values, `null` on a
    /// required field, immutable fields, and unknown keys.
    pub fn from_json_object(body: &Map<String, Value>) -> Result<Self, ValidationErrors> {
        let mut errors: ValidationErrors = ValidationErrors::new();

        let patch: Self = Self {
            title: required_string(
                &mut errors,
                body,
                "title",
                "Please provide a title for the complaint",
            ),
            description: required_string(
                &mut errors,
                body,
                "description",
                "Please provide a description for the complaint",
            ),
            category: required_string(
                &mut errors,
                body,
                "category",
                "Please select a valid category",
            ),
            priority: required_string(
                &mut errors,
                body,
                "priority",
                "Please select a valid priority level",
            ),
            status: required_string(&mut errors, body, "status", STATUS_INVALID),
            email: clearable_string(&mut errors, body, "email"),
            customer_name: clearable_string(&mut errors, body, "customerName"),
        };

        for key in body.keys() {
            if PATCHABLE_FIELDS.contains(&key.as_str()) {
                continue;
            }
            if IMMUTABLE_FIELDS.contains(&key.as_str()) {
                errors.push(key, format!("{key} cannot be modified"));
            } else {
                errors.push(key, format!("Unknown field '{key}'"));
            }
        }

        errors.into_result(patch)
    }
}

fn required_string(
    errors: &mut ValidationErrors,
    body: &Map<String, Value>,
    field: &str,
    message: &str,
) -> Option<String> {
    match body.get(field)? {
        Value::String(value) => Some(value.clone()),
        _ => {
            errors.push(field, message);
            None
        }
    }
}

fn clearable_string(
    errors: &mut ValidationErrors,
    body: &Map<String, Value>,
    field: &str,
) -> Option<Option<String>> {
    match body.get(field)? {
        Value::Null => Some(None),
        Value::String(value) => Some(Some(value.clone())),
        _ => {
            errors.push(field, format!("{field} must be a string"));
            None
        }
    }
}
