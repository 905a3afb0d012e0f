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
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod patch;
mod query;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::{DomainError, FieldError, ValidationErrors};
pub use query::{
    ALL_SENTINEL, ComplaintFilter, DEFAULT_LIMIT, DEFAULT_PAGE, PageRequest, Pagination,
};
pub use types::{
    Category, Complaint, ComplaintDraft, ComplaintId, ComplaintPatch, NewComplaint, Priority,
    Status,
};
pub use validation::{
    CUSTOMER_NAME_MAX_CHARS, DESCRIPTION_MAX_CHARS, TITLE_MAX_CHARS, apply_patch, is_valid_email,
    validate_new_complaint,
};
