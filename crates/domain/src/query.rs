// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Listing filters and offset pagination.

use crate::error::ValidationErrors;
use crate::types::{Category, Priority, Status};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Filter value meaning "no constraint on this field".
pub const ALL_SENTINEL: &str = "all";

/// Page used when the caller does not ask for one.
pub const DEFAULT_PAGE: u32 = 1;
/// Page size used when the caller does not ask for one.
pub const DEFAULT_LIMIT: u32 = 10;

/// Equality filters applied when listing complaints.
///
/// A `None` field places no constraint on that attribute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComplaintFilter {
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub category: Option<Category>,
}

impl ComplaintFilter {
    /// Builds a filter from raw query parameters.
    ///
    /// Absent, empty and `all` values place no constraint.
    ///
    /// # Errors
    ///
    /// Returns a failure for every value that is not an enumerated literal.
    pub fn from_params(
        status: Option<&str>,
        priority: Option<&str>,
        category: Option<&str>,
    ) -> Result<Self, ValidationErrors> {
        let mut errors: ValidationErrors = ValidationErrors::new();
        let filter: Self = Self {
            status: filter_value(&mut errors, "status", status),
            priority: filter_value(&mut errors, "priority", priority),
            category: filter_value(&mut errors, "category", category),
        };
        errors.into_result(filter)
    }
}

fn filter_value<T: FromStr>(
    errors: &mut ValidationErrors,
    field: &str,
    raw: Option<&str>,
) -> Option<T> {
    let value: &str = raw.map(str::trim).filter(|v| !v.is_empty())?;
    if value == ALL_SENTINEL {
        return None;
    }
    value.parse::<T>().map_or_else(
        |_| {
            errors.push(field, format!("Invalid {field} filter: '{value}'"));
            None
        },
        Some,
    )
}

/// A 1-indexed page of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    /// Creates a page request.
    ///
    /// # Errors
    ///
    /// Returns a failure if `page` or `limit` is zero.
    pub fn new(page: u32, limit: u32) -> Result<Self, ValidationErrors> {
        let mut errors: ValidationErrors = ValidationErrors::new();
        if page == 0 {
            errors.push("page", "Page must be a positive integer");
        }
        if limit == 0 {
            errors.push("limit", "Limit must be a positive integer");
        }
        errors.into_result(Self { page, limit })
    }

    /// Builds a page request from raw query parameters, applying defaults.
    ///
    /// # Errors
    ///
    /// Returns a failure for values that are not integers in range.
    pub fn from_params(page: Option<&str>, limit: Option<&str>) -> Result<Self, ValidationErrors> {
        let mut errors: ValidationErrors = ValidationErrors::new();
        let page: u32 = parse_count(&mut errors, "page", page, DEFAULT_PAGE);
        let limit: u32 = parse_count(&mut errors, "limit", limit, DEFAULT_LIMIT);
        if !errors.is_empty() {
            return Err(errors);
        }
        Self::new(page, limit)
    }

    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of matching records that precede this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }
}

fn parse_count(
    errors: &mut ValidationErrors,
    field: &str,
    raw: Option<&str>,
    default: u32,
) -> u32 {
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        None => default,
        Some(value) => value.parse::<u32>().unwrap_or_else(|_| {
            errors.push(field, format!("Invalid {field}: '{value}'"));
            default
        }),
    }
}

/// Pagination metadata returned alongside a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    /// Number of records matching the filter across all pages.
    pub total: u64,
    /// `ceil(total / limit)`; zero when nothing matches.
    pub pages: u64,
}

impl Pagination {
    /// Computes pagination metadata for `request` over `total` matches.
    #[must_use]
    pub fn new(request: PageRequest, total: u64) -> Self {
        Self {
            page: request.page,
            limit: request.limit,
            total,
            pages: total.div_ceil(u64::from(request.limit)),
        }
    }
}
