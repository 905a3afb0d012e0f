// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types for the `complaints` table and their domain conversions.
//!
//! Timestamps are stored as Unix milliseconds.

use complaint_desk_domain::{Category, Complaint, ComplaintId, NewComplaint, Priority, Status};
use diesel::prelude::*;
use time::OffsetDateTime;

use crate::diesel_schema::complaints;
use crate::error::PersistenceError;

/// Diesel Queryable struct for complaint rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = complaints)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ComplaintRow {
    pub complaint_id: i64,
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: String,
    pub status: String,
    pub date_submitted: i64,
    pub email: Option<String>,
    pub customer_name: Option<String>,
    pub submitting_user_id: Option<String>,
    pub updated_at: i64,
}

impl TryFrom<ComplaintRow> for Complaint {
    type Error = PersistenceError;

    fn try_from(row: ComplaintRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ComplaintId::new(row.complaint_id),
            title: row.title,
            description: row.description,
            category: row
                .category
                .parse::<Category>()
                .map_err(|e| PersistenceError::SerializationError(e.to_string()))?,
            priority: row
                .priority
                .parse::<Priority>()
                .map_err(|e| PersistenceError::SerializationError(e.to_string()))?,
            status: row
                .status
                .parse::<Status>()
                .map_err(|e| PersistenceError::SerializationError(e.to_string()))?,
            date_submitted: from_unix_millis(row.date_submitted)?,
            email: row.email,
            customer_name: row.customer_name,
            submitting_user_id: row.submitting_user_id,
            updated_at: from_unix_millis(row.updated_at)?,
        })
    }
}

/// Insertable row for a validated submission.
#[derive(Debug, Insertable)]
#[diesel(table_name = complaints)]
pub struct NewComplaintRow<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub category: &'a str,
    pub priority: &'a str,
    pub status: &'a str,
    pub date_submitted: i64,
    pub email: Option<&'a str>,
    pub customer_name: Option<&'a str>,
    pub submitting_user_id: Option<&'a str>,
    pub updated_at: i64,
}

impl<'a> NewComplaintRow<'a> {
    /// Builds an insertable row. New complaints always start as `Pending`.
    pub fn new(
        complaint: &'a NewComplaint,
        submitting_user_id: Option<&'a str>,
        submitted_at: i64,
    ) -> Self {
        Self {
            title: &complaint.title,
            description: &complaint.description,
            category: complaint.category.as_str(),
            priority: complaint.priority.as_str(),
            status: Status::Pending.as_str(),
            date_submitted: submitted_at,
            email: complaint.email.as_deref(),
            customer_name: complaint.customer_name.as_deref(),
            submitting_user_id,
            updated_at: submitted_at,
        }
    }
}

/// Full replacement of the mutable columns of a complaint.
///
/// Cleared optional fields are written as `NULL`.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = complaints)]
#[diesel(treat_none_as_null = true)]
pub struct ComplaintChanges<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub category: &'a str,
    pub priority: &'a str,
    pub status: &'a str,
    pub email: Option<&'a str>,
    pub customer_name: Option<&'a str>,
    pub updated_at: i64,
}

impl<'a> ComplaintChanges<'a> {
    pub fn new(merged: &'a Complaint, updated_at: i64) -> Self {
        Self {
            title: &merged.title,
            description: &merged.description,
            category: merged.category.as_str(),
            priority: merged.priority.as_str(),
            status: merged.status.as_str(),
            email: merged.email.as_deref(),
            customer_name: merged.customer_name.as_deref(),
            updated_at,
        }
    }
}

/// Converts a timestamp to Unix milliseconds.
///
/// # Errors
///
/// Returns an error if the timestamp does not fit in an `i64`.
pub fn to_unix_millis(at: OffsetDateTime) -> Result<i64, PersistenceError> {
    i64::try_from(at.unix_timestamp_nanos() / 1_000_000)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

/// Converts Unix milliseconds to a UTC timestamp.
///
/// # Errors
///
/// Returns an error if the value is outside the supported date range.
pub fn from_unix_millis(millis: i64) -> Result<OffsetDateTime, PersistenceError> {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}
