// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use complaint_desk_domain::{Complaint, ComplaintFilter, ComplaintId, PageRequest};
use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use tracing::debug;

use crate::data_models::ComplaintRow;
use crate::diesel_schema::complaints;
use crate::error::PersistenceError;

/// Applies the equality filters to a boxed `complaints` query.
fn filtered(filter: &ComplaintFilter) -> complaints::BoxedQuery<'static, Sqlite> {
    let mut query = complaints::table.into_boxed();
    if let Some(status) = filter.status {
        query = query.filter(complaints::status.eq(status.as_str()));
    }
    if let Some(priority) = filter.priority {
        query = query.filter(complaints::priority.eq(priority.as_str()));
    }
    if let Some(category) = filter.category {
        query = query.filter(complaints::category.eq(category.as_str()));
    }
    query
}

/// Retrieves a complaint by identifier.
///
/// # Errors
///
/// Returns `ComplaintNotFound` if no row exists, or an error if the query
/// fails or the row cannot be decoded.
pub fn get_complaint(
    conn: &mut SqliteConnection,
    id: ComplaintId,
) -> Result<Complaint, PersistenceError> {
    debug!(complaint_id = %id, "Fetching complaint");

    let row: Option<ComplaintRow> = complaints::table
        .filter(complaints::complaint_id.eq(id.value()))
        .select(ComplaintRow::as_select())
        .first::<ComplaintRow>(conn)
        .optional()?;

    row.ok_or(PersistenceError::ComplaintNotFound(id))?.try_into()
}

/// Counts complaints matching `filter`.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_complaints(
    conn: &mut SqliteConnection,
    filter: &ComplaintFilter,
) -> Result<u64, PersistenceError> {
    let total: i64 = filtered(filter).count().get_result(conn)?;
    u64::try_from(total).map_err(|e| PersistenceError::QueryFailed(e.to_string()))
}

/// Retrieves one page of complaints matching `filter`.
///
/// Results are ordered by submission time, newest first, with ties broken
/// by the newest identifier.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be decoded.
pub fn list_complaints(
    conn: &mut SqliteConnection,
    filter: &ComplaintFilter,
    page: PageRequest,
) -> Result<Vec<Complaint>, PersistenceError> {
    debug!(
        ?filter,
        page = page.page(),
        limit = page.limit(),
        "Listing complaints"
    );

    let offset: i64 =
        i64::try_from(page.offset()).map_err(|e| PersistenceError::QueryFailed(e.to_string()))?;

    let rows: Vec<ComplaintRow> = filtered(filter)
        .order((
            complaints::date_submitted.desc(),
            complaints::complaint_id.desc(),
        ))
        .limit(i64::from(page.limit()))
        .offset(offset)
        .select(ComplaintRow::as_select())
        .load::<ComplaintRow>(conn)?;

    rows.into_iter().map(Complaint::try_from).collect()
}
