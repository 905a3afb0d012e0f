// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use complaint_desk_domain::{Complaint, ComplaintId, ComplaintPatch, NewComplaint, apply_patch};
use diesel::SqliteConnection;
use diesel::prelude::*;
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::data_models::{ComplaintChanges, ComplaintRow, NewComplaintRow, to_unix_millis};
use crate::diesel_schema::complaints;
use crate::error::PersistenceError;
use crate::queries::get_complaint;

/// Inserts a validated complaint with status `Pending`.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_complaint(
    conn: &mut SqliteConnection,
    complaint: &NewComplaint,
    submitting_user_id: Option<&str>,
    submitted_at: OffsetDateTime,
) -> Result<Complaint, PersistenceError> {
    let submitted_millis: i64 = to_unix_millis(submitted_at)?;

    let row: ComplaintRow = diesel::insert_into(complaints::table)
        .values(NewComplaintRow::new(
            complaint,
            submitting_user_id,
            submitted_millis,
        ))
        .returning(ComplaintRow::as_returning())
        .get_result(conn)?;

    info!(
        complaint_id = row.complaint_id,
        category = %complaint.category,
        priority = %complaint.priority,
        "Created complaint"
    );

    row.try_into()
}

/// Merges `patch` into the stored complaint and writes the result.
///
/// The read, merge and write happen in one transaction. `updated_at` is
/// stamped with `now`.
///
/// # Errors
///
/// Returns `ComplaintNotFound` if the complaint does not exist,
/// `Validation` if the merged record is invalid, or an error if the
/// write fails.
pub fn update_complaint(
    conn: &mut SqliteConnection,
    id: ComplaintId,
    patch: &ComplaintPatch,
    now: OffsetDateTime,
) -> Result<Complaint, PersistenceError> {
    debug!(complaint_id = %id, "Updating complaint");
    let updated_millis: i64 = to_unix_millis(now)?;

    conn.transaction::<Complaint, PersistenceError, _>(|conn| {
        let current: Complaint = get_complaint(conn, id)?;
        let merged: Complaint = apply_patch(&current, patch)?;

        let row: ComplaintRow =
            diesel::update(complaints::table.filter(complaints::complaint_id.eq(id.value())))
                .set(ComplaintChanges::new(&merged, updated_millis))
                .returning(ComplaintRow::as_returning())
                .get_result(conn)?;

        info!(
            complaint_id = %id,
            status = %merged.status,
            "Updated complaint"
        );

        row.try_into()
    })
}

/// Permanently removes a complaint.
///
/// # Errors
///
/// Returns `ComplaintNotFound` if no row was deleted, or an error if the
/// delete fails.
pub fn delete_complaint(
    conn: &mut SqliteConnection,
    id: ComplaintId,
) -> Result<(), PersistenceError> {
    let deleted: usize =
        diesel::delete(complaints::table.filter(complaints::complaint_id.eq(id.value())))
            .execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::ComplaintNotFound(id));
    }

    info!(complaint_id = %id, "Deleted complaint");
    Ok(())
}
