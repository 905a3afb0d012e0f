// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Complaint Desk.
//!
//! This crate owns the `complaints` table. It is built on Diesel over
//! `SQLite`; migrations are embedded and applied when a connection is
//! opened.
//!
//! The store validates what it writes: submissions and merged updates are
//! checked with the domain rules before they reach the database, so the
//! table never holds a complaint the domain would reject.
//!
//! ## Testing Philosophy
//!
//! - Every test opens its own uniquely named in-memory database
//! - No test depends on wall-clock time; timestamps are passed in

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
#![allow(clippy::multiple_crate_versions)]

use complaint_desk_domain::{
    Complaint, ComplaintDraft, ComplaintFilter, ComplaintId, ComplaintPatch, NewComplaint,
    PageRequest, validate_new_complaint,
};
use diesel::SqliteConnection;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;
use tracing::debug;

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Where the complaint database lives.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DatabaseLocation {
    /// A private in-memory database, discarded when the handle is dropped.
    #[default]
    InMemory,
    /// A `SQLite` file, created if missing.
    File(PathBuf),
}

impl std::fmt::Display for DatabaseLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InMemory => write!(f, "in-memory"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// One page of a filtered listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplaintPage {
    pub items: Vec<Complaint>,
    /// Number of complaints matching the filter across all pages.
    pub total: u64,
}

/// Persistence adapter for complaints.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Opens the database at `location`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn open(location: &DatabaseLocation) -> Result<Self, PersistenceError> {
        match location {
            DatabaseLocation::InMemory => Self::new_in_memory(),
            DatabaseLocation::File(path) => Self::new_with_file(path),
        }
    }

    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique shared-cache database so that separate
    /// handles never observe each other's data.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String =
            format!("file:complaints_memdb_{db_id}?mode=memory&cache=shared");

        let conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;

        Ok(Self { conn })
    }

    /// Validates and stores a new complaint.
    ///
    /// The status is always `Pending` and the submission time is
    /// `submitted_at`, whatever the caller supplied.
    ///
    /// # Errors
    ///
    /// Returns `Validation` with every field failure if the draft is
    /// invalid; nothing is written in that case.
    pub fn create_complaint(
        &mut self,
        draft: &ComplaintDraft,
        submitting_user_id: Option<&str>,
        submitted_at: OffsetDateTime,
    ) -> Result<Complaint, PersistenceError> {
        let complaint: NewComplaint = validate_new_complaint(draft)?;
        mutations::insert_complaint(&mut self.conn, &complaint, submitting_user_id, submitted_at)
    }

    /// Retrieves a complaint by identifier.
    ///
    /// # Errors
    ///
    /// Returns `ComplaintNotFound` if it does not exist.
    pub fn get_complaint(&mut self, id: ComplaintId) -> Result<Complaint, PersistenceError> {
        queries::get_complaint(&mut self.conn, id)
    }

    /// Retrieves one page of complaints, newest first, with the total count.
    ///
    /// # Errors
    ///
    /// Returns an error if either query fails.
    pub fn list_complaints(
        &mut self,
        filter: &ComplaintFilter,
        page: PageRequest,
    ) -> Result<ComplaintPage, PersistenceError> {
        let total: u64 = queries::count_complaints(&mut self.conn, filter)?;
        let items: Vec<Complaint> = queries::list_complaints(&mut self.conn, filter, page)?;
        Ok(ComplaintPage { items, total })
    }

    /// Applies a partial update and returns the updated complaint.
    ///
    /// # Errors
    ///
    /// Returns `ComplaintNotFound` if it does not exist, or `Validation` if
    /// the merged record is invalid; nothing is written in either case.
    pub fn update_complaint(
        &mut self,
        id: ComplaintId,
        patch: &ComplaintPatch,
        now: OffsetDateTime,
    ) -> Result<Complaint, PersistenceError> {
        mutations::update_complaint(&mut self.conn, id, patch, now)
    }

    /// Permanently deletes a complaint.
    ///
    /// # Errors
    ///
    /// Returns `ComplaintNotFound` if it does not exist.
    pub fn delete_complaint(&mut self, id: ComplaintId) -> Result<(), PersistenceError> {
        mutations::delete_complaint(&mut self.conn, id)
    }

    /// Verifies that the `complaints` table answers a query.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn ping(&mut self) -> Result<(), PersistenceError> {
        let total: u64 = queries::count_complaints(&mut self.conn, &ComplaintFilter::default())?;
        debug!(total, "Complaint store answered");
        Ok(())
    }
}
