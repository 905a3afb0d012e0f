// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use complaint_desk_persistence::{DatabaseLocation, Persistence, PersistenceError};
use std::sync::Arc;
use tokio::sync::{Mutex, OnceCell};
use tracing::{info, warn};

/// Shared handle to the complaint store.
///
/// The database is opened on first use. Concurrent first callers share a
/// single in-flight open; a failed open is not remembered, so the next
/// caller tries again. Clones share the same underlying handle.
#[derive(Clone)]
pub struct ComplaintStore {
    location: DatabaseLocation,
    cell: Arc<OnceCell<Arc<Mutex<Persistence>>>>,
}

impl std::fmt::Debug for ComplaintStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComplaintStore")
            .field("location", &self.location)
            .field("initialized", &self.cell.initialized())
            .finish()
    }
}

impl ComplaintStore {
    /// Creates a store that opens `location` on first use.
    #[must_use]
    pub fn new(location: DatabaseLocation) -> Self {
        Self {
            location,
            cell: Arc::new(OnceCell::new()),
        }
    }

    /// Wraps an already opened database.
    #[must_use]
    pub fn from_persistence(persistence: Persistence) -> Self {
        Self {
            location: DatabaseLocation::InMemory,
            cell: Arc::new(OnceCell::new_with(Some(Arc::new(Mutex::new(persistence))))),
        }
    }

    /// Returns true once the database has been opened.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.cell.initialized()
    }

    /// Returns the shared database handle, opening it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub async fn handle(&self) -> Result<Arc<Mutex<Persistence>>, PersistenceError> {
        self.cell
            .get_or_try_init(|| async {
                info!(location = %self.location, "Opening complaint store");
                match Persistence::open(&self.location) {
                    Ok(persistence) => Ok(Arc::new(Mutex::new(persistence))),
                    Err(e) => {
                        warn!(
                            location = %self.location,
                            error = %e,
                            "Failed to open complaint store"
                        );
                        Err(e)
                    }
                }
            })
            .await
            .cloned()
    }
}
