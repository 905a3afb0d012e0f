// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Complaint operations.
//!
//! Each operation checks the caller, performs one store operation, and
//! for submissions and status changes hands a notification to a detached
//! task. Responses never wait on notifications.

use complaint_desk_domain::{
    Complaint, ComplaintDraft, ComplaintFilter, ComplaintId, ComplaintPatch, PageRequest,
    Pagination, ValidationErrors,
};
use complaint_desk_notify::{Notifier, NotifyOutcome};
use complaint_desk_persistence::{ComplaintPage, Persistence, PersistenceError};
use serde_json::Value;
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::auth::{AuthorizationService, Caller, Role};
use crate::error::{ApiError, translate_persistence_error};
use crate::request_response::{
    ComplaintListing, HealthResponse, ListComplaintsQuery, Submitted, Updated,
};
use crate::store::ComplaintStore;

pub const SUBMITTED_MESSAGE: &str = "Complaint submitted successfully";
pub const UPDATED_MESSAGE: &str = "Complaint updated successfully";
pub const DELETED_MESSAGE: &str = "Complaint deleted successfully";

/// Orchestrates the store and the notifier.
#[derive(Debug, Clone)]
pub struct ComplaintService {
    store: ComplaintStore,
    notifier: Notifier,
}

impl ComplaintService {
    #[must_use]
    pub const fn new(store: ComplaintStore, notifier: Notifier) -> Self {
        Self { store, notifier }
    }

    #[must_use]
    pub const fn store(&self) -> &ComplaintStore {
        &self.store
    }

    async fn persistence(&self, operation: &str) -> Result<Arc<Mutex<Persistence>>, ApiError> {
        self.store
            .handle()
            .await
            .map_err(|e| translate_persistence_error(e, operation))
    }

    /// Stores a new complaint for an authenticated caller.
    ///
    /// Status and submission time are set here; any values the caller
    /// supplied for them are ignored.
    ///
    /// # Errors
    ///
    /// Returns `AuthenticationFailed` without a caller, `ValidationFailed`
    /// for invalid fields, or `StorageFailure`.
    pub async fn submit(
        &self,
        caller: Option<&Caller>,
        draft: &ComplaintDraft,
    ) -> Result<Submitted, ApiError> {
        let caller: &Caller = AuthorizationService::authorize(caller, Role::User, "submit")?;
        let operation: &str = "create complaint";

        let persistence: Arc<Mutex<Persistence>> = self.persistence(operation).await?;
        let complaint: Complaint = persistence
            .lock()
            .await
            .create_complaint(draft, Some(&caller.id), OffsetDateTime::now_utc())
            .map_err(|e| translate_persistence_error(e, operation))?;

        info!(
            complaint_id = %complaint.id,
            caller = %caller.id,
            "Complaint submitted"
        );

        let notification: JoinHandle<NotifyOutcome> = self.spawn_new_complaint(&complaint);
        Ok(Submitted {
            complaint,
            notification,
        })
    }

    /// Fetches one complaint. Open to any caller.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown or unparseable identifier.
    pub async fn get(&self, raw_id: &str) -> Result<Complaint, ApiError> {
        let id: ComplaintId = parse_id(raw_id)?;
        let operation: &str = "fetch complaint";

        let persistence: Arc<Mutex<Persistence>> = self.persistence(operation).await?;
        let complaint: Complaint = persistence
            .lock()
            .await
            .get_complaint(id)
            .map_err(|e| translate_persistence_error(e, operation))?;
        Ok(complaint)
    }

    /// Lists complaints for an administrator.
    ///
    /// # Errors
    ///
    /// Returns `AuthenticationFailed` or `Unauthorized` for non-admins,
    /// `ValidationFailed` for malformed filters or paging.
    pub async fn list(
        &self,
        caller: Option<&Caller>,
        query: &ListComplaintsQuery,
    ) -> Result<ComplaintListing, ApiError> {
        let caller: &Caller = AuthorizationService::authorize(caller, Role::Admin, "list")?;
        let (filter, page) = parse_list_query(query)?;
        let operation: &str = "fetch complaints";

        debug!(caller = %caller.id, ?filter, page = page.page(), "Listing complaints");

        let persistence: Arc<Mutex<Persistence>> = self.persistence(operation).await?;
        let listing: ComplaintPage = persistence
            .lock()
            .await
            .list_complaints(&filter, page)
            .map_err(|e| translate_persistence_error(e, operation))?;

        Ok(ComplaintListing {
            pagination: Pagination::new(page, listing.total),
            items: listing.items,
        })
    }

    /// Applies a partial update for an administrator.
    ///
    /// The current status is read before the update is written, as two
    /// separate store calls. A status-change notification goes out only
    /// when the body carried a status different from the one read.
    ///
    /// # Errors
    ///
    /// Returns `AuthenticationFailed` or `Unauthorized` for non-admins,
    /// `ResourceNotFound` for unknown identifiers, `ValidationFailed` for
    /// invalid bodies.
    pub async fn update(
        &self,
        caller: Option<&Caller>,
        raw_id: &str,
        body: &Value,
    ) -> Result<Updated, ApiError> {
        let caller: &Caller = AuthorizationService::authorize(caller, Role::Admin, "update")?;
        let id: ComplaintId = parse_id(raw_id)?;
        let operation: &str = "update complaint";

        let persistence: Arc<Mutex<Persistence>> = self.persistence(operation).await?;
        let current: Complaint = persistence
            .lock()
            .await
            .get_complaint(id)
            .map_err(|e| translate_persistence_error(e, operation))?;

        let patch: ComplaintPatch = match body {
            Value::Object(fields) => ComplaintPatch::from_json_object(fields)?,
            _ => {
                return Err(ApiError::from(ValidationErrors::single(
                    "body",
                    "Request body must be a JSON object",
                )));
            }
        };

        let updated: Complaint = persistence
            .lock()
            .await
            .update_complaint(id, &patch, OffsetDateTime::now_utc())
            .map_err(|e| translate_persistence_error(e, operation))?;

        info!(
            complaint_id = %id,
            caller = %caller.id,
            status = %updated.status,
            "Complaint updated"
        );

        let notification: Option<JoinHandle<NotifyOutcome>> =
            if patch.touches_status() && updated.status != current.status {
                Some(self.spawn_status_change(&updated))
            } else {
                None
            };

        Ok(Updated {
            complaint: updated,
            notification,
        })
    }

    /// Permanently deletes a complaint for an administrator.
    ///
    /// # Errors
    ///
    /// Returns `AuthenticationFailed` or `Unauthorized` for non-admins,
    /// `ResourceNotFound` for unknown identifiers.
    pub async fn delete(&self, caller: Option<&Caller>, raw_id: &str) -> Result<(), ApiError> {
        let caller: &Caller = AuthorizationService::authorize(caller, Role::Admin, "delete")?;
        let id: ComplaintId = parse_id(raw_id)?;
        let operation: &str = "delete complaint";

        let persistence: Arc<Mutex<Persistence>> = self.persistence(operation).await?;
        persistence
            .lock()
            .await
            .delete_complaint(id)
            .map_err(|e| translate_persistence_error(e, operation))?;

        info!(complaint_id = %id, caller = %caller.id, "Complaint deleted");
        Ok(())
    }

    /// Opens the store if needed and checks that it answers.
    pub async fn health(&self) -> HealthResponse {
        let result: Result<(), PersistenceError> = match self.store.handle().await {
            Ok(persistence) => {
                let mut guard = persistence.lock().await;
                guard.ping()
            }
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => HealthResponse {
                ok: true,
                error: None,
            },
            Err(e) => HealthResponse {
                ok: false,
                error: Some(e.to_string()),
            },
        }
    }

    fn spawn_new_complaint(&self, complaint: &Complaint) -> JoinHandle<NotifyOutcome> {
        let notifier: Notifier = self.notifier.clone();
        let complaint: Complaint = complaint.clone();
        tokio::spawn(async move { notifier.notify_new_complaint(&complaint).await })
    }

    fn spawn_status_change(&self, complaint: &Complaint) -> JoinHandle<NotifyOutcome> {
        let notifier: Notifier = self.notifier.clone();
        let complaint: Complaint = complaint.clone();
        tokio::spawn(async move { notifier.notify_status_change(&complaint).await })
    }
}

/// Parses a path identifier. Anything unparseable is reported as missing.
fn parse_id(raw: &str) -> Result<ComplaintId, ApiError> {
    raw.parse::<ComplaintId>().map_err(|_| ApiError::complaint_not_found())
}

fn parse_list_query(
    query: &ListComplaintsQuery,
) -> Result<(ComplaintFilter, PageRequest), ApiError> {
    let filter: Result<ComplaintFilter, ValidationErrors> = ComplaintFilter::from_params(
        query.status.as_deref(),
        query.priority.as_deref(),
        query.category.as_deref(),
    );
    let page: Result<PageRequest, ValidationErrors> =
        PageRequest::from_params(query.page.as_deref(), query.limit.as_deref());

    match (filter, page) {
        (Ok(filter), Ok(page)) => Ok((filter, page)),
        (filter, page) => {
            let details: Vec<String> = [filter.err(), page.err()]
                .into_iter()
                .flatten()
                .flat_map(|errors| errors.messages())
                .collect();
            Err(ApiError::ValidationFailed { details })
        }
    }
}
