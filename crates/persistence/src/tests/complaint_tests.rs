// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use complaint_desk_domain::{
    Category, Complaint, ComplaintDraft, ComplaintFilter, ComplaintId, ComplaintPatch,
    PageRequest, Priority, Status,
};
use time::Duration;

use super::{base_time, create_test_draft, create_test_persistence};
use crate::{ComplaintPage, Persistence, PersistenceError};

#[test]
fn test_create_assigns_server_fields() {
    let mut persistence: Persistence = create_test_persistence();

    let created: Complaint = persistence
        .create_complaint(&create_test_draft("Broken heater"), Some("user-1"), base_time())
        .unwrap();

    assert_eq!(created.status, Status::Pending);
    assert_eq!(created.date_submitted, base_time());
    assert_eq!(created.updated_at, base_time());
    assert_eq!(created.category, Category::Technical);
    assert_eq!(created.priority, Priority::High);
    assert_eq!(created.email.as_deref(), Some("a@b.com"));
    assert_eq!(created.submitting_user_id.as_deref(), Some("user-1"));
}

#[test]
fn test_create_then_get_round_trips() {
    let mut persistence: Persistence = create_test_persistence();

    let created: Complaint = persistence
        .create_complaint(&create_test_draft("Broken heater"), None, base_time())
        .unwrap();
    let fetched: Complaint = persistence.get_complaint(created.id).unwrap();

    assert_eq!(fetched, created);
    assert!(fetched.submitting_user_id.is_none());
}

#[test]
fn test_identifiers_are_unique() {
    let mut persistence: Persistence = create_test_persistence();

    let first: Complaint = persistence
        .create_complaint(&create_test_draft("one"), None, base_time())
        .unwrap();
    let second: Complaint = persistence
        .create_complaint(&create_test_draft("two"), None, base_time())
        .unwrap();

    assert_ne!(first.id, second.id);
}

#[test]
fn test_identifiers_are_not_reused_after_delete() {
    let mut persistence: Persistence = create_test_persistence();

    let first: Complaint = persistence
        .create_complaint(&create_test_draft("one"), None, base_time())
        .unwrap();
    persistence.delete_complaint(first.id).unwrap();
    let second: Complaint = persistence
        .create_complaint(&create_test_draft("two"), None, base_time())
        .unwrap();

    assert!(second.id > first.id);
}

#[test]
fn test_invalid_submission_persists_nothing() {
    let mut persistence: Persistence = create_test_persistence();
    let draft: ComplaintDraft = ComplaintDraft {
        title: Some(String::from("No description")),
        ..ComplaintDraft::default()
    };

    let err: PersistenceError = persistence
        .create_complaint(&draft, None, base_time())
        .unwrap_err();

    let PersistenceError::Validation(errors) = err else {
        panic!("expected validation failure, got {err}");
    };
    assert_eq!(
        errors.messages(),
        vec![
            "Please provide a description for the complaint",
            "Please select a category",
            "Please select a priority level",
        ]
    );

    let page: ComplaintPage = persistence
        .list_complaints(&ComplaintFilter::default(), PageRequest::default())
        .unwrap();
    assert_eq!(page.total, 0);
}

#[test]
fn test_get_missing_complaint_is_not_found() {
    let mut persistence: Persistence = create_test_persistence();

    let err: PersistenceError = persistence
        .get_complaint(ComplaintId::new(999))
        .unwrap_err();
    assert_eq!(err, PersistenceError::ComplaintNotFound(ComplaintId::new(999)));
}

#[test]
fn test_update_merges_and_stamps_time() {
    let mut persistence: Persistence = create_test_persistence();
    let created: Complaint = persistence
        .create_complaint(&create_test_draft("Broken heater"), Some("user-1"), base_time())
        .unwrap();

    let later = base_time() + Duration::hours(2);
    let patch: ComplaintPatch = ComplaintPatch {
        status: Some(String::from("Resolved")),
        customer_name: Some(Some(String::from("Ann"))),
        ..ComplaintPatch::default()
    };
    let updated: Complaint = persistence
        .update_complaint(created.id, &patch, later)
        .unwrap();

    assert_eq!(updated.status, Status::Resolved);
    assert_eq!(updated.customer_name.as_deref(), Some("Ann"));
    assert_eq!(updated.title, created.title);
    assert_eq!(updated.date_submitted, created.date_submitted);
    assert_eq!(updated.submitting_user_id, created.submitting_user_id);
    assert_eq!(updated.updated_at, later);

    assert_eq!(persistence.get_complaint(created.id).unwrap(), updated);
}

#[test]
fn test_update_clears_email() {
    let mut persistence: Persistence = create_test_persistence();
    let created: Complaint = persistence
        .create_complaint(&create_test_draft("Broken heater"), None, base_time())
        .unwrap();

    let patch: ComplaintPatch = ComplaintPatch {
        email: Some(None),
        ..ComplaintPatch::default()
    };
    let updated: Complaint = persistence
        .update_complaint(created.id, &patch, base_time())
        .unwrap();

    assert!(updated.email.is_none());
    assert!(persistence.get_complaint(created.id).unwrap().email.is_none());
}

#[test]
fn test_invalid_update_leaves_record_unchanged() {
    let mut persistence: Persistence = create_test_persistence();
    let created: Complaint = persistence
        .create_complaint(&create_test_draft("Broken heater"), None, base_time())
        .unwrap();

    let patch: ComplaintPatch = ComplaintPatch {
        status: Some(String::from("Done")),
        title: Some(String::from("Renamed")),
        ..ComplaintPatch::default()
    };
    let err: PersistenceError = persistence
        .update_complaint(created.id, &patch, base_time() + Duration::hours(1))
        .unwrap_err();

    assert!(matches!(err, PersistenceError::Validation(_)));
    assert_eq!(persistence.get_complaint(created.id).unwrap(), created);
}

#[test]
fn test_update_missing_complaint_is_not_found() {
    let mut persistence: Persistence = create_test_persistence();
    let patch: ComplaintPatch = ComplaintPatch {
        status: Some(String::from("Done")),
        ..ComplaintPatch::default()
    };

    let err: PersistenceError = persistence
        .update_complaint(ComplaintId::new(5), &patch, base_time())
        .unwrap_err();
    assert_eq!(err, PersistenceError::ComplaintNotFound(ComplaintId::new(5)));
}

#[test]
fn test_delete_is_permanent() {
    let mut persistence: Persistence = create_test_persistence();
    let created: Complaint = persistence
        .create_complaint(&create_test_draft("Broken heater"), None, base_time())
        .unwrap();

    persistence.delete_complaint(created.id).unwrap();

    assert_eq!(
        persistence.get_complaint(created.id).unwrap_err(),
        PersistenceError::ComplaintNotFound(created.id)
    );
    assert_eq!(
        persistence.delete_complaint(created.id).unwrap_err(),
        PersistenceError::ComplaintNotFound(created.id)
    );
}
