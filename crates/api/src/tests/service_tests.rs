// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use complaint_desk_domain::{ComplaintDraft, Status};
use complaint_desk_notify::{NotifyOutcome, OutgoingMail, SkipReason};
use serde_json::json;

use super::helpers::{create_test_admin, create_test_draft, create_test_service, create_test_user};
use crate::{ApiError, Caller, ComplaintListing, ListComplaintsQuery, Submitted, Updated};

#[tokio::test]
async fn test_submit_requires_caller() {
    let (service, transport) = create_test_service();

    let err: ApiError = service
        .submit(None, &create_test_draft())
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::AuthenticationFailed { .. }));
    assert!(transport.attempts().await.is_empty());
}

#[tokio::test]
async fn test_submit_stores_pending_and_notifies_admin() {
    let (service, transport) = create_test_service();
    let user: Caller = create_test_user();

    let submitted: Submitted = service
        .submit(Some(&user), &create_test_draft())
        .await
        .unwrap();

    assert_eq!(submitted.complaint.status, Status::Pending);
    assert_eq!(submitted.complaint.submitting_user_id.as_deref(), Some("user-1"));

    let outcome: NotifyOutcome = submitted.notification.await.unwrap();
    assert!(matches!(outcome, NotifyOutcome::Sent { .. }));
    let attempts: Vec<OutgoingMail> = transport.attempts().await;
    assert_eq!(attempts[0].to, "admin@b.com");

    let fetched = service
        .get(&submitted.complaint.id.to_string())
        .await
        .unwrap();
    assert_eq!(fetched, submitted.complaint);
}

#[tokio::test]
async fn test_submit_invalid_reports_details() {
    let (service, transport) = create_test_service();
    let user: Caller = create_test_user();
    let draft: ComplaintDraft = ComplaintDraft {
        description: Some(String::from("only a description")),
        ..ComplaintDraft::default()
    };

    let err: ApiError = service.submit(Some(&user), &draft).await.unwrap_err();

    assert_eq!(
        err,
        ApiError::ValidationFailed {
            details: vec![
                String::from("Please provide a title for the complaint"),
                String::from("Please select a category"),
                String::from("Please select a priority level"),
            ],
        }
    );
    assert!(transport.attempts().await.is_empty());
}

#[tokio::test]
async fn test_get_unknown_or_malformed_id_is_not_found() {
    let (service, _transport) = create_test_service();

    assert_eq!(
        service.get("12345").await.unwrap_err(),
        ApiError::complaint_not_found()
    );
    assert_eq!(
        service.get("not-an-id").await.unwrap_err(),
        ApiError::complaint_not_found()
    );
}

#[tokio::test]
async fn test_list_requires_admin() {
    let (service, _transport) = create_test_service();
    let user: Caller = create_test_user();
    let query: ListComplaintsQuery = ListComplaintsQuery::default();

    assert!(matches!(
        service.list(None, &query).await.unwrap_err(),
        ApiError::AuthenticationFailed { .. }
    ));
    assert!(matches!(
        service.list(Some(&user), &query).await.unwrap_err(),
        ApiError::Unauthorized { .. }
    ));
}

#[tokio::test]
async fn test_list_rejects_bad_parameters() {
    let (service, _transport) = create_test_service();
    let admin: Caller = create_test_admin();
    let query: ListComplaintsQuery = ListComplaintsQuery {
        status: Some(String::from("Open")),
        limit: Some(String::from("0")),
        ..ListComplaintsQuery::default()
    };

    let err: ApiError = service.list(Some(&admin), &query).await.unwrap_err();
    assert_eq!(
        err,
        ApiError::ValidationFailed {
            details: vec![
                String::from("Invalid status filter: 'Open'"),
                String::from("Limit must be a positive integer"),
            ],
        }
    );
}

#[tokio::test]
async fn test_list_returns_pagination() {
    let (service, _transport) = create_test_service();
    let user: Caller = create_test_user();
    let admin: Caller = create_test_admin();
    for _ in 0..3 {
        service
            .submit(Some(&user), &create_test_draft())
            .await
            .unwrap();
    }

    let query: ListComplaintsQuery = ListComplaintsQuery {
        status: Some(String::from("all")),
        limit: Some(String::from("2")),
        ..ListComplaintsQuery::default()
    };
    let listing: ComplaintListing = service.list(Some(&admin), &query).await.unwrap();

    assert_eq!(listing.items.len(), 2);
    assert_eq!(listing.pagination.page, 1);
    assert_eq!(listing.pagination.limit, 2);
    assert_eq!(listing.pagination.total, 3);
    assert_eq!(listing.pagination.pages, 2);
}

#[tokio::test]
async fn test_status_change_notifies_customer() {
    let (service, transport) = create_test_service();
    let user: Caller = create_test_user();
    let admin: Caller = create_test_admin();
    let submitted: Submitted = service
        .submit(Some(&user), &create_test_draft())
        .await
        .unwrap();
    submitted.notification.await.unwrap();
    let id: String = submitted.complaint.id.to_string();

    let updated: Updated = service
        .update(Some(&admin), &id, &json!({ "status": "Resolved" }))
        .await
        .unwrap();

    assert_eq!(updated.complaint.status, Status::Resolved);
    let outcome: NotifyOutcome = updated.notification.unwrap().await.unwrap();
    assert!(outcome.is_success());

    let attempts: Vec<OutgoingMail> = transport.attempts().await;
    assert_eq!(attempts.len(), 2);
    assert_eq!(attempts[1].to, "a@b.com");
    assert_eq!(
        service.get(&id).await.unwrap().status,
        Status::Resolved
    );
}

#[tokio::test]
async fn test_update_without_status_change_does_not_notify() {
    let (service, _transport) = create_test_service();
    let user: Caller = create_test_user();
    let admin: Caller = create_test_admin();
    let submitted: Submitted = service
        .submit(Some(&user), &create_test_draft())
        .await
        .unwrap();
    let id: String = submitted.complaint.id.to_string();

    let renamed: Updated = service
        .update(Some(&admin), &id, &json!({ "title": "Heater still broken" }))
        .await
        .unwrap();
    assert!(renamed.notification.is_none());
    assert_eq!(renamed.complaint.title, "Heater still broken");

    let same_status: Updated = service
        .update(Some(&admin), &id, &json!({ "status": "Pending" }))
        .await
        .unwrap();
    assert!(same_status.notification.is_none());
}

#[tokio::test]
async fn test_status_change_without_email_is_skipped() {
    let (service, _transport) = create_test_service();
    let user: Caller = create_test_user();
    let admin: Caller = create_test_admin();
    let mut draft: ComplaintDraft = create_test_draft();
    draft.email = None;
    let submitted: Submitted = service.submit(Some(&user), &draft).await.unwrap();

    let updated: Updated = service
        .update(
            Some(&admin),
            &submitted.complaint.id.to_string(),
            &json!({ "status": "In Progress" }),
        )
        .await
        .unwrap();

    assert_eq!(
        updated.notification.unwrap().await.unwrap(),
        NotifyOutcome::Skipped(SkipReason::NoCustomerEmail)
    );
}

#[tokio::test]
async fn test_update_rejects_immutable_and_unknown_fields() {
    let (service, _transport) = create_test_service();
    let user: Caller = create_test_user();
    let admin: Caller = create_test_admin();
    let submitted: Submitted = service
        .submit(Some(&user), &create_test_draft())
        .await
        .unwrap();
    let id: String = submitted.complaint.id.to_string();

    let err: ApiError = service
        .update(
            Some(&admin),
            &id,
            &json!({ "dateSubmitted": "2020-01-01T00:00:00Z", "colour": "red" }),
        )
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ApiError::ValidationFailed {
            details: vec![
                String::from("Unknown field 'colour'"),
                String::from("dateSubmitted cannot be modified"),
            ],
        }
    );
    assert_eq!(service.get(&id).await.unwrap(), submitted.complaint);
}

#[tokio::test]
async fn test_update_by_user_leaves_record_unchanged() {
    let (service, _transport) = create_test_service();
    let user: Caller = create_test_user();
    let submitted: Submitted = service
        .submit(Some(&user), &create_test_draft())
        .await
        .unwrap();
    let id: String = submitted.complaint.id.to_string();

    let err: ApiError = service
        .update(Some(&user), &id, &json!({ "status": "Closed" }))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Unauthorized { .. }));
    assert_eq!(service.get(&id).await.unwrap().status, Status::Pending);
}

#[tokio::test]
async fn test_update_unknown_id_is_not_found() {
    let (service, _transport) = create_test_service();
    let admin: Caller = create_test_admin();

    let err: ApiError = service
        .update(Some(&admin), "99", &json!({ "status": "Closed" }))
        .await
        .unwrap_err();
    assert_eq!(err, ApiError::complaint_not_found());
}

#[tokio::test]
async fn test_delete_then_delete_again() {
    let (service, _transport) = create_test_service();
    let user: Caller = create_test_user();
    let admin: Caller = create_test_admin();
    let submitted: Submitted = service
        .submit(Some(&user), &create_test_draft())
        .await
        .unwrap();
    let id: String = submitted.complaint.id.to_string();

    assert!(matches!(
        service.delete(Some(&user), &id).await.unwrap_err(),
        ApiError::Unauthorized { .. }
    ));

    service.delete(Some(&admin), &id).await.unwrap();
    assert_eq!(
        service.delete(Some(&admin), &id).await.unwrap_err(),
        ApiError::complaint_not_found()
    );
    assert_eq!(
        service.get(&id).await.unwrap_err(),
        ApiError::complaint_not_found()
    );
}

#[tokio::test]
async fn test_health_reports_ok() {
    let (service, _transport) = create_test_service();
    let health = service.health().await;
    assert!(health.ok);
    assert!(health.error.is_none());
}
