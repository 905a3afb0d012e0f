// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use complaint_desk_domain::{Complaint, Status};
use std::sync::Arc;

use super::create_test_complaint;
use crate::{Notifier, NotifyOutcome, OutgoingMail, RecordingTransport, SkipReason};

fn recording_notifier(transport: &RecordingTransport, admin: Option<&str>) -> Notifier {
    Notifier::with_transport(
        Arc::new(transport.clone()),
        "desk@b.com",
        admin.map(String::from),
    )
}

#[tokio::test]
async fn test_unconfigured_notifier_skips() {
    let notifier: Notifier = Notifier::disabled();
    let complaint: Complaint = create_test_complaint();

    assert_eq!(
        notifier.notify_new_complaint(&complaint).await,
        NotifyOutcome::Skipped(SkipReason::TransportNotConfigured)
    );
    assert_eq!(
        notifier.notify_status_change(&complaint).await,
        NotifyOutcome::Skipped(SkipReason::TransportNotConfigured)
    );
    assert!(!notifier.is_configured());
}

#[tokio::test]
async fn test_from_config_without_config_is_disabled() {
    let notifier: Notifier =
        Notifier::from_config(None, Some(String::from("admin@b.com"))).unwrap();
    assert!(!notifier.is_configured());
}

#[tokio::test]
async fn test_new_complaint_goes_to_admin() {
    let transport: RecordingTransport = RecordingTransport::new();
    let notifier: Notifier = recording_notifier(&transport, Some("admin@b.com"));

    let outcome: NotifyOutcome = notifier
        .notify_new_complaint(&create_test_complaint())
        .await;

    assert!(matches!(outcome, NotifyOutcome::Sent { .. }));
    let attempts: Vec<OutgoingMail> = transport.attempts().await;
    assert_eq!(attempts.len(), 1);
    assert_eq!(attempts[0].to, "admin@b.com");
    assert_eq!(attempts[0].from, "desk@b.com");
}

#[tokio::test]
async fn test_new_complaint_without_admin_is_skipped() {
    let transport: RecordingTransport = RecordingTransport::new();
    let notifier: Notifier = recording_notifier(&transport, None);

    assert_eq!(
        notifier.notify_new_complaint(&create_test_complaint()).await,
        NotifyOutcome::Skipped(SkipReason::NoAdminAddress)
    );
    assert!(transport.attempts().await.is_empty());
}

#[tokio::test]
async fn test_status_change_goes_to_customer() {
    let transport: RecordingTransport = RecordingTransport::new();
    let notifier: Notifier = recording_notifier(&transport, Some("admin@b.com"));
    let mut complaint: Complaint = create_test_complaint();
    complaint.status = Status::Resolved;

    let outcome: NotifyOutcome = notifier.notify_status_change(&complaint).await;

    assert!(outcome.is_success());
    let attempts: Vec<OutgoingMail> = transport.attempts().await;
    assert_eq!(attempts.len(), 1);
    assert_eq!(attempts[0].to, "a@b.com");
    assert!(attempts[0].html_body.contains("Great News!"));
}

#[tokio::test]
async fn test_status_change_without_email_is_noop() {
    let transport: RecordingTransport = RecordingTransport::new();
    let notifier: Notifier = recording_notifier(&transport, Some("admin@b.com"));
    let mut complaint: Complaint = create_test_complaint();
    complaint.email = None;

    assert_eq!(
        notifier.notify_status_change(&complaint).await,
        NotifyOutcome::Skipped(SkipReason::NoCustomerEmail)
    );
    assert!(transport.attempts().await.is_empty());

    assert_eq!(
        Notifier::disabled().notify_status_change(&complaint).await,
        NotifyOutcome::Skipped(SkipReason::NoCustomerEmail)
    );
}

#[tokio::test]
async fn test_transport_failure_becomes_outcome() {
    let transport: RecordingTransport = RecordingTransport::failing();
    let notifier: Notifier = recording_notifier(&transport, Some("admin@b.com"));

    let outcome: NotifyOutcome = notifier
        .notify_new_complaint(&create_test_complaint())
        .await;

    assert!(!outcome.is_success());
    let NotifyOutcome::Failed { error } = outcome else {
        panic!("expected failure");
    };
    assert!(error.contains("configured to fail"));
    assert_eq!(transport.attempts().await.len(), 1);
}
