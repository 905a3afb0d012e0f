// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::create_test_complaint;
use crate::{Category, Complaint, ComplaintDraft, ComplaintId, ComplaintPatch, Priority, Status};
use serde_json::{Value, json};

#[test]
fn test_enumerations_parse_exact_literals() {
    for category in Category::ALL {
        assert_eq!(category.as_str().parse::<Category>(), Ok(category));
    }
    for priority in Priority::ALL {
        assert_eq!(priority.as_str().parse::<Priority>(), Ok(priority));
    }
    for status in Status::ALL {
        assert_eq!(status.as_str().parse::<Status>(), Ok(status));
    }
}

#[test]
fn test_enumerations_are_case_sensitive() {
    assert!("service".parse::<Category>().is_err());
    assert!("HIGH".parse::<Priority>().is_err());
    assert!("in progress".parse::<Status>().is_err());
    assert!("InProgress".parse::<Status>().is_err());
}

#[test]
fn test_default_status_is_pending() {
    assert_eq!(Status::default(), Status::Pending);
}

#[test]
fn test_complaint_id_parsing() {
    assert_eq!("42".parse::<ComplaintId>(), Ok(ComplaintId::new(42)));
    assert_eq!(" 42 ".parse::<ComplaintId>(), Ok(ComplaintId::new(42)));
    assert!("0".parse::<ComplaintId>().is_err());
    assert!("-3".parse::<ComplaintId>().is_err());
    assert!("abc".parse::<ComplaintId>().is_err());
    assert!("".parse::<ComplaintId>().is_err());
}

#[test]
fn test_complaint_serializes_camel_case() {
    let complaint: Complaint = create_test_complaint();
    let value: Value = serde_json::to_value(&complaint).unwrap();

    assert_eq!(value["id"], json!("7"));
    assert_eq!(value["status"], json!("Pending"));
    assert_eq!(value["dateSubmitted"], json!("2026-03-01T09:30:00Z"));
    assert_eq!(value["customerName"], json!("Ann"));
    assert_eq!(value["submittingUserId"], json!("user-1"));
    assert!(value.get("date_submitted").is_none());
}

#[test]
fn test_complaint_omits_absent_optionals() {
    let mut complaint: Complaint = create_test_complaint();
    complaint.email = None;
    complaint.customer_name = None;
    complaint.status = Status::InProgress;

    let value: Value = serde_json::to_value(&complaint).unwrap();
    assert!(value.get("email").is_none());
    assert!(value.get("customerName").is_none());
    assert_eq!(value["status"], json!("In Progress"));
}

#[test]
fn test_draft_ignores_server_controlled_fields() {
    let draft: ComplaintDraft = serde_json::from_value(json!({
        "title": "T",
        "status": "Closed",
        "dateSubmitted": "2020-01-01T00:00:00Z",
        "customerName": "Ann"
    }))
    .unwrap();

    assert_eq!(draft.title.as_deref(), Some("T"));
    assert_eq!(draft.customer_name.as_deref(), Some("Ann"));
    assert!(draft.description.is_none());
}

#[test]
fn test_patch_status_detection() {
    let mut patch: ComplaintPatch = ComplaintPatch::default();
    assert!(patch.is_empty());
    assert!(!patch.touches_status());

    patch.status = Some(String::from("Resolved"));
    assert!(!patch.is_empty());
    assert!(patch.touches_status());
}
