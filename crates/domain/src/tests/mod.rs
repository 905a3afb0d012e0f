// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod types;

use crate::{Category, Complaint, ComplaintDraft, ComplaintId, Priority, Status};
use time::OffsetDateTime;
use time::macros::datetime;

pub fn create_test_draft() -> ComplaintDraft {
    ComplaintDraft {
        title: Some(String::from("Broken heater")),
        description: Some(String::from("Room 12 heater does not turn on")),
        category: Some(String::from("Service")),
        priority: Some(String::from("High")),
        email: None,
        customer_name: None,
    }
}

pub fn create_test_complaint() -> Complaint {
    let submitted: OffsetDateTime = datetime!(2026-03-01 09:30:00 UTC);
    Complaint {
        id: ComplaintId::new(7),
        title: String::from("Broken heater"),
        description: String::from("Room 12 heater does not turn on"),
        category: Category::Service,
        priority: Priority::High,
        status: Status::Pending,
        date_submitted: submitted,
        email: Some(String::from("a@b.co")),
        customer_name: Some(String::from("Ann")),
        submitting_user_id: Some(String::from("user-1")),
        updated_at: submitted,
    }
}
