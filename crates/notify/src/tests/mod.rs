// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod notifier_tests;

use complaint_desk_domain::{Category, Complaint, ComplaintId, Priority, Status};
use time::macros::datetime;

pub fn create_test_complaint() -> Complaint {
    Complaint {
        id: ComplaintId::new(1),
        title: String::from("Broken heater"),
        description: String::from("No heat since Monday"),
        category: Category::Technical,
        priority: Priority::High,
        status: Status::Pending,
        date_submitted: datetime!(2026-03-02 08:15:00 UTC),
        email: Some(String::from("a@b.com")),
        customer_name: None,
        submitting_user_id: Some(String::from("user-1")),
        updated_at: datetime!(2026-03-04 10:00:00 UTC),
    }
}
