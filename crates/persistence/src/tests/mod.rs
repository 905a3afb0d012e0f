// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod complaint_tests;

use complaint_desk_domain::{Complaint, ComplaintDraft};
use time::{Duration, OffsetDateTime};
use time::macros::datetime;

use crate::Persistence;

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn create_test_draft(title: &str) -> ComplaintDraft {
    ComplaintDraft {
        title: Some(String::from(title)),
        description: Some(String::from("No heat since Monday")),
        category: Some(String::from("Technical")),
        priority: Some(String::from("High")),
        email: Some(String::from("a@b.com")),
        customer_name: None,
    }
}

/// A fixed submission time for deterministic tests.
pub const fn base_time() -> OffsetDateTime {
    datetime!(2026-02-01 12:00:00 UTC)
}

/// Stores `count` complaints titled `#1..#count`, each one minute after
/// the previous.
pub fn seed_complaints(persistence: &mut Persistence, count: i64) -> Vec<Complaint> {
    (1..=count)
        .map(|n| {
            persistence
                .create_complaint(
                    &create_test_draft(&format!("#{n}")),
                    Some("user-1"),
                    base_time() + Duration::minutes(n),
                )
                .expect("Failed to seed complaint")
        })
        .collect()
}
