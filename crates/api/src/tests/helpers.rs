// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use complaint_desk_domain::ComplaintDraft;
use complaint_desk_notify::{Notifier, RecordingTransport};
use complaint_desk_persistence::Persistence;
use std::sync::Arc;

use crate::{Caller, ComplaintService, ComplaintStore, Role};

pub fn create_test_admin() -> Caller {
    Caller::new("admin-1", Role::Admin)
}

pub fn create_test_user() -> Caller {
    Caller::new("user-1", Role::User)
}

pub fn create_test_draft() -> ComplaintDraft {
    ComplaintDraft {
        title: Some(String::from("Broken heater")),
        description: Some(String::from("No heat since Monday")),
        category: Some(String::from("Technical")),
        priority: Some(String::from("High")),
        email: Some(String::from("a@b.com")),
        customer_name: None,
    }
}

/// A service over a fresh in-memory store and a recording transport.
pub fn create_test_service() -> (ComplaintService, RecordingTransport) {
    let transport: RecordingTransport = RecordingTransport::new();
    let notifier: Notifier = Notifier::with_transport(
        Arc::new(transport.clone()),
        "desk@b.com",
        Some(String::from("admin@b.com")),
    );
    let store: ComplaintStore =
        ComplaintStore::from_persistence(Persistence::new_in_memory().unwrap());
    (ComplaintService::new(store, notifier), transport)
}
