// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response types for the API layer.
//!
//! Every response body carries `success`; failure bodies are produced by
//! the server's error mapping.

use complaint_desk_domain::{Complaint, Pagination};
use complaint_desk_notify::NotifyOutcome;
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;

/// Raw query parameters for listing complaints.
///
/// Values are kept as text so that malformed input is reported as a
/// validation failure rather than a decode error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListComplaintsQuery {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub category: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// One page of complaints with its pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplaintListing {
    pub items: Vec<Complaint>,
    pub pagination: Pagination,
}

/// A stored submission and its detached admin notification.
#[derive(Debug)]
pub struct Submitted {
    pub complaint: Complaint,
    /// Resolves when the notification attempt finishes. Dropping it leaves
    /// the attempt running.
    pub notification: JoinHandle<NotifyOutcome>,
}

/// An applied update and its detached status notification, if one was
/// warranted.
#[derive(Debug)]
pub struct Updated {
    pub complaint: Complaint,
    pub notification: Option<JoinHandle<NotifyOutcome>>,
}

/// Response for a single complaint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplaintResponse {
    pub success: bool,
    pub data: Complaint,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ComplaintResponse {
    #[must_use]
    pub const fn new(data: Complaint) -> Self {
        Self {
            success: true,
            data,
            message: None,
        }
    }

    #[must_use]
    pub fn with_message(data: Complaint, message: &str) -> Self {
        Self {
            success: true,
            data,
            message: Some(message.to_string()),
        }
    }
}

/// Response for a page of complaints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplaintListResponse {
    pub success: bool,
    pub data: Vec<Complaint>,
    pub pagination: Pagination,
}

impl From<ComplaintListing> for ComplaintListResponse {
    fn from(listing: ComplaintListing) -> Self {
        Self {
            success: true,
            data: listing.items,
            pagination: listing.pagination,
        }
    }
}

/// Acknowledgment without a payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    #[must_use]
    pub fn new(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
        }
    }
}

/// Store reachability report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
