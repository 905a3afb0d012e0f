// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// The area a complaint concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Service,
    Product,
    Billing,
    Technical,
    Other,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Self; 5] = [
        Self::Service,
        Self::Product,
        Self::Billing,
        Self::Technical,
        Self::Other,
    ];

    /// Returns the literal used for persistence and the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Service => "Service",
            Self::Product => "Product",
            Self::Billing => "Billing",
            Self::Technical => "Technical",
            Self::Other => "Other",
        }
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| DomainError::InvalidCategory(s.to_string()))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How urgently a complaint needs attention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Every priority, lowest first.
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    /// Returns the literal used for persistence and the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl FromStr for Priority {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| DomainError::InvalidPriority(s.to_string()))
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle state of a complaint.
///
/// Every complaint starts as `Pending`. Any status may be replaced by any
/// other through an update; there is no forbidden-transition table and the
/// system never changes a status on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Status {
    #[default]
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Resolved,
    Closed,
}

impl Status {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::InProgress,
        Self::Resolved,
        Self::Closed,
    ];

    /// Returns the literal used for persistence and the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Resolved => "Resolved",
            Self::Closed => "Closed",
        }
    }
}

impl FromStr for Status {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| DomainError::InvalidStatus(s.to_string()))
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Opaque identifier assigned to a complaint by the store.
///
/// Serialized as a string so clients never depend on its numeric form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ComplaintId(i64);

impl ComplaintId {
    /// Wraps a raw store key.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw store key.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl FromStr for ComplaintId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .ok()
            .filter(|v| *v > 0)
            .map(Self)
            .ok_or_else(|| DomainError::InvalidComplaintId(s.to_string()))
    }
}

impl TryFrom<String> for ComplaintId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ComplaintId> for String {
    fn from(id: ComplaintId) -> Self {
        id.0.to_string()
    }
}

impl std::fmt::Display for ComplaintId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted complaint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Complaint {
    /// Store-assigned identifier.
    pub id: ComplaintId,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub priority: Priority,
    pub status: Status,
    /// Server-observed submission time. Never changes after creation.
    #[serde(with = "time::serde::rfc3339")]
    pub date_submitted: OffsetDateTime,
    /// Customer address for status-change notifications.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    /// The authenticated caller that submitted the complaint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitting_user_id: Option<String>,
    /// Time of the last successful write.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Raw submission fields as supplied by a caller.
///
/// Every field is optional here so that missing values surface as
/// validation messages rather than decode failures. Fields the caller may
/// not set (status, submission date, identifiers) are not represented and
/// are ignored on decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComplaintDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub priority: Option<String>,
    pub email: Option<String>,
    pub customer_name: Option<String>,
}

/// A validated submission, ready to be persisted.
///
/// Produced only by `validate_new_complaint`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComplaint {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub priority: Priority,
    pub email: Option<String>,
    pub customer_name: Option<String>,
}

/// A partial update to an existing complaint.
///
/// Enumerated fields hold the raw caller text; they are checked when the
/// patch is merged. For clearable fields the outer `Option` says whether
/// the field was supplied and the inner one whether it is being cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComplaintPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub email: Option<Option<String>>,
    pub customer_name: Option<Option<String>>,
}

impl ComplaintPatch {
    /// Returns true if the patch carries a status value.
    #[must_use]
    pub const fn touches_status(&self) -> bool {
        self.status.is_some()
    }

    /// Returns true if the patch supplies no fields at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.priority.is_none()
            && self.status.is_none()
            && self.email.is_none()
            && self.customer_name.is_none()
    }
}
