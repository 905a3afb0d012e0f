// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use complaint_desk_domain::Complaint;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::MailConfig;
use crate::error::NotifyError;
use crate::message::{OutgoingMail, render_new_complaint, render_status_change};
use crate::transport::{MailTransport, SmtpMailTransport};

/// Why a notification was not attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No mail transport is configured.
    TransportNotConfigured,
    /// No administrator address is configured for new-complaint alerts.
    NoAdminAddress,
    /// The complaint carries no customer email.
    NoCustomerEmail,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TransportNotConfigured => write!(f, "mail transport not configured"),
            Self::NoAdminAddress => write!(f, "no admin address configured"),
            Self::NoCustomerEmail => write!(f, "no customer email provided"),
        }
    }
}

/// Result of a notification attempt.
///
/// Only `Failed` is a failure; skipping is a successful no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyOutcome {
    Sent { message_id: String },
    Skipped(SkipReason),
    Failed { error: String },
}

impl NotifyOutcome {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        !matches!(self, Self::Failed { .. })
    }
}

/// Best-effort sender for complaint notifications.
///
/// Cloning is cheap; clones share the transport.
#[derive(Clone)]
pub struct Notifier {
    transport: Option<Arc<dyn MailTransport>>,
    from: String,
    admin_email: Option<String>,
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("configured", &self.transport.is_some())
            .field("from", &self.from)
            .field("admin_email", &self.admin_email)
            .finish()
    }
}

impl Notifier {
    /// A notifier that skips every message.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            transport: None,
            from: String::new(),
            admin_email: None,
        }
    }

    /// Builds an SMTP-backed notifier, or a disabled one when `config` is
    /// `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the SMTP transport cannot be built.
    pub fn from_config(
        config: Option<&MailConfig>,
        admin_email: Option<String>,
    ) -> Result<Self, NotifyError> {
        let Some(config) = config else {
            info!("Mail transport not configured; notifications will be skipped");
            return Ok(Self {
                admin_email,
                ..Self::disabled()
            });
        };

        info!(
            host = %config.host,
            port = config.port,
            implicit_tls = config.uses_implicit_tls(),
            "Mail transport configured"
        );
        let transport: SmtpMailTransport = SmtpMailTransport::new(config)?;
        Ok(Self::with_transport(
            Arc::new(transport),
            &config.from,
            admin_email,
        ))
    }

    /// Builds a notifier over an arbitrary transport.
    #[must_use]
    pub fn with_transport(
        transport: Arc<dyn MailTransport>,
        from: &str,
        admin_email: Option<String>,
    ) -> Self {
        Self {
            transport: Some(transport),
            from: from.to_string(),
            admin_email: admin_email.filter(|v| !v.is_empty()),
        }
    }

    /// Returns true if a transport is configured.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.transport.is_some()
    }

    /// Alerts the administrator about a new complaint.
    pub async fn notify_new_complaint(&self, complaint: &Complaint) -> NotifyOutcome {
        let Some(transport) = &self.transport else {
            return skipped(complaint, SkipReason::TransportNotConfigured);
        };
        let Some(admin_email) = &self.admin_email else {
            return skipped(complaint, SkipReason::NoAdminAddress);
        };

        let mail: OutgoingMail =
            OutgoingMail::new(&self.from, admin_email, render_new_complaint(complaint));
        deliver(transport.as_ref(), complaint, &mail, "new complaint").await
    }

    /// Tells the customer that their complaint's status changed.
    pub async fn notify_status_change(&self, complaint: &Complaint) -> NotifyOutcome {
        let Some(email) = &complaint.email else {
            return skipped(complaint, SkipReason::NoCustomerEmail);
        };
        let Some(transport) = &self.transport else {
            return skipped(complaint, SkipReason::TransportNotConfigured);
        };

        let mail: OutgoingMail =
            OutgoingMail::new(&self.from, email, render_status_change(complaint));
        deliver(transport.as_ref(), complaint, &mail, "status change").await
    }
}

fn skipped(complaint: &Complaint, reason: SkipReason) -> NotifyOutcome {
    info!(complaint_id = %complaint.id, %reason, "Skipping notification");
    NotifyOutcome::Skipped(reason)
}

async fn deliver(
    transport: &dyn MailTransport,
    complaint: &Complaint,
    mail: &OutgoingMail,
    kind: &str,
) -> NotifyOutcome {
    match transport.send(mail).await {
        Ok(message_id) => {
            info!(
                complaint_id = %complaint.id,
                kind,
                message_id = %message_id,
                "Notification sent"
            );
            NotifyOutcome::Sent { message_id }
        }
        Err(e) => {
            warn!(
                complaint_id = %complaint.id,
                kind,
                error = %e,
                "Notification failed"
            );
            NotifyOutcome::Failed {
                error: e.to_string(),
            }
        }
    }
}
