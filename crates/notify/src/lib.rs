// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Best-effort email notifications.
//!
//! Two events produce mail: a new complaint (to the administrator) and a
//! status change (to the customer). Sending never fails the caller; every
//! attempt ends in a [`NotifyOutcome`].

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod config;
mod error;
mod message;
mod notifier;
#[cfg(any(test, feature = "test-support"))]
mod recording;
mod transport;

#[cfg(test)]
mod tests;

pub use config::{IMPLICIT_TLS_PORT, MailConfig};
pub use error::NotifyError;
pub use message::{
    MailContent, OutgoingMail, escape_html, render_new_complaint, render_status_change,
};
pub use notifier::{Notifier, NotifyOutcome, SkipReason};
#[cfg(any(test, feature = "test-support"))]
pub use recording::RecordingTransport;
pub use transport::{MailTransport, SmtpMailTransport};
