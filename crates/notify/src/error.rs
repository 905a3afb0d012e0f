// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use thiserror::Error;

/// Failures while building or delivering a notification.
///
/// These never escape the notifier; they are folded into a failed
/// outcome and logged.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// A sender or recipient address could not be parsed.
    #[error("Invalid mail address: {0}")]
    InvalidAddress(#[from] lettre::address::AddressError),

    /// The message could not be assembled.
    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// The SMTP relay could not be reached or refused the message.
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// A non-SMTP transport refused the message.
    #[error("Transport rejected message: {reason}")]
    Rejected { reason: String },
}
