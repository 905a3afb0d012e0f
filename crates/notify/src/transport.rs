// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::debug;

use crate::config::MailConfig;
use crate::error::NotifyError;
use crate::message::OutgoingMail;

/// Something that can deliver an addressed message.
///
/// Returns the message identifier on success.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, mail: &OutgoingMail) -> Result<String, NotifyError>;
}

/// SMTP delivery through an authenticated relay.
pub struct SmtpMailTransport {
    inner: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailTransport {
    /// Builds a relay transport.
    ///
    /// Port 465 uses implicit TLS; any other port upgrades with STARTTLS.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS parameters for `config.host` cannot be
    /// built.
    pub fn new(config: &MailConfig) -> Result<Self, NotifyError> {
        let builder = if config.uses_implicit_tls() {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
        };

        let inner: AsyncSmtpTransport<Tokio1Executor> = builder
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self { inner })
    }
}

#[async_trait]
impl MailTransport for SmtpMailTransport {
    async fn send(&self, mail: &OutgoingMail) -> Result<String, NotifyError> {
        let message: Message = Message::builder()
            .from(mail.from.parse::<Mailbox>()?)
            .to(mail.to.parse::<Mailbox>()?)
            .subject(mail.subject.clone())
            .message_id(None)
            .header(ContentType::TEXT_HTML)
            .body(mail.html_body.clone())?;

        let message_id: String = message
            .headers()
            .get_raw("Message-ID")
            .unwrap_or_default()
            .to_string();

        let response = self.inner.send(message).await?;
        debug!(code = %response.code(), "SMTP relay accepted message");

        Ok(message_id)
    }
}
