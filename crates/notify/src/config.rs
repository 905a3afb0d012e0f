// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// The port on which SMTP uses implicit TLS.
pub const IMPLICIT_TLS_PORT: u16 = 465;

/// SMTP relay settings.
///
/// Mail is only considered configured when the host, port, username and
/// password are all present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Sender address. Defaults to the SMTP username.
    pub from: String,
}

impl MailConfig {
    /// Assembles a configuration from optional parts.
    ///
    /// Returns `None` unless host, port, username and password are all
    /// present and non-empty.
    #[must_use]
    pub fn from_parts(
        host: Option<String>,
        port: Option<u16>,
        username: Option<String>,
        password: Option<String>,
        from: Option<String>,
    ) -> Option<Self> {
        let host: String = host.filter(|v| !v.is_empty())?;
        let port: u16 = port?;
        let username: String = username.filter(|v| !v.is_empty())?;
        let password: String = password.filter(|v| !v.is_empty())?;
        let from: String = from
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| username.clone());

        Some(Self {
            host,
            port,
            username,
            password,
            from,
        })
    }

    /// Returns true if the connection uses TLS from the first byte rather
    /// than upgrading with STARTTLS.
    #[must_use]
    pub const fn uses_implicit_tls(&self) -> bool {
        self.port == IMPLICIT_TLS_PORT
    }
}
