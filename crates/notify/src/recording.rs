// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-memory transport for tests.

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;

use crate::error::NotifyError;
use crate::message::OutgoingMail;
use crate::transport::MailTransport;

/// Records every message it is asked to send.
///
/// A failing transport records the attempt and then rejects it.
#[derive(Debug, Clone, Default)]
pub struct RecordingTransport {
    attempts: Arc<Mutex<Vec<OutgoingMail>>>,
    counter: Arc<AtomicU64>,
    failing: bool,
}

impl RecordingTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A transport that rejects every message.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// Every message attempted so far, in order.
    pub async fn attempts(&self) -> Vec<OutgoingMail> {
        self.attempts.lock().await.clone()
    }

    /// Polls until at least `count` attempts were recorded or `timeout`
    /// elapses, then returns what was recorded.
    pub async fn wait_for(&self, count: usize, timeout: Duration) -> Vec<OutgoingMail> {
        let deadline: tokio::time::Instant = tokio::time::Instant::now() + timeout;
        loop {
            let attempts: Vec<OutgoingMail> = self.attempts().await;
            if attempts.len() >= count || tokio::time::Instant::now() >= deadline {
                return attempts;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }
}

#[async_trait]
impl MailTransport for RecordingTransport {
    async fn send(&self, mail: &OutgoingMail) -> Result<String, NotifyError> {
        self.attempts.lock().await.push(mail.clone());
        if self.failing {
            return Err(NotifyError::Rejected {
                reason: String::from("recording transport configured to fail"),
            });
        }
        let n: u64 = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("<recorded-{n}@complaint-desk.test>"))
    }
}
