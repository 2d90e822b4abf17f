// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Outbound message delivery.
//!
//! The API layer never talks to a chat provider directly. It produces
//! [`OutboundMessage`] values and hands them to a [`Messenger`]. Delivery is
//! best effort: each message is tried once, failures are logged and
//! reported, and nothing is retried here.

use std::future::Future;
use std::sync::{Mutex, PoisonError};
use tracing::{info, warn};

/// A text message waiting to be sent.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct OutboundMessage {
    /// Recipient handle as the provider knows it.
    pub recipient: String,
    /// Message body.
    pub text: String,
}

impl OutboundMessage {
    /// Creates a new outbound message.
    #[must_use]
    pub fn new(recipient: &str, text: String) -> Self {
        Self {
            recipient: recipient.to_string(),
            text,
        }
    }
}

/// Errors returned by a [`Messenger`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeliveryError {
    /// The provider refused the message.
    #[error("provider rejected message to {recipient}: {reason}")]
    Rejected {
        /// The recipient handle.
        recipient: String,
        /// What the provider said.
        reason: String,
    },
    /// The provider could not be reached.
    #[error("provider unreachable: {0}")]
    Transport(String),
}

/// Sends a text message to a recipient.
pub trait Messenger: Send + Sync {
    /// Sends one message.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider does not accept the message.
    fn send(
        &self,
        recipient: &str,
        text: &str,
    ) -> impl Future<Output = Result<(), DeliveryError>> + Send;
}

/// What happened to a batch of outbound messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct DeliveryReport {
    /// Number of messages the provider accepted.
    pub sent: usize,
    /// Messages that failed, with the reason.
    pub failures: Vec<DeliveryFailure>,
}

impl DeliveryReport {
    /// Returns true if every message was accepted.
    #[must_use]
    pub fn all_sent(&self) -> bool {
        self.failures.is_empty()
    }
}

/// One failed delivery.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct DeliveryFailure {
    /// The recipient handle.
    pub recipient: String,
    /// Why delivery failed.
    pub reason: String,
}

/// Sends every message in order, continuing past failures.
pub async fn deliver<M: Messenger>(messenger: &M, messages: &[OutboundMessage]) -> DeliveryReport {
    let mut report: DeliveryReport = DeliveryReport::default();

    for message in messages {
        match messenger.send(&message.recipient, &message.text).await {
            Ok(()) => {
                report.sent += 1;
            }
            Err(err) => {
                warn!(recipient = %message.recipient, error = %err, "Message delivery failed");
                report.failures.push(DeliveryFailure {
                    recipient: message.recipient.clone(),
                    reason: err.to_string(),
                });
            }
        }
    }

    info!(
        sent = report.sent,
        failed = report.failures.len(),
        "Delivered outbound messages"
    );
    report
}

/// A messenger that keeps every message in memory.
///
/// Recipients listed with [`RecordingMessenger::failing_for`] are rejected.
#[derive(Debug, Default)]
pub struct RecordingMessenger {
    sent: Mutex<Vec<OutboundMessage>>,
    failing: Vec<String>,
}

impl RecordingMessenger {
    /// Creates a messenger that accepts everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a messenger that rejects the given recipients.
    #[must_use]
    pub fn failing_for(recipients: &[&str]) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failing: recipients.iter().map(ToString::to_string).collect(),
        }
    }

    /// Returns every accepted message, oldest first.
    #[must_use]
    pub fn sent(&self) -> Vec<OutboundMessage> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Messenger for RecordingMessenger {
    async fn send(&self, recipient: &str, text: &str) -> Result<(), DeliveryError> {
        if self.failing.iter().any(|failing| failing == recipient) {
            return Err(DeliveryError::Rejected {
                recipient: recipient.to_string(),
                reason: String::from("recipient blocked"),
            });
        }
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(OutboundMessage::new(recipient, text.to_string()));
        Ok(())
    }
}
