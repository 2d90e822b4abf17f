// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Outbound delivery through the Twilio messages API.

use std::time::Duration;

use four_to_score_api::{DeliveryError, Messenger};
use tracing::{debug, info};

use crate::config::TwilioConfig;

const TWILIO_API_BASE: &str = "https://api.twilio.com/2010-04-01";
const REQUEST_TIMEOUT_SECS: u64 = 15;

/// Sends messages with the Twilio REST API.
#[derive(Debug, Clone)]
pub struct TwilioMessenger {
    http_client: reqwest::Client,
    account_sid: String,
    auth_token: String,
    from: String,
}

impl TwilioMessenger {
    /// Creates a client for the given account.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(account_sid: &str, auth_token: &str, from: &str) -> Result<Self, reqwest::Error> {
        let http_client: reqwest::Client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http_client,
            account_sid: account_sid.to_string(),
            auth_token: auth_token.to_string(),
            from: from.to_string(),
        })
    }

    fn messages_url(&self) -> String {
        format!(
            "{TWILIO_API_BASE}/Accounts/{}/Messages.json",
            self.account_sid
        )
    }
}

impl Messenger for TwilioMessenger {
    async fn send(&self, recipient: &str, text: &str) -> Result<(), DeliveryError> {
        debug!(recipient = %recipient, "Posting message to Twilio");

        let response: reqwest::Response = self
            .http_client
            .post(self.messages_url())
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&[("From", self.from.as_str()), ("To", recipient), ("Body", text)])
            .send()
            .await
            .map_err(|err| DeliveryError::Transport(err.to_string()))?;

        let status: reqwest::StatusCode = response.status();
        if status.is_success() {
            return Ok(());
        }

        let reason: String = response.text().await.unwrap_or_default();
        Err(DeliveryError::Rejected {
            recipient: recipient.to_string(),
            reason: format!("{status}: {reason}"),
        })
    }
}

/// Where outbound messages go.
///
/// Without credentials the bot still runs; messages are only logged.
#[derive(Debug, Clone)]
pub enum Outbox {
    /// Deliver through Twilio.
    Twilio(TwilioMessenger),
    /// Log and drop.
    LogOnly,
}

impl Outbox {
    /// Picks the delivery channel for the configured credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &TwilioConfig) -> Result<Self, reqwest::Error> {
        match config.credentials() {
            Some((account_sid, auth_token, from)) => {
                info!(from = %from, "Outbound messages go through Twilio");
                Ok(Self::Twilio(TwilioMessenger::new(
                    account_sid,
                    auth_token,
                    from,
                )?))
            }
            None => {
                info!("Twilio credentials missing; outbound messages will only be logged");
                Ok(Self::LogOnly)
            }
        }
    }
}

impl Messenger for Outbox {
    async fn send(&self, recipient: &str, text: &str) -> Result<(), DeliveryError> {
        match self {
            Self::Twilio(twilio) => twilio.send(recipient, text).await,
            Self::LogOnly => {
                info!(recipient = %recipient, chars = text.chars().count(), "Outbound message (not sent)");
                Ok(())
            }
        }
    }
}
