// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the 4 to Score picks bot.
//!
//! This crate turns chat messages and HTTP triggers into calls on the core
//! status engine and the store, and turns the results back into text.
//! Nothing here knows about HTTP or a particular chat provider: outbound
//! text is returned as [`OutboundMessage`] values and delivered through a
//! [`Messenger`].

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

pub mod compose;
mod context;
mod error;
mod handlers;
mod messenger;
mod request_response;

#[cfg(test)]
mod tests;

pub use context::{GameContext, InboundMessage};
pub use error::{ApiError, translate_core_error, translate_domain_error};
pub use handlers::{
    ApiResult, compute_status_report, current_period_info, current_summary_messages, eliminate,
    handle_inbound_message, period_summary_messages, record_scoring_event, reinstate,
    reminder_messages, scorers, submit_picks,
};
pub use messenger::{
    DeliveryError, DeliveryFailure, DeliveryReport, Messenger, OutboundMessage,
    RecordingMessenger, deliver,
};
pub use request_response::{
    InboundReply, OverrideResponse, ParticipantStatusInfo, PeriodInfo, PickInfo,
    RecordScoringResponse, StatusReportResponse, SubmitPicksResponse,
};
