// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for inbound messages, admin operations and
//! read-only queries.
//!
//! Handlers are generic over the store so they run against `SQLite` in
//! production and [`four_to_score::MemoryStore`] in tests. Store failures
//! are logged here and surface as [`ApiError::StoreUnavailable`].

use chrono::{DateTime, Utc};
use four_to_score::{
    Command, GameStore, OverrideResult, ParticipantStatus, PeriodRecords, PeriodSummary,
    ScorerListing, ScoringResult, StatusReport, apply_override, apply_scoring,
    effective_submissions, load_period_records, period_summary, route_admin_text,
    scorer_listing,
};
use four_to_score_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use four_to_score_domain::{
    ActivePeriod, OverrideKind, PICKS_PER_SUBMISSION, Participant, ScoringEvent, Submission,
    canonical_player_name, parse_picks,
};
use tracing::{debug, error, info, warn};

use crate::compose;
use crate::context::{GameContext, InboundMessage};
use crate::error::{ApiError, translate_core_error, translate_domain_error};
use crate::messenger::OutboundMessage;
use crate::request_response::{
    InboundReply, OverrideResponse, PeriodInfo, RecordScoringResponse, SubmitPicksResponse,
};

/// The result of an API operation that includes both the response and the audit event.
///
/// Operations that change nothing (a repeated elimination) carry no audit
/// event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResult<T> {
    /// The API response.
    pub response: T,
    /// The audit event generated by this operation, if anything changed.
    pub audit_event: Option<AuditEvent>,
}

fn store_failure<E: Into<ApiError>>(err: E) -> ApiError {
    let err: ApiError = err.into();
    error!(error = %err, "Store operation failed");
    err
}

fn active_period(context: &GameContext, now: DateTime<Utc>) -> Result<ActivePeriod, ApiError> {
    context
        .schedule
        .current_period(now)
        .ok_or(ApiError::NoActivePeriod)
}

/// Resolves the current gameweek and checks that picks are still accepted.
fn open_period(context: &GameContext, now: DateTime<Utc>) -> Result<ActivePeriod, ApiError> {
    let active: ActivePeriod = active_period(context, now)?;
    if context.schedule.deadline_passed(active.gameweek, now) {
        return Err(ApiError::DeadlinePassed {
            gameweek: active.gameweek,
        });
    }
    Ok(active)
}

fn require_gameweek(context: &GameContext, gameweek: u32) -> Result<(), ApiError> {
    if context.schedule.deadline_for(gameweek).is_none() {
        return Err(ApiError::ResourceNotFound {
            resource_type: String::from("Gameweek"),
            message: format!("Gameweek {gameweek} is not in the schedule"),
        });
    }
    Ok(())
}

fn load_records<S>(store: &mut S, gameweek: u32) -> Result<PeriodRecords, ApiError>
where
    S: GameStore,
    S::Error: Into<ApiError>,
{
    load_period_records(store, gameweek).map_err(store_failure)
}

/// Handles one inbound chat message and always produces a reply.
///
/// Admin senders have their text routed as a command first; anything that is
/// not a command is treated as picks. Participants who send an admin command
/// are told it is admin-only, and `help` gets them the instructions.
///
/// Admin commands run whether or not the deadline has passed, so results
/// can be recorded while the gameweek is being played. Picks are rejected
/// once the deadline has passed.
///
/// # Arguments
///
/// * `store` - The store holding the game records
/// * `context` - Schedule, roster and admin configuration
/// * `message` - The message received
/// * `now` - When the message was received
///
/// # Returns
///
/// The text to send back to the sender plus any further messages to deliver.
pub fn handle_inbound_message<S>(
    store: &mut S,
    context: &GameContext,
    message: &InboundMessage,
    now: DateTime<Utc>,
) -> InboundReply
where
    S: GameStore,
    S::Error: Into<ApiError>,
{
    debug!(
        sender = %message.sender,
        is_admin = message.is_admin,
        "Handling inbound message"
    );

    match route_admin_text(&message.body) {
        Ok(Some(command)) if message.is_admin => {
            run_admin_command(store, context, message, command, now).unwrap_or_else(|err| {
                warn!(sender = %message.sender, error = %err, "Admin command failed");
                InboundReply::text(compose::error_reply(&err))
            })
        }
        Err(err) if message.is_admin => {
            InboundReply::text(compose::error_reply(&translate_core_error(err)))
        }
        Ok(Some(Command::Help)) => participant_help(context, now),
        Ok(Some(_)) | Err(_) => {
            info!(sender = %message.sender, "Rejected admin command from participant");
            InboundReply::text(compose::admin_only())
        }
        Ok(None) => handle_picks(store, context, message, now),
    }
}

fn participant_help(context: &GameContext, now: DateTime<Utc>) -> InboundReply {
    match active_period(context, now) {
        Ok(active) => InboundReply::text(compose::welcome(
            active.gameweek,
            &context.schedule.format_deadline(&active.deadline),
        )),
        Err(err) => InboundReply::text(compose::error_reply(&err)),
    }
}

fn handle_picks<S>(
    store: &mut S,
    context: &GameContext,
    message: &InboundMessage,
    now: DateTime<Utc>,
) -> InboundReply
where
    S: GameStore,
    S::Error: Into<ApiError>,
{
    let active: ActivePeriod = match open_period(context, now) {
        Ok(active) => active,
        Err(err) => {
            debug!(sender = %message.sender, error = %err, "Picks not accepted");
            return InboundReply::text(compose::error_reply(&err));
        }
    };

    let players: Vec<String> = parse_picks(&message.body, &context.corrections);
    if players.len() != PICKS_PER_SUBMISSION {
        debug!(
            sender = %message.sender,
            found = players.len(),
            "Rejected picks with wrong count"
        );
        return InboundReply::text(compose::wrong_pick_count(
            active.gameweek,
            &context.schedule.format_deadline(&active.deadline),
        ));
    }

    match submit_picks(store, context, &message.sender, players, message.cause(), now) {
        Ok(result) => InboundReply::text(result.response.message),
        Err(err) => {
            warn!(sender = %message.sender, error = %err, "Could not save picks");
            InboundReply::text(compose::error_reply(&err))
        }
    }
}

fn run_admin_command<S>(
    store: &mut S,
    context: &GameContext,
    message: &InboundMessage,
    command: Command,
    now: DateTime<Utc>,
) -> Result<InboundReply, ApiError>
where
    S: GameStore,
    S::Error: Into<ApiError>,
{
    info!(sender = %message.sender, ?command, "Running admin command");
    let actor: Actor = Actor::admin(&message.sender);

    match command {
        Command::RecordScore { player, scored } => {
            let result: ApiResult<RecordScoringResponse> = record_scoring_event(
                store,
                context,
                actor,
                &player,
                scored,
                message.cause(),
                now,
            )?;
            Ok(InboundReply::text(result.response.message))
        }
        Command::Eliminate { target } => {
            let result: ApiResult<OverrideResponse> =
                eliminate(store, context, actor, &target, message.cause(), now)?;
            Ok(InboundReply::text(result.response.message))
        }
        Command::Reinstate { target } => {
            let result: ApiResult<OverrideResponse> =
                reinstate(store, context, actor, &target, message.cause(), now)?;
            Ok(InboundReply::text(result.response.message))
        }
        Command::Help => Ok(InboundReply::text(compose::admin_help())),
        Command::ShowScorers => {
            let active: ActivePeriod = active_period(context, now)?;
            let listing: ScorerListing = scorers(store, context, active.gameweek)?;
            Ok(InboundReply::text(compose::scorer_listing(&listing)))
        }
        Command::ShowStatus => {
            let active: ActivePeriod = active_period(context, now)?;
            let report: StatusReport = compute_status_report(store, context, active.gameweek, now)?;
            Ok(InboundReply::text(compose::status_report(&report)))
        }
        Command::SendSummary => {
            let active: ActivePeriod = active_period(context, now)?;
            let outbound: Vec<OutboundMessage> =
                period_summary_messages(store, context, active.gameweek)?;
            Ok(InboundReply {
                text: compose::summary_requested(active.gameweek),
                outbound,
            })
        }
    }
}

/// Saves a participant's picks for the current gameweek.
///
/// # Arguments
///
/// * `store` - The store holding the game records
/// * `context` - Schedule, roster and admin configuration
/// * `sender` - The submitter's handle
/// * `players` - The parsed picks
/// * `cause` - The message that carried the picks
/// * `now` - When the picks were received
///
/// # Returns
///
/// * `Ok(ApiResult<SubmitPicksResponse>)` with the confirmation text
/// * `Err(ApiError)` if picks are closed, invalid or cannot be stored
///
/// # Errors
///
/// Returns an error if:
/// - There is no active gameweek or its deadline has passed
/// - `players` does not hold exactly four names
/// - The store fails
pub fn submit_picks<S>(
    store: &mut S,
    context: &GameContext,
    sender: &str,
    players: Vec<String>,
    cause: Cause,
    now: DateTime<Utc>,
) -> Result<ApiResult<SubmitPicksResponse>, ApiError>
where
    S: GameStore,
    S::Error: Into<ApiError>,
{
    let active: ActivePeriod = open_period(context, now)?;
    let participant: Participant = context
        .participant_for(sender)
        .map_err(translate_domain_error)?;
    let submission: Submission = Submission::new(&participant, active.gameweek, players, now)
        .map_err(translate_domain_error)?;

    let existing: Vec<Submission> = store
        .list_submissions(active.gameweek)
        .map_err(store_failure)?;
    let before: StateSnapshot = effective_submissions(&existing)
        .into_iter()
        .find(|previous| previous.submitter == submission.submitter)
        .map_or_else(StateSnapshot::absent, picks_snapshot);

    store
        .append_submission(&submission)
        .map_err(store_failure)?;

    let audit_event: AuditEvent = AuditEvent::new(
        active.gameweek,
        Actor::participant(participant.handle()),
        cause,
        Action::new(
            String::from("SubmitPicks"),
            Some(format!(
                "{} submitted picks for gameweek {}",
                participant.display_name(),
                active.gameweek
            )),
        ),
        before,
        picks_snapshot(&submission),
        now,
    );
    store
        .append_audit_event(&audit_event)
        .map_err(store_failure)?;

    info!(
        gameweek = active.gameweek,
        submitter = %participant.handle(),
        "Saved picks"
    );

    let deadline_formatted: String = context.schedule.format_deadline(&active.deadline);
    let message: String = compose::submission_confirmation(
        active.gameweek,
        participant.display_name(),
        &submission.players,
        &deadline_formatted,
    );

    Ok(ApiResult {
        response: SubmitPicksResponse {
            gameweek: active.gameweek,
            handle: participant.handle().to_string(),
            display_name: participant.display_name().to_string(),
            players: submission.players,
            deadline_formatted,
            message,
        },
        audit_event: Some(audit_event),
    })
}

fn picks_snapshot(submission: &Submission) -> StateSnapshot {
    StateSnapshot::new(format!("players={}", submission.players.join("|")))
}

/// Records whether a player scored in the current gameweek.
///
/// A later result for the same player replaces the earlier one.
///
/// # Arguments
///
/// * `store` - The store holding the game records
/// * `context` - Schedule, roster and admin configuration
/// * `actor` - The admin recording the result
/// * `player` - The player as the admin typed it
/// * `scored` - Whether the player scored
/// * `cause` - The message that carried the command
/// * `now` - When the command was received
///
/// # Errors
///
/// Returns an error if:
/// - There is no active gameweek
/// - The player name is empty
/// - The store fails
pub fn record_scoring_event<S>(
    store: &mut S,
    context: &GameContext,
    actor: Actor,
    player: &str,
    scored: bool,
    cause: Cause,
    now: DateTime<Utc>,
) -> Result<ApiResult<RecordScoringResponse>, ApiError>
where
    S: GameStore,
    S::Error: Into<ApiError>,
{
    let active: ActivePeriod = active_period(context, now)?;
    let player_key: String = canonical_player_name(player);
    let previous: Option<ScoringEvent> = store
        .find_scoring_event(active.gameweek, &player_key)
        .map_err(store_failure)?;

    let result: ScoringResult = apply_scoring(
        active.gameweek,
        player,
        scored,
        previous.as_ref(),
        actor,
        cause,
        now,
    )
    .map_err(translate_core_error)?;

    store
        .upsert_scoring_event(&result.event)
        .map_err(store_failure)?;
    store
        .append_audit_event(&result.audit_event)
        .map_err(store_failure)?;

    info!(
        gameweek = active.gameweek,
        player = %result.event.player_key,
        scored,
        "Recorded scoring result"
    );

    Ok(ApiResult {
        response: RecordScoringResponse {
            gameweek: active.gameweek,
            message: compose::scoring_ack(active.gameweek, &result.event.player_display, scored),
            player: result.event.player_display,
            player_key: result.event.player_key,
            scored,
        },
        audit_event: Some(result.audit_event),
    })
}

/// Forces a participant out of the current gameweek.
///
/// # Errors
///
/// Returns an error if there is no active gameweek, the target does not
/// match exactly one participant, or the store fails.
pub fn eliminate<S>(
    store: &mut S,
    context: &GameContext,
    actor: Actor,
    target: &str,
    cause: Cause,
    now: DateTime<Utc>,
) -> Result<ApiResult<OverrideResponse>, ApiError>
where
    S: GameStore,
    S::Error: Into<ApiError>,
{
    apply_status_override(store, context, actor, target, OverrideKind::Eliminate, cause, now)
}

/// Puts a participant back in the running for the current gameweek.
///
/// # Errors
///
/// Returns an error if there is no active gameweek, the target does not
/// match exactly one participant, or the store fails.
pub fn reinstate<S>(
    store: &mut S,
    context: &GameContext,
    actor: Actor,
    target: &str,
    cause: Cause,
    now: DateTime<Utc>,
) -> Result<ApiResult<OverrideResponse>, ApiError>
where
    S: GameStore,
    S::Error: Into<ApiError>,
{
    apply_status_override(store, context, actor, target, OverrideKind::Reinstate, cause, now)
}

fn apply_status_override<S>(
    store: &mut S,
    context: &GameContext,
    actor: Actor,
    target: &str,
    kind: OverrideKind,
    cause: Cause,
    now: DateTime<Utc>,
) -> Result<ApiResult<OverrideResponse>, ApiError>
where
    S: GameStore,
    S::Error: Into<ApiError>,
{
    let active: ActivePeriod = active_period(context, now)?;
    let records: PeriodRecords = load_records(store, active.gameweek)?;
    let report: StatusReport =
        four_to_score::compute_status_report(active.gameweek, &context.roster, &records, now);

    let result: OverrideResult =
        apply_override(&report, target, kind, actor, cause, now).map_err(translate_core_error)?;

    let (participant, audit_event, changed): (Participant, Option<AuditEvent>, bool) = match result
    {
        OverrideResult::Applied {
            participant,
            record,
            audit_event,
        } => {
            store.append_override(&record).map_err(store_failure)?;
            store
                .append_audit_event(&audit_event)
                .map_err(store_failure)?;
            info!(
                gameweek = active.gameweek,
                participant = %participant.handle(),
                kind = %kind,
                "Applied status override"
            );
            (participant, Some(audit_event), true)
        }
        OverrideResult::Unchanged { participant } => {
            debug!(
                gameweek = active.gameweek,
                participant = %participant.handle(),
                kind = %kind,
                "Status override changed nothing"
            );
            (participant, None, false)
        }
    };

    let has_picks: bool = report
        .find(participant.handle())
        .is_some_and(ParticipantStatus::has_submission);

    Ok(ApiResult {
        response: OverrideResponse {
            gameweek: active.gameweek,
            handle: participant.handle().to_string(),
            display_name: participant.display_name().to_string(),
            kind,
            changed,
            message: if has_picks {
                compose::override_ack(active.gameweek, participant.display_name(), kind, changed)
            } else {
                compose::no_picks_ack(active.gameweek, participant.display_name())
            },
        },
        audit_event,
    })
}

/// Computes every known participant's status for a gameweek.
///
/// # Errors
///
/// Returns an error if the gameweek is not in the schedule or the store
/// fails.
pub fn compute_status_report<S>(
    store: &mut S,
    context: &GameContext,
    gameweek: u32,
    now: DateTime<Utc>,
) -> Result<StatusReport, ApiError>
where
    S: GameStore,
    S::Error: Into<ApiError>,
{
    require_gameweek(context, gameweek)?;
    let records: PeriodRecords = load_records(store, gameweek)?;
    Ok(four_to_score::compute_status_report(
        gameweek,
        &context.roster,
        &records,
        now,
    ))
}

/// Lists players with a recorded result for a gameweek.
///
/// # Errors
///
/// Returns an error if the gameweek is not in the schedule or the store
/// fails.
pub fn scorers<S>(
    store: &mut S,
    context: &GameContext,
    gameweek: u32,
) -> Result<ScorerListing, ApiError>
where
    S: GameStore,
    S::Error: Into<ApiError>,
{
    require_gameweek(context, gameweek)?;
    let records: PeriodRecords = load_records(store, gameweek)?;
    Ok(scorer_listing(gameweek, &records))
}

/// Builds the picks summary for a gameweek, one message per admin.
///
/// Read-only; may be sent any number of times.
///
/// # Errors
///
/// Returns an error if the gameweek is not in the schedule or the store
/// fails.
pub fn period_summary_messages<S>(
    store: &mut S,
    context: &GameContext,
    gameweek: u32,
) -> Result<Vec<OutboundMessage>, ApiError>
where
    S: GameStore,
    S::Error: Into<ApiError>,
{
    require_gameweek(context, gameweek)?;
    let records: PeriodRecords = load_records(store, gameweek)?;
    let summary: PeriodSummary = period_summary(gameweek, &context.roster, &records);
    let text: String = compose::period_summary(&summary);

    if context.admins.is_empty() {
        warn!(gameweek, "No admins configured; summary has no recipients");
    }

    Ok(context
        .admins
        .iter()
        .map(|admin| OutboundMessage::new(admin, text.clone()))
        .collect())
}

/// Builds the picks summary for the current gameweek.
///
/// # Errors
///
/// Returns an error if there is no active gameweek or the store fails.
pub fn current_summary_messages<S>(
    store: &mut S,
    context: &GameContext,
    now: DateTime<Utc>,
) -> Result<(u32, Vec<OutboundMessage>), ApiError>
where
    S: GameStore,
    S::Error: Into<ApiError>,
{
    let active: ActivePeriod = active_period(context, now)?;
    let messages: Vec<OutboundMessage> = period_summary_messages(store, context, active.gameweek)?;
    Ok((active.gameweek, messages))
}

/// Builds a reminder for every rostered participant without picks for the
/// current gameweek.
///
/// # Errors
///
/// Returns an error if there is no active gameweek, its deadline has
/// passed, or the store fails.
pub fn reminder_messages<S>(
    store: &mut S,
    context: &GameContext,
    now: DateTime<Utc>,
) -> Result<Vec<OutboundMessage>, ApiError>
where
    S: GameStore,
    S::Error: Into<ApiError>,
{
    let active: ActivePeriod = open_period(context, now)?;
    let submissions: Vec<Submission> = store
        .list_submissions(active.gameweek)
        .map_err(store_failure)?;
    let submitted: Vec<&str> = effective_submissions(&submissions)
        .into_iter()
        .map(|submission| submission.submitter.as_str())
        .collect();

    let text: String = compose::reminder(
        active.gameweek,
        &context.schedule.format_deadline(&active.deadline),
    );

    Ok(context
        .roster
        .iter()
        .filter(|participant| !submitted.contains(&participant.handle()))
        .map(|participant| OutboundMessage::new(participant.handle(), text.clone()))
        .collect())
}

/// Describes the current gameweek.
///
/// # Errors
///
/// Returns `ApiError::NoActivePeriod` when the season is over.
pub fn current_period_info(
    context: &GameContext,
    now: DateTime<Utc>,
) -> Result<PeriodInfo, ApiError> {
    let active: ActivePeriod = active_period(context, now)?;
    let deadline_passed: bool = context.schedule.deadline_passed(active.gameweek, now);

    Ok(PeriodInfo {
        gameweek: active.gameweek,
        deadline: active.deadline.to_rfc3339(),
        deadline_formatted: context.schedule.format_deadline(&active.deadline),
        deadline_passed,
        is_open: !deadline_passed,
    })
}
