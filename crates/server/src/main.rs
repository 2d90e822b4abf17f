// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod config;
mod scheduler;
mod twilio;

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Form, Json, Router,
    extract::{Path, State as AxumState},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use clap::Parser;
use four_to_score::StatusReport;
use four_to_score_api::{
    ApiError, DeliveryFailure, DeliveryReport, GameContext, InboundMessage, InboundReply,
    Messenger, OutboundMessage, PeriodInfo, StatusReportResponse, compute_status_report,
    current_period_info, current_summary_messages, deliver, handle_inbound_message,
    period_summary_messages, reminder_messages,
};
use four_to_score_persistence::{Persistence, PersistenceError};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::config::BotConfig;
use crate::twilio::Outbox;

/// 4 to Score server - WhatsApp webhook and admin triggers for the picks bot
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(short, long, env = "FOUR_TO_SCORE_CONFIG", default_value = "config.toml")]
    config: PathBuf,

    /// Path to the `SQLite` database file. Overrides the config file; if
    /// neither sets one, uses an in-memory database.
    #[arg(short, long, env = "FOUR_TO_SCORE_DATABASE")]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
///
/// The store sits behind a Mutex; every request locks it for the whole
/// read-modify-write and releases it before any outbound delivery.
struct AppState<M> {
    /// The persistence layer for picks, results and audit events.
    persistence: Arc<Mutex<Persistence>>,
    /// Schedule, roster and admins.
    context: Arc<GameContext>,
    /// Outbound message channel.
    messenger: Arc<M>,
    /// Source of the current time.
    clock: fn() -> DateTime<Utc>,
}

impl<M> Clone for AppState<M> {
    fn clone(&self) -> Self {
        Self {
            persistence: Arc::clone(&self.persistence),
            context: Arc::clone(&self.context),
            messenger: Arc::clone(&self.messenger),
            clock: self.clock,
        }
    }
}

/// Form fields posted by the chat provider.
#[derive(Debug, Clone, Deserialize)]
struct WebhookForm {
    /// Sender handle.
    #[serde(rename = "From")]
    from: String,
    /// Message text.
    #[serde(rename = "Body", default)]
    body: String,
    /// Provider message identifier.
    #[serde(rename = "MessageSid", default)]
    message_sid: String,
}

/// API response for summary and reminder triggers.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct DispatchResponse {
    /// Always "sent"; failures are listed per recipient.
    status: String,
    /// The gameweek the messages covered.
    gameweek: Option<u32>,
    /// Number of messages accepted by the provider.
    sent: usize,
    /// Recipients the provider refused.
    failures: Vec<DeliveryFailureResponse>,
}

/// A single failed delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct DeliveryFailureResponse {
    recipient: String,
    reason: String,
}

impl DispatchResponse {
    fn from_report(gameweek: Option<u32>, report: DeliveryReport) -> Self {
        Self {
            status: String::from("sent"),
            gameweek,
            sent: report.sent,
            failures: report
                .failures
                .into_iter()
                .map(|DeliveryFailure { recipient, reason }| DeliveryFailureResponse {
                    recipient,
                    reason,
                })
                .collect(),
        }
    }
}

/// API response for the health check.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct HealthResponse {
    status: String,
    current_gameweek: Option<u32>,
    deadline: Option<String>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } | ApiError::NoActivePeriod => StatusCode::NOT_FOUND,
            ApiError::AmbiguousTarget { .. } | ApiError::DeadlinePassed { .. } => {
                StatusCode::CONFLICT
            }
            ApiError::StoreUnavailable { .. } => {
                error!(error = %err, "Store error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::DeliveryFailed { .. } => StatusCode::BAD_GATEWAY,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<PersistenceError> for HttpError {
    fn from(err: PersistenceError) -> Self {
        error!(error = %err, "Persistence error");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("Persistence error: {err}"),
        }
    }
}

/// Escapes text for an XML element body.
fn escape_xml(text: &str) -> String {
    let mut escaped: String = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Wraps a reply in a `TwiML` messaging response.
fn twiml(text: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?><Response><Message>{}</Message></Response>",
        escape_xml(text)
    )
}

/// Builds and delivers the picks summary for `gameweek` to every admin.
async fn send_period_summary<M: Messenger>(
    state: &AppState<M>,
    gameweek: u32,
) -> Result<DeliveryReport, ApiError> {
    let messages: Vec<OutboundMessage> = {
        let mut persistence = state.persistence.lock().await;
        period_summary_messages(&mut *persistence, &state.context, gameweek)?
    };
    Ok(deliver(state.messenger.as_ref(), &messages).await)
}

/// Handler for POST /webhook endpoint.
///
/// Replies inline with `TwiML`; any messages for other recipients are
/// delivered after the store lock is released.
async fn handle_webhook<M: Messenger + 'static>(
    AxumState(app_state): AxumState<AppState<M>>,
    Form(form): Form<WebhookForm>,
) -> Response {
    let now: DateTime<Utc> = (app_state.clock)();
    let message: InboundMessage =
        app_state
            .context
            .inbound(&form.from, &form.body, &form.message_sid);
    info!(sender = %message.sender, is_admin = message.is_admin, "Handling webhook");

    let reply: InboundReply = {
        let mut persistence = app_state.persistence.lock().await;
        handle_inbound_message(&mut *persistence, &app_state.context, &message, now)
    };

    if !reply.outbound.is_empty() {
        let report: DeliveryReport = deliver(app_state.messenger.as_ref(), &reply.outbound).await;
        if !report.all_sent() {
            warn!(
                failed = report.failures.len(),
                "Some messages triggered by the webhook were not delivered"
            );
        }
    }

    (
        [(header::CONTENT_TYPE, "text/xml")],
        twiml(&reply.text),
    )
        .into_response()
}

/// Handler for POST /send-summary/{gameweek} endpoint.
async fn handle_send_summary<M: Messenger + 'static>(
    AxumState(app_state): AxumState<AppState<M>>,
    Path(gameweek): Path<u32>,
) -> Result<Json<DispatchResponse>, HttpError> {
    info!(gameweek, "Handling send_summary request");

    let report: DeliveryReport = send_period_summary(&app_state, gameweek).await?;
    Ok(Json(DispatchResponse::from_report(Some(gameweek), report)))
}

/// Handler for GET /summary endpoint.
async fn handle_current_summary<M: Messenger + 'static>(
    AxumState(app_state): AxumState<AppState<M>>,
) -> Result<Json<DispatchResponse>, HttpError> {
    info!("Handling current summary request");

    let now: DateTime<Utc> = (app_state.clock)();
    let (gameweek, messages): (u32, Vec<OutboundMessage>) = {
        let mut persistence = app_state.persistence.lock().await;
        current_summary_messages(&mut *persistence, &app_state.context, now)?
    };

    let report: DeliveryReport = deliver(app_state.messenger.as_ref(), &messages).await;
    Ok(Json(DispatchResponse::from_report(Some(gameweek), report)))
}

/// Handler for POST /send-reminders endpoint.
async fn handle_send_reminders<M: Messenger + 'static>(
    AxumState(app_state): AxumState<AppState<M>>,
) -> Result<Json<DispatchResponse>, HttpError> {
    info!("Handling send_reminders request");

    let now: DateTime<Utc> = (app_state.clock)();
    let gameweek: Option<u32> = app_state
        .context
        .schedule
        .current_period(now)
        .map(|active| active.gameweek);
    let messages: Vec<OutboundMessage> = {
        let mut persistence = app_state.persistence.lock().await;
        reminder_messages(&mut *persistence, &app_state.context, now)?
    };

    let report: DeliveryReport = deliver(app_state.messenger.as_ref(), &messages).await;
    Ok(Json(DispatchResponse::from_report(gameweek, report)))
}

/// Handler for GET /health endpoint.
async fn handle_health<M: Messenger + 'static>(
    AxumState(app_state): AxumState<AppState<M>>,
) -> Result<Json<HealthResponse>, HttpError> {
    app_state.persistence.lock().await.health_check()?;

    let period: Option<PeriodInfo> =
        current_period_info(&app_state.context, (app_state.clock)()).ok();
    Ok(Json(HealthResponse {
        status: String::from("OK"),
        current_gameweek: period.as_ref().map(|info| info.gameweek),
        deadline: period.map(|info| info.deadline),
    }))
}

/// Handler for GET /gameweek-info endpoint.
async fn handle_gameweek_info<M: Messenger + 'static>(
    AxumState(app_state): AxumState<AppState<M>>,
) -> Response {
    match current_period_info(&app_state.context, (app_state.clock)()) {
        Ok(info) => Json(info).into_response(),
        Err(ApiError::NoActivePeriod) => {
            Json(serde_json::json!({ "status": "no_active_gameweek" })).into_response()
        }
        Err(err) => HttpError::from(err).into_response(),
    }
}

/// Handler for GET /status/{gameweek} endpoint.
async fn handle_status<M: Messenger + 'static>(
    AxumState(app_state): AxumState<AppState<M>>,
    Path(gameweek): Path<u32>,
) -> Result<Json<StatusReportResponse>, HttpError> {
    info!(gameweek, "Handling status request");

    let now: DateTime<Utc> = (app_state.clock)();
    let mut persistence = app_state.persistence.lock().await;
    let report: StatusReport =
        compute_status_report(&mut *persistence, &app_state.context, gameweek, now)?;
    drop(persistence);

    Ok(Json(StatusReportResponse::from(&report)))
}

/// Builds the application router.
fn build_router<M: Messenger + 'static>(app_state: AppState<M>) -> Router {
    Router::new()
        .route("/webhook", post(handle_webhook::<M>))
        .route("/send-summary/{gameweek}", post(handle_send_summary::<M>))
        .route("/send-reminders", post(handle_send_reminders::<M>))
        .route("/summary", get(handle_current_summary::<M>))
        .route("/health", get(handle_health::<M>))
        .route("/gameweek-info", get(handle_gameweek_info::<M>))
        .route("/status/{gameweek}", get(handle_status::<M>))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing 4 to Score server");

    let config: BotConfig = BotConfig::load(&args.config)?;
    let context: GameContext = config.to_context()?;

    let persistence: Persistence = match args.database.as_ref().or(config.database.as_ref()) {
        Some(db_path) => {
            info!("Using file-based database at: {}", db_path);
            Persistence::new_with_file(db_path)?
        }
        None => {
            warn!("Using in-memory database; picks will not survive a restart");
            Persistence::new_in_memory()?
        }
    };

    let app_state: AppState<Outbox> = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        context: Arc::new(context),
        messenger: Arc::new(Outbox::from_config(&config.twilio)?),
        clock: Utc::now,
    };

    let _summary_jobs: Vec<JoinHandle<()>> = scheduler::schedule_summaries(&app_state);

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("0.0.0.0:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode as HttpStatusCode},
    };
    use chrono::TimeZone;
    use four_to_score_api::RecordingMessenger;
    use tower::ServiceExt;

    const ADMIN: &str = "whatsapp:+447700900000";
    const ALICE: &str = "whatsapp:+447700900001";
    const BOB: &str = "whatsapp:+447700900002";
    const CAROL: &str = "whatsapp:+447700900003";

    const TEST_CONFIG: &str = r#"
timezone = "Europe/London"
admins = ["whatsapp:+447700900000"]

[[gameweeks]]
gameweek = 1
starts = "2025-08-15T19:00:00"
deadline = "2025-08-15T18:30:00"
closes = "2025-08-18T22:00:00"

[[gameweeks]]
gameweek = 2
starts = "2025-08-22T19:00:00"
deadline = "2025-08-22T18:30:00"
closes = "2025-08-25T22:00:00"

[[roster]]
handle = "whatsapp:+447700900001"
name = "Alice"

[[roster]]
handle = "whatsapp:+447700900002"
name = "Bob"

[[roster]]
handle = "whatsapp:+447700900003"
name = "Carol"
"#;

    /// One hour before the gameweek 1 deadline (18:30 BST).
    fn before_deadline() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 8, 15, 16, 30, 0).unwrap()
    }

    fn after_deadline() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 8, 15, 20, 0, 0).unwrap()
    }

    fn after_season() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
    }

    /// Helper to create test app state with in-memory persistence.
    fn create_test_app_state(
        clock: fn() -> DateTime<Utc>,
    ) -> (AppState<RecordingMessenger>, Arc<RecordingMessenger>) {
        let context: GameContext = BotConfig::from_toml_str(TEST_CONFIG)
            .unwrap()
            .to_context()
            .unwrap();
        let persistence: Persistence =
            Persistence::new_in_memory().expect("Failed to create in-memory persistence");
        let messenger: Arc<RecordingMessenger> = Arc::new(RecordingMessenger::new());
        let app_state: AppState<RecordingMessenger> = AppState {
            persistence: Arc::new(Mutex::new(persistence)),
            context: Arc::new(context),
            messenger: Arc::clone(&messenger),
            clock,
        };
        (app_state, messenger)
    }

    fn percent_encode(value: &str) -> String {
        value
            .bytes()
            .map(|byte| {
                if byte.is_ascii_alphanumeric() || b"-_.~".contains(&byte) {
                    char::from(byte).to_string()
                } else {
                    format!("%{byte:02X}")
                }
            })
            .collect()
    }

    fn webhook_request(from: &str, body: &str) -> Request<Body> {
        let form: String = format!(
            "From={}&Body={}&MessageSid=SM0001",
            percent_encode(from),
            percent_encode(body)
        );
        Request::builder()
            .method("POST")
            .uri("/webhook")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(form))
            .unwrap()
    }

    fn empty_request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(body_bytes.to_vec()).unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        serde_json::from_str(&body_text(response).await).unwrap()
    }

    async fn submit_alice_picks(app: &Router) {
        let response = app
            .clone()
            .oneshot(webhook_request(ALICE, "Haaland\nSalah\nSaka\nPalmer"))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);
    }

    #[test]
    fn test_twiml_escapes_markup() {
        let document: String = twiml("Tom & Jerry <3 \"quotes\"");

        assert!(document.contains(
            "<Response><Message>Tom &amp; Jerry &lt;3 &quot;quotes&quot;</Message></Response>"
        ));
    }

    #[tokio::test]
    async fn test_webhook_confirms_picks_with_twiml() {
        let (app_state, messenger) = create_test_app_state(before_deadline);
        let app: Router = build_router(app_state);

        let response = app
            .oneshot(webhook_request(ALICE, "Haaland\nSalah\nSaka\nPalmer"))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/xml"
        );
        let body: String = body_text(response).await;
        assert!(body.contains("<Response><Message>✅ GW1 picks saved for Alice!"));
        assert!(body.contains("Haaland, Salah, Saka, Palmer"));
        assert!(body.contains("Friday 15 August at 18:30"));
        assert!(messenger.sent().is_empty());
    }

    #[tokio::test]
    async fn test_webhook_rejects_picks_after_deadline() {
        let (app_state, _messenger) = create_test_app_state(after_deadline);
        let app: Router = build_router(app_state);

        let response = app
            .oneshot(webhook_request(ALICE, "Haaland\nSalah\nSaka\nPalmer"))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);
        assert!(
            body_text(response)
                .await
                .contains("The deadline for Gameweek 1 has passed.")
        );
    }

    #[tokio::test]
    async fn test_webhook_admin_show_picks_delivers_summary() {
        let (app_state, messenger) = create_test_app_state(before_deadline);
        let app: Router = build_router(app_state);
        submit_alice_picks(&app).await;

        let response = app
            .oneshot(webhook_request(ADMIN, "show picks"))
            .await
            .unwrap();

        assert!(
            body_text(response)
                .await
                .contains("📊 Sending Gameweek 1 summary...")
        );
        let sent: Vec<OutboundMessage> = messenger.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].recipient, ADMIN);
        assert!(sent[0].text.contains("✅ Alice: Haaland, Salah, Saka, Palmer"));
    }

    #[tokio::test]
    async fn test_webhook_without_sender_is_rejected() {
        let (app_state, _messenger) = create_test_app_state(before_deadline);
        let app: Router = build_router(app_state);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/webhook")
                    .header("content-type", "application/x-www-form-urlencoded")
                    .body(Body::from("Body=hello"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn test_send_summary_goes_to_admin() {
        let (app_state, messenger) = create_test_app_state(after_deadline);
        let app: Router = build_router(app_state);

        let response = app
            .oneshot(empty_request("POST", "/send-summary/1"))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);
        let json: serde_json::Value = body_json(response).await;
        assert_eq!(json["status"], "sent");
        assert_eq!(json["gameweek"], 1);
        assert_eq!(json["sent"], 1);
        assert_eq!(messenger.sent()[0].recipient, ADMIN);
        assert!(messenger.sent()[0].text.contains("• Alice"));
    }

    #[tokio::test]
    async fn test_send_summary_unknown_gameweek_is_not_found() {
        let (app_state, messenger) = create_test_app_state(after_deadline);
        let app: Router = build_router(app_state);

        let response = app
            .oneshot(empty_request("POST", "/send-summary/38"))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::NOT_FOUND);
        let json: serde_json::Value = body_json(response).await;
        assert_eq!(json["error"], true);
        assert!(messenger.sent().is_empty());
    }

    #[tokio::test]
    async fn test_current_summary_route() {
        let (app_state, messenger) = create_test_app_state(after_deadline);
        let app: Router = build_router(app_state);

        let response = app.oneshot(empty_request("GET", "/summary")).await.unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);
        assert_eq!(body_json(response).await["gameweek"], 1);
        assert_eq!(messenger.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_send_reminders_skips_submitted() {
        let (app_state, messenger) = create_test_app_state(before_deadline);
        let app: Router = build_router(app_state);
        submit_alice_picks(&app).await;

        let response = app
            .oneshot(empty_request("POST", "/send-reminders"))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);
        assert_eq!(body_json(response).await["sent"], 2);
        let recipients: Vec<String> = messenger
            .sent()
            .into_iter()
            .map(|message| message.recipient)
            .collect();
        assert_eq!(recipients, vec![BOB, CAROL]);
    }

    #[tokio::test]
    async fn test_send_reminders_after_deadline_conflicts() {
        let (app_state, messenger) = create_test_app_state(after_deadline);
        let app: Router = build_router(app_state);

        let response = app
            .oneshot(empty_request("POST", "/send-reminders"))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::CONFLICT);
        assert!(messenger.sent().is_empty());
    }

    #[tokio::test]
    async fn test_health_reports_current_gameweek() {
        let (app_state, _messenger) = create_test_app_state(before_deadline);
        let app: Router = build_router(app_state);

        let response = app.oneshot(empty_request("GET", "/health")).await.unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);
        let json: serde_json::Value = body_json(response).await;
        assert_eq!(json["status"], "OK");
        assert_eq!(json["current_gameweek"], 1);
        assert_eq!(json["deadline"], "2025-08-15T18:30:00+01:00");
    }

    #[tokio::test]
    async fn test_health_after_season_has_no_gameweek() {
        let (app_state, _messenger) = create_test_app_state(after_season);
        let app: Router = build_router(app_state);

        let response = app.oneshot(empty_request("GET", "/health")).await.unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);
        assert!(body_json(response).await["current_gameweek"].is_null());
    }

    #[tokio::test]
    async fn test_gameweek_info_route() {
        let (app_state, _messenger) = create_test_app_state(after_deadline);
        let app: Router = build_router(app_state);

        let response = app
            .oneshot(empty_request("GET", "/gameweek-info"))
            .await
            .unwrap();

        let json: serde_json::Value = body_json(response).await;
        assert_eq!(json["gameweek"], 1);
        assert_eq!(json["deadline_passed"], true);
        assert_eq!(json["is_open"], false);
    }

    #[tokio::test]
    async fn test_gameweek_info_after_season() {
        let (app_state, _messenger) = create_test_app_state(after_season);
        let app: Router = build_router(app_state);

        let response = app
            .oneshot(empty_request("GET", "/gameweek-info"))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);
        assert_eq!(body_json(response).await["status"], "no_active_gameweek");
    }

    #[tokio::test]
    async fn test_status_route_reports_every_participant() {
        let (app_state, _messenger) = create_test_app_state(before_deadline);
        let app: Router = build_router(app_state);
        submit_alice_picks(&app).await;

        let response = app
            .oneshot(empty_request("GET", "/status/1"))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);
        let json: serde_json::Value = body_json(response).await;
        assert_eq!(json["gameweek"], 1);
        assert_eq!(json["participants"].as_array().unwrap().len(), 3);
        assert_eq!(json["pending"], 1);
        assert_eq!(json["lost"], 2);
    }

    #[tokio::test]
    async fn test_status_route_unknown_gameweek() {
        let (app_state, _messenger) = create_test_app_state(before_deadline);
        let app: Router = build_router(app_state);

        let response = app
            .oneshot(empty_request("GET", "/status/99"))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_only_future_summaries_are_scheduled() {
        let (app_state, _messenger) = create_test_app_state(after_deadline);

        let handles: Vec<JoinHandle<()>> = scheduler::schedule_summaries(&app_state);

        assert_eq!(handles.len(), 1);
        for handle in handles {
            handle.abort();
        }
    }

    #[tokio::test]
    async fn test_no_summaries_scheduled_after_season() {
        let (app_state, _messenger) = create_test_app_state(after_season);

        assert!(scheduler::schedule_summaries(&app_state).is_empty());
    }
}
