// Copyright (C) 2026 CareTrack contributors
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

use axum::{
    Json, Router,
    extract::{Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use caretrack_api::{
    ApiError, BulkCreateEntriesRequest, BulkCreateEntriesResponse, CheckShiftCoverageRequest,
    CheckShiftCoverageResponse, CreateEntryRequest, CreateEntryResponse, DeleteEntriesRequest,
    DeleteEntriesResponse, GetAuditTimelineResponse, GetWeekScheduleResponse,
    SetConfirmationRequest, SetConfirmationResponse, ValidateEntryRequest, ValidateEntryResponse,
    ViolationInfo, WeeklySummaryInfo, bulk_create_entries, check_shift_coverage, create_entry,
    delete_entries, get_audit_timeline, get_week_schedule, get_weekly_summary, set_confirmation,
    validate_entry,
};
use caretrack_audit::{Actor, Cause};
use caretrack_domain::{
    DEFAULT_MAX_WEEKLY_HOURS, DEFAULT_MIN_COMPETENT_STAFF, DEFAULT_MIN_REST_HOURS,
    DEFAULT_WEEKEND_GAP_DAYS, RotaRuleConfig,
};
use caretrack_persistence::Persistence;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

/// CareTrack Server - HTTP server for rota scheduling
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Maximum scheduled hours per carer per week
    #[arg(long, default_value_t = DEFAULT_MAX_WEEKLY_HOURS)]
    max_weekly_hours: u32,

    /// Minimum rest in hours between a night shift and a following day shift
    #[arg(long, default_value_t = DEFAULT_MIN_REST_HOURS)]
    min_rest_hours: u32,

    /// Weekend shifts this many days apart or closer count as consecutive
    #[arg(long, default_value_t = DEFAULT_WEEKEND_GAP_DAYS)]
    weekend_gap_days: u32,

    /// Minimum competent carers per dispatched shift
    #[arg(long, default_value_t = DEFAULT_MIN_COMPETENT_STAFF)]
    min_competent_staff: u32,
}

/// Application state shared across handlers.
///
/// Every handler holds the persistence lock for its whole call, so a write
/// is validated against exactly the rows it is persisted next to.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for rota entries and audit events.
    persistence: Arc<Mutex<Persistence>>,
    /// Rule configuration fixed at startup.
    config: RotaRuleConfig,
}

/// A state-changing request: attribution plus the operation payload.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct WriteApiRequest<T> {
    /// The actor ID performing this action.
    actor_id: String,
    /// The cause ID for this action.
    cause_id: String,
    /// The cause description.
    cause_description: String,
    /// The operation itself.
    #[serde(flatten)]
    payload: T,
}

impl<T> WriteApiRequest<T> {
    fn attribution(&self) -> (Actor, Cause) {
        (
            Actor::new(self.actor_id.clone(), String::from("operator")),
            Cause::new(self.cause_id.clone(), self.cause_description.clone()),
        )
    }
}

/// Query parameters for the week grid.
#[derive(Debug, Deserialize)]
struct WeekQuery {
    /// Any date in the week.
    week_of: String,
}

/// Query parameters for a carer's weekly summary.
#[derive(Debug, Deserialize)]
struct SummaryQuery {
    /// The carer.
    carer_id: i64,
    /// Any date in the week.
    week_of: String,
}

/// Query parameters for the audit timeline.
#[derive(Debug, Deserialize)]
struct AuditTimelineQuery {
    /// Restrict to one carer.
    carer_id: Option<i64>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
    /// Blocking violations, for refused writes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    violations: Vec<ViolationInfo>,
    /// Advisory violations raised alongside a refusal.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<ViolationInfo>,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
    /// Blocking violations carried to the client.
    violations: Vec<ViolationInfo>,
    /// Advisory violations carried to the client.
    warnings: Vec<ViolationInfo>,
}

impl HttpError {
    const fn new(status: StatusCode, message: String) -> Self {
        Self {
            status,
            message,
            violations: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
            violations: self.violations,
            warnings: self.warnings,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let message: String = err.to_string();
        match err {
            ApiError::InvalidInput { .. } => Self::new(StatusCode::BAD_REQUEST, message),
            ApiError::ResourceNotFound { .. } => Self::new(StatusCode::NOT_FOUND, message),
            ApiError::ScheduleViolation {
                violations,
                warnings,
            } => Self {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                message,
                violations,
                warnings,
            },
            ApiError::Internal { .. } => {
                error!(error = %message, "Internal error");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        }
    }
}

/// Handler for POST `/rota/validate` endpoint.
///
/// Validates a candidate entry without saving it.
async fn handle_validate_entry(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ValidateEntryRequest>,
) -> Result<Json<ValidateEntryResponse>, HttpError> {
    info!(
        carer_id = req.entry.carer_id,
        date = %req.entry.date,
        shift_type = %req.entry.shift_type,
        "Handling validate_entry request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: ValidateEntryResponse =
        validate_entry(&mut persistence, &app_state.config, &req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/rota/entries` endpoint.
///
/// Creates one entry, or responds 422 with the violation list.
async fn handle_create_entry(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<WriteApiRequest<CreateEntryRequest>>,
) -> Result<Json<CreateEntryResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        carer_id = req.payload.entry.carer_id,
        date = %req.payload.entry.date,
        "Handling create_entry request"
    );

    let (actor, cause) = req.attribution();
    let mut persistence = app_state.persistence.lock().await;
    let response: CreateEntryResponse =
        create_entry(&mut persistence, &app_state.config, &req.payload, actor, cause)?;
    drop(persistence);

    info!(
        entry_id = response.entry.entry_id,
        event_id = response.event_id,
        "Successfully created entry"
    );

    Ok(Json(response))
}

/// Handler for POST `/rota/entries/bulk` endpoint.
async fn handle_bulk_create_entries(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<WriteApiRequest<BulkCreateEntriesRequest>>,
) -> Result<Json<BulkCreateEntriesResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        count = req.payload.entries.len(),
        "Handling bulk_create_entries request"
    );

    let (actor, cause) = req.attribution();
    let mut persistence = app_state.persistence.lock().await;
    let response: BulkCreateEntriesResponse =
        bulk_create_entries(&mut persistence, &app_state.config, &req.payload, actor, cause)?;
    drop(persistence);

    if !response.rejected.is_empty() {
        warn!(
            rejected = response.rejected.len(),
            "Bulk create completed with rejected entries"
        );
    }

    Ok(Json(response))
}

/// Handler for POST `/rota/entries/confirm` endpoint.
async fn handle_set_confirmation(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<WriteApiRequest<SetConfirmationRequest>>,
) -> Result<Json<SetConfirmationResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        entry_id = req.payload.entry_id,
        confirmed = req.payload.confirmed,
        "Handling set_confirmation request"
    );

    let (actor, cause) = req.attribution();
    let mut persistence = app_state.persistence.lock().await;
    let response: SetConfirmationResponse =
        set_confirmation(&mut persistence, &req.payload, actor, cause)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/rota/entries/delete` endpoint.
async fn handle_delete_entries(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<WriteApiRequest<DeleteEntriesRequest>>,
) -> Result<Json<DeleteEntriesResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        count = req.payload.entry_ids.len(),
        "Handling delete_entries request"
    );

    let (actor, cause) = req.attribution();
    let mut persistence = app_state.persistence.lock().await;
    let response: DeleteEntriesResponse =
        delete_entries(&mut persistence, &req.payload, actor, cause)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/rota/week` endpoint.
///
/// Returns every entry in the week and a summary per carer.
async fn handle_get_week_schedule(
    AxumState(app_state): AxumState<AppState>,
    Query(params): Query<WeekQuery>,
) -> Result<Json<GetWeekScheduleResponse>, HttpError> {
    info!(week_of = %params.week_of, "Handling get_week_schedule request");

    let mut persistence = app_state.persistence.lock().await;
    let response: GetWeekScheduleResponse =
        get_week_schedule(&mut persistence, &app_state.config, &params.week_of)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/rota/summary` endpoint.
async fn handle_get_weekly_summary(
    AxumState(app_state): AxumState<AppState>,
    Query(params): Query<SummaryQuery>,
) -> Result<Json<WeeklySummaryInfo>, HttpError> {
    info!(
        carer_id = params.carer_id,
        week_of = %params.week_of,
        "Handling get_weekly_summary request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: WeeklySummaryInfo = get_weekly_summary(
        &mut persistence,
        &app_state.config,
        params.carer_id,
        &params.week_of,
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/shifts/coverage` endpoint.
async fn handle_check_shift_coverage(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CheckShiftCoverageRequest>,
) -> Result<Json<CheckShiftCoverageResponse>, HttpError> {
    info!(
        package_id = req.package_id,
        date = %req.date,
        "Handling check_shift_coverage request"
    );

    Ok(Json(check_shift_coverage(&app_state.config, &req)?))
}

/// Handler for GET `/audit/timeline` endpoint.
async fn handle_get_audit_timeline(
    AxumState(app_state): AxumState<AppState>,
    Query(params): Query<AuditTimelineQuery>,
) -> Result<Json<GetAuditTimelineResponse>, HttpError> {
    info!(carer_id = ?params.carer_id, "Handling get_audit_timeline request");

    let mut persistence = app_state.persistence.lock().await;
    let response: GetAuditTimelineResponse = get_audit_timeline(&mut persistence, params.carer_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/rota/validate", post(handle_validate_entry))
        .route("/rota/entries", post(handle_create_entry))
        .route("/rota/entries/bulk", post(handle_bulk_create_entries))
        .route("/rota/entries/confirm", post(handle_set_confirmation))
        .route("/rota/entries/delete", post(handle_delete_entries))
        .route("/rota/week", get(handle_get_week_schedule))
        .route("/rota/summary", get(handle_get_weekly_summary))
        .route("/shifts/coverage", post(handle_check_shift_coverage))
        .route("/audit/timeline", get(handle_get_audit_timeline))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing CareTrack Server");

    let config: RotaRuleConfig = RotaRuleConfig::new(
        args.max_weekly_hours,
        args.min_rest_hours,
        args.weekend_gap_days,
        args.min_competent_staff,
    )?;
    info!(
        max_weekly_hours = config.max_weekly_hours,
        min_rest_hours = config.min_rest_hours,
        weekend_gap_days = config.consecutive_weekend_gap_days,
        min_competent_staff = config.min_competent_staff,
        "Rule configuration loaded"
    );

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        config,
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used)]

    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode as HttpStatusCode},
    };
    use caretrack_api::RotaEntryInput;
    use serde::de::DeserializeOwned;
    use tower::ServiceExt;

    /// Helper to create test app state with in-memory persistence.
    fn create_test_app_state() -> AppState {
        let persistence: Persistence =
            Persistence::new_in_memory().expect("Failed to create in-memory persistence");
        AppState {
            persistence: Arc::new(Mutex::new(persistence)),
            config: RotaRuleConfig::default(),
        }
    }

    fn entry(carer_id: i64, date: &str, shift_type: &str) -> RotaEntryInput {
        let (start, end) = if shift_type == "NIGHT" {
            ("20:00", "08:00")
        } else {
            ("08:00", "20:00")
        };
        RotaEntryInput {
            carer_id,
            package_id: 3,
            date: date.to_string(),
            shift_type: shift_type.to_string(),
            start_time: start.to_string(),
            end_time: end.to_string(),
        }
    }

    fn write<T>(payload: T) -> WriteApiRequest<T> {
        WriteApiRequest {
            actor_id: String::from("admin1"),
            cause_id: String::from("test-cause"),
            cause_description: String::from("Rota grid drag and drop"),
            payload,
        }
    }

    fn post_json<B: Serialize>(uri: &str, body: &B) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(body).unwrap()))
            .unwrap()
    }

    fn get_uri(uri: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> T {
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body_bytes).unwrap()
    }

    async fn create(app: &Router, carer_id: i64, date: &str, shift_type: &str) -> Response {
        app.clone()
            .oneshot(post_json(
                "/rota/entries",
                &write(CreateEntryRequest {
                    entry: entry(carer_id, date, shift_type),
                }),
            ))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_entry_succeeds() {
        let app: Router = build_router(create_test_app_state());

        let response = create(&app, 1, "2026-03-02", "DAY").await;

        assert_eq!(response.status(), HttpStatusCode::OK);
        let created: CreateEntryResponse = read_json(response).await;
        assert!(created.entry.entry_id > 0);
        assert_eq!(created.entry.created_by, "admin1");
        assert!(created.event_id > 0);
    }

    #[tokio::test]
    async fn test_refused_entry_returns_violations() {
        let app: Router = build_router(create_test_app_state());
        create(&app, 1, "2026-03-02", "NIGHT").await;

        let response = create(&app, 1, "2026-03-03", "DAY").await;

        assert_eq!(response.status(), HttpStatusCode::UNPROCESSABLE_ENTITY);
        let body: ErrorResponse = read_json(response).await;
        assert!(body.error);
        assert_eq!(body.violations.len(), 1);
        assert_eq!(body.violations[0].rule, "INSUFFICIENT_REST");
        assert_eq!(body.violations[0].severity, "error");
    }

    #[tokio::test]
    async fn test_validate_does_not_persist() {
        let app: Router = build_router(create_test_app_state());

        let response = app
            .clone()
            .oneshot(post_json(
                "/rota/validate",
                &ValidateEntryRequest {
                    entry: entry(2, "2026-03-04", "DAY"),
                    entry_id: None,
                },
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);
        let validation: ValidateEntryResponse = read_json(response).await;
        assert!(!validation.blocked);

        let response = app
            .oneshot(get_uri("/rota/week?week_of=2026-03-04"))
            .await
            .unwrap();
        let week: GetWeekScheduleResponse = read_json(response).await;
        assert!(week.entries.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_input_is_bad_request() {
        let app: Router = build_router(create_test_app_state());

        let response = create(&app, 1, "2026-02-30", "DAY").await;

        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_bulk_create_and_week_grid() {
        let app: Router = build_router(create_test_app_state());

        let response = app
            .clone()
            .oneshot(post_json(
                "/rota/entries/bulk",
                &write(BulkCreateEntriesRequest {
                    entries: vec![
                        entry(1, "2026-03-07", "DAY"),
                        entry(1, "2026-03-08", "DAY"),
                        entry(2, "2026-03-08", "NIGHT"),
                    ],
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);
        let bulk: BulkCreateEntriesResponse = read_json(response).await;
        assert_eq!(bulk.created.len(), 2);
        assert_eq!(bulk.rejected.len(), 1);
        assert_eq!(bulk.rejected[0].index, 1);

        let response = app
            .oneshot(get_uri("/rota/week?week_of=2026-03-02"))
            .await
            .unwrap();
        let week: GetWeekScheduleResponse = read_json(response).await;
        assert_eq!(week.week_end, "2026-03-08");
        assert_eq!(week.entries.len(), 2);
        assert_eq!(week.summaries.len(), 2);
    }

    #[tokio::test]
    async fn test_confirm_and_delete() {
        let app: Router = build_router(create_test_app_state());
        let created: CreateEntryResponse = read_json(create(&app, 4, "2026-03-05", "DAY").await).await;
        let entry_id: i64 = created.entry.entry_id;

        let response = app
            .clone()
            .oneshot(post_json(
                "/rota/entries/confirm",
                &write(SetConfirmationRequest {
                    entry_id,
                    confirmed: true,
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);
        let confirmed: SetConfirmationResponse = read_json(response).await;
        assert!(confirmed.entry.is_confirmed);

        let response = app
            .clone()
            .oneshot(post_json(
                "/rota/entries/delete",
                &write(DeleteEntriesRequest {
                    entry_ids: vec![entry_id],
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);

        let response = app
            .oneshot(post_json(
                "/rota/entries/confirm",
                &write(SetConfirmationRequest {
                    entry_id,
                    confirmed: false,
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_weekly_summary_endpoint() {
        let app: Router = build_router(create_test_app_state());
        create(&app, 5, "2026-03-02", "DAY").await;
        create(&app, 5, "2026-03-03", "NIGHT").await;

        let response = app
            .oneshot(get_uri("/rota/summary?carer_id=5&week_of=2026-03-06"))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);
        let summary: WeeklySummaryInfo = read_json(response).await;
        assert_eq!(summary.day_shifts, 1);
        assert_eq!(summary.night_shifts, 1);
        assert!((summary.total_hours - 24.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_shift_coverage_endpoint() {
        let app: Router = build_router(create_test_app_state());

        let response = app
            .oneshot(post_json(
                "/shifts/coverage",
                &CheckShiftCoverageRequest {
                    package_id: 3,
                    date: String::from("2026-03-04"),
                    shift_type: String::from("DAY"),
                    assigned: vec![1, 2],
                    competent: Vec::new(),
                },
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);
        let coverage: CheckShiftCoverageResponse = read_json(response).await;
        assert_eq!(coverage.warnings.len(), 1);
        assert_eq!(coverage.warnings[0].rule, "NO_COMPETENT_STAFF");
    }

    #[tokio::test]
    async fn test_audit_timeline_endpoint() {
        let app: Router = build_router(create_test_app_state());
        create(&app, 6, "2026-03-02", "DAY").await;
        create(&app, 7, "2026-03-02", "DAY").await;

        let response = app
            .clone()
            .oneshot(get_uri("/audit/timeline"))
            .await
            .unwrap();
        let all: GetAuditTimelineResponse = read_json(response).await;
        assert_eq!(all.events.len(), 2);

        let response = app
            .oneshot(get_uri("/audit/timeline?carer_id=7"))
            .await
            .unwrap();
        let scoped: GetAuditTimelineResponse = read_json(response).await;
        assert_eq!(scoped.carer_id, Some(7));
        assert_eq!(scoped.events.len(), 1);
        assert_eq!(scoped.events[0].actor_id, "admin1");
        assert_eq!(scoped.events[0].cause_description, "Rota grid drag and drop");
    }
}
