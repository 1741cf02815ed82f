use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use anyhow::Result;
use chrono::Local;
use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use crate::agent::{self, AgentParse, BookingReview, DayInsights, SmartSchedule};
use crate::availability::ScanWindow;
use crate::config::Config;
use crate::stats::{dashboard_stats, DashboardStats};
use crate::store::{Appointment, AppointmentDraft, AppointmentStore, StoreError};
use crate::validation::{validate_date_format, validate_time_format};

// API state shared across handlers. The mutex serializes store access;
// conflict checks are still check-then-act, so concurrent writers must
// re-validate before relying on a clean result.
pub struct ApiState {
    pub config: Config,
    pub store: Mutex<AppointmentStore>,
}

#[derive(Serialize)]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
}

type HandlerError = (StatusCode, Json<ApiResponse>);

fn bad_request(message: impl Into<String>) -> HandlerError {
    (StatusCode::BAD_REQUEST, Json(ApiResponse { success: false, message: message.into() }))
}

fn store_error(context: &str, err: StoreError) -> HandlerError {
    match err {
        StoreError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse { success: false, message: format!("Appointment not found: {}", id) }),
        ),
        other => {
            error!("{}: {}", context, other);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse { success: false, message: "Server error".to_string() }),
            )
        }
    }
}

fn check_draft(draft: &AppointmentDraft) -> Result<(), HandlerError> {
    if draft.title.trim().is_empty() {
        return Err(bad_request("Missing required fields"));
    }
    if !validate_date_format(&draft.date) {
        return Err(bad_request(format!("Invalid date format: {}", draft.date)));
    }
    if !validate_time_format(&draft.time) {
        return Err(bad_request(format!("Invalid time format: {}", draft.time)));
    }
    if draft.duration == 0 {
        return Err(bad_request("Duration must be at least 1 minute"));
    }
    Ok(())
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn create_appointment_handler(
    State(state): State<Arc<ApiState>>,
    Json(draft): Json<AppointmentDraft>,
) -> Result<(StatusCode, Json<Appointment>), HandlerError> {
    check_draft(&draft)?;
    let store = state.store.lock().unwrap();
    match store.add(draft) {
        Ok(appointment) => {
            debug!("Created appointment {}", appointment.id);
            Ok((StatusCode::CREATED, Json(appointment)))
        }
        Err(e) => Err(store_error("Create appointment error", e)),
    }
}

async fn list_appointments_handler(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Appointment>>, HandlerError> {
    let store = state.store.lock().unwrap();
    store.list().map(Json).map_err(|e| store_error("List appointments error", e))
}

async fn get_appointment_handler(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<Appointment>, HandlerError> {
    let store = state.store.lock().unwrap();
    store.get(&id).map(Json).map_err(|e| store_error("Get appointment error", e))
}

async fn update_appointment_handler(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
    Json(draft): Json<AppointmentDraft>,
) -> Result<Json<Appointment>, HandlerError> {
    check_draft(&draft)?;
    let store = state.store.lock().unwrap();
    store.update(&id, draft).map(Json).map_err(|e| store_error("Update appointment error", e))
}

async fn delete_appointment_handler(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse>, HandlerError> {
    let store = state.store.lock().unwrap();
    match store.delete(&id) {
        Ok(_) => Ok(Json(ApiResponse {
            success: true,
            message: "Appointment deleted successfully".to_string(),
        })),
        Err(e) => Err(store_error("Delete appointment error", e)),
    }
}

async fn dashboard_stats_handler(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<DashboardStats>, HandlerError> {
    let store = state.store.lock().unwrap();
    let appointments = store.list().map_err(|e| store_error("Dashboard stats error", e))?;
    Ok(Json(dashboard_stats(&appointments)))
}

#[derive(Debug, Deserialize)]
pub struct ParseTextRequest {
    pub text: String,
}

async fn parse_text_handler(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<ParseTextRequest>,
) -> Result<Json<AgentParse>, HandlerError> {
    if request.text.trim().is_empty() {
        return Err(bad_request("Please enter a description of your meeting"));
    }
    let store = state.store.lock().unwrap();
    agent::parse_and_check(&store, &request.text, Local::now().date_naive())
        .map(Json)
        .map_err(|e| store_error("Parse text error", e))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmartScheduleRequest {
    pub date: String,
    pub duration: u32,
    pub preferred_start_time: Option<String>,
    pub preferred_end_time: Option<String>,
}

async fn smart_schedule_handler(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<SmartScheduleRequest>,
) -> Result<Json<SmartSchedule>, HandlerError> {
    if !validate_date_format(&request.date) {
        return Err(bad_request(format!("Invalid date format: {}", request.date)));
    }
    if request.duration == 0 {
        return Err(bad_request("Duration must be at least 1 minute"));
    }

    let scheduler = &state.config.scheduler;
    let window = ScanWindow {
        start_time: request
            .preferred_start_time
            .unwrap_or_else(|| scheduler.work_day_start.clone()),
        end_time: request.preferred_end_time.unwrap_or_else(|| scheduler.work_day_end.clone()),
        step_minutes: scheduler.slot_step_minutes,
    };
    if !validate_time_format(&window.start_time) || !validate_time_format(&window.end_time) {
        return Err(bad_request("Invalid preferred time window"));
    }

    let store = state.store.lock().unwrap();
    agent::smart_schedule(&store, &request.date, request.duration, &window)
        .map(Json)
        .map_err(|e| store_error("Smart schedule error", e))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckConflictsRequest {
    pub date: String,
    pub time: String,
    pub duration: u32,
    pub exclude_id: Option<String>,
}

async fn check_conflicts_handler(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<CheckConflictsRequest>,
) -> Result<Json<BookingReview>, HandlerError> {
    if !validate_date_format(&request.date) {
        return Err(bad_request(format!("Invalid date format: {}", request.date)));
    }
    if !validate_time_format(&request.time) {
        return Err(bad_request(format!("Invalid time format: {}", request.time)));
    }

    let store = state.store.lock().unwrap();
    agent::review_booking(
        &store,
        &request.date,
        &request.time,
        request.duration,
        request.exclude_id.as_deref(),
        Local::now().date_naive(),
    )
    .map(Json)
    .map_err(|e| store_error("Check conflicts error", e))
}

#[derive(Debug, Deserialize)]
pub struct DayInsightsRequest {
    pub date: String,
}

async fn day_insights_handler(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<DayInsightsRequest>,
) -> Result<Json<DayInsights>, HandlerError> {
    if !validate_date_format(&request.date) {
        return Err(bad_request(format!("Invalid date format: {}", request.date)));
    }
    let store = state.store.lock().unwrap();
    agent::day_insights(&store, &request.date)
        .map(Json)
        .map_err(|e| store_error("Day insights error", e))
}

pub fn build_router(state: Arc<ApiState>) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route(
            "/api/appointments",
            post(create_appointment_handler).get(list_appointments_handler),
        )
        .route("/api/appointments/stats/dashboard", get(dashboard_stats_handler))
        .route("/api/appointments/ai/parse-text", post(parse_text_handler))
        .route("/api/appointments/ai/smart-schedule", post(smart_schedule_handler))
        .route("/api/appointments/ai/check-conflicts", post(check_conflicts_handler))
        .route("/api/appointments/ai/day-insights", post(day_insights_handler))
        .route(
            "/api/appointments/{id}",
            get(get_appointment_handler)
                .put(update_appointment_handler)
                .delete(delete_appointment_handler),
        )
        .layer(cors)
        .with_state(state)
}

pub async fn start_api_server(config: Config, addr: &str) -> Result<()> {
    let store = AppointmentStore::new()?;
    let state = Arc::new(ApiState { config, store: Mutex::new(store) });
    let app = build_router(state);

    let listener = TcpListener::bind(addr).await?;
    info!("API server listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
