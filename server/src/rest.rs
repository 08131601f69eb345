use crate::chat::GeminiClient;
use crate::errors::Error;
use crate::feed::TelemetryState;
use crate::model::{ActivityResponse, ChatReply, ChatRequest, PetProfile, RankedPet, RenameRequest};
use crate::profile::ProfileStore;
use crate::walks::WalkSummary;
use crate::{metrics, ranking};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use simulator::WearableData;
use std::convert::Infallible;
use tokio_stream::wrappers::WatchStream;
use tokio_stream::{Stream, StreamExt};
use tracing::error;

#[derive(Clone)]
pub struct AppState {
    pub telemetry: TelemetryState,
    pub profiles: ProfileStore,
    pub chat: GeminiClient,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/telemetry", get(get_telemetry))
        .route("/api/v1/telemetry/stream", get(stream_telemetry))
        .route("/api/v1/activity", get(get_activity))
        .route("/api/v1/walk", get(get_walk))
        .route("/api/v1/rankings", get(get_rankings))
        .route("/api/v1/profile", get(get_profile).put(put_profile))
        .route("/api/v1/profile/name", patch(patch_profile_name))
        .route("/api/v1/chat", post(post_chat))
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}

/// Latest wearable sample; 404 until the first tick lands.
async fn get_telemetry(State(state): State<AppState>) -> Result<Json<WearableData>, AppError> {
    let latest = state.telemetry.latest.borrow().clone();
    latest
        .map(Json)
        .ok_or_else(|| AppError::not_found("no wearable sample received yet"))
}

/// Server-sent events feed of wearable samples.
async fn stream_telemetry(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = WatchStream::new(state.telemetry.latest.clone()).filter_map(|sample| {
        sample
            .and_then(|sample| Event::default().json_data(&sample).ok())
            .map(Ok)
    });
    Sse::new(stream).keep_alive(KeepAlive::default())
}

#[derive(Debug, Deserialize)]
struct ActivityQuery {
    limit: Option<usize>,
}

async fn get_activity(
    State(state): State<AppState>,
    Query(params): Query<ActivityQuery>,
) -> Json<ActivityResponse> {
    let limit = params.limit.unwrap_or(50).min(100);
    let history = state.telemetry.history.read().await;
    let data: Vec<_> = history.iter().take(limit).cloned().collect();
    Json(ActivityResponse {
        total: history.len(),
        limit,
        data,
    })
}

async fn get_walk(State(state): State<AppState>) -> Json<WalkSummary> {
    Json(state.telemetry.walks.read().await.summary(Utc::now()))
}

async fn get_rankings() -> Json<Vec<RankedPet>> {
    Json(ranking::fetch_rankings().await)
}

async fn get_profile(State(state): State<AppState>) -> Result<Json<PetProfile>, AppError> {
    state
        .profiles
        .load()
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("no pet profile has been saved yet"))
}

async fn put_profile(
    State(state): State<AppState>,
    Json(profile): Json<PetProfile>,
) -> Result<StatusCode, AppError> {
    state.profiles.save(&profile).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn patch_profile_name(
    State(state): State<AppState>,
    Json(request): Json<RenameRequest>,
) -> Result<Json<PetProfile>, AppError> {
    Ok(Json(state.profiles.update_name(&request.name).await?))
}

/// One chat turn. Requires a saved profile for the pet context.
async fn post_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatReply>, AppError> {
    let profile = state
        .profiles
        .load()
        .await?
        .ok_or_else(|| AppError::not_found("a pet profile is required for chat"))?;
    let reply = state.chat.send_message(&profile, &request.message).await?;
    Ok(Json(ChatReply { reply }))
}

async fn metrics_handler() -> String {
    metrics::gather_metrics()
}

/// Maps internal errors onto HTTP responses.
struct AppError {
    status: StatusCode,
    inner: anyhow::Error,
}

impl AppError {
    fn not_found(message: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            inner: anyhow::anyhow!("{message}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!("API error: {}", self.inner);
        }
        (self.status, self.inner.to_string()).into_response()
    }
}

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        let status = match &err {
            Error::ProfileMissing => StatusCode::NOT_FOUND,
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::Http(_) => StatusCode::BAD_GATEWAY,
            Error::Io(_) | Error::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            inner: err.into(),
        }
    }
}
