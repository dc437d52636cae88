//! REST surface for the log service
//!
//! Wire-compatible with the original EmotiLive dashboard endpoints,
//! including their historical quirks: emotion POSTs answer 201 while
//! behaviour POSTs answer 200, and the two families use different error
//! keys (`error` vs `message`). Consumers of the old API keep working
//! unchanged, so both shapes are preserved and pinned by tests.
//!
//! | Endpoint            | Method | Success                | Failure                          |
//! |---------------------|--------|------------------------|----------------------------------|
//! | `/emotion-data`     | POST   | 201 `{message, log}`   | 400/500 `{error}`                |
//! | `/emotion-data`     | GET    | 200 `{logs}`           | 500 `{error}`                    |
//! | `/behaviour-data`   | POST   | 200 `{message, log}`   | 400/500 `{message}`              |
//! | `/behaviour-data`   | GET    | 200 `{logs}`           | 500 `{message}`                  |
//! | `/run-emotion-model`| GET    | 200 `{message, output}`| 500 `{error}`                    |

use crate::ingest::Ingestor;
use crate::query::QueryService;
use crate::store::LogStore;
use crate::trigger::ModelTrigger;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::error;

/// Shared state for the HTTP handlers.
///
/// The store arrives already constructed and injected through the two
/// service fronts; handlers never reach for a global connection.
pub struct AppState<S, T> {
    /// Write path
    pub ingest: Ingestor<S>,
    /// Read path
    pub query: QueryService<S>,
    /// External model collaborator
    pub trigger: Arc<T>,
}

impl<S, T> Clone for AppState<S, T> {
    fn clone(&self) -> Self {
        Self {
            ingest: self.ingest.clone(),
            query: self.query.clone(),
            trigger: Arc::clone(&self.trigger),
        }
    }
}

impl<S: LogStore, T: ModelTrigger> AppState<S, T> {
    /// Assemble handler state from a shared store and trigger.
    #[must_use]
    pub fn new(store: Arc<S>, trigger: Arc<T>) -> Self {
        Self {
            ingest: Ingestor::new(Arc::clone(&store)),
            query: QueryService::new(store),
            trigger,
        }
    }
}

#[derive(Debug, Deserialize)]
struct LimitParams {
    limit: Option<String>,
}

impl LimitParams {
    /// `limit=0`, an absent value, and garbage all mean "everything".
    fn parsed(&self) -> Option<usize> {
        self.limit.as_deref().and_then(|raw| raw.parse().ok())
    }
}

#[derive(Serialize)]
struct LogsResponse<R> {
    logs: Vec<R>,
}

/// Build the service router.
pub fn router<S, T>(state: AppState<S, T>) -> Router
where
    S: LogStore + 'static,
    T: ModelTrigger + 'static,
{
    Router::new()
        .route("/emotion-data", get(get_emotions).post(post_emotion))
        .route("/behaviour-data", get(get_behaviors).post(post_behavior))
        .route("/run-emotion-model", get(run_emotion_model))
        .with_state(state)
}

async fn post_emotion<S: LogStore, T: ModelTrigger>(
    State(state): State<AppState<S, T>>,
    Json(payload): Json<Value>,
) -> (StatusCode, Json<Value>) {
    match state.ingest.ingest_emotion(&payload).await {
        Ok(log) => (
            StatusCode::CREATED,
            Json(json!({"message": "Emotion data stored", "log": log})),
        ),
        Err(e) if e.is_validation() => (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Missing fields"})),
        ),
        Err(e) => {
            error!(error = %e, "failed to store emotion log");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Server error"})),
            )
        }
    }
}

async fn get_emotions<S: LogStore, T: ModelTrigger>(
    State(state): State<AppState<S, T>>,
    Query(params): Query<LimitParams>,
) -> (StatusCode, Json<Value>) {
    match state.query.emotions(params.parsed()).await {
        Ok(logs) => (StatusCode::OK, Json(json!(LogsResponse { logs }))),
        Err(e) => {
            error!(error = %e, "failed to fetch emotion logs");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Server error"})),
            )
        }
    }
}

async fn post_behavior<S: LogStore, T: ModelTrigger>(
    State(state): State<AppState<S, T>>,
    Json(payload): Json<Value>,
) -> (StatusCode, Json<Value>) {
    match state.ingest.ingest_behavior(&payload).await {
        Ok(log) => (
            StatusCode::OK,
            Json(json!({"message": "Behavior data stored successfully", "log": log})),
        ),
        Err(e) if e.is_validation() => (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "Invalid data format"})),
        ),
        Err(e) => {
            error!(error = %e, "failed to store behavior log");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"message": "Server error"})),
            )
        }
    }
}

async fn get_behaviors<S: LogStore, T: ModelTrigger>(
    State(state): State<AppState<S, T>>,
) -> (StatusCode, Json<Value>) {
    match state.query.behaviors(None).await {
        Ok(logs) => (StatusCode::OK, Json(json!(LogsResponse { logs }))),
        Err(e) => {
            error!(error = %e, "failed to fetch behavior logs");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"message": "Server error"})),
            )
        }
    }
}

async fn run_emotion_model<S: LogStore, T: ModelTrigger>(
    State(state): State<AppState<S, T>>,
) -> (StatusCode, Json<Value>) {
    match state.trigger.invoke().await {
        Ok(output) => (
            StatusCode::OK,
            Json(json!({"message": "Emotion model executed", "output": output})),
        ),
        Err(e) => {
            error!(error = %e, "model trigger failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": e.to_string()})),
            )
        }
    }
}
