//! HTTP API for the fact reframer.
//!
//! - `POST /initial-fact` (alias `/api/getInitialFact`) - fetch a new original fact
//! - `POST /reframe-fact` (alias `/api/reframeFact`) - reframe text through a lens
//! - `GET  /api/test` - liveness
//! - `GET  /api/test-gemini` - round trip to the completion service
//!
//! Errors are returned as `{ "error": message }`.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use rand::rngs::StdRng;
use rand::SeedableRng;
use reframe_core::{FactError, FactService, RandomSampler};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

/// Origin allowed by default, the usual front-end dev server.
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";

// ── State ─────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct AppState {
    service: Arc<FactService>,
}

impl AppState {
    pub fn new(service: Arc<FactService>) -> Self {
        Self { service }
    }
}

// ── Errors ────────────────────────────────────────────────────────────────

/// A [`FactError`] rendered as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub FactError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            FactError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            FactError::DuplicateContent | FactError::NoOriginalFact => StatusCode::CONFLICT,
            FactError::UpstreamFailure(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<FactError> for ApiError {
    fn from(err: FactError) -> Self {
        Self(err)
    }
}

/// A body axum could not read as JSON (wrong content type, bad syntax, wrong field types).
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(FactError::InvalidArgument(format!(
            "JSON body ({})",
            rejection.body_text()
        )))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, %status, "request failed");
        } else {
            tracing::warn!(error = %self.0, %status, "request rejected");
        }
        (status, Json(ErrorBody { error: self.0.to_string() })).into_response()
    }
}

// ── Wire types ────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitialFactBody {
    pub text: String,
    /// Same as `text`, for clients reading the older field name.
    pub fact: String,
    pub request_id: String,
    pub categories: Vec<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReframeRequest {
    #[serde(default)]
    pub text_to_reframe: String,
    #[serde(default)]
    pub subject_lens: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReframeBody {
    pub reframed_text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusBody {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProbeBody {
    pub message: String,
}

// ── Handlers ──────────────────────────────────────────────────────────────

async fn initial_fact(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let mut sampler = RandomSampler::new(StdRng::from_entropy());
    let fact = state.service.initial_fact(&mut sampler).await?;

    let headers = [
        (header::CACHE_CONTROL, "no-cache, no-store, must-revalidate, private"),
        (header::PRAGMA, "no-cache"),
        (header::EXPIRES, "0"),
    ];
    let body = InitialFactBody {
        fact: fact.text.clone(),
        text: fact.text,
        request_id: fact.request_id,
        categories: fact.categories,
    };
    Ok((headers, Json(body)))
}

async fn reframe_fact(
    State(state): State<AppState>,
    payload: Result<Json<ReframeRequest>, JsonRejection>,
) -> Result<Json<ReframeBody>, ApiError> {
    let Json(request) = payload?;
    let reframed_text = state
        .service
        .reframe_fact(&request.text_to_reframe, &request.subject_lens)
        .await?;
    Ok(Json(ReframeBody { reframed_text }))
}

async fn health() -> Json<StatusBody> {
    Json(StatusBody {
        status: "Server is running".to_string(),
    })
}

async fn probe(State(state): State<AppState>) -> Result<Json<ProbeBody>, ApiError> {
    let message = state.service.check_upstream().await?;
    Ok(Json(ProbeBody { message }))
}

// ── Router ────────────────────────────────────────────────────────────────

/// CORS for a single allowed origin.
pub fn cors(allowed_origin: &str) -> anyhow::Result<CorsLayer> {
    let origin = HeaderValue::from_str(allowed_origin)?;
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::AUTHORIZATION,
            header::CACHE_CONTROL,
            header::PRAGMA,
            header::EXPIRES,
        ]))
}

/// Build the application router.
pub fn router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/initial-fact", post(initial_fact))
        .route("/api/getInitialFact", post(initial_fact))
        .route("/reframe-fact", post(reframe_fact))
        .route("/api/reframeFact", post(reframe_fact))
        .route("/api/test", get(health))
        .route("/api/test-gemini", get(probe))
        .layer(cors)
        .with_state(state)
}
