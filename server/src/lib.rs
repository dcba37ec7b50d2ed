use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use rankcore::{RankError, RankedResult, TfIdfIndex, ALGORITHM, DEFAULT_TOP_K};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Missing and `null` fields both read as empty and are rejected with 400.
#[derive(Deserialize)]
pub struct BuildIndexRequest {
    #[serde(default)]
    pub resume_texts: Option<Vec<String>>,
    #[serde(default)]
    pub resume_ids: Option<Vec<String>>,
}

#[derive(Serialize)]
pub struct BuildIndexResponse {
    pub success: bool,
    pub message: String,
    pub count: usize,
    pub algorithm: &'static str,
}

#[derive(Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub jd_text: Option<String>,
    /// Defaults to `DEFAULT_TOP_K`; negative values are treated as 0.
    #[serde(default)]
    pub top_k: Option<i64>,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub results: Vec<RankedResult>,
    pub total_found: usize,
    pub algorithm: &'static str,
}

#[derive(Clone)]
pub struct AppState {
    pub index: Arc<TfIdfIndex>,
}

/// Handler error rendered as `{"error": message}`.
#[derive(Debug)]
pub enum ApiError {
    /// 400
    BadRequest(String),
    /// 500
    Internal(String),
}

impl From<RankError> for ApiError {
    fn from(err: RankError) -> Self {
        match err {
            RankError::InvalidInput(_) | RankError::IndexNotBuilt => {
                ApiError::BadRequest(err.to_string())
            }
            RankError::Extraction(_) => ApiError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        if status.is_server_error() {
            tracing::error!(%message, "request failed");
        }
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

pub fn build_app(index: Arc<TfIdfIndex>) -> Router {
    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new()
                    .allow_origin(AllowOrigin::list(origins))
                    .allow_methods(Any)
                    .allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/health", get(health_handler))
        .route("/build-index", post(build_index_handler))
        .route("/search", post(search_handler))
        .with_state(AppState { index })
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "text-ranker",
        "algorithm": ALGORITHM,
    }))
}

pub async fn build_index_handler(
    State(state): State<AppState>,
    Json(req): Json<BuildIndexRequest>,
) -> Result<Json<BuildIndexResponse>, ApiError> {
    let texts = req.resume_texts.unwrap_or_default();
    let ids = req.resume_ids.unwrap_or_default();
    // taken from the request; a concurrent rebuild may swap the corpus before len() could be read
    let count = texts.len();
    state.index.build_index_from_parallel(texts, ids)?;
    Ok(Json(BuildIndexResponse {
        success: true,
        message: format!("Text index built with {count} resumes"),
        count,
        algorithm: ALGORITHM,
    }))
}

pub async fn search_handler(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    let jd_text = req.jd_text.unwrap_or_default();
    if jd_text.is_empty() {
        return Err(ApiError::BadRequest("jd_text required".into()));
    }
    let top_k = req.top_k.map_or(DEFAULT_TOP_K, |k| usize::try_from(k).unwrap_or(0));
    let results = state.index.search(&jd_text, top_k)?;
    Ok(Json(SearchResponse {
        success: true,
        total_found: results.len(),
        results,
        algorithm: ALGORITHM,
    }))
}
