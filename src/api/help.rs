//! Help widget endpoints: ask, search and category listing

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::ApiState;
use crate::engine::Classification;
use crate::knowledge::KnowledgeEntry;
use crate::normalize::is_blank;

// --- Request/Response types ---

/// Request body for asking a question
#[derive(Deserialize)]
pub struct AskRequest {
    pub message: String,
}

/// Classified reply to one question
#[derive(Serialize)]
pub struct AskResponse {
    pub classification: Classification,
    pub reply: String,
}

/// Query parameters for search
#[derive(Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub category: Option<String>,
}

/// Matching knowledge entries in knowledge base order
#[derive(Serialize)]
pub struct SearchResponse {
    pub entries: Vec<KnowledgeEntry>,
    pub total: usize,
}

/// Distinct categories in display order
#[derive(Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<String>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

fn error_response(code: &str, message: &str) -> Json<ErrorResponse> {
    Json(ErrorResponse {
        error: ErrorDetail {
            code: code.to_string(),
            message: message.to_string(),
        },
    })
}

// --- Handlers ---

/// Classify a question and reply once the thinking delay has elapsed
async fn ask(
    State(state): State<Arc<ApiState>>,
    Json(req): Json<AskRequest>,
) -> Result<Json<AskResponse>, (StatusCode, Json<ErrorResponse>)> {
    if is_blank(&req.message) {
        return Err((
            StatusCode::BAD_REQUEST,
            error_response("empty_message", "message must not be blank"),
        ));
    }

    let classification = state
        .scheduler
        .respond(&req.message)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "help response failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_response("response_failed", &e.to_string()),
            )
        })?
        .ok_or_else(|| {
            (
                StatusCode::BAD_REQUEST,
                error_response("empty_message", "message must not be blank"),
            )
        })?;

    let reply = classification.text().to_string();
    Ok(Json(AskResponse {
        classification,
        reply,
    }))
}

/// Filter the knowledge base by substring and optional category
async fn search(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<SearchQuery>,
) -> Json<SearchResponse> {
    let entries: Vec<KnowledgeEntry> = state
        .engine()
        .search_in(query.q.as_deref().unwrap_or_default(), query.category.as_deref())
        .into_iter()
        .cloned()
        .collect();
    let total = entries.len();

    Json(SearchResponse { entries, total })
}

/// List knowledge base categories
async fn categories(State(state): State<Arc<ApiState>>) -> Json<CategoriesResponse> {
    let categories = state
        .engine()
        .categories()
        .into_iter()
        .map(String::from)
        .collect();

    Json(CategoriesResponse { categories })
}

/// Build help router
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/ask", post(ask))
        .route("/search", get(search))
        .route("/categories", get(categories))
        .with_state(state)
}
