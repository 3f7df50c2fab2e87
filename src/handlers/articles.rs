//! ==============================================================================
//! articles.rs - Articles CRUD over the in-memory fixture list
//! ==============================================================================
//!
//! purpose:
//!     the demo "database" surface: list/create under /rest/v1, and
//!     get/update/delete under /rest/v1/{key}. GET resolves the key as an
//!     id first and falls back to a slug match; PUT and DELETE go by id
//!     only. Responses are decorated with the author fixture when the
//!     user_id matches a known user.
//!
//! ==============================================================================

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiJson};
use crate::state::{Article, HubState, SharedState};

// ==============================================================================
// payloads
// ==============================================================================

/// Incoming article fields. Any `id` in the body is ignored; ids are
/// assigned on create and immutable on update. Absent fields keep their
/// previous value on update and default on create.
#[derive(Debug, Default, Deserialize)]
pub struct ArticlePayload {
    pub user_id: Option<i64>,
    pub title: Option<String>,
    pub slug: Option<String>,
}

impl ArticlePayload {
    fn is_empty(&self) -> bool {
        self.user_id.is_none() && self.title.is_none() && self.slug.is_none()
    }
}

/// Author fixture attached to article responses.
#[derive(Debug, Serialize)]
pub struct AuthorPayload {
    pub id: i64,
    pub name: String,
    pub role: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ArticleResponse {
    #[serde(flatten)]
    pub article: Article,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<AuthorPayload>,
}

fn decorate(state: &HubState, article: Article) -> ArticleResponse {
    let user = state.user_by_id(article.user_id).map(|user| AuthorPayload {
        id: user.id,
        name: user.name,
        role: "collaborator",
    });
    ArticleResponse { article, user }
}

#[derive(Debug, Default, Deserialize)]
pub struct Pagination {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

// ==============================================================================
// handlers
// ==============================================================================

/// GET /rest/v1
pub async fn list(
    State(state): State<SharedState>,
    Query(page): Query<Pagination>,
) -> Json<Vec<ArticleResponse>> {
    let state = state.read().await;
    let items = state
        .articles()
        .iter()
        .skip(page.offset.unwrap_or(0))
        .take(page.limit.unwrap_or(usize::MAX))
        .cloned()
        .map(|article| decorate(&state, article))
        .collect();
    Json(items)
}

/// POST /rest/v1
pub async fn create(
    State(state): State<SharedState>,
    ApiJson(payload): ApiJson<ArticlePayload>,
) -> Result<(StatusCode, Json<ArticleResponse>), ApiError> {
    if payload.is_empty() {
        return Err(ApiError::invalid("missing required article fields"));
    }
    let mut state = state.write().await;
    let article = state.insert_article(
        payload.user_id.unwrap_or(0),
        payload.title.unwrap_or_default().to_lowercase(),
        payload.slug.unwrap_or_default(),
    );
    let response = decorate(&state, article);
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /rest/v1/{key} - id first, slug as fallback
pub async fn get(
    State(state): State<SharedState>,
    Path(key): Path<String>,
) -> Result<Json<ArticleResponse>, ApiError> {
    let state = state.read().await;
    let article = state
        .article_by_id(&key)
        .or_else(|| state.article_by_slug(&key))
        .ok_or(ApiError::NotFound)?;
    Ok(Json(decorate(&state, article)))
}

/// PUT /rest/v1/{key} - by id only; absent fields keep their value
pub async fn update(
    State(state): State<SharedState>,
    Path(key): Path<String>,
    ApiJson(payload): ApiJson<ArticlePayload>,
) -> Result<Json<ArticleResponse>, ApiError> {
    let mut state = state.write().await;
    let existing = state.article_by_id(&key).ok_or(ApiError::NotFound)?;
    let article = state
        .update_article(
            &key,
            payload.user_id.unwrap_or(existing.user_id),
            payload
                .title
                .map(|t| t.to_lowercase())
                .unwrap_or(existing.title),
            payload.slug.unwrap_or(existing.slug),
        )
        .ok_or(ApiError::NotFound)?;
    Ok(Json(decorate(&state, article)))
}

/// DELETE /rest/v1/{key} - by id only, echoes the removed row
pub async fn remove(
    State(state): State<SharedState>,
    Path(key): Path<String>,
) -> Result<Json<ArticleResponse>, ApiError> {
    let mut state = state.write().await;
    let article = state.remove_article(&key).ok_or(ApiError::NotFound)?;
    Ok(Json(decorate(&state, article)))
}
