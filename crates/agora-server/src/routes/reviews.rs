//! Review endpoints.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use serde::Deserialize;

use agora_core::api::reviews::{self, CreateReviewRequest, ReviewDto};

use crate::error::ApiError;
use crate::state::AppState;

/// Query parameters for `GET /reviews`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    agent_id: Option<String>,
}

/// `GET /reviews?agentId=…` — reviews for an agent, newest first.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<ReviewDto>>, ApiError> {
    let reviews = reviews::list(&state.db, query.agent_id.as_deref()).await?;
    Ok(Json(reviews))
}

/// `POST /reviews`
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateReviewRequest>,
) -> Result<(StatusCode, Json<ReviewDto>), ApiError> {
    let review = reviews::create(&state.db, request).await?;
    Ok((StatusCode::CREATED, Json(review)))
}
