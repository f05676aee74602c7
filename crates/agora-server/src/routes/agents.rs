//! Agent endpoints.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde_json::{Value, json};

use agora_core::api::agents::{self, AgentDto, CreateAgentRequest, UpdateAgentRequest};

use crate::error::ApiError;
use crate::state::AppState;

/// `GET /agents` — the 50 most recent agents, newest first, with rating
/// aggregates.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<AgentDto>>, ApiError> {
    let agents = agents::list(&state.db).await?;
    Ok(Json(agents))
}

/// `GET /agents/{id}`
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AgentDto>, ApiError> {
    let agent = agents::get(&state.db, &id).await?;
    Ok(Json(agent))
}

/// `GET /agents/slug/{slug}`
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<AgentDto>, ApiError> {
    let agent = agents::get_by_slug(&state.db, &slug).await?;
    Ok(Json(agent))
}

/// `POST /agents`
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateAgentRequest>,
) -> Result<(StatusCode, Json<AgentDto>), ApiError> {
    let agent = agents::create(&state.db, request).await?;
    Ok((StatusCode::CREATED, Json(agent)))
}

/// `PUT /agents/{id}`
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateAgentRequest>,
) -> Result<Json<AgentDto>, ApiError> {
    let agent = agents::update(&state.db, &id, request).await?;
    Ok(Json(agent))
}

/// `DELETE /agents/{id}`
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    agents::delete(&state.db, &id).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Agent deleted successfully",
    })))
}

/// `POST /agents/{id}/share`
pub async fn share(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    agents::share(&state.db, &id).await?;
    Ok(Json(json!({ "success": true })))
}
