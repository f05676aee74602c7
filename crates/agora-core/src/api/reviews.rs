//! Reviews API
//!
//! High-level async functions for review operations.

use crate::catalog::{NewReview, Review, ReviewRepository};
use crate::storage::Database;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

use super::{parse_id, required};

/// Client-facing review shape
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDto {
    pub id: String,
    pub agent_id: String,
    pub author_name: String,
    pub rating: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub created_at: String,
}

impl From<Review> for ReviewDto {
    fn from(r: Review) -> Self {
        Self {
            id: r.id.to_string(),
            agent_id: r.agent_id.to_string(),
            author_name: r.author_name,
            rating: r.rating,
            comment: r.comment,
            created_at: r.created_at.to_rfc3339(),
        }
    }
}

/// Create review request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    pub agent_id: Option<String>,
    pub author_name: Option<String>,
    pub rating: Option<i64>,
    pub comment: Option<String>,
}

/// List reviews for an agent, newest first
pub async fn list(db: &Database, agent_id: Option<&str>) -> Result<Vec<ReviewDto>> {
    let agent_id = required(agent_id, "agentId")?;
    let agent_id = parse_id(agent_id, "agentId")?;

    let reviews = ReviewRepository::new(db).list_for_agent(agent_id).await?;
    Ok(reviews.into_iter().map(ReviewDto::from).collect())
}

/// Create a review for an agent.
///
/// The agent's existence is not verified; a review submitted against a
/// just-deleted agent is stored as an orphan.
pub async fn create(db: &Database, request: CreateReviewRequest) -> Result<ReviewDto> {
    let agent_id = required(request.agent_id.as_deref(), "agentId")?;
    let agent_id = parse_id(agent_id, "agentId")?;
    let author_name = required(request.author_name.as_deref(), "authorName")?;

    let rating = request
        .rating
        .ok_or_else(|| Error::InvalidInput("rating is required".to_string()))?;
    if !(1..=5).contains(&rating) {
        return Err(Error::InvalidInput(
            "rating must be between 1 and 5".to_string(),
        ));
    }

    let review = ReviewRepository::new(db)
        .create(&NewReview {
            agent_id,
            author_name: author_name.to_string(),
            rating,
            comment: request.comment.filter(|c| !c.is_empty()),
        })
        .await?;

    Ok(review.into())
}
