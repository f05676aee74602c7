//! Agents API
//!
//! High-level async functions for agent operations.

use crate::catalog::{Agent, AgentRepository, NewAgent, RatingRepository, RatingSummary, slugify};
use crate::storage::Database;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

use super::{parse_id, required};

/// How many agents a listing returns at most
const LIST_LIMIT: i64 = 50;

/// Client-facing agent shape
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentDto {
    pub id: String,
    pub title: String,
    pub description: String,
    pub prompt: String,
    pub tools: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forked_from: Option<String>,
    pub run_count: i64,
    pub fork_count: i64,
    pub share_count: i64,
    /// Unrounded mean of ratings; absent for agents with no reviews and for
    /// operations that skip aggregation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_count: Option<i64>,
}

impl From<Agent> for AgentDto {
    fn from(a: Agent) -> Self {
        Self {
            id: a.id.to_string(),
            title: a.name,
            description: a.description,
            prompt: a.prompt,
            tools: a.tools,
            slug: a.slug,
            forked_from: a.forked_from.map(|id| id.to_string()),
            run_count: a.run_count,
            fork_count: a.fork_count,
            share_count: a.share_count,
            average_rating: None,
            review_count: None,
        }
    }
}

impl AgentDto {
    fn with_ratings(mut self, summary: RatingSummary) -> Self {
        self.average_rating = summary.average;
        self.review_count = Some(summary.count);
        self
    }
}

/// Create agent request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAgentRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub prompt: Option<String>,
    pub tools: Option<Vec<String>>,
    pub forked_from: Option<String>,
}

/// Update agent request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAgentRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub prompt: Option<String>,
    pub tools: Option<Vec<String>>,
}

/// List the most recently created agents, annotated with rating aggregates.
///
/// Aggregates come from a single grouped query over reviews rather than one
/// query per agent.
pub async fn list(db: &Database) -> Result<Vec<AgentDto>> {
    let agents = AgentRepository::new(db).list_recent(LIST_LIMIT).await?;

    let ids: Vec<i64> = agents.iter().map(|a| a.id).collect();
    let summaries = RatingRepository::new(db).for_agents(&ids).await?;

    Ok(agents
        .into_iter()
        .map(|agent| {
            let summary = summaries.get(&agent.id).copied().unwrap_or_default();
            AgentDto::from(agent).with_ratings(summary)
        })
        .collect())
}

/// Get an agent by id, annotated with rating aggregates
pub async fn get(db: &Database, id: &str) -> Result<AgentDto> {
    let id = parse_id(id, "agent id")?;

    let agent = AgentRepository::new(db)
        .get(id)
        .await?
        .ok_or(Error::AgentNotFound)?;

    let summary = RatingRepository::new(db).for_agent(id).await?;
    Ok(AgentDto::from(agent).with_ratings(summary))
}

/// Get an agent by slug.
///
/// Same shape as [`get`] but without rating aggregates.
pub async fn get_by_slug(db: &Database, slug: &str) -> Result<AgentDto> {
    let slug = required(Some(slug), "slug")?;

    let agent = AgentRepository::new(db)
        .get_by_slug(slug)
        .await?
        .ok_or(Error::AgentNotFound)?;

    Ok(agent.into())
}

/// Create a new agent.
///
/// The slug is derived from the title. A supplied `forkedFrom` id is stored
/// as the lineage pointer without checking that the referenced agent exists.
pub async fn create(db: &Database, request: CreateAgentRequest) -> Result<AgentDto> {
    let title = required(request.title.as_deref(), "title")?;
    let description = required(request.description.as_deref(), "description")?;
    let prompt = required(request.prompt.as_deref(), "prompt")?;

    let forked_from = match request.forked_from.as_deref() {
        Some(id) if !id.is_empty() => Some(parse_id(id, "forkedFrom")?),
        _ => None,
    };

    let agent = AgentRepository::new(db)
        .create(&NewAgent {
            name: title.to_string(),
            description: description.to_string(),
            prompt: prompt.to_string(),
            tools: request.tools.unwrap_or_default(),
            slug: Some(slugify(title)),
            forked_from,
        })
        .await?;

    Ok(agent.into())
}

/// Overwrite an agent's title, description, prompt, and tools.
///
/// The slug is not recomputed; counters and lineage are untouched.
pub async fn update(db: &Database, id: &str, request: UpdateAgentRequest) -> Result<AgentDto> {
    let id = parse_id(id, "agent id")?;
    let title = required(request.title.as_deref(), "title")?;
    let description = required(request.description.as_deref(), "description")?;
    let prompt = required(request.prompt.as_deref(), "prompt")?;

    let repo = AgentRepository::new(db);
    let affected = repo
        .update_content(
            id,
            title,
            description,
            prompt,
            &request.tools.unwrap_or_default(),
        )
        .await?;

    if affected == 0 {
        return Err(Error::AgentNotFound);
    }

    let agent = repo.get(id).await?.ok_or(Error::AgentNotFound)?;
    Ok(agent.into())
}

/// Delete an agent.
///
/// Reviews referencing the agent remain queryable (orphans are permitted).
pub async fn delete(db: &Database, id: &str) -> Result<()> {
    let id = parse_id(id, "agent id")?;

    let affected = AgentRepository::new(db).delete(id).await?;
    if affected == 0 {
        return Err(Error::AgentNotFound);
    }

    Ok(())
}

/// Increment an agent's share counter
pub async fn share(db: &Database, id: &str) -> Result<()> {
    let id = parse_id(id, "agent id")?;

    let affected = AgentRepository::new(db).increment_share(id).await?;
    if affected == 0 {
        return Err(Error::AgentNotFound);
    }

    Ok(())
}
