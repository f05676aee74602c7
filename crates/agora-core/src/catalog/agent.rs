//! Agent catalog records
//!
//! Provides CRUD operations for agents in the directory.

use crate::Result;
use crate::storage::Database;
use serde::{Deserialize, Serialize};
use sqlx::Row;

/// A stored agent: a prompt configuration with an ordered tool list,
/// discoverable and shareable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    /// Database-assigned identifier
    pub id: i64,
    /// Display name (client-facing field name is `title`)
    pub name: String,
    /// What the agent does
    pub description: String,
    /// Free-text instructions
    pub prompt: String,
    /// Ordered capability identifiers the agent may use
    pub tools: Vec<String>,
    /// URL-safe identifier derived from the name at creation time
    pub slug: Option<String>,
    /// Lineage pointer to the agent this one was forked from
    pub forked_from: Option<i64>,
    pub run_count: i64,
    pub fork_count: i64,
    pub share_count: i64,
}

/// Fields required to insert a new agent
#[derive(Debug, Clone)]
pub struct NewAgent {
    pub name: String,
    pub description: String,
    pub prompt: String,
    pub tools: Vec<String>,
    pub slug: Option<String>,
    pub forked_from: Option<i64>,
}

/// Agent repository for database operations
pub struct AgentRepository<'a> {
    db: &'a Database,
}

impl<'a> AgentRepository<'a> {
    /// Create a new agent repository
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Insert a new agent and return the stored row.
    ///
    /// Counters start at zero. `forked_from` is stored as-is; the
    /// referenced agent is not required to exist.
    pub async fn create(&self, agent: &NewAgent) -> Result<Agent> {
        let tools = serde_json::to_string(&agent.tools)?;

        let result = sqlx::query(
            r#"
            INSERT INTO agents (name, description, prompt, tools, slug, forked_from)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&agent.name)
        .bind(&agent.description)
        .bind(&agent.prompt)
        .bind(&tools)
        .bind(&agent.slug)
        .bind(agent.forked_from)
        .execute(self.db.pool())
        .await?;

        let id = result.last_insert_rowid();

        Ok(Agent {
            id,
            name: agent.name.clone(),
            description: agent.description.clone(),
            prompt: agent.prompt.clone(),
            tools: agent.tools.clone(),
            slug: agent.slug.clone(),
            forked_from: agent.forked_from,
            run_count: 0,
            fork_count: 0,
            share_count: 0,
        })
    }

    /// Get an agent by ID
    pub async fn get(&self, id: i64) -> Result<Option<Agent>> {
        let row = sqlx::query(
            "SELECT id, name, description, prompt, tools, slug, forked_from, run_count, fork_count, share_count FROM agents WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.map(|r| self.row_to_agent(r)))
    }

    /// Get an agent by slug.
    ///
    /// Slugs are not unique; the earliest matching row wins.
    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Agent>> {
        let row = sqlx::query(
            "SELECT id, name, description, prompt, tools, slug, forked_from, run_count, fork_count, share_count FROM agents WHERE slug = ? ORDER BY id LIMIT 1",
        )
        .bind(slug)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.map(|r| self.row_to_agent(r)))
    }

    /// List the most recently created agents, newest first
    pub async fn list_recent(&self, limit: i64) -> Result<Vec<Agent>> {
        let rows = sqlx::query(
            "SELECT id, name, description, prompt, tools, slug, forked_from, run_count, fork_count, share_count FROM agents ORDER BY id DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.into_iter().map(|r| self.row_to_agent(r)).collect())
    }

    /// Overwrite an agent's content fields.
    ///
    /// The slug is not recomputed and counters and lineage are untouched.
    /// Returns the number of rows affected (0 when the agent is absent).
    pub async fn update_content(
        &self,
        id: i64,
        name: &str,
        description: &str,
        prompt: &str,
        tools: &[String],
    ) -> Result<u64> {
        let tools = serde_json::to_string(tools)?;

        let result = sqlx::query(
            r#"
            UPDATE agents
            SET name = ?, description = ?, prompt = ?, tools = ?
            WHERE id = ?
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(prompt)
        .bind(&tools)
        .bind(id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected())
    }

    /// Delete an agent.
    ///
    /// Reviews referencing the agent are left in place.
    /// Returns the number of rows affected (0 when the agent is absent).
    pub async fn delete(&self, id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM agents WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected())
    }

    /// Increment an agent's share counter.
    ///
    /// Single atomic statement; safe under concurrent calls.
    /// Returns the number of rows affected (0 when the agent is absent).
    pub async fn increment_share(&self, id: i64) -> Result<u64> {
        let result = sqlx::query("UPDATE agents SET share_count = share_count + 1 WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected())
    }

    /// Convert a database row to an Agent
    fn row_to_agent(&self, row: sqlx::sqlite::SqliteRow) -> Agent {
        let tools: String = row.get("tools");
        Agent {
            id: row.get("id"),
            name: row.get("name"),
            description: row.get("description"),
            prompt: row.get("prompt"),
            tools: serde_json::from_str(&tools).unwrap_or_default(),
            slug: row.get("slug"),
            forked_from: row.get("forked_from"),
            run_count: row.get("run_count"),
            fork_count: row.get("fork_count"),
            share_count: row.get("share_count"),
        }
    }
}
