//! Rating aggregation over reviews
//!
//! Computes per-agent average rating and review count, either for a single
//! agent or batched across many with one grouped query.

use crate::Result;
use crate::storage::Database;
use sqlx::Row;
use std::collections::HashMap;

/// Aggregate rating figures for one agent
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RatingSummary {
    /// Unrounded mean of integer ratings; `None` when there are no reviews
    pub average: Option<f64>,
    /// Number of reviews
    pub count: i64,
}

/// Rating aggregation queries
pub struct RatingRepository<'a> {
    db: &'a Database,
}

impl<'a> RatingRepository<'a> {
    /// Create a new rating repository
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Aggregate rating figures for a single agent
    pub async fn for_agent(&self, agent_id: i64) -> Result<RatingSummary> {
        let (average, count): (Option<f64>, i64) =
            sqlx::query_as("SELECT AVG(rating), COUNT(id) FROM reviews WHERE agent_id = ?")
                .bind(agent_id)
                .fetch_one(self.db.pool())
                .await?;

        Ok(RatingSummary { average, count })
    }

    /// Aggregate rating figures for a set of agents in one grouped query.
    ///
    /// Agents with no reviews are absent from the returned map; callers
    /// treat absence as zero reviews.
    pub async fn for_agents(&self, agent_ids: &[i64]) -> Result<HashMap<i64, RatingSummary>> {
        if agent_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let mut query: sqlx::QueryBuilder<sqlx::Sqlite> = sqlx::QueryBuilder::new(
            "SELECT agent_id, AVG(rating) AS average, COUNT(id) AS count FROM reviews WHERE agent_id IN (",
        );
        let mut ids = query.separated(", ");
        for id in agent_ids.iter().copied() {
            ids.push_bind(id);
        }
        query.push(") GROUP BY agent_id");

        let rows = query.build().fetch_all(self.db.pool()).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let agent_id: i64 = row.get("agent_id");
                let summary = RatingSummary {
                    average: row.get("average"),
                    count: row.get("count"),
                };
                (agent_id, summary)
            })
            .collect())
    }
}
