//! Review records
//!
//! Reviews are append-only: they are created and listed, never edited.

use crate::Result;
use crate::storage::Database;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::Row;

/// A rating plus optional comment submitted against a specific agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    /// Database-assigned identifier
    pub id: i64,
    /// The reviewed agent. Not enforced: the agent may have been deleted
    /// since, leaving the review orphaned.
    pub agent_id: i64,
    pub author_name: String,
    /// Integer rating in [1,5], validated at the service boundary
    pub rating: i64,
    pub comment: Option<String>,
    /// Server-assigned at insert, used for newest-first ordering
    pub created_at: DateTime<Utc>,
}

/// Fields required to insert a new review
#[derive(Debug, Clone)]
pub struct NewReview {
    pub agent_id: i64,
    pub author_name: String,
    pub rating: i64,
    pub comment: Option<String>,
}

/// Review repository for database operations
pub struct ReviewRepository<'a> {
    db: &'a Database,
}

impl<'a> ReviewRepository<'a> {
    /// Create a new review repository
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Insert a new review with a server-assigned timestamp.
    ///
    /// The referenced agent is not required to exist.
    pub async fn create(&self, review: &NewReview) -> Result<Review> {
        let created_at = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO reviews (agent_id, author_name, rating, comment, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(review.agent_id)
        .bind(&review.author_name)
        .bind(review.rating)
        .bind(&review.comment)
        .bind(created_at)
        .execute(self.db.pool())
        .await?;

        Ok(Review {
            id: result.last_insert_rowid(),
            agent_id: review.agent_id,
            author_name: review.author_name.clone(),
            rating: review.rating,
            comment: review.comment.clone(),
            created_at,
        })
    }

    /// List reviews for an agent, newest first
    pub async fn list_for_agent(&self, agent_id: i64) -> Result<Vec<Review>> {
        let rows = sqlx::query(
            "SELECT id, agent_id, author_name, rating, comment, created_at FROM reviews WHERE agent_id = ? ORDER BY created_at DESC",
        )
        .bind(agent_id)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.into_iter().map(|r| self.row_to_review(r)).collect())
    }

    /// Convert a database row to a Review
    fn row_to_review(&self, row: sqlx::sqlite::SqliteRow) -> Review {
        Review {
            id: row.get("id"),
            agent_id: row.get("agent_id"),
            author_name: row.get("author_name"),
            rating: row.get("rating"),
            comment: row.get("comment"),
            created_at: row.get("created_at"),
        }
    }
}
