//! Full-text search repository.
//!
//! One query per entity kind, each matching `search_vector` against the
//! user's query and filtering to rows the user may read. Access rules are
//! pushed into SQL so no denied row ever leaves the database; set
//! membership only, no ranking.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::SearchRowEntity;
use crate::metrics::QueryTimer;

/// Repository for federated full-text search.
#[derive(Clone)]
pub struct SearchRepository {
    pool: PgPool,
}

impl SearchRepository {
    /// Creates a new SearchRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Characters matching the query that the user may read: their own
    /// (player or creator), or any character in a campaign they can read.
    pub async fn search_characters(
        &self,
        user_id: Uuid,
        query: &str,
    ) -> Result<Vec<SearchRowEntity>, sqlx::Error> {
        let timer = QueryTimer::new("search_characters");
        let result = sqlx::query_as::<_, SearchRowEntity>(
            r#"
            SELECT DISTINCT ch.id, ch.name, ch.description, ch.campaign_id, NULL::uuid AS map_id
            FROM characters ch
            LEFT JOIN campaigns c ON ch.campaign_id = c.id
            WHERE ch.search_vector @@ websearch_to_tsquery('english', $2)
              AND (
                    ch.player_id = $1
                    OR ch.creator_id = $1
                    OR c.dm_id = $1
                    OR EXISTS (
                        SELECT 1 FROM characters mine
                        WHERE mine.campaign_id = ch.campaign_id AND mine.player_id = $1
                    )
              )
            "#,
        )
        .bind(user_id)
        .bind(query)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Campaigns matching the query where the user is DM or member.
    pub async fn search_campaigns(
        &self,
        user_id: Uuid,
        query: &str,
    ) -> Result<Vec<SearchRowEntity>, sqlx::Error> {
        let timer = QueryTimer::new("search_campaigns");
        let result = sqlx::query_as::<_, SearchRowEntity>(
            r#"
            SELECT DISTINCT c.id, c.name, c.description, NULL::uuid AS campaign_id, NULL::uuid AS map_id
            FROM campaigns c
            WHERE c.search_vector @@ websearch_to_tsquery('english', $2)
              AND (
                    c.dm_id = $1
                    OR EXISTS (
                        SELECT 1 FROM characters ch
                        WHERE ch.campaign_id = c.id AND ch.player_id = $1
                    )
              )
            "#,
        )
        .bind(user_id)
        .bind(query)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Maps matching the query in campaigns the user can read.
    pub async fn search_maps(
        &self,
        user_id: Uuid,
        query: &str,
    ) -> Result<Vec<SearchRowEntity>, sqlx::Error> {
        let timer = QueryTimer::new("search_maps");
        let result = sqlx::query_as::<_, SearchRowEntity>(
            r#"
            SELECT DISTINCT m.id, m.name, m.description, m.campaign_id, NULL::uuid AS map_id
            FROM maps m
            JOIN campaigns c ON m.campaign_id = c.id
            WHERE m.search_vector @@ websearch_to_tsquery('english', $2)
              AND (
                    c.dm_id = $1
                    OR EXISTS (
                        SELECT 1 FROM characters ch
                        WHERE ch.campaign_id = c.id AND ch.player_id = $1
                    )
              )
            "#,
        )
        .bind(user_id)
        .bind(query)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Locations matching the query in campaigns the user can read.
    ///
    /// Hidden locations only surface for the owning campaign's DM, even
    /// when the text matches.
    pub async fn search_locations(
        &self,
        user_id: Uuid,
        query: &str,
    ) -> Result<Vec<SearchRowEntity>, sqlx::Error> {
        let timer = QueryTimer::new("search_locations");
        let result = sqlx::query_as::<_, SearchRowEntity>(
            r#"
            SELECT DISTINCT l.id, l.name, l.description, m.campaign_id, l.map_id
            FROM locations l
            JOIN maps m ON l.map_id = m.id
            JOIN campaigns c ON m.campaign_id = c.id
            WHERE l.search_vector @@ websearch_to_tsquery('english', $2)
              AND (
                    c.dm_id = $1
                    OR EXISTS (
                        SELECT 1 FROM characters ch
                        WHERE ch.campaign_id = c.id AND ch.player_id = $1
                    )
              )
              AND (l.hidden = false OR c.dm_id = $1)
            "#,
        )
        .bind(user_id)
        .bind(query)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
