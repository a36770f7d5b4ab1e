//! Map repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::MapEntity;
use crate::metrics::QueryTimer;

/// Repository for map-related database operations.
#[derive(Clone)]
pub struct MapRepository {
    pool: PgPool,
}

impl MapRepository {
    /// Creates a new MapRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create a map under a campaign.
    pub async fn create_map(
        &self,
        campaign_id: Uuid,
        name: &str,
        description: &str,
        image_url: Option<&str>,
        resolution_width: Option<i32>,
        resolution_height: Option<i32>,
    ) -> Result<MapEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_map");
        let result = sqlx::query_as::<_, MapEntity>(
            r#"
            INSERT INTO maps (campaign_id, name, description, image_url, resolution_width, resolution_height)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, description, image_url, resolution_width, resolution_height,
                      campaign_id, created_at, updated_at
            "#,
        )
        .bind(campaign_id)
        .bind(name)
        .bind(description)
        .bind(image_url)
        .bind(resolution_width)
        .bind(resolution_height)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a map by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<MapEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_map_by_id");
        let result = sqlx::query_as::<_, MapEntity>(
            r#"
            SELECT id, name, description, image_url, resolution_width, resolution_height,
                   campaign_id, created_at, updated_at
            FROM maps
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List a campaign's maps.
    pub async fn list_for_campaign(
        &self,
        campaign_id: Uuid,
    ) -> Result<Vec<MapEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_maps_for_campaign");
        let result = sqlx::query_as::<_, MapEntity>(
            r#"
            SELECT id, name, description, image_url, resolution_width, resolution_height,
                   campaign_id, created_at, updated_at
            FROM maps
            WHERE campaign_id = $1
            ORDER BY name
            "#,
        )
        .bind(campaign_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update a map's editable fields.
    pub async fn update_map(
        &self,
        id: Uuid,
        name: Option<&str>,
        description: Option<&str>,
        image_url: Option<&str>,
        resolution_width: Option<i32>,
        resolution_height: Option<i32>,
    ) -> Result<Option<MapEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_map");
        let result = sqlx::query_as::<_, MapEntity>(
            r#"
            UPDATE maps
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                image_url = COALESCE($4, image_url),
                resolution_width = COALESCE($5, resolution_width),
                resolution_height = COALESCE($6, resolution_height),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, description, image_url, resolution_width, resolution_height,
                      campaign_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .bind(image_url)
        .bind(resolution_width)
        .bind(resolution_height)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a map. Its locations cascade.
    pub async fn delete_map(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_map");
        let result = sqlx::query(
            r#"
            DELETE FROM maps WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map(|r| r.rows_affected());
        timer.record();
        result
    }
}
