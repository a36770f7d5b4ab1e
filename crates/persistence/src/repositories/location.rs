//! Location repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::LocationEntity;
use crate::metrics::QueryTimer;

/// Repository for location-related database operations.
#[derive(Clone)]
pub struct LocationRepository {
    pool: PgPool,
}

impl LocationRepository {
    /// Creates a new LocationRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create a location on a map.
    pub async fn create_location(
        &self,
        map_id: Uuid,
        name: &str,
        description: &str,
        longitude: f64,
        latitude: f64,
        hidden: bool,
        image_url: Option<&str>,
    ) -> Result<LocationEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_location");
        let result = sqlx::query_as::<_, LocationEntity>(
            r#"
            INSERT INTO locations (map_id, name, description, longitude, latitude, hidden, image_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, name, description, longitude, latitude, hidden, image_url,
                      map_id, created_at, updated_at
            "#,
        )
        .bind(map_id)
        .bind(name)
        .bind(description)
        .bind(longitude)
        .bind(latitude)
        .bind(hidden)
        .bind(image_url)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a location by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<LocationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_location_by_id");
        let result = sqlx::query_as::<_, LocationEntity>(
            r#"
            SELECT id, name, description, longitude, latitude, hidden, image_url,
                   map_id, created_at, updated_at
            FROM locations
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List a map's locations.
    ///
    /// Hidden rows are included only when `include_hidden` is set (DM view).
    pub async fn list_for_map(
        &self,
        map_id: Uuid,
        include_hidden: bool,
    ) -> Result<Vec<LocationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_locations_for_map");
        let result = sqlx::query_as::<_, LocationEntity>(
            r#"
            SELECT id, name, description, longitude, latitude, hidden, image_url,
                   map_id, created_at, updated_at
            FROM locations
            WHERE map_id = $1
              AND (hidden = false OR $2)
            ORDER BY name
            "#,
        )
        .bind(map_id)
        .bind(include_hidden)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update a location's editable fields.
    pub async fn update_location(
        &self,
        id: Uuid,
        name: Option<&str>,
        description: Option<&str>,
        longitude: Option<f64>,
        latitude: Option<f64>,
        hidden: Option<bool>,
        image_url: Option<&str>,
    ) -> Result<Option<LocationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_location");
        let result = sqlx::query_as::<_, LocationEntity>(
            r#"
            UPDATE locations
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                longitude = COALESCE($4, longitude),
                latitude = COALESCE($5, latitude),
                hidden = COALESCE($6, hidden),
                image_url = COALESCE($7, image_url),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, description, longitude, latitude, hidden, image_url,
                      map_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .bind(longitude)
        .bind(latitude)
        .bind(hidden)
        .bind(image_url)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a location.
    pub async fn delete_location(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_location");
        let result = sqlx::query(
            r#"
            DELETE FROM locations WHERE id = $1
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
