//! Location entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the locations table.
#[derive(Debug, Clone, FromRow)]
pub struct LocationEntity {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub longitude: f64,
    pub latitude: f64,
    pub hidden: bool,
    pub image_url: Option<String>,
    pub map_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<LocationEntity> for domain::models::Location {
    fn from(entity: LocationEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            longitude: entity.longitude,
            latitude: entity.latitude,
            hidden: entity.hidden,
            image_url: entity.image_url,
            map_id: entity.map_id,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
