//! Map entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the maps table.
#[derive(Debug, Clone, FromRow)]
pub struct MapEntity {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
    pub resolution_width: Option<i32>,
    pub resolution_height: Option<i32>,
    pub campaign_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MapEntity> for domain::models::Map {
    fn from(entity: MapEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            image_url: entity.image_url,
            resolution_width: entity.resolution_width,
            resolution_height: entity.resolution_height,
            campaign_id: entity.campaign_id,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
