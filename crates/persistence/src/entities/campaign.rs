//! Campaign entities (database row mappings).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the campaigns table.
#[derive(Debug, Clone, FromRow)]
pub struct CampaignEntity {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub dm_id: Uuid,
    pub invite_code: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CampaignEntity> for domain::models::Campaign {
    fn from(entity: CampaignEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            image_url: entity.image_url,
            is_active: entity.is_active,
            dm_id: entity.dm_id,
            invite_code: entity.invite_code,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Campaign row joined with child counts, for listing and detail views.
#[derive(Debug, Clone, FromRow)]
pub struct CampaignWithCountsEntity {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub dm_id: Uuid,
    pub invite_code: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub character_count: i64,
    pub map_count: i64,
}
