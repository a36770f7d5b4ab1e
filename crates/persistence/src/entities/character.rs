//! Character entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the characters table.
#[derive(Debug, Clone, FromRow)]
pub struct CharacterEntity {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
    pub campaign_id: Option<Uuid>,
    pub player_id: Option<Uuid>,
    pub creator_id: Uuid,
    pub is_npc: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CharacterEntity> for domain::models::Character {
    fn from(entity: CharacterEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            image_url: entity.image_url,
            campaign_id: entity.campaign_id,
            player_id: entity.player_id,
            creator_id: entity.creator_id,
            is_npc: entity.is_npc,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
