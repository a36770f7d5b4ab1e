//! Character domain models.
//!
//! A character is created by a user and may be assigned to a player and a
//! campaign. A character without a player is an NPC; the two states are
//! mutually exclusive and [`Character::resolve_player`] is the single place
//! that rule is applied.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Represents a character, player-controlled or NPC.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Character {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
    /// Campaign the character currently belongs to, if any.
    pub campaign_id: Option<Uuid>,
    /// Controlling player. None means NPC.
    pub player_id: Option<Uuid>,
    /// User who created the character. Fixed at creation.
    pub creator_id: Uuid,
    pub is_npc: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Character {
    /// True iff the character has no controlling player.
    pub fn is_npc(&self) -> bool {
        self.player_id.is_none()
    }

    /// Applies the NPC/player exclusion rule for a write.
    ///
    /// Returns the `player_id` to persist: None when `is_npc` is set, the
    /// acting user otherwise.
    pub fn resolve_player(is_npc: bool, actor_id: Uuid) -> Option<Uuid> {
        if is_npc {
            None
        } else {
            Some(actor_id)
        }
    }
}

/// Request to create a new character.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateCharacterRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[validate(length(max = 10000, message = "Description must be at most 10000 characters"))]
    pub description: Option<String>,

    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: Option<String>,

    /// Create as an NPC (no controlling player).
    #[serde(default)]
    pub is_npc: bool,
}

/// Request to update an existing character.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateCharacterRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 10000, message = "Description must be at most 10000 characters"))]
    pub description: Option<String>,

    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: Option<String>,

    /// Switching to true detaches the player; switching to false assigns
    /// the acting user as player.
    pub is_npc: Option<bool>,
}

/// Summary of a character for listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CharacterSummary {
    pub id: Uuid,
    pub name: String,
    pub image_url: Option<String>,
    pub campaign_id: Option<Uuid>,
    pub player_id: Option<Uuid>,
    pub is_npc: bool,
}

/// Response for listing characters.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListCharactersResponse {
    pub data: Vec<CharacterSummary>,
    pub count: usize,
}

/// Query parameters for campaign-scoped character listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ListCharactersQuery {
    /// Optional case-insensitive name filter.
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_player_npc_detaches() {
        let actor = Uuid::new_v4();
        assert_eq!(Character::resolve_player(true, actor), None);
    }

    #[test]
    fn test_resolve_player_assigns_actor() {
        let actor = Uuid::new_v4();
        assert_eq!(Character::resolve_player(false, actor), Some(actor));
    }

    #[test]
    fn test_is_npc_derived_from_player() {
        let character = Character {
            id: Uuid::new_v4(),
            name: "Barkeep".to_string(),
            description: String::new(),
            image_url: None,
            campaign_id: None,
            player_id: None,
            creator_id: Uuid::new_v4(),
            is_npc: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(character.is_npc());
    }

    #[test]
    fn test_create_character_request_defaults_to_pc() {
        let json = r#"{"name": "Grog"}"#;
        let request: CreateCharacterRequest = serde_json::from_str(json).unwrap();
        assert!(!request.is_npc);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_character_request_rejects_empty_name() {
        let request = CreateCharacterRequest {
            name: String::new(),
            description: None,
            image_url: None,
            is_npc: false,
        };
        assert!(request.validate().is_err());
    }
}
