//! Map domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Represents a map belonging to exactly one campaign.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Map {
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

/// Request to create a new map. DM only.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateMapRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[validate(length(max = 10000, message = "Description must be at most 10000 characters"))]
    pub description: Option<String>,

    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: Option<String>,

    #[validate(range(min = 1, message = "Resolution must be positive"))]
    pub resolution_width: Option<i32>,

    #[validate(range(min = 1, message = "Resolution must be positive"))]
    pub resolution_height: Option<i32>,
}

/// Request to update an existing map. DM only.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateMapRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 10000, message = "Description must be at most 10000 characters"))]
    pub description: Option<String>,

    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: Option<String>,

    #[validate(range(min = 1, message = "Resolution must be positive"))]
    pub resolution_width: Option<i32>,

    #[validate(range(min = 1, message = "Resolution must be positive"))]
    pub resolution_height: Option<i32>,
}

/// Response for listing maps.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListMapsResponse {
    pub data: Vec<Map>,
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_map_request_validation() {
        let valid = CreateMapRequest {
            name: "The Sword Coast".to_string(),
            description: None,
            image_url: None,
            resolution_width: Some(4096),
            resolution_height: Some(2048),
        };
        assert!(valid.validate().is_ok());

        let zero_resolution = CreateMapRequest {
            name: "Bad".to_string(),
            description: None,
            image_url: None,
            resolution_width: Some(0),
            resolution_height: None,
        };
        assert!(zero_resolution.validate().is_err());
    }
}
