//! Campaign domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Represents a campaign run by a single DM.
///
/// The invite code is the sole external-facing token granting join
/// capability; it is generated when the row is inserted and can be rotated
/// by the DM at any time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Campaign {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub dm_id: Uuid,
    #[serde(skip_serializing)] // Only exposed to the DM via CampaignDetail
    pub invite_code: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to create a new campaign.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateCampaignRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[validate(length(max = 10000, message = "Description must be at most 10000 characters"))]
    pub description: Option<String>,

    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: Option<String>,
}

/// Request to update an existing campaign. All fields optional.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateCampaignRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 10000, message = "Description must be at most 10000 characters"))]
    pub description: Option<String>,

    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: Option<String>,

    pub is_active: Option<bool>,
}

/// Summary of a campaign for listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CampaignSummary {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
    pub dm_id: Uuid,
    pub character_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Full campaign detail.
///
/// `invite_code` is present only when the requester is the DM.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CampaignDetail {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub dm_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invite_code: Option<Uuid>,
    pub character_count: i64,
    pub map_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Response for listing campaigns.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListCampaignsResponse {
    pub data: Vec<CampaignSummary>,
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invite_code_not_serialized_on_campaign() {
        let campaign = Campaign {
            id: Uuid::new_v4(),
            name: "Curse of the Amber Throne".to_string(),
            description: String::new(),
            image_url: None,
            is_active: true,
            dm_id: Uuid::new_v4(),
            invite_code: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_string(&campaign).unwrap();
        assert!(!json.contains("invite_code"));
    }

    #[test]
    fn test_create_campaign_request_validation() {
        let valid = CreateCampaignRequest {
            name: "Test".to_string(),
            description: None,
            image_url: None,
        };
        assert!(valid.validate().is_ok());

        let empty_name = CreateCampaignRequest {
            name: String::new(),
            description: None,
            image_url: None,
        };
        assert!(empty_name.validate().is_err());

        let bad_url = CreateCampaignRequest {
            name: "Test".to_string(),
            description: None,
            image_url: Some("not a url".to_string()),
        };
        assert!(bad_url.validate().is_err());
    }

    #[test]
    fn test_campaign_detail_hides_absent_invite_code() {
        let detail = CampaignDetail {
            id: Uuid::new_v4(),
            name: "Test".to_string(),
            description: String::new(),
            image_url: None,
            is_active: true,
            dm_id: Uuid::new_v4(),
            invite_code: None,
            character_count: 0,
            map_count: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_string(&detail).unwrap();
        assert!(!json.contains("invite_code"));
    }
}
