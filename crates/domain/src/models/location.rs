//! Location domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Represents a point of interest on a map.
///
/// Hidden locations are visible only to the owning campaign's DM.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Location {
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

/// Request to create a new location. Any campaign member.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateLocationRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[validate(length(max = 10000, message = "Description must be at most 10000 characters"))]
    pub description: Option<String>,

    #[validate(custom(function = "shared::validation::validate_longitude"))]
    #[serde(default)]
    pub longitude: f64,

    #[validate(custom(function = "shared::validation::validate_latitude"))]
    #[serde(default)]
    pub latitude: f64,

    /// Hidden locations are withheld from non-DM reads and search.
    #[serde(default)]
    pub hidden: bool,

    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: Option<String>,
}

/// Request to update an existing location. Any campaign member.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateLocationRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 10000, message = "Description must be at most 10000 characters"))]
    pub description: Option<String>,

    #[validate(range(min = -180.0, max = 180.0, message = "Longitude must be between -180 and 180"))]
    pub longitude: Option<f64>,

    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub latitude: Option<f64>,

    pub hidden: Option<bool>,

    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: Option<String>,
}

/// Response for listing locations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListLocationsResponse {
    pub data: Vec<Location>,
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_location_request_defaults() {
        let json = r#"{"name": "The Yawning Portal"}"#;
        let request: CreateLocationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.longitude, 0.0);
        assert_eq!(request.latitude, 0.0);
        assert!(!request.hidden);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_location_request_rejects_out_of_range() {
        let request = CreateLocationRequest {
            name: "Off the map".to_string(),
            description: None,
            longitude: 181.0,
            latitude: 0.0,
            hidden: false,
            image_url: None,
        };
        assert!(request.validate().is_err());
    }
}
