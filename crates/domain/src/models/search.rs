//! Federated search models.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Entity kind a search hit belongs to.
///
/// The variant order here is the fixed order in which results are merged:
/// characters, then campaigns, maps and locations. No cross-kind ranking is
/// applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchKind {
    Character,
    Campaign,
    Map,
    Location,
}

impl std::fmt::Display for SearchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Character => write!(f, "character"),
            Self::Campaign => write!(f, "campaign"),
            Self::Map => write!(f, "map"),
            Self::Location => write!(f, "location"),
        }
    }
}

/// One access-filtered full-text match.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SearchHit {
    pub kind: SearchKind,
    pub id: Uuid,
    pub name: String,
    pub description: String,
    /// Owning campaign, where the kind has one (maps, locations, characters
    /// currently in a campaign).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign_id: Option<Uuid>,
    /// Owning map, for location hits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_id: Option<Uuid>,
}

/// Response for the federated search endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SearchResponse {
    pub query: String,
    pub data: Vec<SearchHit>,
    pub count: usize,
}

/// Query parameters for the search endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    pub q: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_kind_display() {
        assert_eq!(SearchKind::Character.to_string(), "character");
        assert_eq!(SearchKind::Location.to_string(), "location");
    }

    #[test]
    fn test_search_hit_omits_absent_parents() {
        let hit = SearchHit {
            kind: SearchKind::Campaign,
            id: Uuid::new_v4(),
            name: "camp".to_string(),
            description: String::new(),
            campaign_id: None,
            map_id: None,
        };
        let json = serde_json::to_string(&hit).unwrap();
        assert!(!json.contains("campaign_id"));
        assert!(!json.contains("map_id"));
    }
}
