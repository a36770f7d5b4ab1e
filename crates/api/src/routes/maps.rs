//! Map management routes.
//!
//! Reads are open to any campaign member; all mutation is DM-only.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use domain::models::map::{CreateMapRequest, ListMapsResponse, UpdateMapRequest};
use domain::models::Map;
use domain::services::access;
use persistence::repositories::MapRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;
use crate::services::auth::load_user;

/// Loads a map and checks it belongs to the campaign in the path.
async fn find_map_in_campaign(
    repo: &MapRepository,
    campaign_id: Uuid,
    map_id: Uuid,
) -> Result<Map, ApiError> {
    let map: Map = repo
        .find_by_id(map_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Map not found".to_string()))?
        .into();

    if map.campaign_id != campaign_id {
        // A map reached through the wrong campaign is not found, not forbidden
        return Err(ApiError::NotFound("Map not found".to_string()));
    }

    Ok(map)
}

/// Create a map. DM only.
///
/// POST /api/v1/campaigns/:campaign_id/maps
pub async fn create_map(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(campaign_id): Path<Uuid>,
    Json(request): Json<CreateMapRequest>,
) -> Result<(StatusCode, Json<Map>), ApiError> {
    request.validate()?;

    // Creation is gated on the flag for every content kind
    let user = load_user(&state.pool, user_auth.user_id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Unknown user".to_string()))?;
    if !access::can_create(&user) {
        return Err(ApiError::Forbidden(
            "You are not allowed to create content".to_string(),
        ));
    }

    state
        .access
        .require_campaign_dm(user_auth.user_id, campaign_id)
        .await?;

    let repo = MapRepository::new(state.pool.clone());
    let map = repo
        .create_map(
            campaign_id,
            &request.name,
            request.description.as_deref().unwrap_or(""),
            request.image_url.as_deref(),
            request.resolution_width,
            request.resolution_height,
        )
        .await?;

    tracing::info!(map_id = %map.id, campaign_id = %campaign_id, "Map created");

    Ok((StatusCode::CREATED, Json(map.into())))
}

/// List a campaign's maps. Any campaign member.
///
/// GET /api/v1/campaigns/:campaign_id/maps
pub async fn list_maps(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(campaign_id): Path<Uuid>,
) -> Result<Json<ListMapsResponse>, ApiError> {
    state
        .access
        .require_read_access(user_auth.user_id, campaign_id)
        .await?;

    let repo = MapRepository::new(state.pool.clone());
    let maps = repo.list_for_campaign(campaign_id).await?;

    let data: Vec<Map> = maps.into_iter().map(Into::into).collect();
    let count = data.len();
    Ok(Json(ListMapsResponse { data, count }))
}

/// Map detail. Any campaign member.
///
/// GET /api/v1/campaigns/:campaign_id/maps/:map_id
pub async fn get_map(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path((campaign_id, map_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Map>, ApiError> {
    state
        .access
        .require_read_access(user_auth.user_id, campaign_id)
        .await?;

    let repo = MapRepository::new(state.pool.clone());
    let map = find_map_in_campaign(&repo, campaign_id, map_id).await?;

    Ok(Json(map))
}

/// Update a map. DM only.
///
/// PUT /api/v1/campaigns/:campaign_id/maps/:map_id
pub async fn update_map(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path((campaign_id, map_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<UpdateMapRequest>,
) -> Result<Json<Map>, ApiError> {
    request.validate()?;

    state
        .access
        .require_campaign_dm(user_auth.user_id, campaign_id)
        .await?;

    let repo = MapRepository::new(state.pool.clone());
    find_map_in_campaign(&repo, campaign_id, map_id).await?;

    let updated: Map = repo
        .update_map(
            map_id,
            request.name.as_deref(),
            request.description.as_deref(),
            request.image_url.as_deref(),
            request.resolution_width,
            request.resolution_height,
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Map not found".to_string()))?
        .into();

    tracing::info!(map_id = %map_id, campaign_id = %campaign_id, "Map updated");

    Ok(Json(updated))
}

/// Delete a map and its locations. DM only.
///
/// DELETE /api/v1/campaigns/:campaign_id/maps/:map_id
pub async fn delete_map(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path((campaign_id, map_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    state
        .access
        .require_campaign_dm(user_auth.user_id, campaign_id)
        .await?;

    let repo = MapRepository::new(state.pool.clone());
    find_map_in_campaign(&repo, campaign_id, map_id).await?;

    repo.delete_map(map_id).await?;

    tracing::info!(map_id = %map_id, campaign_id = %campaign_id, "Map deleted");

    Ok(StatusCode::NO_CONTENT)
}
