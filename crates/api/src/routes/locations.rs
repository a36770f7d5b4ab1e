//! Location management routes.
//!
//! Any campaign member may create, read, update and delete locations;
//! hidden locations are the exception and stay DM-only for reads.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use domain::models::location::{
    CreateLocationRequest, ListLocationsResponse, UpdateLocationRequest,
};
use domain::models::Location;
use domain::services::access;
use persistence::repositories::{LocationRepository, MapRepository};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;
use crate::services::auth::load_user;

/// Verifies the map belongs to the campaign in the path, and that the
/// user may read the campaign. Returns whether the user is the DM.
async fn check_campaign_and_map(
    state: &AppState,
    user_id: Uuid,
    campaign_id: Uuid,
    map_id: Uuid,
) -> Result<bool, ApiError> {
    state.access.require_read_access(user_id, campaign_id).await?;

    let map_repo = MapRepository::new(state.pool.clone());
    let map = map_repo
        .find_by_id(map_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Map not found".to_string()))?;
    if map.campaign_id != campaign_id {
        return Err(ApiError::NotFound("Map not found".to_string()));
    }

    let campaign_repo = persistence::repositories::CampaignRepository::new(state.pool.clone());
    let campaign = campaign_repo
        .find_by_id(campaign_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Campaign not found".to_string()))?;

    Ok(access::is_campaign_dm(user_id, &campaign.into()))
}

/// Create a location. Any campaign member.
///
/// POST /api/v1/campaigns/:campaign_id/maps/:map_id/locations
pub async fn create_location(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path((campaign_id, map_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<CreateLocationRequest>,
) -> Result<(StatusCode, Json<Location>), ApiError> {
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

    check_campaign_and_map(&state, user_auth.user_id, campaign_id, map_id).await?;

    let repo = LocationRepository::new(state.pool.clone());
    let location = repo
        .create_location(
            map_id,
            &request.name,
            request.description.as_deref().unwrap_or(""),
            request.longitude,
            request.latitude,
            request.hidden,
            request.image_url.as_deref(),
        )
        .await?;

    tracing::info!(
        location_id = %location.id,
        map_id = %map_id,
        user_id = %user_auth.user_id,
        "Location created"
    );

    Ok((StatusCode::CREATED, Json(location.into())))
}

/// List a map's locations. Hidden rows are omitted unless the user is
/// the DM.
///
/// GET /api/v1/campaigns/:campaign_id/maps/:map_id/locations
pub async fn list_locations(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path((campaign_id, map_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ListLocationsResponse>, ApiError> {
    let is_dm = check_campaign_and_map(&state, user_auth.user_id, campaign_id, map_id).await?;

    let repo = LocationRepository::new(state.pool.clone());
    let locations = repo.list_for_map(map_id, is_dm).await?;

    let data: Vec<Location> = locations.into_iter().map(Into::into).collect();
    let count = data.len();
    Ok(Json(ListLocationsResponse { data, count }))
}

/// Location detail. Hidden locations resolve for the DM only; other
/// members get a denial even though they can read the campaign.
///
/// GET /api/v1/campaigns/:campaign_id/maps/:map_id/locations/:location_id
pub async fn get_location(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path((campaign_id, map_id, location_id)): Path<(Uuid, Uuid, Uuid)>,
) -> Result<Json<Location>, ApiError> {
    let is_dm = check_campaign_and_map(&state, user_auth.user_id, campaign_id, map_id).await?;

    let repo = LocationRepository::new(state.pool.clone());
    let location: Location = repo
        .find_by_id(location_id)
        .await?
        .filter(|l| l.map_id == map_id)
        .ok_or_else(|| ApiError::NotFound("Location not found".to_string()))?
        .into();

    if !access::can_read_location(location.hidden, is_dm, true) {
        return Err(ApiError::Forbidden(
            "This location is hidden".to_string(),
        ));
    }

    Ok(Json(location))
}

/// Update a location. Any campaign member; hidden locations only by
/// someone who can read them.
///
/// PUT /api/v1/campaigns/:campaign_id/maps/:map_id/locations/:location_id
pub async fn update_location(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path((campaign_id, map_id, location_id)): Path<(Uuid, Uuid, Uuid)>,
    Json(request): Json<UpdateLocationRequest>,
) -> Result<Json<Location>, ApiError> {
    request.validate()?;

    let is_dm = check_campaign_and_map(&state, user_auth.user_id, campaign_id, map_id).await?;

    let repo = LocationRepository::new(state.pool.clone());
    let existing = repo
        .find_by_id(location_id)
        .await?
        .filter(|l| l.map_id == map_id)
        .ok_or_else(|| ApiError::NotFound("Location not found".to_string()))?;

    if !access::can_read_location(existing.hidden, is_dm, true) {
        return Err(ApiError::Forbidden(
            "This location is hidden".to_string(),
        ));
    }

    let updated: Location = repo
        .update_location(
            location_id,
            request.name.as_deref(),
            request.description.as_deref(),
            request.longitude,
            request.latitude,
            request.hidden,
            request.image_url.as_deref(),
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Location not found".to_string()))?
        .into();

    tracing::info!(
        location_id = %location_id,
        user_id = %user_auth.user_id,
        "Location updated"
    );

    Ok(Json(updated))
}

/// Delete a location. Any campaign member; hidden locations only by
/// someone who can read them.
///
/// DELETE /api/v1/campaigns/:campaign_id/maps/:map_id/locations/:location_id
pub async fn delete_location(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path((campaign_id, map_id, location_id)): Path<(Uuid, Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    let is_dm = check_campaign_and_map(&state, user_auth.user_id, campaign_id, map_id).await?;

    let repo = LocationRepository::new(state.pool.clone());
    let existing = repo
        .find_by_id(location_id)
        .await?
        .filter(|l| l.map_id == map_id)
        .ok_or_else(|| ApiError::NotFound("Location not found".to_string()))?;

    if !access::can_read_location(existing.hidden, is_dm, true) {
        return Err(ApiError::Forbidden(
            "This location is hidden".to_string(),
        ));
    }

    repo.delete_location(location_id).await?;

    tracing::info!(
        location_id = %location_id,
        user_id = %user_auth.user_id,
        "Location deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}
