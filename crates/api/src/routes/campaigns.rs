//! Campaign management routes.
//!
//! Creation needs both permission flags (`can_create` and `can_be_dm`);
//! reads are open to the DM and members; mutation is DM-only.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use domain::models::campaign::{
    CampaignDetail, CampaignSummary, CreateCampaignRequest, ListCampaignsResponse,
    UpdateCampaignRequest,
};
use domain::models::invite::generate_invite_code;
use domain::services::access;
use persistence::repositories::CampaignRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;
use crate::services::auth::load_user;

/// Create a new campaign. The creator becomes its DM.
///
/// POST /api/v1/campaigns
pub async fn create_campaign(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Json(request): Json<CreateCampaignRequest>,
) -> Result<(StatusCode, Json<CampaignDetail>), ApiError> {
    request.validate()?;

    let user = load_user(&state.pool, user_auth.user_id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Unknown user".to_string()))?;

    if !access::can_create(&user) {
        return Err(ApiError::Forbidden(
            "You are not allowed to create content".to_string(),
        ));
    }
    if !access::can_be_dm(&user) {
        return Err(ApiError::Forbidden(
            "You are not allowed to run a campaign".to_string(),
        ));
    }

    let repo = CampaignRepository::new(state.pool.clone());
    let campaign = repo
        .create_campaign(
            &request.name,
            request.description.as_deref().unwrap_or(""),
            request.image_url.as_deref(),
            user.id,
            generate_invite_code(),
        )
        .await?;

    tracing::info!(
        campaign_id = %campaign.id,
        dm_id = %user.id,
        "Campaign created"
    );

    Ok((
        StatusCode::CREATED,
        Json(CampaignDetail {
            id: campaign.id,
            name: campaign.name,
            description: campaign.description,
            image_url: campaign.image_url,
            is_active: campaign.is_active,
            dm_id: campaign.dm_id,
            invite_code: Some(campaign.invite_code),
            character_count: 0,
            map_count: 0,
            created_at: campaign.created_at,
            updated_at: campaign.updated_at,
        }),
    ))
}

/// List active campaigns the user is DM of or plays in.
///
/// GET /api/v1/campaigns
pub async fn list_campaigns(
    State(state): State<AppState>,
    user_auth: UserAuth,
) -> Result<Json<ListCampaignsResponse>, ApiError> {
    let repo = CampaignRepository::new(state.pool.clone());
    let campaigns = repo.list_for_user(user_auth.user_id).await?;

    let summaries: Vec<CampaignSummary> = campaigns
        .into_iter()
        .map(|c| CampaignSummary {
            id: c.id,
            name: c.name,
            description: c.description,
            image_url: c.image_url,
            dm_id: c.dm_id,
            character_count: c.character_count,
            created_at: c.created_at,
        })
        .collect();

    let count = summaries.len();
    Ok(Json(ListCampaignsResponse {
        data: summaries,
        count,
    }))
}

/// Campaign detail. DM or member; the invite code is shown to the DM only.
///
/// GET /api/v1/campaigns/:campaign_id
pub async fn get_campaign(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(campaign_id): Path<Uuid>,
) -> Result<Json<CampaignDetail>, ApiError> {
    state
        .access
        .require_read_access(user_auth.user_id, campaign_id)
        .await?;

    let repo = CampaignRepository::new(state.pool.clone());
    let campaign = repo
        .find_by_id_with_counts(campaign_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Campaign not found".to_string()))?;

    let is_dm = campaign.dm_id == user_auth.user_id;

    Ok(Json(CampaignDetail {
        id: campaign.id,
        name: campaign.name,
        description: campaign.description,
        image_url: campaign.image_url,
        is_active: campaign.is_active,
        dm_id: campaign.dm_id,
        invite_code: is_dm.then_some(campaign.invite_code),
        character_count: campaign.character_count,
        map_count: campaign.map_count,
        created_at: campaign.created_at,
        updated_at: campaign.updated_at,
    }))
}

/// Update a campaign. DM only.
///
/// PUT /api/v1/campaigns/:campaign_id
pub async fn update_campaign(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(campaign_id): Path<Uuid>,
    Json(request): Json<UpdateCampaignRequest>,
) -> Result<Json<CampaignDetail>, ApiError> {
    request.validate()?;

    state
        .access
        .require_campaign_dm(user_auth.user_id, campaign_id)
        .await?;

    let repo = CampaignRepository::new(state.pool.clone());
    repo.update_campaign(
        campaign_id,
        request.name.as_deref(),
        request.description.as_deref(),
        request.image_url.as_deref(),
        request.is_active,
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Campaign not found".to_string()))?;

    tracing::info!(campaign_id = %campaign_id, user_id = %user_auth.user_id, "Campaign updated");

    let campaign = repo
        .find_by_id_with_counts(campaign_id)
        .await?
        .ok_or_else(|| ApiError::Internal("Failed to fetch updated campaign".to_string()))?;

    Ok(Json(CampaignDetail {
        id: campaign.id,
        name: campaign.name,
        description: campaign.description,
        image_url: campaign.image_url,
        is_active: campaign.is_active,
        dm_id: campaign.dm_id,
        invite_code: Some(campaign.invite_code),
        character_count: campaign.character_count,
        map_count: campaign.map_count,
        created_at: campaign.created_at,
        updated_at: campaign.updated_at,
    }))
}

/// Delete a campaign. DM only. Characters are detached, maps cascade.
///
/// DELETE /api/v1/campaigns/:campaign_id
pub async fn delete_campaign(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(campaign_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state
        .access
        .require_campaign_dm(user_auth.user_id, campaign_id)
        .await?;

    let repo = CampaignRepository::new(state.pool.clone());
    repo.delete_campaign(campaign_id).await?;

    // Former members' memos for this campaign age out via TTL; the DM's own
    // entry can be dropped right away.
    state.access.invalidate(user_auth.user_id, campaign_id);

    tracing::info!(campaign_id = %campaign_id, user_id = %user_auth.user_id, "Campaign deleted");

    Ok(StatusCode::NO_CONTENT)
}
