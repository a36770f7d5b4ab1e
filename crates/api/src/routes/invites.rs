//! Invite-code join and leave workflow.
//!
//! Holding the code is the invitation; completing the join is restricted to
//! the character's own player. Every membership mutation drops the affected
//! `(user, campaign)` access memo so a cached denial cannot outlive the new
//! relationship.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use domain::models::invite::{generate_invite_code, InviteCodeResponse, JoinCampaignRequest};
use domain::models::Character;
use domain::services::access;
use persistence::repositories::{CampaignRepository, CharacterRepository};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;

/// Attach a character to a campaign by invite code.
///
/// POST /api/v1/characters/:character_id/join
///
/// Only the character's own player may complete the join. Malformed codes
/// fail validation before any lookup; well-formed codes matching no
/// campaign fail with `invalid_invite_code`.
pub async fn join_campaign(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(character_id): Path<Uuid>,
    Json(request): Json<JoinCampaignRequest>,
) -> Result<StatusCode, ApiError> {
    request.validate()?;
    let code = request
        .code()
        .ok_or_else(|| ApiError::Validation("Invite code must be a UUID".to_string()))?;

    let campaign_repo = CampaignRepository::new(state.pool.clone());
    let campaign = campaign_repo
        .find_by_invite_code(code)
        .await?
        .ok_or(ApiError::InvalidInviteCode)?;

    let character_repo = CharacterRepository::new(state.pool.clone());
    let character: Character = character_repo
        .find_by_id(character_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Character not found".to_string()))?
        .into();

    if !access::is_character_owner(user_auth.user_id, &character) {
        return Err(ApiError::Forbidden(
            "Only the character's player may join a campaign with it".to_string(),
        ));
    }

    let previous_campaign = character.campaign_id;
    character_repo
        .set_campaign(character_id, Some(campaign.id))
        .await?;

    // The player's access to the joined campaign changed; if this was a
    // move, their standing in the left campaign changed too.
    state.access.invalidate(user_auth.user_id, campaign.id);
    if let Some(old_campaign_id) = previous_campaign {
        state.access.invalidate(user_auth.user_id, old_campaign_id);
    }

    tracing::info!(
        character_id = %character_id,
        campaign_id = %campaign.id,
        user_id = %user_auth.user_id,
        "Character joined campaign"
    );

    Ok(StatusCode::NO_CONTENT)
}

/// Detach a character from its campaign.
///
/// POST /api/v1/characters/:character_id/leave
///
/// Allowed to the character's controller or the campaign's DM. Leaving
/// while already detached is a no-op success for the controller.
pub async fn leave_campaign(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(character_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let character_repo = CharacterRepository::new(state.pool.clone());
    let character: Character = character_repo
        .find_by_id(character_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Character not found".to_string()))?
        .into();

    let mut permitted = access::is_character_controller(user_auth.user_id, &character);

    if !permitted {
        if let Some(campaign_id) = character.campaign_id {
            let campaign_repo = CampaignRepository::new(state.pool.clone());
            if let Some(campaign) = campaign_repo.find_by_id(campaign_id).await? {
                permitted = access::is_campaign_dm(user_auth.user_id, &campaign.into());
            }
        }
    }

    if !permitted {
        return Err(ApiError::Forbidden(
            "Only the character's player or the campaign DM may remove it".to_string(),
        ));
    }

    // Already detached: nothing to persist, still a success
    if let Some(campaign_id) = character.campaign_id {
        character_repo.set_campaign(character_id, None).await?;

        if let Some(player_id) = character.player_id {
            state.access.invalidate(player_id, campaign_id);
        }

        tracing::info!(
            character_id = %character_id,
            campaign_id = %campaign_id,
            user_id = %user_auth.user_id,
            "Character left campaign"
        );
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Rotate a campaign's invite code. DM only.
///
/// POST /api/v1/campaigns/:campaign_id/invite-code
pub async fn rotate_invite_code(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(campaign_id): Path<Uuid>,
) -> Result<Json<InviteCodeResponse>, ApiError> {
    state
        .access
        .require_campaign_dm(user_auth.user_id, campaign_id)
        .await?;

    let repo = CampaignRepository::new(state.pool.clone());
    let invite_code = repo
        .rotate_invite_code(campaign_id, generate_invite_code())
        .await?
        .ok_or_else(|| ApiError::NotFound("Campaign not found".to_string()))?;

    tracing::info!(campaign_id = %campaign_id, user_id = %user_auth.user_id, "Invite code rotated");

    Ok(Json(InviteCodeResponse {
        campaign_id,
        invite_code,
    }))
}
