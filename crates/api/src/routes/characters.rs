//! Character management routes.
//!
//! Characters are mutated by their controller: the owning player, or the
//! creator while the character is an NPC. Reads additionally open up to
//! anyone with read access to the character's campaign.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use domain::models::character::{
    CharacterSummary, CreateCharacterRequest, ListCharactersQuery, ListCharactersResponse,
    UpdateCharacterRequest,
};
use domain::models::Character;
use domain::services::access;
use persistence::repositories::CharacterRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;
use crate::services::auth::load_user;

fn summarize(characters: Vec<persistence::entities::CharacterEntity>) -> ListCharactersResponse {
    let data: Vec<CharacterSummary> = characters
        .into_iter()
        .map(|c| CharacterSummary {
            id: c.id,
            name: c.name,
            image_url: c.image_url,
            campaign_id: c.campaign_id,
            player_id: c.player_id,
            is_npc: c.is_npc,
        })
        .collect();
    let count = data.len();
    ListCharactersResponse { data, count }
}

/// Create a character. The creator owns it; unless it is an NPC, the
/// creator also becomes its player.
///
/// POST /api/v1/characters
pub async fn create_character(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Json(request): Json<CreateCharacterRequest>,
) -> Result<(StatusCode, Json<Character>), ApiError> {
    request.validate()?;

    let user = load_user(&state.pool, user_auth.user_id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Unknown user".to_string()))?;

    if !access::can_create(&user) {
        return Err(ApiError::Forbidden(
            "You are not allowed to create content".to_string(),
        ));
    }

    let player_id = Character::resolve_player(request.is_npc, user.id);

    let repo = CharacterRepository::new(state.pool.clone());
    let character = repo
        .create_character(
            &request.name,
            request.description.as_deref().unwrap_or(""),
            request.image_url.as_deref(),
            user.id,
            player_id,
            request.is_npc,
        )
        .await?;

    tracing::info!(
        character_id = %character.id,
        creator_id = %user.id,
        is_npc = character.is_npc,
        "Character created"
    );

    Ok((StatusCode::CREATED, Json(character.into())))
}

/// List the user's own characters (created or played by them).
///
/// GET /api/v1/characters
pub async fn list_characters(
    State(state): State<AppState>,
    user_auth: UserAuth,
) -> Result<Json<ListCharactersResponse>, ApiError> {
    let repo = CharacterRepository::new(state.pool.clone());
    let characters = repo.list_for_user(user_auth.user_id).await?;
    Ok(Json(summarize(characters)))
}

/// List a campaign's characters. Campaign members only; supports an
/// optional name filter.
///
/// GET /api/v1/campaigns/:campaign_id/characters
pub async fn list_campaign_characters(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(campaign_id): Path<Uuid>,
    Query(query): Query<ListCharactersQuery>,
) -> Result<Json<ListCharactersResponse>, ApiError> {
    state
        .access
        .require_read_access(user_auth.user_id, campaign_id)
        .await?;

    let repo = CharacterRepository::new(state.pool.clone());
    let characters = repo
        .list_for_campaign(campaign_id, query.search.as_deref())
        .await?;
    Ok(Json(summarize(characters)))
}

/// Character detail. Controller, or anyone who can read its campaign.
///
/// GET /api/v1/characters/:character_id
pub async fn get_character(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(character_id): Path<Uuid>,
) -> Result<Json<Character>, ApiError> {
    let repo = CharacterRepository::new(state.pool.clone());
    let character: Character = repo
        .find_by_id(character_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Character not found".to_string()))?
        .into();

    if !state
        .access
        .can_read_character(user_auth.user_id, &character)
        .await?
    {
        return Err(ApiError::Forbidden(
            "You do not have access to this character".to_string(),
        ));
    }

    Ok(Json(character))
}

/// Update a character. Controller only. Toggling `is_npc` applies the
/// player/NPC exclusion rule.
///
/// PUT /api/v1/characters/:character_id
pub async fn update_character(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(character_id): Path<Uuid>,
    Json(request): Json<UpdateCharacterRequest>,
) -> Result<Json<Character>, ApiError> {
    request.validate()?;

    let repo = CharacterRepository::new(state.pool.clone());
    let character: Character = repo
        .find_by_id(character_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Character not found".to_string()))?
        .into();

    if !access::is_character_controller(user_auth.user_id, &character) {
        return Err(ApiError::Forbidden(
            "Only the character's player may update it".to_string(),
        ));
    }

    let is_npc = request.is_npc.unwrap_or(character.is_npc);
    let player_id = Character::resolve_player(is_npc, user_auth.user_id);

    let updated: Character = repo
        .update_character(
            character_id,
            request.name.as_deref(),
            request.description.as_deref(),
            request.image_url.as_deref(),
            is_npc,
            player_id,
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Character not found".to_string()))?
        .into();

    // A player toggled on/off changes who counts as a campaign member
    if let Some(campaign_id) = updated.campaign_id {
        state.access.invalidate(user_auth.user_id, campaign_id);
    }

    tracing::info!(
        character_id = %character_id,
        user_id = %user_auth.user_id,
        is_npc = updated.is_npc,
        "Character updated"
    );

    Ok(Json(updated))
}

/// Delete a character. Controller only.
///
/// DELETE /api/v1/characters/:character_id
pub async fn delete_character(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(character_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = CharacterRepository::new(state.pool.clone());
    let character: Character = repo
        .find_by_id(character_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Character not found".to_string()))?
        .into();

    if !access::is_character_controller(user_auth.user_id, &character) {
        return Err(ApiError::Forbidden(
            "Only the character's player may delete it".to_string(),
        ));
    }

    repo.delete_character(character_id).await?;

    // Deleting a member character can revoke its player's campaign access
    if let (Some(player_id), Some(campaign_id)) = (character.player_id, character.campaign_id) {
        state.access.invalidate(player_id, campaign_id);
    }

    tracing::info!(
        character_id = %character_id,
        user_id = %user_auth.user_id,
        "Character deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}
