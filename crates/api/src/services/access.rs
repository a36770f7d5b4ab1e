//! Campaign access resolution.
//!
//! The single place where "may this user see this campaign" is answered.
//! Handlers call the resolver before touching nested resources (maps,
//! locations, campaign-scoped character lists); the membership query is
//! memoized per `(user, campaign)` pair and invalidated by the join/leave
//! workflow.
//!
//! Not-found and forbidden stay distinct throughout: a check against a
//! missing campaign is `NotFound`, a failed relationship is `Forbidden`.

use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use domain::models::{Campaign, Character};
use domain::services::access_cache::ReadAccessCache;
use persistence::repositories::CampaignRepository;

use crate::error::ApiError;

/// Resolves access questions against the database, memoizing campaign read
/// access. Cheap to clone; the cache is shared.
#[derive(Clone)]
pub struct AccessResolver {
    campaign_repo: CampaignRepository,
    cache: Arc<ReadAccessCache>,
}

impl AccessResolver {
    /// Creates a resolver over the given pool and shared cache.
    pub fn new(pool: PgPool, cache: Arc<ReadAccessCache>) -> Self {
        Self {
            campaign_repo: CampaignRepository::new(pool),
            cache,
        }
    }

    /// Returns the shared read-access cache.
    pub fn cache(&self) -> &Arc<ReadAccessCache> {
        &self.cache
    }

    /// May the user read the campaign (DM, or player of a member character)?
    ///
    /// Memoized. `NotFound` when the campaign row does not exist - callers
    /// must not translate that into a denial, nor the other way around.
    pub async fn has_read_access_to_campaign(
        &self,
        user_id: Uuid,
        campaign_id: Uuid,
    ) -> Result<bool, ApiError> {
        if let Some(allowed) = self.cache.get(user_id, campaign_id) {
            return Ok(allowed);
        }

        let allowed = self
            .campaign_repo
            .resolve_read_access(user_id, campaign_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Campaign not found".to_string()))?;

        self.cache.insert(user_id, campaign_id, allowed);
        Ok(allowed)
    }

    /// Requires campaign read access, erroring with `Forbidden` otherwise.
    pub async fn require_read_access(
        &self,
        user_id: Uuid,
        campaign_id: Uuid,
    ) -> Result<(), ApiError> {
        if self.has_read_access_to_campaign(user_id, campaign_id).await? {
            Ok(())
        } else {
            Err(ApiError::Forbidden(
                "You do not have access to this campaign".to_string(),
            ))
        }
    }

    /// Loads the campaign and requires the user to be its DM.
    ///
    /// Returns the campaign so handlers don't fetch it twice.
    pub async fn require_campaign_dm(
        &self,
        user_id: Uuid,
        campaign_id: Uuid,
    ) -> Result<Campaign, ApiError> {
        let campaign: Campaign = self
            .campaign_repo
            .find_by_id(campaign_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Campaign not found".to_string()))?
            .into();

        if !domain::services::access::is_campaign_dm(user_id, &campaign) {
            return Err(ApiError::Forbidden(
                "Only the campaign DM may do this".to_string(),
            ));
        }

        Ok(campaign)
    }

    /// May the user read the character?
    ///
    /// Ownership (player or creator) is checked first since it needs no
    /// further queries; otherwise read access to the character's campaign
    /// decides. A detached character is visible to its owner only.
    pub async fn can_read_character(
        &self,
        user_id: Uuid,
        character: &Character,
    ) -> Result<bool, ApiError> {
        if character.player_id == Some(user_id) || character.creator_id == user_id {
            return Ok(true);
        }

        match character.campaign_id {
            Some(campaign_id) => self.has_read_access_to_campaign(user_id, campaign_id).await,
            None => Ok(false),
        }
    }

    /// Drops the memo for one `(user, campaign)` pair.
    ///
    /// Must be called on every campaign-membership mutation so a memoized
    /// denial cannot mask a fresh membership (and vice versa).
    pub fn invalidate(&self, user_id: Uuid, campaign_id: Uuid) {
        self.cache.remove(user_id, campaign_id);
    }

    /// Drops every memo for a user.
    pub fn invalidate_user(&self, user_id: Uuid) {
        self.cache.invalidate_user(user_id);
    }
}
