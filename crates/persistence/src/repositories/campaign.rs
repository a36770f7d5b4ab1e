//! Campaign repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{CampaignEntity, CampaignWithCountsEntity};
use crate::metrics::QueryTimer;

/// Repository for campaign-related database operations.
#[derive(Clone)]
pub struct CampaignRepository {
    pool: PgPool,
}

impl CampaignRepository {
    /// Creates a new CampaignRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create a campaign. The creator becomes its DM; the invite code is
    /// assigned here and stays until the DM rotates it.
    pub async fn create_campaign(
        &self,
        name: &str,
        description: &str,
        image_url: Option<&str>,
        dm_id: Uuid,
        invite_code: Uuid,
    ) -> Result<CampaignEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_campaign");
        let result = sqlx::query_as::<_, CampaignEntity>(
            r#"
            INSERT INTO campaigns (name, description, image_url, dm_id, invite_code)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, description, image_url, is_active, dm_id, invite_code,
                      created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(image_url)
        .bind(dm_id)
        .bind(invite_code)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a campaign by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<CampaignEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_campaign_by_id");
        let result = sqlx::query_as::<_, CampaignEntity>(
            r#"
            SELECT id, name, description, image_url, is_active, dm_id, invite_code,
                   created_at, updated_at
            FROM campaigns
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a campaign by ID with character and map counts.
    pub async fn find_by_id_with_counts(
        &self,
        id: Uuid,
    ) -> Result<Option<CampaignWithCountsEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_campaign_with_counts");
        let result = sqlx::query_as::<_, CampaignWithCountsEntity>(
            r#"
            SELECT
                c.id, c.name, c.description, c.image_url, c.is_active, c.dm_id,
                c.invite_code, c.created_at, c.updated_at,
                (SELECT COUNT(*) FROM characters ch WHERE ch.campaign_id = c.id) AS character_count,
                (SELECT COUNT(*) FROM maps m WHERE m.campaign_id = c.id) AS map_count
            FROM campaigns c
            WHERE c.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a campaign by its invite code.
    pub async fn find_by_invite_code(
        &self,
        invite_code: Uuid,
    ) -> Result<Option<CampaignEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_campaign_by_invite_code");
        let result = sqlx::query_as::<_, CampaignEntity>(
            r#"
            SELECT id, name, description, image_url, is_active, dm_id, invite_code,
                   created_at, updated_at
            FROM campaigns
            WHERE invite_code = $1 AND is_active = true
            "#,
        )
        .bind(invite_code)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List active campaigns visible to the user: DM of, or playing in.
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<CampaignWithCountsEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_campaigns_for_user");
        let result = sqlx::query_as::<_, CampaignWithCountsEntity>(
            r#"
            SELECT
                c.id, c.name, c.description, c.image_url, c.is_active, c.dm_id,
                c.invite_code, c.created_at, c.updated_at,
                (SELECT COUNT(*) FROM characters ch WHERE ch.campaign_id = c.id) AS character_count,
                (SELECT COUNT(*) FROM maps m WHERE m.campaign_id = c.id) AS map_count
            FROM campaigns c
            WHERE c.is_active = true
              AND (
                    c.dm_id = $1
                    OR EXISTS (
                        SELECT 1 FROM characters ch
                        WHERE ch.campaign_id = c.id AND ch.player_id = $1
                    )
              )
            ORDER BY c.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// The membership query behind campaign read access: is the user the DM,
    /// or the player of at least one character in the campaign?
    ///
    /// Returns None when the campaign row does not exist, so callers can
    /// keep not-found distinct from denied.
    pub async fn resolve_read_access(
        &self,
        user_id: Uuid,
        campaign_id: Uuid,
    ) -> Result<Option<bool>, sqlx::Error> {
        let timer = QueryTimer::new("resolve_campaign_read_access");
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT c.dm_id = $1
                OR EXISTS (
                    SELECT 1 FROM characters ch
                    WHERE ch.campaign_id = c.id AND ch.player_id = $1
                )
            FROM campaigns c
            WHERE c.id = $2
            "#,
        )
        .bind(user_id)
        .bind(campaign_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update a campaign. Unset fields keep their current values.
    pub async fn update_campaign(
        &self,
        id: Uuid,
        name: Option<&str>,
        description: Option<&str>,
        image_url: Option<&str>,
        is_active: Option<bool>,
    ) -> Result<Option<CampaignEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_campaign");
        let result = sqlx::query_as::<_, CampaignEntity>(
            r#"
            UPDATE campaigns
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                image_url = COALESCE($4, image_url),
                is_active = COALESCE($5, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, description, image_url, is_active, dm_id, invite_code,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .bind(image_url)
        .bind(is_active)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Rotate the invite code. Returns the new code.
    pub async fn rotate_invite_code(
        &self,
        id: Uuid,
        invite_code: Uuid,
    ) -> Result<Option<Uuid>, sqlx::Error> {
        let timer = QueryTimer::new("rotate_invite_code");
        let result = sqlx::query_scalar::<_, Uuid>(
            r#"
            UPDATE campaigns
            SET invite_code = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING invite_code
            "#,
        )
        .bind(id)
        .bind(invite_code)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a campaign. Characters are detached by the FK (SET NULL);
    /// maps and locations cascade.
    pub async fn delete_campaign(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_campaign");
        let result = sqlx::query(
            r#"
            DELETE FROM campaigns WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map(|r| r.rows_affected());
        timer.record();
        result
    }
}
