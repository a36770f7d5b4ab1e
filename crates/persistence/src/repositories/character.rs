//! Character repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::CharacterEntity;
use crate::metrics::QueryTimer;

/// Repository for character-related database operations.
#[derive(Clone)]
pub struct CharacterRepository {
    pool: PgPool,
}

impl CharacterRepository {
    /// Creates a new CharacterRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create a character. `player_id` is None for NPCs.
    pub async fn create_character(
        &self,
        name: &str,
        description: &str,
        image_url: Option<&str>,
        creator_id: Uuid,
        player_id: Option<Uuid>,
        is_npc: bool,
    ) -> Result<CharacterEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_character");
        let result = sqlx::query_as::<_, CharacterEntity>(
            r#"
            INSERT INTO characters (name, description, image_url, creator_id, player_id, is_npc)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, description, image_url, campaign_id, player_id, creator_id,
                      is_npc, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(image_url)
        .bind(creator_id)
        .bind(player_id)
        .bind(is_npc)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a character by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<CharacterEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_character_by_id");
        let result = sqlx::query_as::<_, CharacterEntity>(
            r#"
            SELECT id, name, description, image_url, campaign_id, player_id, creator_id,
                   is_npc, created_at, updated_at
            FROM characters
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List the user's own characters: created by or played by them.
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<CharacterEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_characters_for_user");
        let result = sqlx::query_as::<_, CharacterEntity>(
            r#"
            SELECT id, name, description, image_url, campaign_id, player_id, creator_id,
                   is_npc, created_at, updated_at
            FROM characters
            WHERE creator_id = $1 OR player_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List a campaign's characters, optionally filtered by name.
    pub async fn list_for_campaign(
        &self,
        campaign_id: Uuid,
        name_filter: Option<&str>,
    ) -> Result<Vec<CharacterEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_characters_for_campaign");
        let result = sqlx::query_as::<_, CharacterEntity>(
            r#"
            SELECT id, name, description, image_url, campaign_id, player_id, creator_id,
                   is_npc, created_at, updated_at
            FROM characters
            WHERE campaign_id = $1
              AND ($2::text IS NULL OR name ILIKE '%' || $2 || '%')
            ORDER BY name
            "#,
        )
        .bind(campaign_id)
        .bind(name_filter)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update a character's editable fields.
    ///
    /// `player_id` is always written: the NPC rule has already decided it
    /// (None for NPCs, the acting player otherwise).
    pub async fn update_character(
        &self,
        id: Uuid,
        name: Option<&str>,
        description: Option<&str>,
        image_url: Option<&str>,
        is_npc: bool,
        player_id: Option<Uuid>,
    ) -> Result<Option<CharacterEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_character");
        let result = sqlx::query_as::<_, CharacterEntity>(
            r#"
            UPDATE characters
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                image_url = COALESCE($4, image_url),
                is_npc = $5,
                player_id = $6,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, description, image_url, campaign_id, player_id, creator_id,
                      is_npc, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .bind(image_url)
        .bind(is_npc)
        .bind(player_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Attach or detach the character's campaign.
    ///
    /// Single-row atomic update; concurrent joins resolve last-write-wins,
    /// which is acceptable because a character belongs to at most one
    /// campaign and an overwrite is a legitimate outcome.
    pub async fn set_campaign(
        &self,
        id: Uuid,
        campaign_id: Option<Uuid>,
    ) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("set_character_campaign");
        let result = sqlx::query(
            r#"
            UPDATE characters SET campaign_id = $2, updated_at = NOW() WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(campaign_id)
        .execute(&self.pool)
        .await
        .map(|r| r.rows_affected());
        timer.record();
        result
    }

    /// Delete a character.
    pub async fn delete_character(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_character");
        let result = sqlx::query(
            r#"
            DELETE FROM characters WHERE id = $1
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
