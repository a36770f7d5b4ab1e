//! User repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{UserEntity, UserSessionEntity};
use crate::metrics::QueryTimer;

/// Repository for user and session database operations.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Creates a new UserRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create a new user account.
    ///
    /// `can_create` defaults false and `can_be_dm` defaults true at the
    /// schema level; both are explicit grants after that.
    pub async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
        name: Option<&str>,
    ) -> Result<UserEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_user");
        let result = sqlx::query_as::<_, UserEntity>(
            r#"
            INSERT INTO users (username, email, password_hash, name)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, email, password_hash, name, can_create, can_be_dm,
                      is_active, created_at, updated_at, last_login_at
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(name)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a user by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<UserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_user_by_id");
        let result = sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT id, username, email, password_hash, name, can_create, can_be_dm,
                   is_active, created_at, updated_at, last_login_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a user by email (login lookup).
    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_user_by_email");
        let result = sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT id, username, email, password_hash, name, can_create, can_be_dm,
                   is_active, created_at, updated_at, last_login_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// True iff the user is the DM of at least one campaign.
    pub async fn is_dm(&self, user_id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("user_is_dm");
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (SELECT 1 FROM campaigns WHERE dm_id = $1)
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Stamp a successful login.
    pub async fn update_last_login(&self, user_id: Uuid) -> Result<(), sqlx::Error> {
        let timer = QueryTimer::new("update_last_login");
        let result = sqlx::query(
            r#"
            UPDATE users SET last_login_at = NOW(), updated_at = NOW() WHERE id = $1
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map(|_| ());
        timer.record();
        result
    }

    /// Create a refresh-token session.
    pub async fn create_session(
        &self,
        user_id: Uuid,
        refresh_token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<UserSessionEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_session");
        let result = sqlx::query_as::<_, UserSessionEntity>(
            r#"
            INSERT INTO user_sessions (user_id, refresh_token_hash, expires_at)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, refresh_token_hash, expires_at, created_at, last_used_at
            "#,
        )
        .bind(user_id)
        .bind(refresh_token_hash)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a live session by refresh-token hash.
    pub async fn find_session_by_hash(
        &self,
        refresh_token_hash: &str,
    ) -> Result<Option<UserSessionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_session_by_hash");
        let result = sqlx::query_as::<_, UserSessionEntity>(
            r#"
            SELECT id, user_id, refresh_token_hash, expires_at, created_at, last_used_at
            FROM user_sessions
            WHERE refresh_token_hash = $1 AND expires_at > NOW()
            "#,
        )
        .bind(refresh_token_hash)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Rotate a session to a new refresh-token hash.
    pub async fn rotate_session(
        &self,
        session_id: Uuid,
        refresh_token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("rotate_session");
        let result = sqlx::query(
            r#"
            UPDATE user_sessions
            SET refresh_token_hash = $2, expires_at = $3, last_used_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(session_id)
        .bind(refresh_token_hash)
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map(|r| r.rows_affected());
        timer.record();
        result
    }

    /// Delete one session by refresh-token hash (logout).
    pub async fn delete_session_by_hash(
        &self,
        refresh_token_hash: &str,
    ) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_session_by_hash");
        let result = sqlx::query(
            r#"
            DELETE FROM user_sessions WHERE refresh_token_hash = $1
            "#,
        )
        .bind(refresh_token_hash)
        .execute(&self.pool)
        .await
        .map(|r| r.rows_affected());
        timer.record();
        result
    }

    /// Delete all of a user's sessions (logout everywhere).
    pub async fn delete_user_sessions(&self, user_id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_user_sessions");
        let result = sqlx::query(
            r#"
            DELETE FROM user_sessions WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map(|r| r.rows_affected());
        timer.record();
        result
    }
}
