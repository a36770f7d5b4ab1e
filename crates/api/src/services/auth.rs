//! Authentication service: registration, login, token refresh, logout.
//!
//! Refresh tokens are persisted as SHA-256 hashes in `user_sessions` and
//! rotated on every refresh; access tokens are stateless.

use chrono::{Duration, Utc};
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use persistence::repositories::UserRepository;
use shared::crypto::sha256_hex;
use shared::jwt::JwtConfig;
use shared::password::{check_password_strength, hash_password, verify_password};

use crate::config::JwtAuthConfig;
use crate::middleware::user_auth::UserAuth;

/// Error type for authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Email already registered")]
    EmailAlreadyExists,

    #[error("Username already taken")]
    UsernameAlreadyExists,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Account is disabled")]
    AccountDisabled,

    #[error("{0}")]
    WeakPassword(String),

    #[error("Session not found or expired")]
    SessionNotFound,

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Password error: {0}")]
    PasswordError(String),

    #[error("Token error: {0}")]
    TokenError(String),
}

/// Result of a successful registration or login.
#[derive(Debug)]
pub struct AuthResult {
    pub user: domain::models::User,
    pub access_token: String,
    pub refresh_token: String,
    pub access_token_expires_in: i64,
}

/// Service wiring user persistence to token issuance.
pub struct AuthService {
    user_repo: UserRepository,
    jwt_config: JwtConfig,
    refresh_token_expiry_secs: i64,
}

impl AuthService {
    /// Creates an AuthService over the given pool and JWT settings.
    pub fn new(pool: PgPool, jwt: &JwtAuthConfig) -> Result<Self, AuthError> {
        let jwt_config = UserAuth::create_jwt_config(jwt).map_err(AuthError::TokenError)?;
        Ok(Self {
            user_repo: UserRepository::new(pool),
            jwt_config,
            refresh_token_expiry_secs: jwt.refresh_token_expiry_secs,
        })
    }

    /// Register a new user account and open a session.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        name: Option<&str>,
    ) -> Result<AuthResult, AuthError> {
        check_password_strength(password).map_err(AuthError::WeakPassword)?;

        if self.user_repo.find_by_email(email).await?.is_some() {
            return Err(AuthError::EmailAlreadyExists);
        }

        let password_hash =
            hash_password(password).map_err(|e| AuthError::PasswordError(e.to_string()))?;

        let user = self
            .user_repo
            .create_user(username, email, &password_hash, name)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db_err)
                    if db_err.code().as_deref() == Some("23505") =>
                {
                    // users has two unique columns; email was checked above
                    AuthError::UsernameAlreadyExists
                }
                _ => AuthError::DatabaseError(e),
            })?;

        self.open_session(user.into()).await
    }

    /// Log in with email and password.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResult, AuthError> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let password_hash = user
            .password_hash
            .as_deref()
            .ok_or(AuthError::InvalidCredentials)?;

        let matches = verify_password(password, password_hash)
            .map_err(|e| AuthError::PasswordError(e.to_string()))?;
        if !matches {
            return Err(AuthError::InvalidCredentials);
        }

        if !user.is_active {
            return Err(AuthError::AccountDisabled);
        }

        self.user_repo.update_last_login(user.id).await?;

        self.open_session(user.into()).await
    }

    /// Exchange a refresh token for a fresh token pair, rotating the
    /// stored session.
    pub async fn refresh(&self, refresh_token: &str) -> Result<AuthResult, AuthError> {
        let claims = self
            .jwt_config
            .validate_refresh_token(refresh_token)
            .map_err(|_| AuthError::SessionNotFound)?;
        let user_id =
            shared::jwt::extract_user_id(&claims).map_err(|_| AuthError::SessionNotFound)?;

        let session = self
            .user_repo
            .find_session_by_hash(&sha256_hex(refresh_token))
            .await?
            .ok_or(AuthError::SessionNotFound)?;

        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::SessionNotFound)?;
        if !user.is_active {
            return Err(AuthError::AccountDisabled);
        }

        let (access_token, _) = self
            .jwt_config
            .generate_access_token(user_id)
            .map_err(|e| AuthError::TokenError(e.to_string()))?;
        let (new_refresh_token, _) = self
            .jwt_config
            .generate_refresh_token(user_id)
            .map_err(|e| AuthError::TokenError(e.to_string()))?;

        let expires_at = Utc::now() + Duration::seconds(self.refresh_token_expiry_secs);
        self.user_repo
            .rotate_session(session.id, &sha256_hex(&new_refresh_token), expires_at)
            .await?;

        Ok(AuthResult {
            user: user.into(),
            access_token,
            refresh_token: new_refresh_token,
            access_token_expires_in: self.jwt_config.access_token_expiry_secs,
        })
    }

    /// Close the session behind a refresh token.
    ///
    /// With `all_devices`, every session of the token's user is closed.
    pub async fn logout(&self, refresh_token: &str, all_devices: bool) -> Result<(), AuthError> {
        if all_devices {
            let claims = self
                .jwt_config
                .validate_refresh_token(refresh_token)
                .map_err(|_| AuthError::SessionNotFound)?;
            let user_id =
                shared::jwt::extract_user_id(&claims).map_err(|_| AuthError::SessionNotFound)?;
            self.user_repo.delete_user_sessions(user_id).await?;
        } else {
            self.user_repo
                .delete_session_by_hash(&sha256_hex(refresh_token))
                .await?;
        }
        Ok(())
    }

    async fn open_session(&self, user: domain::models::User) -> Result<AuthResult, AuthError> {
        let (access_token, _) = self
            .jwt_config
            .generate_access_token(user.id)
            .map_err(|e| AuthError::TokenError(e.to_string()))?;
        let (refresh_token, _) = self
            .jwt_config
            .generate_refresh_token(user.id)
            .map_err(|e| AuthError::TokenError(e.to_string()))?;

        let expires_at = Utc::now() + Duration::seconds(self.refresh_token_expiry_secs);
        self.user_repo
            .create_session(user.id, &sha256_hex(&refresh_token), expires_at)
            .await?;

        Ok(AuthResult {
            user,
            access_token,
            refresh_token,
            access_token_expires_in: self.jwt_config.access_token_expiry_secs,
        })
    }
}

/// Fetches the acting user's row, for handlers that need permission flags.
pub async fn load_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Option<domain::models::User>, sqlx::Error> {
    let repo = UserRepository::new(pool.clone());
    Ok(repo.find_by_id(user_id).await?.map(Into::into))
}
