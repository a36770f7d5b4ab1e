//! Authentication routes for user registration, login, and token management.

use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use persistence::repositories::UserRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;
use crate::services::auth::{AuthError, AuthResult, AuthService};

/// Request body for user registration.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct RegisterRequest {
    #[validate(custom(function = "shared::validation::validate_username"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Min 8 chars, 1 upper, 1 lower, 1 digit (checked by the auth service)
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: Option<String>,
}

/// Request body for login.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Request body for token refresh.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Request body for logout.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LogoutRequest {
    pub refresh_token: String,

    #[serde(default)]
    pub all_devices: bool,
}

/// User information in auth responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub name: Option<String>,
    pub can_create: bool,
    pub can_be_dm: bool,
    pub created_at: DateTime<Utc>,
}

/// Token information in auth responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TokensResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Response body for register/login/refresh.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct AuthResponse {
    pub user: UserResponse,
    pub tokens: TokensResponse,
}

/// Current-user response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MeResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    /// True iff the user is DM of at least one campaign.
    pub is_dm: bool,
}

fn auth_response(result: AuthResult) -> AuthResponse {
    AuthResponse {
        user: UserResponse {
            id: result.user.id,
            username: result.user.username,
            email: result.user.email,
            name: result.user.name,
            can_create: result.user.can_create,
            can_be_dm: result.user.can_be_dm,
            created_at: result.user.created_at,
        },
        tokens: TokensResponse {
            access_token: result.access_token,
            refresh_token: result.refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: result.access_token_expires_in,
        },
    }
}

fn map_auth_error(error: AuthError) -> ApiError {
    match error {
        AuthError::EmailAlreadyExists => ApiError::Conflict("Email already registered".to_string()),
        AuthError::UsernameAlreadyExists => ApiError::Conflict("Username already taken".to_string()),
        AuthError::InvalidCredentials => {
            ApiError::Unauthorized("Invalid email or password".to_string())
        }
        AuthError::AccountDisabled => ApiError::Forbidden("Account is disabled".to_string()),
        AuthError::WeakPassword(msg) => ApiError::Validation(msg),
        AuthError::SessionNotFound => {
            ApiError::Unauthorized("Session not found or expired".to_string())
        }
        AuthError::DatabaseError(e) => ApiError::from(e),
        AuthError::PasswordError(e) => ApiError::Internal(format!("Password error: {}", e)),
        AuthError::TokenError(e) => ApiError::Internal(format!("Token error: {}", e)),
    }
}

/// Register a new user with email and password.
///
/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    request.validate()?;

    let auth_service = AuthService::new(state.pool.clone(), &state.config.jwt)
        .map_err(|e| ApiError::Internal(format!("Failed to initialize auth service: {}", e)))?;

    let result = auth_service
        .register(
            &request.username,
            &request.email,
            &request.password,
            request.name.as_deref(),
        )
        .await
        .map_err(map_auth_error)?;

    tracing::info!(user_id = %result.user.id, username = %result.user.username, "User registered");

    Ok((StatusCode::CREATED, Json(auth_response(result))))
}

/// Log in with email and password.
///
/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    request.validate()?;

    let auth_service = AuthService::new(state.pool.clone(), &state.config.jwt)
        .map_err(|e| ApiError::Internal(format!("Failed to initialize auth service: {}", e)))?;

    let result = auth_service
        .login(&request.email, &request.password)
        .await
        .map_err(map_auth_error)?;

    tracing::info!(user_id = %result.user.id, "User logged in");

    Ok(Json(auth_response(result)))
}

/// Exchange a refresh token for a fresh token pair.
///
/// POST /api/v1/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    Json(request): Json<RefreshRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let auth_service = AuthService::new(state.pool.clone(), &state.config.jwt)
        .map_err(|e| ApiError::Internal(format!("Failed to initialize auth service: {}", e)))?;

    let result = auth_service
        .refresh(&request.refresh_token)
        .await
        .map_err(map_auth_error)?;

    Ok(Json(auth_response(result)))
}

/// Close the current session (or all of the user's sessions).
///
/// POST /api/v1/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    Json(request): Json<LogoutRequest>,
) -> Result<StatusCode, ApiError> {
    let auth_service = AuthService::new(state.pool.clone(), &state.config.jwt)
        .map_err(|e| ApiError::Internal(format!("Failed to initialize auth service: {}", e)))?;

    auth_service
        .logout(&request.refresh_token, request.all_devices)
        .await
        .map_err(map_auth_error)?;

    Ok(StatusCode::NO_CONTENT)
}

/// Current authenticated user.
///
/// GET /api/v1/auth/me
pub async fn me(
    State(state): State<AppState>,
    user_auth: UserAuth,
) -> Result<Json<MeResponse>, ApiError> {
    let repo = UserRepository::new(state.pool.clone());

    let user: domain::models::User = repo
        .find_by_id(user_auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?
        .into();

    let is_dm = repo.is_dm(user.id).await?;

    Ok(Json(MeResponse {
        user: UserResponse {
            id: user.id,
            username: user.username,
            email: user.email,
            name: user.name,
            can_create: user.can_create,
            can_be_dm: user.can_be_dm,
            created_at: user.created_at,
        },
        is_dm,
    }))
}
