//! User JWT authentication extractor.
//!
//! Provides an Axum extractor for validating JWT tokens from requests.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::user_auth::UserAuth as UserAuthData;

/// Authenticated user information from JWT.
///
/// Validates the Bearer token in the Authorization header (or picks up the
/// identity the auth middleware already verified) and hands the handler the
/// acting user's ID.
#[derive(Debug, Clone)]
pub struct UserAuth {
    /// User ID from the JWT subject claim.
    pub user_id: Uuid,
    /// JWT ID (jti) for session tracking.
    pub jti: String,
}

impl From<UserAuthData> for UserAuth {
    fn from(data: UserAuthData) -> Self {
        Self {
            user_id: data.user_id,
            jti: data.jti,
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for UserAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Auth middleware may have validated the token already
        if let Some(auth) = parts.extensions.get::<UserAuthData>() {
            return Ok(auth.clone().into());
        }

        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

        if !auth_header.starts_with("Bearer ") {
            return Err(ApiError::Unauthorized(
                "Invalid Authorization header format".to_string(),
            ));
        }

        let token = &auth_header[7..];

        let jwt_config =
            UserAuthData::create_jwt_config(&state.config.jwt).map_err(ApiError::Internal)?;

        let auth_data = UserAuthData::validate(&jwt_config, token)
            .map_err(|_| ApiError::Unauthorized("Invalid or expired token".to_string()))?;

        Ok(auth_data.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_auth_from_data() {
        let data = UserAuthData {
            user_id: Uuid::new_v4(),
            jti: "test_jti".to_string(),
        };
        let auth: UserAuth = data.clone().into();
        assert_eq!(auth.user_id, data.user_id);
        assert_eq!(auth.jti, "test_jti");
    }
}
