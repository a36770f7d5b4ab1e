//! User account domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a user account in the system.
///
/// `can_create` and `can_be_dm` are always-present booleans with explicit
/// defaults (false and true respectively); permission checks never probe for
/// missing attributes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)] // Never serialize password hash to API responses
    pub password_hash: Option<String>,
    pub name: Option<String>,
    /// May create campaigns, characters, maps and locations.
    pub can_create: bool,
    /// May create campaigns and thereby become their DM.
    pub can_be_dm: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

/// Public view of a user, embedded in other responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct UserPublic {
    pub id: Uuid,
    pub username: String,
    pub name: Option<String>,
}

impl From<&User> for UserPublic {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            name: user.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            username: "dm".to_string(),
            email: "dm@example.com".to_string(),
            password_hash: Some("$argon2id$...".to_string()),
            name: Some("The DM".to_string()),
            can_create: true,
            can_be_dm: true,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            last_login_at: None,
        }
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let user = sample_user();
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("argon2id"));
    }

    #[test]
    fn test_user_public_from_user() {
        let user = sample_user();
        let public = UserPublic::from(&user);
        assert_eq!(public.id, user.id);
        assert_eq!(public.username, "dm");
        assert_eq!(public.name.as_deref(), Some("The DM"));
    }
}
