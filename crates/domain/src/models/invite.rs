//! Invite-code join models.
//!
//! The invite code is a capability token, not an identity check: anyone the
//! DM shares it with may use it, but only a character's own player can
//! complete the join.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Request to join a campaign using an invite code.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct JoinCampaignRequest {
    /// Campaign invite code (UUID).
    #[validate(custom(function = "validate_invite_code"))]
    pub invite_code: String,
}

impl JoinCampaignRequest {
    /// Parses the code; None when it is not a well-formed UUID.
    pub fn code(&self) -> Option<Uuid> {
        Uuid::parse_str(self.invite_code.trim()).ok()
    }
}

/// Validates that an invite code is a well-formed UUID.
///
/// Malformed codes are rejected as validation errors before any campaign
/// lookup runs; a well-formed code matching no campaign is a different
/// failure (`invalid_invite_code`).
pub fn validate_invite_code(code: &str) -> Result<(), ValidationError> {
    if Uuid::parse_str(code.trim()).is_ok() {
        Ok(())
    } else {
        let mut err = ValidationError::new("invite_code_format");
        err.message = Some("Invite code must be a UUID".into());
        Err(err)
    }
}

/// Response after regenerating a campaign's invite code.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct InviteCodeResponse {
    pub campaign_id: Uuid,
    pub invite_code: Uuid,
}

/// Generates a fresh invite code.
pub fn generate_invite_code() -> Uuid {
    Uuid::new_v4()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_invite_code_accepts_uuid() {
        let request = JoinCampaignRequest {
            invite_code: Uuid::new_v4().to_string(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_validate_invite_code_accepts_surrounding_whitespace() {
        let request = JoinCampaignRequest {
            invite_code: format!("  {}  ", Uuid::new_v4()),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_validate_invite_code_rejects_garbage() {
        for bad in ["", "not-a-uuid", "1234", "xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx"] {
            let request = JoinCampaignRequest {
                invite_code: bad.to_string(),
            };
            assert!(request.validate().is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_code_round_trips() {
        let code = Uuid::new_v4();
        let request = JoinCampaignRequest {
            invite_code: code.to_string(),
        };
        assert!(request.validate().is_ok());
        assert_eq!(request.code(), Some(code));
    }

    #[test]
    fn test_generate_invite_code_uniqueness() {
        let codes: std::collections::HashSet<_> =
            (0..100).map(|_| generate_invite_code()).collect();
        assert_eq!(codes.len(), 100);
    }
}
