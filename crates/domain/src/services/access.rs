//! Access decision functions.
//!
//! Pure predicates over already-loaded models; loading the rows and caching
//! campaign read access is the API layer's job. Every function fails closed:
//! absent relationships always deny.

use uuid::Uuid;

use crate::models::{Campaign, Character, User};

/// True iff the user may create campaigns, characters, maps and locations.
pub fn can_create(user: &User) -> bool {
    user.is_active && user.can_create
}

/// True iff the user may create a campaign and become its DM.
///
/// Campaign creation requires both flags; `can_be_dm` alone grants nothing.
pub fn can_be_dm(user: &User) -> bool {
    user.is_active && user.can_be_dm
}

/// True iff the user is the campaign's DM.
pub fn is_campaign_dm(user_id: Uuid, campaign: &Campaign) -> bool {
    user_id == campaign.dm_id
}

/// True iff the user is the character's controlling player.
pub fn is_character_owner(user_id: Uuid, character: &Character) -> bool {
    character.player_id == Some(user_id)
}

/// True iff the user controls the character for mutation purposes.
///
/// The controlling player, or the creator when the character is an NPC
/// (an NPC has no player, so ownership alone would orphan it).
pub fn is_character_controller(user_id: Uuid, character: &Character) -> bool {
    if is_character_owner(user_id, character) {
        return true;
    }
    character.player_id.is_none() && character.creator_id == user_id
}

/// Location read rule.
///
/// Campaign read access is required in all cases; a hidden location is
/// additionally restricted to the DM, overriding general membership.
pub fn can_read_location(hidden: bool, is_dm: bool, has_campaign_access: bool) -> bool {
    if hidden {
        return is_dm;
    }
    has_campaign_access
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(can_create_flag: bool, can_be_dm_flag: bool) -> User {
        User {
            id: Uuid::new_v4(),
            username: "user".to_string(),
            email: "user@example.com".to_string(),
            password_hash: None,
            name: None,
            can_create: can_create_flag,
            can_be_dm: can_be_dm_flag,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            last_login_at: None,
        }
    }

    fn campaign(dm_id: Uuid) -> Campaign {
        Campaign {
            id: Uuid::new_v4(),
            name: "camp".to_string(),
            description: String::new(),
            image_url: None,
            is_active: true,
            dm_id,
            invite_code: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn character(player_id: Option<Uuid>, creator_id: Uuid) -> Character {
        Character {
            id: Uuid::new_v4(),
            name: "char".to_string(),
            description: String::new(),
            image_url: None,
            campaign_id: None,
            player_id,
            creator_id,
            is_npc: player_id.is_none(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_can_create_requires_flag() {
        assert!(can_create(&user(true, true)));
        assert!(!can_create(&user(false, true)));
    }

    #[test]
    fn test_can_create_fails_closed_for_inactive() {
        let mut u = user(true, true);
        u.is_active = false;
        assert!(!can_create(&u));
        assert!(!can_be_dm(&u));
    }

    #[test]
    fn test_can_be_dm_requires_flag() {
        assert!(can_be_dm(&user(true, true)));
        assert!(!can_be_dm(&user(true, false)));
    }

    #[test]
    fn test_is_campaign_dm_strict_equality() {
        let dm = Uuid::new_v4();
        let c = campaign(dm);
        assert!(is_campaign_dm(dm, &c));
        assert!(!is_campaign_dm(Uuid::new_v4(), &c));
    }

    #[test]
    fn test_is_character_owner() {
        let player = Uuid::new_v4();
        let c = character(Some(player), Uuid::new_v4());
        assert!(is_character_owner(player, &c));
        assert!(!is_character_owner(Uuid::new_v4(), &c));
    }

    #[test]
    fn test_owner_check_denies_for_npc() {
        let creator = Uuid::new_v4();
        let npc = character(None, creator);
        assert!(!is_character_owner(creator, &npc));
    }

    #[test]
    fn test_controller_creator_may_manage_npc() {
        let creator = Uuid::new_v4();
        let npc = character(None, creator);
        assert!(is_character_controller(creator, &npc));
        assert!(!is_character_controller(Uuid::new_v4(), &npc));
    }

    #[test]
    fn test_controller_creator_may_not_manage_claimed_character() {
        let creator = Uuid::new_v4();
        let player = Uuid::new_v4();
        let c = character(Some(player), creator);
        assert!(is_character_controller(player, &c));
        assert!(!is_character_controller(creator, &c));
    }

    #[test]
    fn test_can_read_location_hidden_dm_only() {
        // Hidden: only the DM, even with campaign access
        assert!(can_read_location(true, true, true));
        assert!(!can_read_location(true, false, true));
        // Visible: any member
        assert!(can_read_location(false, false, true));
        assert!(!can_read_location(false, false, false));
    }
}
